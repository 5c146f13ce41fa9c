//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands, ShowArgs, UpdateArgs};
use crate::config::Settings;
use crate::deployment::DeploymentContext;
use crate::error::Result;
use crate::ui::UserInterface;

use super::check::CheckCommand;
use super::completions::CompletionsCommand;
use super::launch::LaunchCommand;
use super::show::ShowCommand;
use super::update::UpdateCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Exit code for the process. Codes outside `0..=255` (a child's
    /// Windows status, say) become 1 rather than wrapping to success.
    pub fn process_exit_code(&self) -> u8 {
        u8::try_from(self.exit_code).unwrap_or(1)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: DeploymentContext,
    settings: Settings,
}

impl CommandDispatcher {
    /// Create a dispatcher for a context and settings.
    pub fn new(context: DeploymentContext, settings: Settings) -> Self {
        Self { context, settings }
    }

    /// The deployment context commands operate on.
    pub fn context(&self) -> &DeploymentContext {
        &self.context
    }

    /// Dispatch and execute a command.
    ///
    /// Without a subcommand, dumps the raw deployment variables, shows the
    /// context and then offers an update, the way the interactive console
    /// flow always has.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Show(args)) => {
                ShowCommand::new(self.context.clone(), args.clone()).execute(ui)
            }
            Some(Commands::Check(args)) => CheckCommand::new(
                self.context.clone(),
                self.settings.clone(),
                args.clone(),
            )
            .execute(ui),
            Some(Commands::Update(args)) => UpdateCommand::new(
                self.context.clone(),
                self.settings.clone(),
                args.clone(),
            )
            .execute(ui),
            Some(Commands::Launch(args)) => LaunchCommand::new(
                self.context.clone(),
                self.settings.clone(),
                args.clone(),
            )
            .execute(ui),
            Some(Commands::Completions(args)) => {
                CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => {
                let args = ShowArgs {
                    env: true,
                    ..Default::default()
                };
                let show = ShowCommand::new(self.context.clone(), args);
                let shown = show.execute(ui)?;
                if !shown.success {
                    return Ok(shown);
                }
                UpdateCommand::new(
                    self.context.clone(),
                    self.settings.clone(),
                    UpdateArgs::default(),
                )
                .execute(ui)
            }
        }
    }
}
