//! Launch command implementation.
//!
//! `deployinfo launch` plays the bootstrapper's part: it starts a program
//! with the deployment context written into its environment.

use crate::cli::args::LaunchArgs;
use crate::config::Settings;
use crate::deployment::DeploymentContext;
use crate::error::Result;
use crate::launcher::{LaunchSpec, ProcessLauncher};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The launch command implementation.
pub struct LaunchCommand {
    context: DeploymentContext,
    settings: Settings,
    args: LaunchArgs,
}

impl LaunchCommand {
    /// Create a new launch command.
    pub fn new(context: DeploymentContext, settings: Settings, args: LaunchArgs) -> Self {
        Self {
            context,
            settings,
            args,
        }
    }

    /// The inherited context with command-line overrides applied.
    pub fn child_context(&self) -> DeploymentContext {
        let mut context = self.context.clone();
        if self.args.network_deployed {
            context.is_network_deployed = true;
        }
        if let Some(version) = self.args.current_version {
            context.current_version = Some(version);
        }
        if let Some(location) = &self.args.update_location {
            context.update_location = Some(location.clone());
        }
        if !self.args.activation_data.is_empty() {
            context.activation_data = self.args.activation_data.clone();
        }
        context
    }
}

impl Command for LaunchCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let spec = LaunchSpec::new(self.args.program.clone(), self.args.args.clone())
            .with_context(&self.child_context());

        let mut launcher =
            ProcessLauncher::system().with_policy(self.settings.launcher.retry_policy());
        let mut launched = launcher.launch(&spec)?;
        tracing::debug!("Started {} (attempt {})", spec.program, launched.attempts);

        if !self.args.wait {
            ui.success(&format!("Started {}", spec.display()));
            return Ok(CommandResult::success());
        }

        let status = launched.handle.wait()?;
        match status.code() {
            Some(0) => Ok(CommandResult::success()),
            Some(code) => Ok(CommandResult::failure(code)),
            None => {
                ui.error(&format!("{} was terminated by a signal", spec.program));
                Ok(CommandResult::failure(1))
            }
        }
    }
}
