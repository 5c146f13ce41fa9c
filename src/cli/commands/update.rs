//! Update command implementation.
//!
//! `deployinfo update` checks for a newer version and, once confirmed,
//! starts the configured updater with the deployment context injected.

use crate::cli::args::UpdateArgs;
use crate::config::Settings;
use crate::deployment::DeploymentContext;
use crate::error::Result;
use crate::launcher::ProcessLauncher;
use crate::ui::{Prompt, UserInterface};
use crate::updates::UpdateVerdict;

use super::check::{explain_missing_verdict, fetch_verdict};
use super::dispatcher::{Command, CommandResult};
use super::display;

/// Prompt key for the update confirmation.
pub const UPDATE_PROMPT_KEY: &str = "update";

/// The update command implementation.
pub struct UpdateCommand {
    context: DeploymentContext,
    settings: Settings,
    args: UpdateArgs,
}

impl UpdateCommand {
    /// Create a new update command.
    pub fn new(context: DeploymentContext, settings: Settings, args: UpdateArgs) -> Self {
        Self {
            context,
            settings,
            args,
        }
    }

    fn confirm(&self, verdict: &UpdateVerdict, ui: &mut dyn UserInterface) -> Result<bool> {
        if self.args.yes {
            return Ok(true);
        }
        let prompt = Prompt {
            key: UPDATE_PROMPT_KEY.to_string(),
            question: format!("Update to {} now?", verdict.latest),
            default: Some("no".to_string()),
        };
        Ok(ui.prompt(&prompt)?.is_yes())
    }

    fn run_updater(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let spec = self.settings.updater.launch_spec(&self.context);
        ui.message("Updating...");

        let mut launcher =
            ProcessLauncher::system().with_policy(self.settings.launcher.retry_policy());
        match launcher.launch(&spec) {
            Ok(launched) => {
                ui.success(&format!(
                    "Started updater: {} (attempt {})",
                    spec.display(),
                    launched.attempts
                ));
                Ok(CommandResult::success())
            }
            Err(e) => {
                ui.error(&e.to_string());
                Ok(CommandResult::failure(1))
            }
        }
    }
}

impl Command for UpdateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(verdict) = fetch_verdict(&self.context, &self.settings, ui, true)? else {
            explain_missing_verdict(&self.context, ui);
            return Ok(CommandResult::success());
        };

        display::show_verdict(ui, &verdict);

        if !verdict.is_update_available() {
            ui.success("Already running the latest version");
            return Ok(CommandResult::success());
        }
        if verdict.is_mandatory() {
            ui.warning(&format!(
                "Version {} is below the minimum supported version",
                verdict
                    .current
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "(unknown)".to_string())
            ));
        }

        if !self.confirm(&verdict, ui)? {
            ui.message("Update skipped.");
            return Ok(CommandResult::success());
        }

        self.run_updater(ui)
    }
}
