//! Check command implementation.
//!
//! `deployinfo check` fetches the manifest at the update location and
//! prints the latest-version report.

use crate::cli::args::CheckArgs;
use crate::config::Settings;
use crate::deployment::DeploymentContext;
use crate::error::{Error, Result};
use crate::ui::UserInterface;
use crate::updates::{check_for_updates, ManifestFetcher, UpdateVerdict};

use super::dispatcher::{Command, CommandResult};
use super::display::{self, VerdictReport};

/// The check command implementation.
pub struct CheckCommand {
    context: DeploymentContext,
    settings: Settings,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(context: DeploymentContext, settings: Settings, args: CheckArgs) -> Self {
        Self {
            context,
            settings,
            args,
        }
    }
}

/// Fetch and evaluate the manifest for `context`.
///
/// `progress` controls whether a spinner is shown while fetching, and in
/// verbose mode the manifest location. Nothing is shown when there is
/// nowhere to fetch from.
pub(crate) fn fetch_verdict(
    context: &DeploymentContext,
    settings: &Settings,
    ui: &mut dyn UserInterface,
    progress: bool,
) -> Result<Option<UpdateVerdict>> {
    let fetcher =
        ManifestFetcher::with_options(settings.fetch.timeout(), &settings.fetch.user_agent)?;

    let source = context
        .update_location
        .as_ref()
        .filter(|_| context.is_network_deployed);
    let Some(location) = source.filter(|_| progress) else {
        return check_for_updates(context, &fetcher);
    };

    if ui.output_mode().shows_details() {
        ui.message(&format!("Manifest location: {}", location));
    }
    let mut spinner = ui.start_spinner("Checking for updates...");
    match check_for_updates(context, &fetcher) {
        Ok(verdict) => {
            spinner.finish_clear();
            Ok(verdict)
        }
        Err(e) => {
            spinner.finish_error("Update check failed");
            Err(e)
        }
    }
}

/// Explain why there is nothing to report.
pub(crate) fn explain_missing_verdict(context: &DeploymentContext, ui: &mut dyn UserInterface) {
    if !context.is_network_deployed {
        ui.message("Not network deployed; nothing to check.");
    } else if context.update_location.is_none() {
        ui.message("No update location; nothing to check.");
    } else {
        ui.message("No manifest available at the update location.");
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let verdict = fetch_verdict(&self.context, &self.settings, ui, !self.args.json)?;

        if self.args.json {
            let report = verdict.as_ref().map(VerdictReport::from);
            let json =
                serde_json::to_string_pretty(&report).map_err(|e| Error::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        match verdict {
            Some(verdict) => display::show_verdict(ui, &verdict),
            None => explain_missing_verdict(&self.context, ui),
        }
        Ok(CommandResult::success())
    }
}
