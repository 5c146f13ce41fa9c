//! Shared report formatting for `show`, `check` and `update`.

use serde::Serialize;
use std::fmt::Display;

use crate::deployment::{DeploymentContext, Version, TIMESTAMP_FORMAT};
use crate::ui::UserInterface;
use crate::updates::UpdateVerdict;

/// Width of the label column in key/value reports.
pub const LABEL_WIDTH: usize = 21;

/// Format one `label : value` line.
pub fn field_line(label: &str, value: impl Display) -> String {
    format!("{:<width$}: {}", label, value, width = LABEL_WIDTH)
}

fn optional<T: Display>(value: Option<&T>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}

/// Report lines for a deployment context.
pub fn context_lines(context: &DeploymentContext) -> Vec<String> {
    let mut lines = vec![
        field_line("Base directory", context.base_directory.display()),
        field_line("Target framework", &context.target_framework),
        field_line("Network deployed", context.is_network_deployed),
        field_line("Current version", optional(context.current_version.as_ref())),
        field_line("Updated version", optional(context.updated_version.as_ref())),
        field_line("Update location", optional(context.update_location.as_ref())),
        field_line(
            "Updated application",
            optional(context.updated_application_full_name.as_ref()),
        ),
        field_line(
            "Last update check",
            context
                .time_of_last_update_check
                .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_default(),
        ),
        field_line("Activation URI", optional(context.activation_uri.as_ref())),
        field_line("Data directory", optional(context.data_directory.as_ref())),
    ];

    if context.activation_data.is_empty() {
        lines.push(field_line("Activation data", ""));
    } else {
        for (i, item) in context.activation_data.iter().enumerate() {
            lines.push(field_line(&format!("Activation data[{}]", i), item));
        }
    }
    lines
}

/// Serializable form of an [`UpdateVerdict`] with its derived flags.
#[derive(Debug, Serialize)]
pub struct VerdictReport {
    pub current: Option<Version>,
    pub latest: Version,
    pub minimum: Option<Version>,
    pub update_available: bool,
    pub mandatory: bool,
}

impl From<&UpdateVerdict> for VerdictReport {
    fn from(verdict: &UpdateVerdict) -> Self {
        Self {
            current: verdict.current,
            latest: verdict.latest,
            minimum: verdict.minimum,
            update_available: verdict.is_update_available(),
            mandatory: verdict.is_mandatory(),
        }
    }
}

/// JSON form of a deployment context, with the application name the
/// update location implies.
#[derive(Debug, Serialize)]
pub struct ContextReport<'a> {
    #[serde(flatten)]
    pub context: &'a DeploymentContext,
    pub application_name: Option<String>,
}

impl<'a> From<&'a DeploymentContext> for ContextReport<'a> {
    fn from(context: &'a DeploymentContext) -> Self {
        Self {
            context,
            application_name: context.application_name(),
        }
    }
}

/// Report lines for an update verdict.
pub fn verdict_lines(verdict: &UpdateVerdict) -> Vec<String> {
    vec![
        field_line("Current version", optional(verdict.current.as_ref())),
        field_line("Latest version", verdict.latest),
        field_line("Minimum version", optional(verdict.minimum.as_ref())),
        field_line("Update available", verdict.is_update_available()),
        field_line("Mandatory update", verdict.is_mandatory()),
    ]
}

/// Print the raw `CLICKONCE_*` variables.
pub fn show_environment(ui: &mut dyn UserInterface, vars: &[(String, String)]) {
    ui.show_header("Environment");
    if vars.is_empty() {
        ui.message("(no deployment variables set)");
    }
    for (key, value) in vars {
        ui.message(&format!("{}={}", key, value));
    }
}

/// Print the deployment context report.
pub fn show_context(ui: &mut dyn UserInterface, context: &DeploymentContext) {
    ui.show_header("Deployment");
    for line in context_lines(context) {
        ui.message(&line);
    }
}

/// Print the latest-version report.
pub fn show_verdict(ui: &mut dyn UserInterface, verdict: &UpdateVerdict) {
    ui.show_header("Latest version");
    for line in verdict_lines(verdict) {
        ui.message(&line);
    }
}
