//! Settings file schema.
//!
//! Every field has a default, so an empty file (or no file) is valid.
//! Unknown fields are rejected to catch typos.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::deployment::DeploymentContext;
use crate::launcher::{LaunchSpec, RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};
use crate::updates::DEFAULT_TIMEOUT;

/// Placeholder in updater arguments replaced by the update location.
pub const UPDATE_LOCATION_PLACEHOLDER: &str = "{update_location}";

/// Root of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Manifest fetching.
    pub fetch: FetchSettings,

    /// Process start retries.
    pub launcher: LauncherSettings,

    /// Command that performs the update.
    pub updater: UpdaterSettings,
}

/// Manifest fetch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchSettings {
    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent header for remote manifests.
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            user_agent: "deployinfo".to_string(),
        }
    }
}

impl FetchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Launch retry settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherSettings {
    /// Start attempts before giving up.
    pub max_attempts: u32,

    /// Wait between attempts, in milliseconds.
    pub retry_delay_ms: u64,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY.as_millis() as u64,
        }
    }
}

impl LauncherSettings {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.retry_delay_ms))
    }
}

/// The external updater invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdaterSettings {
    /// Program to run.
    pub program: String,

    /// Arguments; `{update_location}` is substituted.
    pub args: Vec<String>,
}

impl Default for UpdaterSettings {
    fn default() -> Self {
        Self {
            program: "rundll32.exe".to_string(),
            args: vec![
                "dfshim.dll,ShOpenVerbApplication".to_string(),
                UPDATE_LOCATION_PLACEHOLDER.to_string(),
            ],
        }
    }
}

impl UpdaterSettings {
    /// The updater command for `context`, with the context injected.
    ///
    /// The placeholder becomes an empty string when there is no update
    /// location.
    pub fn launch_spec(&self, context: &DeploymentContext) -> LaunchSpec {
        let location = context
            .update_location
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let args = self
            .args
            .iter()
            .map(|arg| arg.replace(UPDATE_LOCATION_PLACEHOLDER, &location))
            .collect();
        LaunchSpec::new(self.program.clone(), args).with_context(context)
    }
}
