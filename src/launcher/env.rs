//! Child-process environment built from a deployment context.
//!
//! This is the writer side of the `CLICKONCE_*` schema: the launcher hands
//! the context it knows about to the process it starts, and that process
//! reads it back with [`ContextBuilder`](crate::deployment::ContextBuilder).

use std::collections::BTreeMap;

use crate::deployment::{activation_data_key, DeploymentContext, EnvKey, TIMESTAMP_FORMAT};

/// Environment variables describing `context`.
///
/// Fields that are unset are left out entirely; nothing is written as an
/// empty string on their behalf. The network-deployed flag is always set.
pub fn child_environment(context: &DeploymentContext) -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    let mut put = |key: EnvKey, value: Option<String>| {
        if let Some(value) = value {
            env.insert(key.as_str().to_string(), value);
        }
    };

    put(
        EnvKey::IsNetworkDeployed,
        Some(if context.is_network_deployed { "True" } else { "False" }.to_string()),
    );
    put(
        EnvKey::CurrentVersion,
        context.current_version.map(|v| v.to_string()),
    );
    put(
        EnvKey::UpdatedVersion,
        context.updated_version.map(|v| v.to_string()),
    );
    put(
        EnvKey::UpdateLocation,
        context.update_location.as_ref().map(ToString::to_string),
    );
    put(
        EnvKey::UpdatedApplicationFullName,
        context.updated_application_full_name.clone(),
    );
    put(
        EnvKey::TimeOfLastUpdateCheck,
        context
            .time_of_last_update_check
            .map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
    );
    put(
        EnvKey::ActivationUri,
        context.activation_uri.as_ref().map(ToString::to_string),
    );
    put(EnvKey::DataDirectory, context.data_directory.clone());

    for (i, item) in context.activation_data.iter().enumerate() {
        env.insert(activation_data_key(i + 1), item.clone());
    }

    env
}
