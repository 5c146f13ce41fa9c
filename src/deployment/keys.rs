//! Environment variable names shared by the reader and writer sides.

/// Prefix for every deployment variable.
pub const PREFIX: &str = "CLICKONCE_";

/// Upper bound on `ACTIVATIONDATA_<n>` probes.
pub const MAX_ACTIVATION_DATA: usize = 1024;

/// A scalar deployment field carried in the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvKey {
    IsNetworkDeployed,
    CurrentVersion,
    UpdatedVersion,
    UpdateLocation,
    UpdatedApplicationFullName,
    TimeOfLastUpdateCheck,
    ActivationUri,
    DataDirectory,
}

impl EnvKey {
    /// Every scalar key, in the order the bootstrapper writes them.
    pub const ALL: [EnvKey; 8] = [
        EnvKey::IsNetworkDeployed,
        EnvKey::CurrentVersion,
        EnvKey::UpdatedVersion,
        EnvKey::UpdateLocation,
        EnvKey::UpdatedApplicationFullName,
        EnvKey::TimeOfLastUpdateCheck,
        EnvKey::ActivationUri,
        EnvKey::DataDirectory,
    ];

    /// Full variable name, including [`PREFIX`].
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::IsNetworkDeployed => "CLICKONCE_ISNETWORKDEPLOYED",
            EnvKey::CurrentVersion => "CLICKONCE_CURRENTVERSION",
            EnvKey::UpdatedVersion => "CLICKONCE_UPDATEDVERSION",
            EnvKey::UpdateLocation => "CLICKONCE_UPDATELOCATION",
            EnvKey::UpdatedApplicationFullName => "CLICKONCE_UPDATEDAPPLICATIONFULLNAME",
            EnvKey::TimeOfLastUpdateCheck => "CLICKONCE_TIMEOFLASTUPDATECHECK",
            EnvKey::ActivationUri => "CLICKONCE_ACTIVATIONURI",
            EnvKey::DataDirectory => "CLICKONCE_DATADIRECTORY",
        }
    }
}

/// Variable name for the 1-based activation data item `index`.
pub fn activation_data_key(index: usize) -> String {
    format!("{}ACTIVATIONDATA_{}", PREFIX, index)
}

/// Whether a variable name belongs to the deployment namespace.
pub fn is_deployment_key(name: &str) -> bool {
    name.starts_with(PREFIX)
}
