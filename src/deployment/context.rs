//! Deployment context reconstruction.
//!
//! The bootstrapper that starts the application publishes what it knows
//! about the deployment as `CLICKONCE_*` variables. [`ContextBuilder`] reads
//! them back into a [`DeploymentContext`].
//!
//! Reconstruction is best effort: a key that is missing leaves its field
//! unset, and so does a key whose value does not parse. The producing side
//! is not under our control, so one bad value must not hide the others.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::keys::{activation_data_key, EnvKey, MAX_ACTIVATION_DATA};
use super::location::DeploymentUri;
use super::source::{EnvSource, ProcessEnv};
use super::version::Version;

/// Timestamp layout the bootstrapper writes (universal sortable).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%SZ";

/// Immutable snapshot of how this process was deployed and launched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentContext {
    pub base_directory: PathBuf,
    pub target_framework: String,
    pub is_network_deployed: bool,
    pub current_version: Option<Version>,
    pub updated_version: Option<Version>,
    pub update_location: Option<DeploymentUri>,
    pub updated_application_full_name: Option<String>,
    pub time_of_last_update_check: Option<DateTime<Utc>>,
    pub activation_uri: Option<DeploymentUri>,
    pub data_directory: Option<String>,
    pub activation_data: Vec<String>,
}

impl DeploymentContext {
    /// Build a context from the current process environment.
    pub fn from_env() -> Self {
        ContextBuilder::new(ProcessEnv).build()
    }

    /// Application name derived from the update location.
    pub fn application_name(&self) -> Option<String> {
        self.update_location
            .as_ref()
            .and_then(DeploymentUri::application_name)
    }

    /// An empty, non-deployed context rooted at `base_directory`.
    pub fn empty(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
            target_framework: default_target_framework(),
            is_network_deployed: false,
            current_version: None,
            updated_version: None,
            update_location: None,
            updated_application_full_name: None,
            time_of_last_update_check: None,
            activation_uri: None,
            data_directory: None,
            activation_data: Vec::new(),
        }
    }
}

/// Reads a [`DeploymentContext`] out of an [`EnvSource`].
///
/// # Example
///
/// ```
/// use deployinfo::deployment::ContextBuilder;
/// use std::collections::HashMap;
///
/// let mut env = HashMap::new();
/// env.insert("CLICKONCE_ISNETWORKDEPLOYED".to_string(), "True".to_string());
/// env.insert("CLICKONCE_CURRENTVERSION".to_string(), "1.0.0.3".to_string());
/// env.insert(
///     "CLICKONCE_UPDATELOCATION".to_string(),
///     "https://deploy.example.com/Contoso.application".to_string(),
/// );
///
/// let ctx = ContextBuilder::new(env).base_directory("/opt/contoso").build();
/// assert!(ctx.is_network_deployed);
/// assert_eq!(ctx.current_version.unwrap().to_string(), "1.0.0.3");
/// assert_eq!(ctx.application_name().as_deref(), Some("Contoso"));
/// ```
pub struct ContextBuilder<S> {
    source: S,
    base_directory: Option<PathBuf>,
    target_framework: Option<String>,
}

impl<S: EnvSource> ContextBuilder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            base_directory: None,
            target_framework: None,
        }
    }

    /// Override the base directory (defaults to the executable's directory).
    pub fn base_directory(mut self, dir: impl AsRef<Path>) -> Self {
        self.base_directory = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Override the target framework identifier.
    pub fn target_framework(mut self, target: impl Into<String>) -> Self {
        self.target_framework = Some(target.into());
        self
    }

    pub fn build(self) -> DeploymentContext {
        let source = &self.source;

        DeploymentContext {
            base_directory: self.base_directory.unwrap_or_else(default_base_directory),
            target_framework: self
                .target_framework
                .unwrap_or_else(default_target_framework),
            is_network_deployed: source
                .get(EnvKey::IsNetworkDeployed.as_str())
                .is_some_and(|v| parse_bool(&v)),
            current_version: parse_field(source, EnvKey::CurrentVersion, |v| v.parse().ok()),
            updated_version: parse_field(source, EnvKey::UpdatedVersion, |v| v.parse().ok()),
            update_location: parse_field(source, EnvKey::UpdateLocation, |v| v.parse().ok()),
            updated_application_full_name: source
                .get(EnvKey::UpdatedApplicationFullName.as_str()),
            time_of_last_update_check: parse_field(
                source,
                EnvKey::TimeOfLastUpdateCheck,
                parse_timestamp,
            ),
            activation_uri: parse_field(source, EnvKey::ActivationUri, |v| v.parse().ok()),
            data_directory: source.get(EnvKey::DataDirectory.as_str()),
            activation_data: read_activation_data(source),
        }
    }
}

/// Read `key` and convert it, dropping values that do not convert.
fn parse_field<S, T, F>(source: &S, key: EnvKey, parse: F) -> Option<T>
where
    S: EnvSource,
    F: FnOnce(&str) -> Option<T>,
{
    let raw = source.get(key.as_str())?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        tracing::debug!("Ignoring malformed {}: {:?}", key.as_str(), raw);
    }
    parsed
}

/// Collect `ACTIVATIONDATA_1`, `_2`, … up to the first missing index.
///
/// A gap ends the list: with `_1`, `_2` and `_4` set, only `_1` and `_2`
/// are returned and `_4` is never read.
fn read_activation_data<S: EnvSource>(source: &S) -> Vec<String> {
    let mut items = Vec::new();
    for index in 1..=MAX_ACTIVATION_DATA {
        match source.get(&activation_data_key(index)) {
            Some(item) => items.push(item),
            None => break,
        }
    }
    if items.len() == MAX_ACTIVATION_DATA {
        tracing::debug!(
            "Activation data truncated at {} items",
            MAX_ACTIVATION_DATA
        );
    }
    items
}

fn parse_bool(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

/// Parse a round-trippable timestamp.
///
/// Accepts RFC 3339, the bootstrapper's `YYYY-MM-DD HH:MM:SSZ`, and
/// offset-less ISO forms, which are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT) {
        return Some(naive.and_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn default_base_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default()
}

fn default_target_framework() -> String {
    format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn build(pairs: &[(&str, &str)]) -> DeploymentContext {
        ContextBuilder::new(env(pairs))
            .base_directory("/opt/app")
            .target_framework("x86_64-linux")
            .build()
    }

    /// Records every key the builder asks for.
    struct RecordingSource {
        inner: HashMap<String, String>,
        reads: RefCell<Vec<String>>,
    }

    impl EnvSource for RecordingSource {
        fn get(&self, key: &str) -> Option<String> {
            self.reads.borrow_mut().push(key.to_string());
            self.inner.get(key).cloned()
        }
    }

    #[test]
    fn empty_environment_leaves_everything_unset() {
        let ctx = build(&[]);
        assert!(!ctx.is_network_deployed);
        assert!(ctx.current_version.is_none());
        assert!(ctx.updated_version.is_none());
        assert!(ctx.update_location.is_none());
        assert!(ctx.updated_application_full_name.is_none());
        assert!(ctx.time_of_last_update_check.is_none());
        assert!(ctx.activation_uri.is_none());
        assert!(ctx.data_directory.is_none());
        assert!(ctx.activation_data.is_empty());
        assert!(ctx.application_name().is_none());
        assert_eq!(ctx.base_directory, PathBuf::from("/opt/app"));
        assert_eq!(ctx.target_framework, "x86_64-linux");
    }

    #[test]
    fn reads_every_field() {
        let ctx = build(&[
            ("CLICKONCE_ISNETWORKDEPLOYED", "True"),
            ("CLICKONCE_CURRENTVERSION", "1.0.0.3"),
            ("CLICKONCE_UPDATEDVERSION", "1.0.0.4"),
            (
                "CLICKONCE_UPDATELOCATION",
                "https://deploy.example.com/apps/Contoso.application",
            ),
            (
                "CLICKONCE_UPDATEDAPPLICATIONFULLNAME",
                "Contoso.application, Culture=neutral",
            ),
            ("CLICKONCE_TIMEOFLASTUPDATECHECK", "2024-03-05 14:30:00Z"),
            (
                "CLICKONCE_ACTIVATIONURI",
                "https://deploy.example.com/apps/Contoso.application?mode=x",
            ),
            ("CLICKONCE_DATADIRECTORY", r"C:\Users\me\Data"),
            ("CLICKONCE_ACTIVATIONDATA_1", "report.docx"),
        ]);

        assert!(ctx.is_network_deployed);
        assert_eq!(ctx.current_version.unwrap().to_string(), "1.0.0.3");
        assert_eq!(ctx.updated_version.unwrap().to_string(), "1.0.0.4");
        assert_eq!(ctx.application_name().as_deref(), Some("Contoso"));
        assert_eq!(
            ctx.updated_application_full_name.as_deref(),
            Some("Contoso.application, Culture=neutral")
        );
        assert_eq!(
            ctx.time_of_last_update_check,
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap())
        );
        assert!(ctx.activation_uri.is_some());
        assert_eq!(ctx.data_directory.as_deref(), Some(r"C:\Users\me\Data"));
        assert_eq!(ctx.activation_data, vec!["report.docx".to_string()]);
    }

    #[test]
    fn network_deployed_flag_is_case_insensitive() {
        assert!(build(&[("CLICKONCE_ISNETWORKDEPLOYED", "true")]).is_network_deployed);
        assert!(build(&[("CLICKONCE_ISNETWORKDEPLOYED", "TRUE")]).is_network_deployed);
        assert!(!build(&[("CLICKONCE_ISNETWORKDEPLOYED", "False")]).is_network_deployed);
        assert!(!build(&[("CLICKONCE_ISNETWORKDEPLOYED", "yes")]).is_network_deployed);
        assert!(!build(&[("CLICKONCE_ISNETWORKDEPLOYED", "")]).is_network_deployed);
    }

    #[test]
    fn malformed_timestamp_does_not_affect_other_fields() {
        let ctx = build(&[
            ("CLICKONCE_ISNETWORKDEPLOYED", "True"),
            ("CLICKONCE_CURRENTVERSION", "2.1.0.0"),
            ("CLICKONCE_TIMEOFLASTUPDATECHECK", "last tuesday"),
            ("CLICKONCE_DATADIRECTORY", "/var/lib/contoso"),
        ]);
        assert!(ctx.time_of_last_update_check.is_none());
        assert!(ctx.is_network_deployed);
        assert_eq!(ctx.current_version.unwrap().to_string(), "2.1.0.0");
        assert_eq!(ctx.data_directory.as_deref(), Some("/var/lib/contoso"));
    }

    #[test]
    fn malformed_versions_and_uris_are_dropped() {
        let ctx = build(&[
            ("CLICKONCE_CURRENTVERSION", "1.0.beta"),
            ("CLICKONCE_UPDATEDVERSION", "-1.0"),
            ("CLICKONCE_UPDATELOCATION", "   "),
            ("CLICKONCE_ACTIVATIONURI", "http://[::1"),
        ]);
        assert!(ctx.current_version.is_none());
        assert!(ctx.updated_version.is_none());
        assert!(ctx.update_location.is_none());
        assert!(ctx.activation_uri.is_none());
        assert!(ctx.application_name().is_none());
    }

    #[test]
    fn activation_data_stops_at_first_gap() {
        let source = RecordingSource {
            inner: env(&[
                ("CLICKONCE_ACTIVATIONDATA_1", "a"),
                ("CLICKONCE_ACTIVATIONDATA_2", "b"),
                ("CLICKONCE_ACTIVATIONDATA_4", "d"),
            ]),
            reads: RefCell::new(Vec::new()),
        };
        let ctx = ContextBuilder::new(&source).base_directory("/").build();

        assert_eq!(ctx.activation_data, vec!["a".to_string(), "b".to_string()]);
        let reads = source.reads.borrow();
        assert!(reads.contains(&"CLICKONCE_ACTIVATIONDATA_3".to_string()));
        assert!(!reads.contains(&"CLICKONCE_ACTIVATIONDATA_4".to_string()));
    }

    #[test]
    fn each_key_is_read_once() {
        let source = RecordingSource {
            inner: env(&[("CLICKONCE_CURRENTVERSION", "1.0")]),
            reads: RefCell::new(Vec::new()),
        };
        let _ = ContextBuilder::new(&source).base_directory("/").build();

        let reads = source.reads.borrow();
        for key in EnvKey::ALL {
            let count = reads.iter().filter(|r| r.as_str() == key.as_str()).count();
            assert_eq!(count, 1, "{} read {} times", key.as_str(), count);
        }
    }

    #[test]
    fn activation_data_probe_is_capped() {
        let pairs: HashMap<String, String> = (1..=MAX_ACTIVATION_DATA + 5)
            .map(|i| (activation_data_key(i), i.to_string()))
            .collect();
        let ctx = ContextBuilder::new(pairs).base_directory("/").build();
        assert_eq!(ctx.activation_data.len(), MAX_ACTIVATION_DATA);
        assert_eq!(ctx.activation_data.last().map(String::as_str), Some("1024"));
    }

    #[test]
    fn activation_data_preserves_empty_items() {
        let ctx = build(&[
            ("CLICKONCE_ACTIVATIONDATA_1", ""),
            ("CLICKONCE_ACTIVATIONDATA_2", "x"),
        ]);
        assert_eq!(ctx.activation_data, vec![String::new(), "x".to_string()]);
    }

    #[test]
    fn parse_timestamp_accepts_known_forms() {
        let expected = Utc.with_ymd_and_hms(2023, 11, 2, 8, 15, 30).unwrap();
        assert_eq!(parse_timestamp("2023-11-02 08:15:30Z"), Some(expected));
        assert_eq!(parse_timestamp("2023-11-02T08:15:30Z"), Some(expected));
        assert_eq!(parse_timestamp("2023-11-02T10:15:30+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-11-02T08:15:30"), Some(expected));
        assert_eq!(parse_timestamp("2023-11-02T08:15:30.0000000"), Some(expected));
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2023-13-45 99:99:99Z"), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn empty_context_is_not_deployed() {
        let ctx = DeploymentContext::empty("/tmp");
        assert!(!ctx.is_network_deployed);
        assert!(ctx.activation_data.is_empty());
    }

    #[test]
    fn serializes_to_json() {
        let ctx = build(&[
            ("CLICKONCE_CURRENTVERSION", "1.2"),
            ("CLICKONCE_UPDATELOCATION", "https://h/App.application"),
        ]);
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["current_version"], "1.2");
        assert_eq!(json["update_location"], "https://h/App.application");
        assert_eq!(json["is_network_deployed"], false);
    }
}
