//! Error types for deployinfo operations.
//!
//! This module defines [`Error`], the crate-level error type, and a
//! [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Each concern owns a typed error ([`VersionParseError`], [`FetchError`],
//!   [`ManifestError`], [`LaunchError`]) so callers can match on it
//! - Malformed environment values never become errors; the context builder
//!   drops them field by field
//! - Use `anyhow::Error` (via `Error::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// A value that is not of the form `n[.n[.n[.n]]]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid version '{input}': {reason}")]
pub struct VersionParseError {
    /// The text that failed to parse.
    pub input: String,
    /// Why it was rejected.
    pub reason: &'static str,
}

/// Failure reading the manifest source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure talking to a remote update location.
    #[error("Failed to fetch manifest from {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status} fetching manifest from {url}")]
    Status { url: String, status: u16 },

    /// A local manifest file is missing or unreadable.
    #[error("Failed to read manifest at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The manifest was fetched but does not carry the required version data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    /// The document is not well-formed XML.
    #[error("Malformed manifest document: {0}")]
    Malformed(String),

    /// No `assemblyIdentity` element was found.
    #[error("Invalid manifest document for {application}.application")]
    InvalidManifest { application: String },

    /// The `assemblyIdentity` element has no usable `version` attribute.
    #[error("Version info is empty")]
    EmptyVersion,
}

/// The child process could not be started.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Spawning the program failed.
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The start call returned without a process handle.
    #[error("Process '{program}' was not started")]
    NotStarted { program: String },
}

/// Core error type for deployinfo operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A version string from a manifest could not be parsed.
    #[error(transparent)]
    Format(#[from] VersionParseError),

    /// The manifest source could not be read.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The manifest is missing required data.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The child process failed to start after all attempts.
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// Settings file could not be loaded.
    #[error("Failed to load settings from {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for deployinfo operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_parse_error_displays_input_and_reason() {
        let err = VersionParseError {
            input: "1.x".into(),
            reason: "component is not a number",
        };
        let msg = err.to_string();
        assert!(msg.contains("1.x"));
        assert!(msg.contains("not a number"));
    }

    #[test]
    fn fetch_status_displays_code_and_url() {
        let err = FetchError::Status {
            url: "https://example.com/app.application".into(),
            status: 404,
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("https://example.com/app.application"));
    }

    #[test]
    fn fetch_io_displays_path() {
        let err = FetchError::Io {
            path: PathBuf::from("/deploy/app.application"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/deploy/app.application"));
    }

    #[test]
    fn invalid_manifest_names_application() {
        let err = ManifestError::InvalidManifest {
            application: "Contoso".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid manifest document for Contoso.application"
        );
    }

    #[test]
    fn empty_version_message() {
        assert_eq!(ManifestError::EmptyVersion.to_string(), "Version info is empty");
    }

    #[test]
    fn launch_error_is_transparent_in_crate_error() {
        let err: Error = LaunchError::NotStarted {
            program: "updater.exe".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Process 'updater.exe' was not started");
        assert!(matches!(err, Error::Launch(LaunchError::NotStarted { .. })));
    }

    #[test]
    fn manifest_error_converts() {
        let err: Error = ManifestError::EmptyVersion.into();
        assert!(matches!(err, Error::Manifest(ManifestError::EmptyVersion)));
    }

    #[test]
    fn config_error_displays_path_and_message() {
        let err = Error::Config {
            path: PathBuf::from("/etc/deployinfo.yml"),
            message: "unknown field `retries`".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/etc/deployinfo.yml"));
        assert!(msg.contains("retries"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(ManifestError::EmptyVersion.into())
        }
        assert!(returns_error().is_err());
    }
}
