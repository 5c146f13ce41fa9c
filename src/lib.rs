//! deployinfo - Deployment metadata, update checks and relaunching.
//!
//! An application started by a deployment bootstrapper receives what the
//! bootstrapper knows about it as `CLICKONCE_*` environment variables.
//! This crate reads them back, checks the published deployment manifest
//! for a newer version, and starts processes with the same variables set.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings file loading
//! - [`deployment`] - Versions, URIs and the deployment context
//! - [`error`] - Error types and result aliases
//! - [`launcher`] - Retrying process launcher with context injection
//! - [`ui`] - Prompts, spinners, and terminal output
//! - [`updates`] - Manifest fetching and update decisions
//!
//! # Example
//!
//! ```
//! use deployinfo::deployment::ContextBuilder;
//! use deployinfo::updates::{evaluate, ManifestInfo};
//! use std::collections::HashMap;
//!
//! let mut env = HashMap::new();
//! env.insert("CLICKONCE_ISNETWORKDEPLOYED".to_string(), "True".to_string());
//! env.insert("CLICKONCE_CURRENTVERSION".to_string(), "1.0.0.0".to_string());
//! let ctx = ContextBuilder::new(env).build();
//!
//! let manifest = ManifestInfo {
//!     version: "1.1.0.0".to_string(),
//!     minimum_required_version: None,
//! };
//! let verdict = evaluate(&ctx, Some(manifest)).unwrap().unwrap();
//! assert!(verdict.is_update_available());
//! assert!(!verdict.is_mandatory());
//! ```

pub mod cli;
pub mod config;
pub mod deployment;
pub mod error;
pub mod launcher;
pub mod ui;
pub mod updates;

pub use error::{Error, Result};
