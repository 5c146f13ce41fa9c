//! Deployment metadata handed over by the bootstrapper.
//!
//! This module provides:
//! - [`Version`] - four-part ordered versions
//! - [`EnvSource`] - injected key/value lookup
//! - [`DeploymentUri`] - update and activation locations
//! - [`ContextBuilder`] / [`DeploymentContext`] - best-effort reconstruction

pub mod context;
pub mod keys;
pub mod location;
pub mod source;
pub mod version;

pub use context::{parse_timestamp, ContextBuilder, DeploymentContext, TIMESTAMP_FORMAT};
pub use keys::{activation_data_key, is_deployment_key, EnvKey, MAX_ACTIVATION_DATA, PREFIX};
pub use location::{DeploymentUri, InvalidUri, MANIFEST_EXTENSION};
pub use source::{deployment_vars, EnvSource, ProcessEnv};
pub use version::Version;
