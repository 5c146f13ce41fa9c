//! Update checking against a published deployment manifest.
//!
//! This module provides:
//! - Manifest parsing ([`parse_manifest`]) and source selection
//! - Manifest retrieval over HTTP or from files ([`ManifestFetcher`])
//! - Update availability and mandatory-update decisions ([`UpdateVerdict`])

pub mod fetch;
pub mod manifest;
pub mod verdict;

pub use fetch::{ManifestFetcher, DEFAULT_TIMEOUT};
pub use manifest::{parse_manifest, ManifestInfo, ManifestSource, ASM_V1, ASM_V2};
pub use verdict::{check_for_updates, evaluate, UpdateVerdict};
