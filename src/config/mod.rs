//! Settings for fetching, retrying and updating.
//!
//! - Schema definitions in [`schema`]
//! - File loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use deployinfo::config::parse_settings;
//! use std::path::Path;
//!
//! let settings = parse_settings("launcher:\n  max_attempts: 5\n", Path::new("inline.yml")).unwrap();
//! assert_eq!(settings.launcher.max_attempts, 5);
//! assert_eq!(settings.fetch.timeout_secs, 30);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_settings, load_settings_file, parse_settings};
pub use schema::{
    FetchSettings, LauncherSettings, Settings, UpdaterSettings, UPDATE_LOCATION_PLACEHOLDER,
};
