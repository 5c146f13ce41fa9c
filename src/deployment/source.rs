//! Key/value lookups the context builder reads from.
//!
//! The builder never touches the process environment directly; it asks an
//! [`EnvSource`]. Tests hand it a map, the binary hands it [`ProcessEnv`].

use std::collections::{BTreeMap, HashMap};

use super::keys::is_deployment_key;

/// A read-only string-keyed lookup.
pub trait EnvSource {
    /// Value for `key`, or `None` when the key is not set.
    fn get(&self, key: &str) -> Option<String>;
}

/// The current process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        // Non-unicode values are treated as unset.
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// All deployment variables in the process environment, sorted by name.
pub fn deployment_vars() -> Vec<(String, String)> {
    let mut vars: Vec<(String, String)> = std::env::vars()
        .filter(|(k, _)| is_deployment_key(k))
        .collect();
    vars.sort();
    vars
}
