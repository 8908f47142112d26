//! Environment store used as the third credential source.
//!
//! Keys are dotted camelCase names such as `intercom.accessToken`.
//! [`ProcessEnvironment`] maps them onto process variables
//! (`INTERCOM_ACCESS_TOKEN`); [`MapEnvironment`] keeps them in memory.

use std::collections::HashMap;

/// Read-only key/value lookup for secrets and endpoint overrides.
pub trait Environment: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Environment store backed by process environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(variable_name(key)).ok()
    }
}

/// In-memory environment store.
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    values: HashMap<String, String>,
}

impl MapEnvironment {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, replacing any previous one for the same key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

/// Converts a dotted camelCase key into an environment variable name.
///
/// `intercom.accessToken` becomes `INTERCOM_ACCESS_TOKEN`.
#[must_use]
pub fn variable_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 4);
    for (i, segment) in key.split('.').enumerate() {
        if i > 0 {
            name.push('_');
        }
        for (j, ch) in segment.chars().enumerate() {
            if ch.is_ascii_uppercase() && j > 0 {
                name.push('_');
            }
            name.push(ch.to_ascii_uppercase());
        }
    }
    name
}
