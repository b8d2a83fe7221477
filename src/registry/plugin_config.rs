//! Caller-supplied configuration handed to plugin factories.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::errors::RegistryError;

/// Configuration options for one plugin instantiation.
///
/// A newtype over an ordered map of YAML values, matching the `options`
/// block of a chain config stage. Typed accessors cover the shapes factories
/// actually read; anything richer goes through `get` and serde.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginConfig(BTreeMap<String, serde_yaml::Value>);

impl PluginConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insertion.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_yaml::Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert an option.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<serde_yaml::Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw value lookup.
    pub fn get(&self, key: &str) -> Option<&serde_yaml::Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_str())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(|v| v.as_bool())
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.0.get(key).and_then(|v| v.as_u64())
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(|v| v.as_i64())
    }

    /// A sequence option as owned strings; `None` if absent or not a
    /// sequence of strings.
    pub fn get_str_list(&self, key: &str) -> Option<Vec<String>> {
        let seq = self.0.get(key)?.as_sequence()?;
        seq.iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect()
    }

    /// A required string option; factories use this to fail fast on bad
    /// configuration.
    pub fn require_str(&self, key: &str) -> Result<&str, RegistryError> {
        self.get_str(key)
            .ok_or_else(|| RegistryError::invalid_config(format!("missing required option '{}'", key)))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<BTreeMap<String, serde_yaml::Value>> for PluginConfig {
    fn from(options: BTreeMap<String, serde_yaml::Value>) -> Self {
        Self(options)
    }
}
