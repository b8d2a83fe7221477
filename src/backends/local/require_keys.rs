// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::json;

use crate::engine::{log_short_circuit, Context, Next};
use crate::errors::{RegistryError, StageResult};
use crate::registry::PluginConfig;
use crate::traits::Filter;

/// Gate that short-circuits the chain when required context keys are absent.
///
/// Options: `keys` - required context keys (sequence of strings, mandatory).
pub struct RequireKeysFilter {
    keys: Vec<String>,
}

impl RequireKeysFilter {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    pub fn from_config(config: &PluginConfig) -> Result<Self, RegistryError> {
        let keys = config
            .get_str_list("keys")
            .ok_or_else(|| RegistryError::invalid_config("'keys' must be a sequence of strings"))?;
        Ok(Self::new(keys))
    }
}

impl Filter for RequireKeysFilter {
    fn execute(&self, next: Next, context: &mut Context) -> StageResult {
        let missing: Vec<&str> = self
            .keys
            .iter()
            .filter(|key| !context.contains(key))
            .map(String::as_str)
            .collect();

        if !missing.is_empty() {
            log_short_circuit(self.name());
            return Ok(json!({
                "halted_by": self.name(),
                "missing": missing,
            }));
        }
        next.run(context)
    }

    fn name(&self) -> &'static str {
        "require_keys"
    }
}
