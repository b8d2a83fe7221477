// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::engine::{Context, Continuation, Next};
use crate::errors::StageResult;
use crate::registry::PluginConfig;
use crate::traits::{Behavior, Filter};

/// Logs chain traffic around the stages that follow it.
///
/// Options: `label` - tag attached to every event (default "chain").
pub struct LoggingFilter {
    label: String,
}

impl LoggingFilter {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn from_config(config: &PluginConfig) -> Self {
        Self::new(config.get_str("label").unwrap_or("chain"))
    }
}

impl Filter for LoggingFilter {
    fn execute(&self, next: Next, context: &mut Context) -> StageResult {
        tracing::info!(label = %self.label, keys = context.len(), "entering chain");
        let result = next.run(context);
        match &result {
            Ok(_) => tracing::info!(label = %self.label, "chain completed"),
            Err(err) => tracing::error!(label = %self.label, error = %err, "chain failed"),
        }
        result
    }

    fn name(&self) -> &'static str {
        "logging"
    }
}

/// Task-side counterpart of `LoggingFilter`.
pub struct LoggingBehavior {
    label: String,
}

impl LoggingBehavior {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn from_config(config: &PluginConfig) -> Self {
        Self::new(config.get_str("label").unwrap_or("task"))
    }
}

impl Behavior for LoggingBehavior {
    fn execute(&self, next: Continuation, input: Value) -> StageResult {
        tracing::info!(label = %self.label, "task invoked");
        let result = next.run(input);
        match &result {
            Ok(_) => tracing::info!(label = %self.label, "task completed"),
            Err(err) => tracing::error!(label = %self.label, error = %err, "task failed"),
        }
        result
    }

    fn name(&self) -> &'static str {
        "logging"
    }
}
