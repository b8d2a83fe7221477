// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Instant;

use crate::engine::{Context, Next};
use crate::errors::StageResult;
use crate::observability::messages::chain::StageTimed;
use crate::observability::messages::StructuredLog;
use crate::registry::PluginConfig;
use crate::traits::Filter;

/// Measures the wall-clock time of everything downstream of it and records
/// the elapsed milliseconds into the context.
///
/// Options: `key` - context key for the measurement (default "elapsed_ms").
pub struct TimingFilter {
    key: String,
}

impl TimingFilter {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn from_config(config: &PluginConfig) -> Self {
        Self::new(config.get_str("key").unwrap_or("elapsed_ms"))
    }
}

impl Filter for TimingFilter {
    fn execute(&self, next: Next, context: &mut Context) -> StageResult {
        let start = Instant::now();
        let result = next.run(context);
        let elapsed = start.elapsed();

        context.set(self.key.clone(), elapsed.as_millis() as u64);
        StageTimed {
            stage: self.name(),
            duration: elapsed,
        }
        .log();
        result
    }

    fn name(&self) -> &'static str {
        "timing"
    }
}
