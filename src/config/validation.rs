// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{ChainConfig, StageRole};
use crate::errors::ChainConfigError;

/// Validate a chain definition before any plugin is resolved.
///
/// Collects every problem rather than stopping at the first: at most one
/// dispatch stage, and no empty plugin names.
pub fn validate_chain_config(cfg: &ChainConfig) -> Result<(), Vec<ChainConfigError>> {
    let mut errors = Vec::new();

    let mut dispatcher: Option<&str> = None;
    for (index, stage) in cfg.stages.iter().enumerate() {
        if stage.plugin.trim().is_empty() {
            errors.push(ChainConfigError::EmptyPluginName { index });
        }
        if stage.role == StageRole::Dispatch {
            match dispatcher {
                None => dispatcher = Some(&stage.plugin),
                Some(first) => errors.push(ChainConfigError::MultipleDispatchers {
                    first: first.to_string(),
                    second: stage.plugin.clone(),
                }),
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
