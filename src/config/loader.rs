// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::ChainConfigError;
use crate::registry::PluginConfig;

/// Declarative chain definition.
///
/// Describes the initial context and the ordered stage list of a pipeline.
/// The core function cannot be expressed declaratively; hosts supply it when
/// building (see `PipelineBuilder::from_config`).
///
/// # Example
/// ```yaml
/// context:
///   filename: report.txt
///   content: quarterly numbers
/// stages:
///   - role: filter
///     plugin: logging
///     options:
///       label: ingest
///   - role: filter
///     plugin: require_keys
///     options:
///       keys: [filename, content]
///   - role: dispatch
///     plugin: background
///     options:
///       runner: thread
/// ```
#[derive(Debug, Deserialize)]
pub struct ChainConfig {
    #[serde(default)]
    pub context: BTreeMap<String, serde_yaml::Value>,
    pub stages: Vec<StageConfig>,
}

/// One stage of a declarative chain.
#[derive(Debug, Deserialize)]
pub struct StageConfig {
    /// The caller-declared role: filters are appended in order, the single
    /// dispatch stage becomes the pipeline's terminator.
    pub role: StageRole,
    pub plugin: String,
    #[serde(default)]
    pub options: PluginConfig,
}

/// Explicit stage classification; never inferred from the plugin's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageRole {
    Filter,
    Dispatch,
}

/// Parse a chain definition from YAML text.
pub fn parse_chain_config(yaml: &str) -> Result<ChainConfig, ChainConfigError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Load a chain definition from a YAML file.
pub fn load_chain_config<P: AsRef<Path>>(path: P) -> Result<ChainConfig, ChainConfigError> {
    let content = fs::read_to_string(path)?;
    parse_chain_config(&content)
}

/// Load a chain definition and validate it.
///
/// Validation failures are combined into a single error, one message per
/// line.
pub fn load_and_validate_chain_config<P: AsRef<Path>>(
    path: P,
) -> Result<ChainConfig, ChainConfigError> {
    let cfg = load_chain_config(path)?;

    if let Err(validation_errors) = crate::config::validate_chain_config(&cfg) {
        let messages: Vec<String> = validation_errors.iter().map(|e| e.to_string()).collect();
        return Err(ChainConfigError::Validation(messages.join("\n")));
    }
    Ok(cfg)
}
