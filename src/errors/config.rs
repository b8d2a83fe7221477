// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for declarative chain configuration files.

use thiserror::Error;

use crate::errors::PipelineConfigError;

/// Errors from loading, parsing, or validating a chain definition.
#[derive(Debug, Error)]
pub enum ChainConfigError {
    /// The configuration file could not be read.
    #[error("failed to read chain config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid YAML for the chain schema.
    #[error("failed to parse chain config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An initial context value could not be converted to a payload value.
    #[error("context key '{key}' is not a valid payload value: {reason}")]
    Context { key: String, reason: String },

    /// More than one stage carries the dispatch role.
    #[error("chain declares multiple dispatchers: '{first}' and '{second}'")]
    MultipleDispatchers { first: String, second: String },

    /// A stage has an empty plugin name.
    #[error("stage {index} has an empty plugin name")]
    EmptyPluginName { index: usize },

    /// Combined validation failures, one message per problem.
    #[error("chain config validation failed:\n{0}")]
    Validation(String),

    /// Assembling the pipeline from the config failed.
    #[error(transparent)]
    Pipeline(#[from] PipelineConfigError),
}
