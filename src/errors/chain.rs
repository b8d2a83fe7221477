// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Execution-time errors for behavior chains.
//!
//! The engine never catches or retries: an error raised inside a stage
//! propagates unchanged to the caller of `invoke()`/`run()`.

use thiserror::Error;

use crate::errors::{PipelineConfigError, ServiceError};

/// Result type threaded through every chain stage.
pub type StageResult = Result<serde_json::Value, ChainError>;

/// Errors surfaced while executing a chain.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The pipeline was misconfigured at the point `run()` was called.
    #[error(transparent)]
    Configuration(#[from] PipelineConfigError),

    /// A collaborator a stage depends on failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// An error raised inside a stage or the core function, forwarded
    /// without modification.
    #[error("{0}")]
    Stage(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl ChainError {
    /// Wraps an arbitrary stage error.
    pub fn stage<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        ChainError::Stage(err.into())
    }

    /// A stage error from a plain message.
    pub fn message(msg: impl Into<String>) -> Self {
        let text: String = msg.into();
        ChainError::Stage(text.into())
    }
}
