// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors reported by collaborator services behind the capability contracts.

use thiserror::Error;

/// Failures from event bus, storage, job store, and task runner collaborators.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested object does not exist in the bucket.
    #[error("object '{key}' not found in bucket '{bucket}'")]
    ObjectNotFound { bucket: String, key: String },

    /// The backing service rejected or failed the operation.
    #[error("{0}")]
    Backend(String),
}

impl ServiceError {
    pub fn backend(reason: impl Into<String>) -> Self {
        ServiceError::Backend(reason.into())
    }
}
