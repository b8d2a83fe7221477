// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration-time errors for pipeline assembly.

use thiserror::Error;

use crate::errors::RegistryError;

/// Errors from building or starting a pipeline.
#[derive(Debug, Error)]
pub enum PipelineConfigError {
    /// `run()` was called before `set_core()`.
    #[error("core function not set; call set_core() before run()")]
    CoreNotSet,

    /// A second terminal dispatcher was chained.
    #[error("only one dispatcher allowed; '{installed}' is already installed, rejected '{rejected}'")]
    DispatcherAlreadyInstalled { installed: String, rejected: String },

    /// A stage failed to resolve while the chain was being built.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
