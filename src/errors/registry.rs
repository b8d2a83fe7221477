// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised by the capability registry.
//!
//! Every check here fails fast at the call site that caused it; nothing is
//! deferred to first use.

use thiserror::Error;

/// Errors from contract declaration, plugin registration, and resolution.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// An operation referenced a contract id that was never declared.
    #[error("contract '{contract}' is not declared; declare it before registering or resolving plugins")]
    ContractNotDeclared { contract: String },

    /// A contract id was declared a second time.
    ///
    /// Redeclaration is an error rather than a silent overwrite: overwriting
    /// would orphan factories registered against the previous entry.
    #[error("contract '{contract}' is already declared")]
    ContractRedeclared { contract: String },

    /// Two contract types share one contract id, or a resolution asked for a
    /// different capability type than the one the contract was declared with.
    #[error("contract '{contract}' is declared for '{declared}' but was used with '{offered}'")]
    ContractMismatch {
        contract: String,
        declared: &'static str,
        offered: &'static str,
    },

    /// The (contract, name) pair is already registered.
    #[error("plugin '{plugin}' is already registered for contract '{contract}'")]
    DuplicateRegistration { contract: String, plugin: String },

    /// No plugin with the requested name is registered for the contract.
    #[error("plugin '{plugin}' not found for contract '{contract}'; available plugins: [{}]", .available.join(", "))]
    PluginNotFound {
        contract: String,
        plugin: String,
        available: Vec<String>,
    },

    /// A plugin factory rejected the caller-supplied configuration.
    #[error("invalid plugin configuration: {reason}")]
    InvalidPluginConfig { reason: String },
}

impl RegistryError {
    /// Shorthand for factories rejecting their configuration.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        RegistryError::InvalidPluginConfig {
            reason: reason.into(),
        }
    }
}
