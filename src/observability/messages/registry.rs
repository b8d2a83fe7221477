// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for contract declaration and plugin lifecycle events.

use std::fmt::{Display, Formatter};

use tracing::Span;

use crate::observability::messages::StructuredLog;

/// A capability contract was declared.
pub struct ContractDeclared<'a> {
    pub contract: &'a str,
    pub operations: &'static [&'static str],
}

impl Display for ContractDeclared<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Contract '{}' declared with operations [{}]",
            self.contract,
            self.operations.join(", ")
        )
    }
}

impl StructuredLog for ContractDeclared<'_> {
    fn log(&self) {
        tracing::info!(
            contract = self.contract,
            operation_count = self.operations.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "contract_declared",
            span_name = name,
            contract = self.contract,
        )
    }
}

/// A plugin implementation was registered under a contract.
pub struct PluginRegistered<'a> {
    pub contract: &'a str,
    pub plugin: &'a str,
}

impl Display for PluginRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Plugin '{}' registered for contract '{}'",
            self.plugin, self.contract
        )
    }
}

impl StructuredLog for PluginRegistered<'_> {
    fn log(&self) {
        tracing::info!(contract = self.contract, plugin = self.plugin, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "plugin_registered",
            span_name = name,
            contract = self.contract,
            plugin = self.plugin,
        )
    }
}

/// A plugin instance was resolved for a chain build.
pub struct PluginResolved<'a> {
    pub contract: &'a str,
    pub plugin: &'a str,
}

impl Display for PluginResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Plugin '{}' resolved for contract '{}'",
            self.plugin, self.contract
        )
    }
}

impl StructuredLog for PluginResolved<'_> {
    fn log(&self) {
        tracing::debug!(contract = self.contract, plugin = self.plugin, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "plugin_resolved",
            span_name = name,
            contract = self.contract,
            plugin = self.plugin,
        )
    }
}
