// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message is a plain struct implementing `Display` for human-readable
//! output and `StructuredLog` for field-structured emission through
//! `tracing`.

use std::fmt::Display;

use tracing::Span;

pub mod chain;
pub mod registry;

/// Emission interface for structured log messages.
pub trait StructuredLog: Display {
    /// Emit the message through `tracing` with structured fields.
    fn log(&self);

    /// Create a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
