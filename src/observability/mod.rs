// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Centralized message types for diagnostic and operational logging. Message
//! types follow a struct-based pattern with a `Display` implementation, so
//! log text lives in one place instead of as magic strings scattered through
//! the codebase.
//!
//! Messages are organized by subsystem:
//! * `messages::registry` - contract declaration and plugin lifecycle events
//! * `messages::chain` - chain composition and execution events

pub mod messages;
