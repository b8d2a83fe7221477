// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::engine::{Context, Continuation, Next};
use crate::errors::{ChainError, StageResult};
use crate::traits::{Behavior, Dispatch, Filter};

/// A stub filter for testing and placeholder purposes: forwards unchanged.
pub struct StubFilter;

impl Filter for StubFilter {
    fn execute(&self, next: Next, context: &mut Context) -> StageResult {
        next.run(context)
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// A filter that always fails for testing failure scenarios.
pub struct FailingFilter {
    pub message: String,
}

impl FailingFilter {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Filter for FailingFilter {
    fn execute(&self, _next: Next, _context: &mut Context) -> StageResult {
        Err(ChainError::message(self.message.clone()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// A stub behavior: forwards its input unchanged.
pub struct StubBehavior;

impl Behavior for StubBehavior {
    fn execute(&self, next: Continuation, input: Value) -> StageResult {
        next.run(input)
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// A behavior that always fails for testing failure scenarios.
pub struct FailingBehavior {
    pub message: String,
}

impl FailingBehavior {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Behavior for FailingBehavior {
    fn execute(&self, _next: Continuation, _input: Value) -> StageResult {
        Err(ChainError::message(self.message.clone()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// A stub dispatcher: runs the core continuation directly.
pub struct StubDispatch;

impl Dispatch for StubDispatch {
    fn dispatch(&self, next: Next, context: &mut Context) -> StageResult {
        next.run(context)
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
