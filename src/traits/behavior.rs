// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The contract for task behaviors.

use serde_json::Value;

use crate::engine::Continuation;
use crate::errors::StageResult;
use crate::traits::Contract;

/// A composable unit wrapped around a task's core function.
///
/// The first-added behavior runs first and decides, by calling or not calling
/// `next.run(...)`, whether later behaviors and the core ever run. Returning
/// without running the continuation short-circuits the chain; the return
/// value becomes the chain's final result.
pub trait Behavior: Send + Sync {
    fn execute(&self, next: Continuation, input: Value) -> StageResult;

    fn name(&self) -> &'static str;
}

impl Contract for dyn Behavior {
    const ID: &'static str = "behavior";
    const OPERATIONS: &'static [&'static str] = &["execute"];
}
