// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The contract for terminal dispatchers.

use crate::engine::{Context, Next};
use crate::errors::StageResult;
use crate::traits::Contract;

/// The single optional final stage of a pipeline.
///
/// Shares the filter call shape but semantically marks a terminal handoff to
/// an external system. The continuation a dispatcher receives invokes only
/// the core function; a pipeline enforces at most one dispatcher per chain.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, next: Next, context: &mut Context) -> StageResult;

    fn name(&self) -> &'static str;
}

impl Contract for dyn Dispatch {
    const ID: &'static str = "dispatch";
    const OPERATIONS: &'static [&'static str] = &["dispatch"];
}
