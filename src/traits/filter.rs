// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The contract for pipeline filters.

use crate::engine::{Context, Next};
use crate::errors::StageResult;
use crate::traits::Contract;

/// A chainable filter/interceptor over a shared mutable context.
///
/// Filters run in the order they were chained; each may mutate the context,
/// forward by running `next`, or short-circuit by returning directly.
pub trait Filter: Send + Sync {
    fn execute(&self, next: Next, context: &mut Context) -> StageResult;

    fn name(&self) -> &'static str;
}

impl Contract for dyn Filter {
    const ID: &'static str = "filter";
    const OPERATIONS: &'static [&'static str] = &["execute"];
}
