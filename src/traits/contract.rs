// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Compile-time description of a capability contract.

/// A named capability contract a plugin can be registered under.
///
/// Implemented for trait objects (`dyn Filter`, `dyn EventBus`, ...), so the
/// registry can file plugins by contract id while the type system enforces
/// that a registered factory actually produces the contract's capability.
/// `OPERATIONS` is the required operation set, kept as queryable metadata;
/// compliance itself is a trait bound, not a runtime scan.
pub trait Contract: Send + Sync + 'static {
    /// Stable identifier the registry files this contract under.
    const ID: &'static str;

    /// Operation names an implementation exposes.
    const OPERATIONS: &'static [&'static str];
}
