// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Unified abstractions: capability contracts, chain stages, and the
//! collaborator contracts external adapters implement.

mod behavior;
mod collaborators;
mod contract;
mod dispatch;
mod filter;

pub use behavior::Behavior;
pub use collaborators::{
    BackgroundJob, EventBus, JobRecord, JobStatus, JobStore, Storage, Subscriber, SubscriptionId,
    TaskRunner,
};
pub use contract::Contract;
pub use dispatch::Dispatch;
pub use filter::Filter;

use crate::errors::RegistryError;
use crate::registry::CapabilityRegistry;

/// Declares every contract this crate defines on the given registry.
///
/// Hosts call this once at startup, before registering plugins. Declaration
/// is explicit rather than a side effect of module loading, so a registry's
/// contents never depend on import order.
pub fn declare_core_contracts(registry: &CapabilityRegistry) -> Result<(), RegistryError> {
    registry.declare::<dyn Behavior>()?;
    registry.declare::<dyn Filter>()?;
    registry.declare::<dyn Dispatch>()?;
    registry.declare::<dyn EventBus>()?;
    registry.declare::<dyn Storage>()?;
    registry.declare::<dyn JobStore>()?;
    registry.declare::<dyn TaskRunner>()?;
    Ok(())
}
