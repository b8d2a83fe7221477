// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-memory reference implementations of the collaborator contracts.
//!
//! These back tests and single-process deployments; production adapters
//! (message brokers, object stores, job backends) live outside this crate
//! and register through the same contracts.

mod event_bus;
mod job_store;
mod object_store;
mod task_runner;

pub use event_bus::InMemoryEventBus;
pub use job_store::InMemoryJobStore;
pub use object_store::InMemoryStorage;
pub use task_runner::{InlineTaskRunner, ThreadTaskRunner};

use std::sync::Arc;

use crate::errors::RegistryError;
use crate::registry::CapabilityRegistry;
use crate::traits::{EventBus, JobStore, Storage, TaskRunner};

/// Register the in-memory collaborator plugins.
///
/// Each factory hands out a clone of one shared backend rather than a fresh
/// instance per resolve, so every stage wired to `in-memory` sees the same
/// bus, store, and job records within a registry's lifetime.
pub fn register_plugins(registry: &CapabilityRegistry) -> Result<(), RegistryError> {
    let event_bus = Arc::new(InMemoryEventBus::new());
    registry.register::<dyn EventBus, _>("in-memory", move |_, _| {
        Ok(event_bus.clone() as Arc<dyn EventBus>)
    })?;

    let storage = Arc::new(InMemoryStorage::new());
    registry.register::<dyn Storage, _>("in-memory", move |_, _| {
        Ok(storage.clone() as Arc<dyn Storage>)
    })?;

    let job_store = Arc::new(InMemoryJobStore::new());
    registry.register::<dyn JobStore, _>("in-memory", move |_, _| {
        Ok(job_store.clone() as Arc<dyn JobStore>)
    })?;

    registry.register::<dyn TaskRunner, _>("thread", |_, _| {
        Ok(Arc::new(ThreadTaskRunner::new()) as Arc<dyn TaskRunner>)
    })?;
    registry.register::<dyn TaskRunner, _>("inline", |_, _| {
        Ok(Arc::new(InlineTaskRunner) as Arc<dyn TaskRunner>)
    })?;

    Ok(())
}
