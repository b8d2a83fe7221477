//! Built-in chain plugins.
//!
//! Small, in-process stages that cover the common cross-cutting concerns:
//! logging, timing, gating, archiving, event publication, and background
//! handoff. Each factory reads its options from the caller's `PluginConfig`
//! and resolves any collaborators it wraps through the registry.

mod archive;
mod background;
mod logging;
mod publish_result;
mod require_keys;
mod schedule_job;
mod timing;

pub use archive::ArchiveFilter;
pub use background::BackgroundDispatch;
pub use logging::{LoggingBehavior, LoggingFilter};
pub use publish_result::PublishResultDispatch;
pub use require_keys::RequireKeysFilter;
pub use schedule_job::ScheduleJobBehavior;
pub use timing::TimingFilter;

use std::sync::Arc;

use crate::errors::RegistryError;
use crate::registry::CapabilityRegistry;
use crate::traits::{Behavior, Dispatch, Filter};

/// Register every built-in chain plugin.
///
/// Explicit registration gathered in one startup routine; nothing here
/// depends on module load order.
pub fn register_plugins(registry: &CapabilityRegistry) -> Result<(), RegistryError> {
    registry.register::<dyn Filter, _>("logging", |_, config| {
        Ok(Arc::new(LoggingFilter::from_config(config)) as Arc<dyn Filter>)
    })?;
    registry.register::<dyn Filter, _>("timing", |_, config| {
        Ok(Arc::new(TimingFilter::from_config(config)) as Arc<dyn Filter>)
    })?;
    registry.register::<dyn Filter, _>("require_keys", |_, config| {
        Ok(Arc::new(RequireKeysFilter::from_config(config)?) as Arc<dyn Filter>)
    })?;
    registry.register::<dyn Filter, _>("archive", |registry, config| {
        Ok(Arc::new(ArchiveFilter::from_config(registry, config)?) as Arc<dyn Filter>)
    })?;

    registry.register::<dyn Dispatch, _>("publish_result", |registry, config| {
        Ok(Arc::new(PublishResultDispatch::from_config(registry, config)?) as Arc<dyn Dispatch>)
    })?;
    registry.register::<dyn Dispatch, _>("background", |registry, config| {
        Ok(Arc::new(BackgroundDispatch::from_config(registry, config)?) as Arc<dyn Dispatch>)
    })?;

    registry.register::<dyn Behavior, _>("logging", |_, config| {
        Ok(Arc::new(LoggingBehavior::from_config(config)) as Arc<dyn Behavior>)
    })?;
    registry.register::<dyn Behavior, _>("schedule_job", |registry, config| {
        Ok(Arc::new(ScheduleJobBehavior::from_config(registry, config)?) as Arc<dyn Behavior>)
    })?;

    Ok(())
}
