// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::engine::{Context, Next};
use crate::errors::{RegistryError, StageResult};
use crate::registry::{CapabilityRegistry, PluginConfig};
use crate::traits::{Dispatch, EventBus};

/// Terminal dispatcher that runs the core and publishes its result to an
/// event bus topic.
///
/// Options: `topic` (mandatory); `event_bus` - bus plugin to resolve
/// (default "in-memory").
pub struct PublishResultDispatch {
    bus: Arc<dyn EventBus>,
    topic: String,
}

impl PublishResultDispatch {
    pub fn new(bus: Arc<dyn EventBus>, topic: impl Into<String>) -> Self {
        Self {
            bus,
            topic: topic.into(),
        }
    }

    pub fn from_config(
        registry: &CapabilityRegistry,
        config: &PluginConfig,
    ) -> Result<Self, RegistryError> {
        let topic = config.require_str("topic")?;
        let bus_plugin = config.get_str("event_bus").unwrap_or("in-memory");
        let bus = registry.resolve::<dyn EventBus>(bus_plugin, &PluginConfig::new())?;
        Ok(Self::new(bus, topic))
    }
}

impl Dispatch for PublishResultDispatch {
    fn dispatch(&self, next: Next, context: &mut Context) -> StageResult {
        let result = next.run(context)?;
        self.bus.publish(&self.topic, &result)?;
        tracing::debug!(topic = %self.topic, "core result published");
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "publish_result"
    }
}
