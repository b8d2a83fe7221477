// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::engine::{Context, Next};
use crate::errors::{ChainError, RegistryError, StageResult};
use crate::registry::{CapabilityRegistry, PluginConfig};
use crate::traits::{Filter, Storage};

/// Uploads the context's payload to a storage collaborator before
/// forwarding.
///
/// Options: `bucket` (mandatory); `storage` - storage plugin to resolve
/// (default "in-memory"); `name_key` / `content_key` - context keys holding
/// the object name and its content (defaults "filename" / "content").
pub struct ArchiveFilter {
    storage: Arc<dyn Storage>,
    bucket: String,
    name_key: String,
    content_key: String,
}

impl ArchiveFilter {
    pub fn new(storage: Arc<dyn Storage>, bucket: impl Into<String>) -> Self {
        Self {
            storage,
            bucket: bucket.into(),
            name_key: "filename".to_string(),
            content_key: "content".to_string(),
        }
    }

    pub fn from_config(
        registry: &CapabilityRegistry,
        config: &PluginConfig,
    ) -> Result<Self, RegistryError> {
        let bucket = config.require_str("bucket")?;
        let storage_plugin = config.get_str("storage").unwrap_or("in-memory");
        let storage = registry.resolve::<dyn Storage>(storage_plugin, &PluginConfig::new())?;

        let mut filter = Self::new(storage, bucket);
        if let Some(name_key) = config.get_str("name_key") {
            filter.name_key = name_key.to_string();
        }
        if let Some(content_key) = config.get_str("content_key") {
            filter.content_key = content_key.to_string();
        }
        Ok(filter)
    }
}

impl Filter for ArchiveFilter {
    fn execute(&self, next: Next, context: &mut Context) -> StageResult {
        let name = context
            .get_str(&self.name_key)
            .ok_or_else(|| ChainError::message(format!("context missing '{}'", self.name_key)))?
            .to_string();
        let content = context
            .get_str(&self.content_key)
            .ok_or_else(|| ChainError::message(format!("context missing '{}'", self.content_key)))?
            .to_string();

        self.storage.upload(&self.bucket, &name, content.as_bytes())?;
        context.set("archived_to", format!("{}/{}", self.bucket, name));
        next.run(context)
    }

    fn name(&self) -> &'static str {
        "archive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::memory::InMemoryStorage;
    use crate::engine::Pipeline;
    use serde_json::Value;

    #[test]
    fn uploads_then_forwards() {
        let storage = Arc::new(InMemoryStorage::new());
        let mut pipeline = Pipeline::new(Context::new());
        pipeline.set_core(|ctx| Ok(ctx.to_value()));
        pipeline.push_filter(Arc::new(ArchiveFilter::new(storage.clone(), "inbox")));
        pipeline.context_mut().set("filename", "report.txt");
        pipeline.context_mut().set("content", "quarterly numbers");

        let result = pipeline.run().unwrap();
        assert_eq!(result["archived_to"], Value::String("inbox/report.txt".into()));
        assert_eq!(
            storage.download("inbox", "report.txt").unwrap(),
            b"quarterly numbers"
        );
    }

    #[test]
    fn missing_payload_is_a_stage_error() {
        let storage = Arc::new(InMemoryStorage::new());
        let mut pipeline = Pipeline::new(Context::new());
        pipeline.set_core(|ctx| Ok(ctx.to_value()));
        pipeline.push_filter(Arc::new(ArchiveFilter::new(storage, "inbox")));

        let err = pipeline.run().unwrap_err();
        assert!(err.to_string().contains("filename"));
    }

    #[test]
    fn factory_requires_a_bucket() {
        let registry = CapabilityRegistry::new();
        let err = ArchiveFilter::from_config(&registry, &PluginConfig::new())
            .err()
            .unwrap();
        assert!(err.to_string().contains("bucket"));
    }
}
