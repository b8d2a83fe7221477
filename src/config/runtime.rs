// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{ChainConfig, StageRole};
use crate::engine::{Context, Pipeline};
use crate::errors::{ChainConfigError, StageResult};
use crate::registry::CapabilityRegistry;

/// Pipeline builder - assembles a runnable pipeline from a chain definition.
///
/// Bridges the declarative layer and the engine: the config supplies the
/// initial context and the ordered, role-tagged stage list; the registry
/// supplies plugin instances; the host supplies the core function.
pub struct PipelineBuilder;

impl PipelineBuilder {
    /// Build a pipeline from a validated chain definition.
    ///
    /// Stages are resolved and chained in config order, so execution order
    /// matches the file top to bottom.
    pub fn from_config<F>(
        cfg: &ChainConfig,
        registry: &CapabilityRegistry,
        core: F,
    ) -> Result<Pipeline, ChainConfigError>
    where
        F: Fn(&mut Context) -> StageResult + Send + Sync + 'static,
    {
        let mut context = Context::new();
        for (key, value) in &cfg.context {
            let value = serde_json::to_value(value).map_err(|e| ChainConfigError::Context {
                key: key.clone(),
                reason: e.to_string(),
            })?;
            context.set(key.clone(), value);
        }

        let mut pipeline = Pipeline::new(context);
        pipeline.set_core(core);

        for stage in &cfg.stages {
            match stage.role {
                StageRole::Filter => {
                    pipeline.chain_filter(registry, &stage.plugin, &stage.options)?;
                }
                StageRole::Dispatch => {
                    pipeline.chain_dispatcher(registry, &stage.plugin, &stage.options)?;
                }
            }
        }
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::install_defaults;
    use crate::config::parse_chain_config;
    use crate::errors::PipelineConfigError;

    #[test]
    fn builds_a_pipeline_with_context_and_stages() {
        let registry = CapabilityRegistry::new();
        install_defaults(&registry).unwrap();

        let cfg = parse_chain_config(
            r#"
context:
  filename: a.txt
  attempts: 2
stages:
  - role: filter
    plugin: logging
  - role: filter
    plugin: timing
"#,
        )
        .unwrap();

        let pipeline =
            PipelineBuilder::from_config(&cfg, &registry, |ctx| Ok(ctx.to_value())).unwrap();
        assert_eq!(pipeline.filter_count(), 2);
        assert!(!pipeline.has_dispatcher());
        assert_eq!(pipeline.context().get_str("filename"), Some("a.txt"));
        assert_eq!(pipeline.context().get_u64("attempts"), Some(2));
    }

    #[test]
    fn unknown_plugin_surfaces_the_registry_error() {
        let registry = CapabilityRegistry::new();
        install_defaults(&registry).unwrap();

        let cfg = parse_chain_config(
            "stages:\n  - role: filter\n    plugin: nonexistent\n",
        )
        .unwrap();

        let err =
            PipelineBuilder::from_config(&cfg, &registry, |ctx| Ok(ctx.to_value())).unwrap_err();
        assert!(err.to_string().contains("nonexistent"));
    }

    #[test]
    fn second_dispatch_stage_is_rejected_at_build_time() {
        let registry = CapabilityRegistry::new();
        install_defaults(&registry).unwrap();

        let cfg = parse_chain_config(
            r#"
stages:
  - role: dispatch
    plugin: background
    options:
      runner: inline
  - role: dispatch
    plugin: publish_result
    options:
      topic: t
"#,
        )
        .unwrap();

        let err =
            PipelineBuilder::from_config(&cfg, &registry, |ctx| Ok(ctx.to_value())).unwrap_err();
        assert!(matches!(
            err,
            ChainConfigError::Pipeline(PipelineConfigError::DispatcherAlreadyInstalled { .. })
        ));
    }
}
