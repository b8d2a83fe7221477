// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The context pipeline: ordered filters, at most one terminal dispatcher,
//! and a core function over a shared mutable context.

use std::sync::Arc;

use crate::engine::Context;
use crate::errors::{PipelineConfigError, StageResult};
use crate::observability::messages::chain::{ChainStarted, DispatchHandoff};
use crate::observability::messages::StructuredLog;
use crate::registry::{CapabilityRegistry, PluginConfig};
use crate::traits::{Dispatch, Filter};

/// Terminal function at the end of a pipeline's filter chain.
pub type PipelineCoreFn = dyn Fn(&mut Context) -> StageResult + Send + Sync;

/// Snapshot of a pipeline's stages, shared by the continuations of one run.
struct PipelineShared {
    filters: Vec<Arc<dyn Filter>>,
    terminator: Option<Arc<dyn Dispatch>>,
    core: Arc<PipelineCoreFn>,
}

/// Handle for the remainder of a pipeline chain.
///
/// Owned and cloneable, like `Continuation`. The continuation handed to a
/// terminal dispatcher invokes only the core function.
#[derive(Clone)]
pub struct Next {
    shared: Arc<PipelineShared>,
    index: usize,
}

impl Next {
    /// Run the rest of the chain over `context`.
    pub fn run(&self, context: &mut Context) -> StageResult {
        if let Some(filter) = self.shared.filters.get(self.index) {
            return filter.execute(self.advance(), context);
        }
        if self.index == self.shared.filters.len() {
            if let Some(dispatcher) = &self.shared.terminator {
                DispatchHandoff {
                    dispatcher: dispatcher.name(),
                }
                .log();
                return dispatcher.dispatch(self.advance(), context);
            }
        }
        (self.shared.core)(context)
    }

    fn advance(&self) -> Next {
        Next {
            shared: Arc::clone(&self.shared),
            index: self.index + 1,
        }
    }
}

/// Orchestrates a context through chained filters and an optional terminal
/// dispatcher.
///
/// Stage roles are the caller's explicit choice: `chain_filter` appends a
/// filter, `chain_dispatcher` installs the terminator. Execution order
/// equals addition order among filters, first-added outermost; the
/// terminator, if any, always runs after every filter has forwarded.
pub struct Pipeline {
    context: Context,
    core: Option<Arc<PipelineCoreFn>>,
    filters: Vec<Arc<dyn Filter>>,
    terminator: Option<Arc<dyn Dispatch>>,
}

impl Pipeline {
    pub fn new(context: Context) -> Self {
        Self {
            context,
            core: None,
            filters: Vec::new(),
            terminator: None,
        }
    }

    /// Define the core function invoked at the end of the filter chain.
    /// Required before `run()`.
    pub fn set_core<F>(&mut self, core: F) -> &mut Self
    where
        F: Fn(&mut Context) -> StageResult + Send + Sync + 'static,
    {
        self.core = Some(Arc::new(core));
        self
    }

    /// Resolve a filter plugin and append it to the filter list.
    pub fn chain_filter(
        &mut self,
        registry: &CapabilityRegistry,
        plugin: &str,
        config: &PluginConfig,
    ) -> Result<&mut Self, PipelineConfigError> {
        let filter = registry.resolve::<dyn Filter>(plugin, config)?;
        Ok(self.push_filter(filter))
    }

    /// Resolve a dispatcher plugin and install it as the terminator.
    pub fn chain_dispatcher(
        &mut self,
        registry: &CapabilityRegistry,
        plugin: &str,
        config: &PluginConfig,
    ) -> Result<&mut Self, PipelineConfigError> {
        let dispatcher = registry.resolve::<dyn Dispatch>(plugin, config)?;
        self.install_dispatcher(dispatcher)
    }

    /// Append an already-built filter instance.
    pub fn push_filter(&mut self, filter: Arc<dyn Filter>) -> &mut Self {
        self.filters.push(filter);
        self
    }

    /// Install an already-built dispatcher as the terminator.
    pub fn install_dispatcher(
        &mut self,
        dispatcher: Arc<dyn Dispatch>,
    ) -> Result<&mut Self, PipelineConfigError> {
        if let Some(existing) = &self.terminator {
            return Err(PipelineConfigError::DispatcherAlreadyInstalled {
                installed: existing.name().to_string(),
                rejected: dispatcher.name().to_string(),
            });
        }
        self.terminator = Some(dispatcher);
        Ok(self)
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    pub fn has_dispatcher(&self) -> bool {
        self.terminator.is_some()
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn into_context(self) -> Context {
        self.context
    }

    /// Execute the pipeline over its context.
    ///
    /// Runs the filter list first-added-first; the innermost continuation is
    /// handed to the terminator's dispatch operation if one is installed,
    /// otherwise the core is invoked directly. `run` may be called again
    /// (context mutations persist between runs), and taking `&mut self`
    /// keeps one pipeline+context pair single-owner, one execution at a
    /// time.
    pub fn run(&mut self) -> StageResult {
        let core = self
            .core
            .clone()
            .ok_or(PipelineConfigError::CoreNotSet)?;

        ChainStarted {
            kind: "pipeline",
            stage_count: self.filters.len() + usize::from(self.terminator.is_some()),
        }
        .log();

        let shared = Arc::new(PipelineShared {
            filters: self.filters.clone(),
            terminator: self.terminator.clone(),
            core,
        });
        Next { shared, index: 0 }.run(&mut self.context)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field(
                "filters",
                &self.filters.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("dispatcher", &self.terminator.as_ref().map(|d| d.name()))
            .field("core_set", &self.core.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ChainError;
    use serde_json::{json, Value};

    /// Appends its tag to a "trace" string in the context, then forwards.
    struct Tag(&'static str);

    impl Filter for Tag {
        fn execute(&self, next: Next, context: &mut Context) -> StageResult {
            let trace = format!("{}{}", context.get_str("trace").unwrap_or(""), self.0);
            context.set("trace", trace);
            next.run(context)
        }

        fn name(&self) -> &'static str {
            "tag"
        }
    }

    /// Short-circuits without forwarding.
    struct Stop;

    impl Filter for Stop {
        fn execute(&self, _next: Next, _context: &mut Context) -> StageResult {
            Ok(json!("stopped"))
        }

        fn name(&self) -> &'static str {
            "stop"
        }
    }

    /// Dispatcher that records the handoff and runs the core continuation.
    struct Handoff(&'static str);

    impl Dispatch for Handoff {
        fn dispatch(&self, next: Next, context: &mut Context) -> StageResult {
            context.set("dispatched_by", self.0);
            next.run(context)
        }

        fn name(&self) -> &'static str {
            self.0
        }
    }

    fn snapshot_core(context: &mut Context) -> StageResult {
        Ok(context.to_value())
    }

    #[test]
    fn run_without_core_is_a_configuration_error() {
        let mut pipeline = Pipeline::new(Context::new());
        let err = pipeline.run().unwrap_err();
        assert!(matches!(
            err,
            ChainError::Configuration(PipelineConfigError::CoreNotSet)
        ));
    }

    #[test]
    fn filters_run_in_addition_order() {
        let mut pipeline = Pipeline::new(Context::new());
        pipeline.set_core(snapshot_core);
        pipeline.push_filter(Arc::new(Tag("a")));
        pipeline.push_filter(Arc::new(Tag("b")));
        pipeline.push_filter(Arc::new(Tag("c")));

        let result = pipeline.run().unwrap();
        assert_eq!(result.get("trace"), Some(&Value::String("abc".into())));
    }

    #[test]
    fn short_circuit_skips_later_filters_and_core() {
        let mut pipeline = Pipeline::new(Context::new());
        pipeline.set_core(|ctx| {
            ctx.set("core_ran", true);
            Ok(Value::Null)
        });
        pipeline.push_filter(Arc::new(Tag("a")));
        pipeline.push_filter(Arc::new(Stop));
        pipeline.push_filter(Arc::new(Tag("b")));

        let result = pipeline.run().unwrap();
        assert_eq!(result, json!("stopped"));
        assert_eq!(pipeline.context().get_str("trace"), Some("a"));
        assert!(!pipeline.context().contains("core_ran"));
    }

    #[test]
    fn second_dispatcher_is_rejected_and_first_remains() {
        let mut pipeline = Pipeline::new(Context::new());
        pipeline.set_core(snapshot_core);
        pipeline.install_dispatcher(Arc::new(Handoff("first"))).unwrap();

        let err = pipeline
            .install_dispatcher(Arc::new(Handoff("second")))
            .unwrap_err();
        match err {
            PipelineConfigError::DispatcherAlreadyInstalled { installed, rejected } => {
                assert_eq!(installed, "first");
                assert_eq!(rejected, "second");
            }
            other => panic!("expected DispatcherAlreadyInstalled, got {:?}", other),
        }

        let result = pipeline.run().unwrap();
        assert_eq!(result.get("dispatched_by"), Some(&json!("first")));
    }

    #[test]
    fn dispatcher_runs_after_all_filters() {
        let mut pipeline = Pipeline::new(Context::new());
        pipeline.set_core(snapshot_core);
        pipeline.install_dispatcher(Arc::new(Handoff("edge"))).unwrap();
        pipeline.push_filter(Arc::new(Tag("a")));
        pipeline.push_filter(Arc::new(Tag("b")));

        let result = pipeline.run().unwrap();
        // Filters mutated the context before the terminator saw it.
        assert_eq!(result.get("trace"), Some(&json!("ab")));
        assert_eq!(result.get("dispatched_by"), Some(&json!("edge")));
    }

    #[test]
    fn run_is_repeatable_and_context_persists() {
        let mut pipeline = Pipeline::new(Context::new());
        pipeline.set_core(|ctx| {
            let runs = ctx.get_u64("runs").unwrap_or(0) + 1;
            ctx.set("runs", runs);
            Ok(json!(runs))
        });

        assert_eq!(pipeline.run().unwrap(), json!(1));
        assert_eq!(pipeline.run().unwrap(), json!(2));

        // Stages may still be chained after a run.
        pipeline.push_filter(Arc::new(Tag("x")));
        assert_eq!(pipeline.run().unwrap(), json!(3));
        assert_eq!(pipeline.context().get_str("trace"), Some("x"));
    }
}
