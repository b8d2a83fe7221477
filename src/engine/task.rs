// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The behavior chain engine: one terminal core function augmented by zero
//! or more behaviors added in sequence.

use std::sync::Arc;

use serde_json::Value;

use crate::errors::{RegistryError, StageResult};
use crate::observability::messages::chain::{ChainStarted, StageShortCircuited};
use crate::observability::messages::StructuredLog;
use crate::registry::{CapabilityRegistry, PluginConfig};
use crate::traits::Behavior;

/// Terminal function at the end of a task's behavior chain.
pub type TaskCoreFn = dyn Fn(Value) -> StageResult + Send + Sync;

/// Snapshot of a task's stage list, shared by the continuations of one
/// invocation.
struct ChainShared {
    behaviors: Vec<Arc<dyn Behavior>>,
    core: Arc<TaskCoreFn>,
}

/// Handle for the remainder of a task chain.
///
/// Owned and cloneable: a behavior may run it inline, drop it to
/// short-circuit, or move it onto a `TaskRunner` for deferred execution.
#[derive(Clone)]
pub struct Continuation {
    shared: Arc<ChainShared>,
    index: usize,
}

impl Continuation {
    /// Run the rest of the chain with `input`.
    ///
    /// Dispatches `behaviors[index]`, handing it the continuation for
    /// `index + 1`; past the end of the list it calls the core function.
    pub fn run(&self, input: Value) -> StageResult {
        match self.shared.behaviors.get(self.index) {
            Some(behavior) => behavior.execute(self.advance(), input),
            None => (self.shared.core)(input),
        }
    }

    fn advance(&self) -> Continuation {
        Continuation {
            shared: Arc::clone(&self.shared),
            index: self.index + 1,
        }
    }
}

/// Wraps a core function so it can be enhanced with behaviors.
///
/// Behaviors execute in the order they are added: the first-added behavior
/// runs outermost and first. Existing entries are never removed or
/// reordered.
pub struct Task {
    core: Arc<TaskCoreFn>,
    behaviors: Vec<Arc<dyn Behavior>>,
}

impl Task {
    /// Bind the terminal core function; the behavior list starts empty.
    pub fn new<F>(core: F) -> Self
    where
        F: Fn(Value) -> StageResult + Send + Sync + 'static,
    {
        Self {
            core: Arc::new(core),
            behaviors: Vec::new(),
        }
    }

    /// Resolve a behavior plugin and append it to the chain.
    pub fn add_behavior(
        &mut self,
        registry: &CapabilityRegistry,
        plugin: &str,
        config: &PluginConfig,
    ) -> Result<&mut Self, RegistryError> {
        let behavior = registry.resolve::<dyn Behavior>(plugin, config)?;
        Ok(self.push_behavior(behavior))
    }

    /// Append an already-built behavior instance.
    pub fn push_behavior(&mut self, behavior: Arc<dyn Behavior>) -> &mut Self {
        self.behaviors.push(behavior);
        self
    }

    pub fn behavior_count(&self) -> usize {
        self.behaviors.len()
    }

    /// Execute the chain.
    ///
    /// Equivalent to `B1.execute(continuation-of-B2, input)` down to the
    /// core; a behavior that returns without running its continuation halts
    /// the chain and its return value is the final result.
    pub fn invoke(&self, input: Value) -> StageResult {
        ChainStarted {
            kind: "task",
            stage_count: self.behaviors.len(),
        }
        .log();

        let shared = Arc::new(ChainShared {
            behaviors: self.behaviors.clone(),
            core: Arc::clone(&self.core),
        });
        Continuation { shared, index: 0 }.run(input)
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field(
                "behaviors",
                &self.behaviors.iter().map(|b| b.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Emit the short-circuit log event for a stage that halted its chain.
///
/// Built-in stages call this when they return without forwarding; custom
/// stages may do the same.
pub(crate) fn log_short_circuit(stage: &str) {
    StageShortCircuited { stage }.log();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Forwards, then doubles whatever the rest of the chain returned.
    struct DoubleAfter;

    impl Behavior for DoubleAfter {
        fn execute(&self, next: Continuation, input: Value) -> StageResult {
            let result = next.run(input)?;
            let doubled = result
                .as_i64()
                .ok_or_else(|| crate::errors::ChainError::message("expected integer result"))?
                * 2;
            Ok(json!(doubled))
        }

        fn name(&self) -> &'static str {
            "double_after"
        }
    }

    /// Adds ten to the input before forwarding.
    struct AddTenBefore;

    impl Behavior for AddTenBefore {
        fn execute(&self, next: Continuation, input: Value) -> StageResult {
            let bumped = input
                .as_i64()
                .ok_or_else(|| crate::errors::ChainError::message("expected integer input"))?
                + 10;
            next.run(json!(bumped))
        }

        fn name(&self) -> &'static str {
            "add_ten_before"
        }
    }

    /// Returns a fixed value without ever forwarding.
    struct Halt;

    impl Behavior for Halt {
        fn execute(&self, _next: Continuation, _input: Value) -> StageResult {
            Ok(json!("halted"))
        }

        fn name(&self) -> &'static str {
            "halt"
        }
    }

    /// Sets a flag when reached, then forwards.
    struct Touch(&'static AtomicBool);

    impl Behavior for Touch {
        fn execute(&self, next: Continuation, input: Value) -> StageResult {
            self.0.store(true, Ordering::SeqCst);
            next.run(input)
        }

        fn name(&self) -> &'static str {
            "touch"
        }
    }

    fn increment_core(input: Value) -> StageResult {
        let n = input
            .as_i64()
            .ok_or_else(|| crate::errors::ChainError::message("expected integer input"))?;
        Ok(json!(n + 1))
    }

    #[test]
    fn first_added_behavior_runs_first() {
        // A forwards then doubles, B adds ten then forwards, core is x+1:
        // invoke(5) -> A -> B(5+10) -> core(15)=16 -> A doubles -> 32.
        let mut task = Task::new(increment_core);
        task.push_behavior(Arc::new(DoubleAfter));
        task.push_behavior(Arc::new(AddTenBefore));

        assert_eq!(task.invoke(json!(5)).unwrap(), json!(32));
    }

    #[test]
    fn invoke_without_behaviors_calls_core_directly() {
        let task = Task::new(increment_core);
        assert_eq!(task.invoke(json!(41)).unwrap(), json!(42));
    }

    #[test]
    fn non_forwarding_behavior_halts_the_chain() {
        static REACHED: AtomicBool = AtomicBool::new(false);

        let mut task = Task::new(|_input| {
            REACHED.store(true, Ordering::SeqCst);
            Ok(json!("core"))
        });
        task.push_behavior(Arc::new(Halt));
        task.push_behavior(Arc::new(Touch(&REACHED)));

        let result = task.invoke(json!(0)).unwrap();
        assert_eq!(result, json!("halted"));
        assert!(
            !REACHED.load(Ordering::SeqCst),
            "stages after the halting behavior must not run"
        );
    }

    #[test]
    fn behavior_errors_propagate_unchanged() {
        let mut task = Task::new(increment_core);
        task.push_behavior(Arc::new(AddTenBefore));

        let err = task.invoke(json!("not a number")).unwrap_err();
        assert_eq!(err.to_string(), "expected integer input");
    }

    #[test]
    fn behaviors_added_after_an_invoke_take_effect() {
        let mut task = Task::new(increment_core);
        assert_eq!(task.invoke(json!(1)).unwrap(), json!(2));

        task.push_behavior(Arc::new(AddTenBefore));
        assert_eq!(task.invoke(json!(1)).unwrap(), json!(12));
        assert_eq!(task.behavior_count(), 1);
    }
}
