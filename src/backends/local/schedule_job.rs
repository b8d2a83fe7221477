// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use serde_json::{json, Value};
use uuid::Uuid;

use crate::engine::Continuation;
use crate::errors::{RegistryError, StageResult};
use crate::observability::messages::chain::BackgroundJobFinished;
use crate::observability::messages::StructuredLog;
use crate::registry::{CapabilityRegistry, PluginConfig};
use crate::traits::{Behavior, JobRecord, JobStore, TaskRunner};

/// Task behavior that defers the rest of the chain to a task runner.
///
/// Short-circuits the synchronous invocation with a job receipt; the
/// remaining behaviors and the core run inside the submitted job, with the
/// outcome tracked in a job store.
///
/// Options: `runner` - task runner plugin (default "thread"); `job_store` -
/// job store plugin (default "in-memory").
pub struct ScheduleJobBehavior {
    runner: Arc<dyn TaskRunner>,
    jobs: Arc<dyn JobStore>,
}

impl ScheduleJobBehavior {
    pub fn new(runner: Arc<dyn TaskRunner>, jobs: Arc<dyn JobStore>) -> Self {
        Self { runner, jobs }
    }

    pub fn from_config(
        registry: &CapabilityRegistry,
        config: &PluginConfig,
    ) -> Result<Self, RegistryError> {
        let runner_plugin = config.get_str("runner").unwrap_or("thread");
        let store_plugin = config.get_str("job_store").unwrap_or("in-memory");
        let runner = registry.resolve::<dyn TaskRunner>(runner_plugin, &PluginConfig::new())?;
        let jobs = registry.resolve::<dyn JobStore>(store_plugin, &PluginConfig::new())?;
        Ok(Self::new(runner, jobs))
    }
}

impl Behavior for ScheduleJobBehavior {
    fn execute(&self, next: Continuation, input: Value) -> StageResult {
        let job_id = Uuid::new_v4().to_string();
        self.jobs.save(&job_id, JobRecord::pending())?;

        let jobs = Arc::clone(&self.jobs);
        let id = job_id.clone();
        self.runner.submit(Box::new(move || {
            if let Err(err) = jobs.save(&id, JobRecord::running()) {
                tracing::warn!(job_id = %id, error = %err, "failed to mark job running");
            }
            let (record, succeeded) = match next.run(input) {
                Ok(value) => (JobRecord::succeeded(value), true),
                Err(err) => (JobRecord::failed(err.to_string()), false),
            };
            BackgroundJobFinished {
                job_id: &id,
                succeeded,
            }
            .log();
            if let Err(err) = jobs.save(&id, record) {
                tracing::warn!(job_id = %id, error = %err, "failed to record job outcome");
            }
        }))?;

        Ok(json!({"job_id": job_id, "status": "pending"}))
    }

    fn name(&self) -> &'static str {
        "schedule_job"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::memory::{InMemoryJobStore, InlineTaskRunner};
    use crate::engine::Task;
    use crate::traits::JobStatus;

    #[test]
    fn defers_the_remaining_chain_and_tracks_the_job() {
        let jobs = Arc::new(InMemoryJobStore::new());
        let mut task = Task::new(|input: Value| {
            let n = input.as_i64().unwrap_or(0);
            Ok(json!(n * 10))
        });
        task.push_behavior(Arc::new(ScheduleJobBehavior::new(
            Arc::new(InlineTaskRunner),
            jobs.clone(),
        )));

        let receipt = task.invoke(json!(4)).unwrap();
        assert_eq!(receipt["status"], "pending");

        let job_id = receipt["job_id"].as_str().unwrap();
        let record = jobs.get(job_id).unwrap().unwrap();
        assert_eq!(record.status, JobStatus::Succeeded);
        assert_eq!(record.result, Some(json!(40)));
    }
}
