// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::engine::{Context, Next};
use crate::errors::{RegistryError, StageResult};
use crate::observability::messages::chain::BackgroundJobFinished;
use crate::observability::messages::StructuredLog;
use crate::registry::{CapabilityRegistry, PluginConfig};
use crate::traits::{Dispatch, JobRecord, JobStore, TaskRunner};

/// Terminal dispatcher that moves the core onto a task runner and returns a
/// job receipt immediately.
///
/// The caller's chain ends here: the dispatcher snapshots the context,
/// submits the continuation, and tracks the outcome in a job store under a
/// generated job id.
///
/// Options: `runner` - task runner plugin (default "thread"); `job_store` -
/// job store plugin (default "in-memory").
pub struct BackgroundDispatch {
    runner: Arc<dyn TaskRunner>,
    jobs: Arc<dyn JobStore>,
}

impl BackgroundDispatch {
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

impl Dispatch for BackgroundDispatch {
    fn dispatch(&self, next: Next, context: &mut Context) -> StageResult {
        let job_id = Uuid::new_v4().to_string();
        self.jobs.save(&job_id, JobRecord::pending())?;
        context.set("job_id", job_id.clone());

        // The job runs against a snapshot; the caller keeps the original
        // context.
        let mut job_context = context.clone();
        let jobs = Arc::clone(&self.jobs);
        let id = job_id.clone();

        self.runner.submit(Box::new(move || {
            if let Err(err) = jobs.save(&id, JobRecord::running()) {
                tracing::warn!(job_id = %id, error = %err, "failed to mark job running");
            }
            let (record, succeeded) = match next.run(&mut job_context) {
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
        "background"
    }
}
