// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Collaborator contracts consumed, not implemented, by the engine core.
//!
//! External adapters (message brokers, object stores, job backends, task
//! executors) satisfy these contracts and are reached only through the
//! registry. The engine itself carries no persistence, scheduling, or
//! transport logic.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ServiceError;
use crate::traits::Contract;

/// Callback invoked with each message published to a subscribed topic.
pub type Subscriber = Arc<dyn Fn(&Value) + Send + Sync>;

/// Token returned by `subscribe`, consumed by `unsubscribe`.
///
/// Closures are not comparable, so subscriptions are identified by token
/// rather than by callback identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Topic-based publish/subscribe.
pub trait EventBus: Send + Sync {
    fn publish(&self, topic: &str, message: &Value) -> Result<(), ServiceError>;

    fn subscribe(&self, topic: &str, subscriber: Subscriber) -> Result<SubscriptionId, ServiceError>;

    fn unsubscribe(&self, topic: &str, subscription: SubscriptionId) -> Result<(), ServiceError>;
}

impl Contract for dyn EventBus {
    const ID: &'static str = "event_bus";
    const OPERATIONS: &'static [&'static str] = &["publish", "subscribe", "unsubscribe"];
}

/// Bucketed object storage.
pub trait Storage: Send + Sync {
    fn upload(&self, bucket: &str, key: &str, data: &[u8]) -> Result<(), ServiceError>;

    fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ServiceError>;

    fn delete(&self, bucket: &str, key: &str) -> Result<(), ServiceError>;
}

impl Contract for dyn Storage {
    const ID: &'static str = "storage";
    const OPERATIONS: &'static [&'static str] = &["upload", "download", "delete"];
}

/// Lifecycle state of a tracked job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Status and outcome of a job keyed by job id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub status: JobStatus,
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl JobRecord {
    pub fn pending() -> Self {
        Self {
            status: JobStatus::Pending,
            result: None,
            error: None,
        }
    }

    pub fn running() -> Self {
        Self {
            status: JobStatus::Running,
            result: None,
            error: None,
        }
    }

    pub fn succeeded(result: Value) -> Self {
        Self {
            status: JobStatus::Succeeded,
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Failed,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Saves and retrieves job records.
pub trait JobStore: Send + Sync {
    fn save(&self, job_id: &str, record: JobRecord) -> Result<(), ServiceError>;

    fn get(&self, job_id: &str) -> Result<Option<JobRecord>, ServiceError>;
}

impl Contract for dyn JobStore {
    const ID: &'static str = "job_store";
    const OPERATIONS: &'static [&'static str] = &["save", "get"];
}

/// A unit of deferred work submitted to a task runner.
pub type BackgroundJob = Box<dyn FnOnce() + Send + 'static>;

/// Executes submitted jobs outside the calling chain.
pub trait TaskRunner: Send + Sync {
    fn submit(&self, job: BackgroundJob) -> Result<(), ServiceError>;
}

impl Contract for dyn TaskRunner {
    const ID: &'static str = "task_runner";
    const OPERATIONS: &'static [&'static str] = &["submit"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn job_record_constructors_set_status() {
        assert_eq!(JobRecord::pending().status, JobStatus::Pending);
        assert_eq!(JobRecord::running().status, JobStatus::Running);

        let done = JobRecord::succeeded(json!({"ok": true}));
        assert_eq!(done.status, JobStatus::Succeeded);
        assert_eq!(done.result, Some(json!({"ok": true})));
        assert_eq!(done.error, None);

        let failed = JobRecord::failed("boom");
        assert_eq!(failed.status, JobStatus::Failed);
        assert_eq!(failed.error.as_deref(), Some("boom"));
    }

    #[test]
    fn job_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&JobStatus::Succeeded).unwrap(),
            "\"succeeded\""
        );
    }
}
