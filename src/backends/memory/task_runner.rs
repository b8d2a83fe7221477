// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::thread;

use crate::errors::ServiceError;
use crate::traits::{BackgroundJob, TaskRunner};

/// Runs each submitted job on a freshly spawned, detached thread.
pub struct ThreadTaskRunner {
    name_prefix: String,
}

impl ThreadTaskRunner {
    pub fn new() -> Self {
        Self {
            name_prefix: "chain-job".to_string(),
        }
    }

    pub fn with_name_prefix(name_prefix: impl Into<String>) -> Self {
        Self {
            name_prefix: name_prefix.into(),
        }
    }
}

impl Default for ThreadTaskRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRunner for ThreadTaskRunner {
    fn submit(&self, job: BackgroundJob) -> Result<(), ServiceError> {
        thread::Builder::new()
            .name(self.name_prefix.clone())
            .spawn(job)
            .map(|_| ())
            .map_err(|e| ServiceError::backend(format!("failed to spawn job thread: {}", e)))
    }
}

/// Runs each submitted job immediately on the calling thread.
///
/// Deterministic stand-in for a real executor; tests use it so job records
/// are final by the time `submit` returns.
pub struct InlineTaskRunner;

impl TaskRunner for InlineTaskRunner {
    fn submit(&self, job: BackgroundJob) -> Result<(), ServiceError> {
        job();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{mpsc, Arc};

    #[test]
    fn inline_runner_completes_before_returning() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();

        InlineTaskRunner
            .submit(Box::new(move || flag.store(true, Ordering::SeqCst)))
            .unwrap();
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn thread_runner_executes_the_job() {
        let (tx, rx) = mpsc::channel();
        ThreadTaskRunner::new()
            .submit(Box::new(move || tx.send(42).unwrap()))
            .unwrap();

        assert_eq!(
            rx.recv_timeout(std::time::Duration::from_secs(5)).unwrap(),
            42
        );
    }
}
