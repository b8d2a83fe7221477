// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::errors::ServiceError;
use crate::traits::{JobRecord, JobStore};

/// Job records held in process memory.
pub struct InMemoryJobStore {
    jobs: RwLock<HashMap<String, JobRecord>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.jobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.read().is_empty()
    }
}

impl Default for InMemoryJobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl JobStore for InMemoryJobStore {
    fn save(&self, job_id: &str, record: JobRecord) -> Result<(), ServiceError> {
        self.jobs.write().insert(job_id.to_string(), record);
        Ok(())
    }

    fn get(&self, job_id: &str) -> Result<Option<JobRecord>, ServiceError> {
        Ok(self.jobs.read().get(job_id).cloned())
    }
}
