// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::errors::ServiceError;
use crate::traits::Storage;

/// Bucketed object storage over process memory.
pub struct InMemoryStorage {
    buckets: RwLock<HashMap<String, HashMap<String, Vec<u8>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            buckets: RwLock::new(HashMap::new()),
        }
    }

    pub fn object_count(&self, bucket: &str) -> usize {
        self.buckets.read().get(bucket).map_or(0, HashMap::len)
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for InMemoryStorage {
    fn upload(&self, bucket: &str, key: &str, data: &[u8]) -> Result<(), ServiceError> {
        self.buckets
            .write()
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), data.to_vec());
        tracing::debug!(bucket, key, size = data.len(), "object uploaded");
        Ok(())
    }

    fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ServiceError> {
        self.buckets
            .read()
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .cloned()
            .ok_or_else(|| ServiceError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    fn delete(&self, bucket: &str, key: &str) -> Result<(), ServiceError> {
        let mut buckets = self.buckets.write();
        let removed = buckets
            .get_mut(bucket)
            .and_then(|objects| objects.remove(key));
        match removed {
            Some(_) => Ok(()),
            None => Err(ServiceError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
        }
    }
}
