// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde_json::Value;

use crate::errors::ServiceError;
use crate::traits::{EventBus, Subscriber, SubscriptionId};

/// Topic-based pub/sub over process memory.
///
/// Subscribers run synchronously on the publishing thread, outside the
/// internal lock so a callback may itself publish.
pub struct InMemoryEventBus {
    topics: RwLock<HashMap<String, Vec<(SubscriptionId, Subscriber)>>>,
    next_id: AtomicU64,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            topics: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.read().get(topic).map_or(0, Vec::len)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus for InMemoryEventBus {
    fn publish(&self, topic: &str, message: &Value) -> Result<(), ServiceError> {
        let subscribers: Vec<Subscriber> = self
            .topics
            .read()
            .get(topic)
            .map(|subs| subs.iter().map(|(_, s)| s.clone()).collect())
            .unwrap_or_default();

        for subscriber in subscribers {
            subscriber(message);
        }
        Ok(())
    }

    fn subscribe(&self, topic: &str, subscriber: Subscriber) -> Result<SubscriptionId, ServiceError> {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.topics
            .write()
            .entry(topic.to_string())
            .or_default()
            .push((id, subscriber));
        tracing::debug!(topic, subscription = id.0, "subscribed to topic");
        Ok(id)
    }

    fn unsubscribe(&self, topic: &str, subscription: SubscriptionId) -> Result<(), ServiceError> {
        let mut topics = self.topics.write();
        let subs = topics
            .get_mut(topic)
            .ok_or_else(|| ServiceError::backend(format!("no subscriptions for topic '{}'", topic)))?;

        let before = subs.len();
        subs.retain(|(id, _)| *id != subscription);
        if subs.len() == before {
            return Err(ServiceError::backend(format!(
                "subscription {} not found for topic '{}'",
                subscription.0, topic
            )));
        }
        tracing::debug!(topic, subscription = subscription.0, "unsubscribed from topic");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn publish_reaches_every_subscriber() {
        let bus = InMemoryEventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let hits = hits.clone();
            bus.subscribe(
                "jobs.done",
                Arc::new(move |_msg| {
                    hits.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();
        }

        bus.publish("jobs.done", &json!({"job_id": "j-1"})).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn unsubscribed_callbacks_stop_receiving() {
        let bus = InMemoryEventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let hits2 = hits.clone();
        let id = bus
            .subscribe("topic", Arc::new(move |_| {
                hits2.fetch_add(1, Ordering::SeqCst);
            }))
            .unwrap();

        bus.publish("topic", &json!(1)).unwrap();
        bus.unsubscribe("topic", id).unwrap();
        bus.publish("topic", &json!(2)).unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(bus.subscriber_count("topic"), 0);
    }

    #[test]
    fn unsubscribe_unknown_subscription_fails() {
        let bus = InMemoryEventBus::new();
        assert!(bus.unsubscribe("topic", SubscriptionId(99)).is_err());
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus = InMemoryEventBus::new();
        bus.publish("empty", &json!(null)).unwrap();
    }
}
