//! In-memory transport for tests and the scripted harness.
//!
//! Plays both ends of the channel: the host library talks to it through
//! [`FrameTransport`], while the test (standing in for the embedded
//! document) injects inbound traffic with [`LoopbackTransport::emit_from_frame`]
//! and inspects what the host posted with [`LoopbackTransport::posted`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde_json::Value;

use super::{FrameSink, FrameTransport, SubscriptionId, TransportError};

/// A loopback channel with recording on the outbound side.
#[derive(Default)]
pub struct LoopbackTransport {
    /// Every envelope the host posted toward the embedded document.
    posted: Mutex<Vec<Value>>,
    sinks: Mutex<HashMap<u64, FrameSink>>,
    next_subscription: AtomicU64,
}

impl LoopbackTransport {
    /// Creates an idle loopback channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers a raw value to every live subscriber, as if the embedded
    /// document had posted it.  Values are delivered in subscription order;
    /// with a single subscriber (the normal case) that is delivery order.
    pub fn emit_from_frame(&self, value: Value) {
        let sinks = self.sinks.lock().unwrap();
        let mut ids: Vec<&u64> = sinks.keys().collect();
        ids.sort_unstable();
        for id in ids {
            if let Some(sink) = sinks.get(id) {
                sink(value.clone());
            }
        }
    }

    /// Snapshot of everything the host has posted so far.
    pub fn posted(&self) -> Vec<Value> {
        self.posted.lock().unwrap().clone()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.sinks.lock().unwrap().len()
    }
}

impl FrameTransport for LoopbackTransport {
    fn post(&self, envelope: Value) -> Result<(), TransportError> {
        self.posted.lock().unwrap().push(envelope);
        Ok(())
    }

    fn subscribe(&self, sink: FrameSink) -> SubscriptionId {
        let id = self.next_subscription.fetch_add(1, Ordering::Relaxed);
        self.sinks.lock().unwrap().insert(id, sink);
        SubscriptionId(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.sinks.lock().unwrap().remove(&id.0);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_post_records_the_envelope() {
        let transport = LoopbackTransport::new();
        transport.post(json!({"kind": "themeUpdate"})).unwrap();
        assert_eq!(transport.posted(), vec![json!({"kind": "themeUpdate"})]);
    }

    #[test]
    fn test_emit_reaches_a_live_subscriber() {
        let transport = LoopbackTransport::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = Arc::clone(&received);
        transport.subscribe(Box::new(move |value| {
            received_clone.lock().unwrap().push(value);
        }));

        transport.emit_from_frame(json!({"kind": "closed"}));

        assert_eq!(*received.lock().unwrap(), vec![json!({"kind": "closed"})]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let transport = LoopbackTransport::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = Arc::clone(&received);
        let id = transport.subscribe(Box::new(move |value| {
            received_clone.lock().unwrap().push(value);
        }));

        transport.unsubscribe(id);
        transport.emit_from_frame(json!({"kind": "closed"}));

        assert!(received.lock().unwrap().is_empty());
        assert_eq!(transport.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribing_an_unknown_id_is_ignored() {
        let transport = LoopbackTransport::new();
        transport.unsubscribe(SubscriptionId(99));
        assert_eq!(transport.subscriber_count(), 0);
    }

    #[test]
    fn test_values_are_delivered_in_emission_order() {
        let transport = LoopbackTransport::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = Arc::clone(&received);
        transport.subscribe(Box::new(move |value| {
            received_clone.lock().unwrap().push(value);
        }));

        for i in 0..5 {
            transport.emit_from_frame(json!({"seq": i}));
        }

        let seen = received.lock().unwrap();
        let sequence: Vec<i64> = seen.iter().map(|v| v["seq"].as_i64().unwrap()).collect();
        assert_eq!(sequence, vec![0, 1, 2, 3, 4]);
    }
}
