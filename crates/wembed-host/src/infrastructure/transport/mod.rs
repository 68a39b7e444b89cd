//! The cross-context messaging boundary.
//!
//! This layer never creates the low-level channel endpoint; the embedding
//! application hands one in at construction, already pointed at the embedded
//! document.  The trait below is the whole contract this library needs from
//! it: fire-and-forget sends, and a subscription that pushes raw inbound
//! values (well-formed or not; validation happens downstream) into a sink.
//!
//! Subscriptions return an explicit [`SubscriptionId`] so teardown is one
//! deterministic `unsubscribe` call instead of function-identity removal.
//!
//! Note on trust: the inbound side performs no sender/origin authentication.
//! Anything sharing the channel can post values; the validator's silent
//! rejection is a robustness measure, not a security boundary.

pub mod loopback;

use serde_json::Value;
use thiserror::Error;

/// Receives every raw value arriving from the embedded document's context.
pub type FrameSink = Box<dyn Fn(Value) + Send + Sync>;

/// Cancellation handle for an inbound subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Errors crossing the transport boundary.
///
/// The push channel is fire-and-forget and unacknowledged, so callers treat
/// these as diagnostics, never as retryable failures.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The embedded document's context is gone (navigated away, crashed).
    #[error("embedded document endpoint is gone: {0}")]
    EndpointGone(String),

    /// The underlying channel refused the value.
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// The embedded document's communication endpoint, as seen from the host.
pub trait FrameTransport: Send + Sync {
    /// Posts an envelope-shaped value to the embedded document.
    /// Fire-and-forget: there is no acknowledgement concept.
    fn post(&self, envelope: Value) -> Result<(), TransportError>;

    /// Registers interest in inbound values.  The transport calls `sink`
    /// for every value arriving from the embedded document's context, in
    /// delivery order, until the subscription is cancelled.
    fn subscribe(&self, sink: FrameSink) -> SubscriptionId;

    /// Cancels a subscription.  Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}
