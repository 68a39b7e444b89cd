//! The `{id, kind, payload}` envelope wrapper.
//!
//! Every message crossing the channel, in either direction, is a JSON object
//! with exactly these three semantics:
//!
//! - `id` — an opaque correlation token.  Carried through untouched; the
//!   receiving side never matches it against a pending-request table.  It is
//!   reserved for future request/response correlation, so locally created
//!   envelopes stamp a fresh UUID and received ids are preserved as-is.
//! - `kind` — a string selecting the payload shape (see [`kinds`]).
//! - `payload` — the kind-specific payload object.
//!
//! Envelopes are immutable once parsed.

use serde_json::{json, Value};
use uuid::Uuid;

// ── Wire kind strings ─────────────────────────────────────────────────────────

/// The `kind` discriminant strings used on the wire.
pub mod kinds {
    // Embedded document → host page
    pub const AUTH_STATUS: &str = "authStatus";
    pub const CLOSED: &str = "closed";
    pub const RESIZE: &str = "resize";
    pub const BALANCE: &str = "balance";
    pub const PENDING_REQUESTS: &str = "pendingRequests";

    // Host page → embedded document (push-only, unacknowledged)
    pub const THEME_UPDATE: &str = "themeUpdate";
    pub const BALANCE_CURRENCY: &str = "balanceCurrency";
}

// ── Wire message trait ────────────────────────────────────────────────────────

/// A directional message union that knows its own wire representation.
///
/// Implemented by both [`crate::FrameToHostMsg`] and
/// [`crate::HostToFrameMsg`] so that [`Envelope`] can encode either
/// direction with the same code path.
pub trait WireMessage {
    /// The `kind` string for this message.
    fn kind(&self) -> &'static str;

    /// The `payload` object for this message.
    fn payload_value(&self) -> Value;
}

// ── Envelope ──────────────────────────────────────────────────────────────────

/// A validated message together with its correlation token.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<M> {
    /// Opaque correlation token.  Preserved exactly as received for inbound
    /// envelopes; a fresh UUID string for locally created ones.
    pub id: Value,
    /// The typed message.
    pub message: M,
}

impl<M: WireMessage> Envelope<M> {
    /// Wraps a message in a new envelope with a freshly generated id.
    pub fn new(message: M) -> Self {
        Self {
            id: Value::String(Uuid::new_v4().to_string()),
            message,
        }
    }

    /// Encodes the envelope into its wire JSON shape.
    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id,
            "kind": self.message.kind(),
            "payload": self.message.payload_value(),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::messages::HostToFrameMsg;

    #[test]
    fn test_new_envelope_gets_a_uuid_string_id() {
        let envelope = Envelope::new(HostToFrameMsg::ThemeUpdate(json!({"mode": "dark"})));
        let id = envelope.id.as_str().expect("id must be a string");
        assert!(Uuid::parse_str(id).is_ok(), "id must parse as a UUID: {id}");
    }

    #[test]
    fn test_consecutive_envelopes_get_distinct_ids() {
        let a = Envelope::new(HostToFrameMsg::ThemeUpdate(json!({})));
        let b = Envelope::new(HostToFrameMsg::ThemeUpdate(json!({})));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_to_value_produces_the_three_envelope_fields() {
        // Arrange
        let envelope = Envelope::new(HostToFrameMsg::BalanceCurrency(json!({"currency": "EUR"})));

        // Act
        let value = envelope.to_value();

        // Assert
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("id"));
        assert_eq!(obj.get("kind").unwrap(), kinds::BALANCE_CURRENCY);
        assert_eq!(obj.get("payload").unwrap(), &json!({"currency": "EUR"}));
    }
}
