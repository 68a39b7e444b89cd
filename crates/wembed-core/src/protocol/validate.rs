//! The message validator: arbitrary JSON value in, typed envelope or nothing out.
//!
//! The messaging channel is shared with other scripts on the host page, which
//! may post unrelated traffic, so an unrecognizable value is *expected*, not
//! an error.  Both decoders are pure predicates: they never mutate anything,
//! never log, and never throw.  A caller that receives `None` simply drops
//! the event.
//!
//! Rejection covers, exhaustively:
//!
//! - non-object values (numbers, strings, booleans, arrays, `null`);
//! - objects missing any of the three envelope fields (`id`, `kind`,
//!   `payload`);
//! - an unknown `kind` string;
//! - a recognized `kind` whose payload fails its shape check (missing
//!   required field, wrong primitive type).  Never downgraded to a partial
//!   record.
//!
//! Extra unknown fields on an otherwise-valid payload are accepted: the
//! check is a structural subset, so a newer embedded document keeps working
//! against an older host.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::protocol::envelope::{kinds, Envelope};
use crate::protocol::messages::{FrameToHostMsg, HostToFrameMsg};

// ── Inbound direction (embedded document → host page) ────────────────────────

/// Decides whether `value` is a well-formed message from the embedded
/// document, returning the typed envelope if so.
pub fn decode_frame_to_host(value: &Value) -> Option<Envelope<FrameToHostMsg>> {
    let (id, kind, payload) = split_envelope(value)?;

    let message = match kind {
        kinds::AUTH_STATUS => FrameToHostMsg::AuthStatus(typed_payload(payload)?),
        kinds::CLOSED => {
            // No required fields, but the payload must still be an object.
            payload.as_object()?;
            FrameToHostMsg::Closed
        }
        kinds::RESIZE => FrameToHostMsg::Resize(typed_payload(payload)?),
        kinds::BALANCE => FrameToHostMsg::Balance(typed_payload(payload)?),
        kinds::PENDING_REQUESTS => FrameToHostMsg::PendingRequests(typed_payload(payload)?),
        _ => return None,
    };

    Some(Envelope { id, message })
}

// ── Outbound direction (host page → embedded document) ───────────────────────

/// The symmetric decoder used on the embedded-document side for the
/// host-pushed configuration messages.
///
/// The payloads of both push kinds are opaque records owned by the wallet
/// UI, so any present payload value is accepted once the envelope itself is
/// well formed.
pub fn decode_host_to_frame(value: &Value) -> Option<Envelope<HostToFrameMsg>> {
    let (id, kind, payload) = split_envelope(value)?;

    let message = match kind {
        kinds::THEME_UPDATE => HostToFrameMsg::ThemeUpdate(payload.clone()),
        kinds::BALANCE_CURRENCY => HostToFrameMsg::BalanceCurrency(payload.clone()),
        _ => return None,
    };

    Some(Envelope { id, message })
}

// ── Shared envelope splitting ─────────────────────────────────────────────────

/// Extracts the three required envelope fields, rejecting anything that is
/// not an object carrying all of them.
fn split_envelope(value: &Value) -> Option<(Value, &str, &Value)> {
    let obj = value.as_object()?;
    let id = obj.get("id")?.clone();
    let kind = obj.get("kind")?.as_str()?;
    let payload = obj.get("payload")?;
    Some((id, kind, payload))
}

/// Deserializes a payload object into its typed shape.
///
/// Non-object payloads are rejected up front so a recognized kind carrying
/// e.g. a bare number never reaches the struct deserializer.
fn typed_payload<T: DeserializeOwned>(payload: &Value) -> Option<T> {
    payload.as_object()?;
    serde_json::from_value(payload.clone()).ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
