//! Payload shapes and the two directional message unions.
//!
//! # Two unions, one per direction
//!
//! The two directions carry different information:
//!
//! - The embedded document *reports* (auth changes, its desired footprint,
//!   balances, pending requests, flow completion).
//! - The host page *pushes configuration* (theme, display currency), with no
//!   acknowledgement.
//!
//! Using two distinct enums makes it a compile-time error to feed a
//! host-only message into the frame-bound encoder, and vice versa.
//!
//! # Structural-subset payloads
//!
//! Payload structs deliberately do **not** use `deny_unknown_fields`: an
//! otherwise-valid payload carrying extra fields (a newer embedded document
//! talking to an older host) must still validate.  Missing required fields
//! or wrong primitive types reject the whole message, never a partial
//! record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::domain::route::{BalanceInfo, RouteConfig};
use crate::protocol::envelope::{kinds, WireMessage};

// ── Inbound payloads (embedded document → host page) ─────────────────────────

/// Payload of an `authStatus` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthStatusPayload {
    /// The signed-in user's details, or `null` when signed out.
    ///
    /// The record itself is opaque to this layer; it is handed to the
    /// embedding application's `on_auth` callback untouched.  The field must
    /// be present on the wire; `null` and a record are both valid values,
    /// but an `authStatus` without the field is malformed.
    #[serde(rename = "userDetails", deserialize_with = "nullable_value")]
    pub user_details: Option<Value>,
}

/// Payload of a `pendingRequests` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRequestsPayload {
    /// Replacement count of requests awaiting the user.  Always a whole,
    /// non-negative number; the host never increments it locally.
    pub count: u64,
}

/// Requires the field to be present while still accepting `null`.
///
/// Serde treats a plain `Option<T>` field as optional (absent ⇒ `None`);
/// attaching a `deserialize_with` makes absence an error, which is the
/// contract here: "signed out" is an explicit `null`, not a missing field.
fn nullable_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer)
}

// ── Inbound union ─────────────────────────────────────────────────────────────

/// All messages the embedded document can send to the host page.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameToHostMsg {
    /// The sign-in state changed.  Emitted on every change.
    AuthStatus(AuthStatusPayload),
    /// The embedded document's own flow concluded; the host should hide it.
    Closed,
    /// The embedded document's desired footprint changed (including once on
    /// first paint).  The carried [`RouteConfig`] replaces the previous one
    /// wholesale.
    Resize(RouteConfig),
    /// A balance snapshot for display on the trigger control.
    Balance(BalanceInfo),
    /// Replacement count of requests awaiting the user.
    PendingRequests(PendingRequestsPayload),
}

impl WireMessage for FrameToHostMsg {
    fn kind(&self) -> &'static str {
        match self {
            FrameToHostMsg::AuthStatus(_) => kinds::AUTH_STATUS,
            FrameToHostMsg::Closed => kinds::CLOSED,
            FrameToHostMsg::Resize(_) => kinds::RESIZE,
            FrameToHostMsg::Balance(_) => kinds::BALANCE,
            FrameToHostMsg::PendingRequests(_) => kinds::PENDING_REQUESTS,
        }
    }

    fn payload_value(&self) -> Value {
        match self {
            FrameToHostMsg::AuthStatus(p) => json!({ "userDetails": p.user_details }),
            FrameToHostMsg::Closed => json!({}),
            FrameToHostMsg::Resize(config) => {
                let mut payload = json!({
                    "routeKind": config.route_kind,
                    "preferredLayout": config.preferred_layout,
                    "height": config.height,
                });
                if let Some(width) = config.width {
                    payload["width"] = json!(width);
                }
                payload
            }
            FrameToHostMsg::Balance(info) => {
                json!({ "amount": info.amount, "currency": info.currency })
            }
            FrameToHostMsg::PendingRequests(p) => json!({ "count": p.count }),
        }
    }
}

// ── Outbound union ────────────────────────────────────────────────────────────

/// All messages the host page can push to the embedded document.
///
/// Both are one-way configuration pushes: the embedded document applies them
/// and never acknowledges.  The payloads are opaque records owned by the
/// wallet UI; this layer only wraps and transports them.
#[derive(Debug, Clone, PartialEq)]
pub enum HostToFrameMsg {
    /// A theme record (colors, dark mode, ...) for the embedded document.
    ThemeUpdate(Value),
    /// The display currency the embedded document should report balances in.
    BalanceCurrency(Value),
}

impl WireMessage for HostToFrameMsg {
    fn kind(&self) -> &'static str {
        match self {
            HostToFrameMsg::ThemeUpdate(_) => kinds::THEME_UPDATE,
            HostToFrameMsg::BalanceCurrency(_) => kinds::BALANCE_CURRENCY,
        }
    }

    fn payload_value(&self) -> Value {
        match self {
            HostToFrameMsg::ThemeUpdate(payload) | HostToFrameMsg::BalanceCurrency(payload) => {
                payload.clone()
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
