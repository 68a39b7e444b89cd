//! # wembed-frame
//!
//! The embedded-document side of Wallet-Embed.  The wallet UI running in the
//! isolated context uses this crate to speak the same envelope protocol the
//! host library listens for:
//!
//! - **Inbound** (host → frame): validate the push-only configuration
//!   messages (`themeUpdate`, `balanceCurrency`) with the same silent-drop
//!   contract the host applies to frame traffic: the channel is shared, so
//!   unrecognizable values are expected and simply ignored.
//! - **Outbound** (frame → host): typed emitters for everything the host
//!   synchronizes on.  Per the collaborator contract, the wallet UI emits
//!   `authStatus` on every sign-in change, exactly one `closed` when its own
//!   flow concludes, `resize` whenever its desired footprint changes
//!   (including once on first paint), and `balance`/`pendingRequests`
//!   opportunistically.
//!
//! Like the host side, this crate never creates the low-level channel; the
//! wallet UI hands in its endpoint as a [`HostPost`] implementation.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use wembed_core::{
    decode_host_to_frame, AuthStatusPayload, BalanceInfo, Envelope, FrameToHostMsg,
    HostToFrameMsg, PendingRequestsPayload, RouteConfig, WireMessage,
};

// ── The outbound boundary ─────────────────────────────────────────────────────

/// Errors crossing the frame-side channel boundary.
#[derive(Debug, Error)]
pub enum PostError {
    /// The host page's context is unreachable (detached, navigated away).
    #[error("channel to host page unavailable: {0}")]
    ChannelUnavailable(String),
}

/// The host page's communication endpoint, as seen from the embedded
/// document.
pub trait HostPost: Send + Sync {
    /// Posts an envelope-shaped value toward the host page.
    /// Fire-and-forget: there is no acknowledgement concept.
    fn post(&self, envelope: Value) -> Result<(), PostError>;
}

// ── The agent ─────────────────────────────────────────────────────────────────

/// The embedded document's protocol agent.
pub struct FrameAgent {
    transport: Arc<dyn HostPost>,
}

impl FrameAgent {
    /// Wraps the channel endpoint the wallet UI was handed.
    pub fn new(transport: Arc<dyn HostPost>) -> Self {
        Self { transport }
    }

    // ── Inbound ───────────────────────────────────────────────────────────────

    /// Validates a raw value arriving from the host page.
    ///
    /// Returns `None` for anything that is not a well-formed host push;
    /// the caller drops the event, exactly as the host drops malformed
    /// frame traffic.
    pub fn handle_host_value(&self, value: &Value) -> Option<Envelope<HostToFrameMsg>> {
        decode_host_to_frame(value)
    }

    // ── Outbound emitters ─────────────────────────────────────────────────────

    /// Reports a sign-in state change.  `None` means signed out and is sent
    /// as an explicit `null`, never as a missing field.
    ///
    /// # Errors
    ///
    /// Returns [`PostError`] if the channel rejected the value.
    pub fn announce_auth(&self, user_details: Option<Value>) -> Result<(), PostError> {
        self.send(FrameToHostMsg::AuthStatus(AuthStatusPayload { user_details }))
    }

    /// Reports that the wallet UI's own flow concluded.  Emitted exactly
    /// once per flow; the host hides the surface in response.
    ///
    /// # Errors
    ///
    /// Returns [`PostError`] if the channel rejected the value.
    pub fn announce_closed(&self) -> Result<(), PostError> {
        self.send(FrameToHostMsg::Closed)
    }

    /// Reports the desired footprint for the current route.  The host
    /// replaces its previous config wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`PostError`] if the channel rejected the value.
    pub fn request_resize(&self, config: RouteConfig) -> Result<(), PostError> {
        self.send(FrameToHostMsg::Resize(config))
    }

    /// Reports a balance snapshot for the trigger control display.
    ///
    /// # Errors
    ///
    /// Returns [`PostError`] if the channel rejected the value.
    pub fn report_balance(&self, info: BalanceInfo) -> Result<(), PostError> {
        self.send(FrameToHostMsg::Balance(info))
    }

    /// Reports the replacement count of requests awaiting the user.
    ///
    /// # Errors
    ///
    /// Returns [`PostError`] if the channel rejected the value.
    pub fn report_pending_requests(&self, count: u64) -> Result<(), PostError> {
        self.send(FrameToHostMsg::PendingRequests(PendingRequestsPayload { count }))
    }

    fn send(&self, message: FrameToHostMsg) -> Result<(), PostError> {
        let envelope = Envelope::new(message);
        debug!(kind = envelope.message.kind(), "posting to host");
        self.transport.post(envelope.to_value())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
