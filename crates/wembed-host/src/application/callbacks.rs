//! The embedding application's callback surface.
//!
//! Every callback is optional and defaults to a no-op.  Callbacks are
//! invoked synchronously inside the handler that triggered them, on the same
//! single consumer that drains the event queue; there is no callback
//! reordering and no concurrency to guard against.

use serde_json::Value;
use wembed_core::{BalanceInfo, RouteConfig};

/// Notifications the embed delivers to the embedding application.
#[derive(Default)]
pub struct EmbedCallbacks {
    /// Sign-in state changed.  Receives the user details record, or `None`
    /// when signed out.  Invoked on every `authStatus`, even when the value
    /// did not change.
    pub on_auth: Option<Box<dyn FnMut(Option<&Value>) + Send>>,
    /// The surface was presented.
    pub on_open: Option<Box<dyn FnMut() + Send>>,
    /// The surface was concealed (explicit close, frame-initiated close,
    /// trigger click, or click-outside: all four paths).
    pub on_close: Option<Box<dyn FnMut() + Send>>,
    /// The embedded document reported a new footprint.
    pub on_resize: Option<Box<dyn FnMut(&RouteConfig) + Send>>,
    /// A balance snapshot arrived.
    pub on_balance: Option<Box<dyn FnMut(&BalanceInfo) + Send>>,
    /// The pending-request count was replaced.
    pub on_request: Option<Box<dyn FnMut(u64) + Send>>,
}

impl EmbedCallbacks {
    /// An all-no-op callback set.
    pub fn none() -> Self {
        Self::default()
    }
}
