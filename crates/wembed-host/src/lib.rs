//! # wembed-host
//!
//! The host-page side of Wallet-Embed: embed a wallet's interactive surface
//! (auth, account, settings flows) in a third-party page as an isolated
//! embedded document, synchronized with an optional floating trigger control
//! and with the embedding application's callbacks.
//!
//! # Architecture overview
//!
//! ```text
//! embedded document (isolated context)
//!         ↕  JSON envelopes over a fire-and-forget channel
//! FrameTransport  ──►  WalletEmbed (orchestrator, state machine)
//!                        ├─► VisibilitySurface (overlay | wrapper)
//!                        ├─► TriggerControl (optional)
//!                        └─► EmbedCallbacks (embedding application)
//! ```
//!
//! - **`domain`** – construction options: strategy selection, overlay
//!   styling hooks, trigger corner/logo/balance/badge, click-outside policy.
//! - **`application`** – the [`WalletEmbed`] orchestrator: the open/close
//!   state machine, the synchronized [`EmbeddingState`], and the callback
//!   surface.
//! - **`infrastructure`** – the [`HostPage`] facade (with a recording mock
//!   for tests), the two visibility surface strategies, the trigger control,
//!   and the [`FrameTransport`] boundary (with an in-memory loopback).
//!
//! The embedding application owns the [`WalletEmbed`] and drains its event
//! queue; message arrival, clicks, and API calls are all serialized through
//! that single owner, so no state here needs locking.

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export the public surface at the crate root.
pub use application::callbacks::EmbedCallbacks;
pub use application::orchestrator::{EmbedError, EmbeddingState, WalletEmbed};
pub use domain::config::{
    ButtonOptions, ButtonPosition, ClickOutsideBehavior, EmbedOptions, OverlayOptions,
};
pub use infrastructure::page::{mock::MockHostPage, HostPage, ListenerId, NodeId, Rect, BODY_NODE};
pub use infrastructure::surface::{overlay::OverlaySurface, wrapper::WrapperSurface, VisibilitySurface};
pub use infrastructure::transport::{
    loopback::LoopbackTransport, FrameSink, FrameTransport, SubscriptionId, TransportError,
};
pub use infrastructure::trigger::{TriggerControl, TriggerFlag};
