//! # wembed-core
//!
//! Shared library for Wallet-Embed containing the cross-context message
//! protocol, the message validator, and the route/layout vocabulary.
//!
//! This crate is used by both sides of the embed: the host-page library
//! (`wembed-host`) and the embedded-document helper (`wembed-frame`).
//! It has zero dependencies on DOM facades, async runtimes, or channels.
//!
//! # Architecture overview
//!
//! Wallet-Embed lets a wallet's interactive surface (auth, account, settings
//! flows) run as an isolated embedded document inside a third-party page.
//! The two execution contexts cannot call each other directly; everything
//! crosses a fire-and-forget messaging channel as JSON envelopes.
//!
//! This crate (`wembed-core`) is the shared foundation.  It defines:
//!
//! - **`protocol`** – The envelope wrapper (`{id, kind, payload}`), the two
//!   directional message unions, and the validator that decides whether an
//!   arbitrary received JSON value is a well-formed, known message.  The
//!   channel may carry unrelated traffic from other scripts on the same
//!   page, so rejection is a normal outcome, not an error.
//!
//! - **`domain`** – The embedded document's self-reported presentation
//!   vocabulary: route kinds, layout preferences, [`RouteConfig`] footprints
//!   (replaced wholesale on every resize, never patched), and the balance
//!   record shown on the trigger control.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `wembed_core::RouteConfig` instead of `wembed_core::domain::route::RouteConfig`.
pub use domain::route::{BalanceInfo, PreferredLayout, RouteConfig, RouteKind};
pub use protocol::envelope::{kinds, Envelope, WireMessage};
pub use protocol::messages::{AuthStatusPayload, FrameToHostMsg, HostToFrameMsg, PendingRequestsPayload};
pub use protocol::validate::{decode_frame_to_host, decode_host_to_frame};
