//! The cross-context JSON message protocol.
//!
//! Everything that crosses the host-page ↔ embedded-document channel is an
//! [`envelope::Envelope`]: `{id, kind, payload}`.  [`messages`] defines the
//! payload unions for both directions; [`validate`] decides, for an
//! arbitrary received value, whether it is a well-formed, known message.

pub mod envelope;
pub mod messages;
pub mod validate;
