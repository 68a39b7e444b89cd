//! Infrastructure layer: everything that touches the page or the channel.
//!
//! The application layer above describes *what* should happen; these modules
//! own *where* it happens: the host-page facade, the two visibility surface
//! strategies, the trigger control, and the transport boundary.

pub mod page;
pub mod surface;
pub mod transport;
pub mod trigger;
