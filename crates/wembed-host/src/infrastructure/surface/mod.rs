//! The visibility surface: the on-screen region hosting the embedded document.
//!
//! Two interchangeable strategies exist, chosen once at construction and
//! never branched on afterwards:
//!
//! - [`overlay::OverlaySurface`] — a full-viewport backdrop for modal
//!   presentation.  Used when the library creates the embed's iframe itself.
//! - [`wrapper::WrapperSurface`] — a positioning wrapper spliced into the
//!   host page's own layout flow, for seamless inline presentation around a
//!   caller-supplied element.
//!
//! Both guarantee: `show`/`hide` are idempotent, and calling either before
//! any `resize` has occurred is safe (the default footprint applies).

pub mod overlay;
pub mod wrapper;

use wembed_core::RouteConfig;

use crate::infrastructure::page::NodeId;

// ── Defaults ──────────────────────────────────────────────────────────────────

/// Footprint applied until the embedded document reports its own.
pub const DEFAULT_FRAME_WIDTH: f64 = 375.0;
pub const DEFAULT_FRAME_HEIGHT: f64 = 600.0;

/// Below this effective backdrop alpha the user cannot perceive the overlay,
/// so a click "outside" must not be treated as a dismissal gesture.
pub const BACKDROP_ALPHA_THRESHOLD: f64 = 0.05;

/// Formats a CSS pixel length.
pub(crate) fn px(value: f64) -> String {
    format!("{value}px")
}

// ── The strategy interface ────────────────────────────────────────────────────

/// Owns show/hide/resize of the region hosting the embedded document.
///
/// Written to by the orchestrator, never read back (except for the two
/// queries below, which are derived from the surface's own bookkeeping).
pub trait VisibilitySurface: Send {
    /// Presents the region.  Idempotent.
    fn show(&mut self);

    /// Conceals the region.  Idempotent.
    fn hide(&mut self);

    /// Applies a new footprint.  The config replaces whatever came before;
    /// an absent `width` means "let the layout choose", not "zero".
    fn resize(&mut self, config: &RouteConfig);

    /// The element hosting the embedded document, for hit-testing.
    fn frame_node(&self) -> NodeId;

    /// `true` while the surface presents a perceptibly non-transparent
    /// backdrop over the page.  Strategies without a backdrop always return
    /// `false`.
    fn backdrop_obscures_page(&self) -> bool;

    /// Tears the surface down, leaving the host page as it was before
    /// construction (strategy-specific: the overlay removes its subtree, the
    /// wrapper reverses its re-parenting).
    fn destroy(&mut self);
}
