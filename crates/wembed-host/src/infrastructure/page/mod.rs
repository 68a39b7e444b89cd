//! The host-page facade: the only boundary where DOM effects happen.
//!
//! Everything above this trait (the orchestrator, the visibility surfaces,
//! the trigger control) is pure state logic that *describes* page effects
//! by calling [`HostPage`] methods.  The shipping binding implements this
//! trait over the real document; tests use [`mock::MockHostPage`], which
//! records every call for inspection.
//!
//! # Node identity
//!
//! Elements are referred to by opaque [`NodeId`]s.  The id `0` is reserved
//! for the document body ([`BODY_NODE`]); every other id is allocated by
//! `create_element` or refers to a caller-supplied element.
//!
//! # Click delivery
//!
//! Click listeners do not run arbitrary page logic: they forward the click
//! target's [`NodeId`] into a sink the registrar provides.  The orchestrator
//! points those sinks at its own event queue, so clicks are serialized with
//! message arrival and API calls instead of re-entering the state machine.

pub mod mock;

// ── Identity and geometry ─────────────────────────────────────────────────────

/// Opaque handle to an element on the host page.
pub type NodeId = u64;

/// The document body. Always present, never created or removed.
pub const BODY_NODE: NodeId = 0;

/// Handle to a registered click listener, used for removal at teardown.
pub type ListenerId = u64;

/// Receives the click target when a registered listener fires.
pub type ClickSink = Box<dyn Fn(NodeId) + Send + Sync>;

/// An element's position and size in CSS pixels, relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

// ── The facade ────────────────────────────────────────────────────────────────

/// Page-manipulation operations the embed layer needs.
///
/// All methods take `&self`: implementations are expected to use interior
/// mutability (the real binding talks to the document, the mock records into
/// `Mutex`ed fields), which lets the facade be shared as an `Arc` between
/// the orchestrator and its owned surfaces.
pub trait HostPage: Send + Sync {
    /// Creates a detached element and returns its handle.
    fn create_element(&self, tag: &str, class_name: &str) -> NodeId;

    /// Removes an element (and its subtree) from the page.
    fn remove_element(&self, node: NodeId);

    /// Appends `child` as the last child of `parent`, detaching it from its
    /// current parent first if necessary (a move, like the DOM's
    /// `appendChild`).
    fn append_child(&self, parent: NodeId, child: NodeId);

    /// Inserts `node` into `reference`'s parent, directly before
    /// `reference`.
    fn insert_before(&self, node: NodeId, reference: NodeId);

    /// Sets an attribute (e.g. `src`) on an element.
    fn set_attribute(&self, node: NodeId, name: &str, value: &str);

    /// Sets an inline style property.
    fn set_style(&self, node: NodeId, property: &str, value: &str);

    /// Clears an inline style property, handing control back to the page's
    /// stylesheet ("let the layout choose").
    fn clear_style(&self, node: NodeId, property: &str);

    /// Replaces an element's text content.
    fn set_text(&self, node: NodeId, text: &str);

    /// Adds a CSS class.
    fn add_class(&self, node: NodeId, class_name: &str);

    /// Removes a CSS class.
    fn remove_class(&self, node: NodeId, class_name: &str);

    /// Measures an element's current viewport rect.
    fn measure(&self, node: NodeId) -> Rect;

    /// Reports the effective rendered opacity of an element's background,
    /// in `0.0 ..= 1.0`.  This feeds the click-outside heuristic: a backdrop
    /// the user cannot perceive must not swallow their clicks as "dismiss".
    fn background_alpha(&self, node: NodeId) -> f64;

    /// Returns `true` if `node` is `ancestor` or lies inside it.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    /// Registers a document-wide click listener.  Every click anywhere on
    /// the page delivers its target into `sink`.
    fn add_document_click_listener(&self, sink: ClickSink) -> ListenerId;

    /// Registers a click listener scoped to one element and its subtree.
    fn add_click_listener(&self, node: NodeId, sink: ClickSink) -> ListenerId;

    /// Removes a listener registered by either `add_*_click_listener`.
    fn remove_click_listener(&self, id: ListenerId);
}
