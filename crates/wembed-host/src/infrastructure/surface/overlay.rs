//! Overlay strategy: a full-viewport backdrop for modal presentation.
//!
//! The backdrop exists from construction but starts imperceptible and
//! non-interactive (`opacity: 0`, `pointer-events: none`), so showing is a
//! pure style flip with a CSS transition, no element churn.  `show` makes
//! it opaque and interactive atomically; `hide` reverses both atomically.
//! The frame region lives centered inside the backdrop.

use std::sync::Arc;

use tracing::debug;
use wembed_core::{PreferredLayout, RouteConfig};

use crate::domain::config::OverlayOptions;
use crate::infrastructure::page::{HostPage, NodeId, BODY_NODE};

use super::{px, VisibilitySurface, BACKDROP_ALPHA_THRESHOLD, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH};

/// CSS classes toggled by the layout preference of the current route.
const LAYOUT_WIDE_CLASS: &str = "wembed-layout-wide";
const LAYOUT_COMPACT_CLASS: &str = "wembed-layout-compact";

/// Modal presentation behind a dimming backdrop.
pub struct OverlaySurface {
    page: Arc<dyn HostPage>,
    backdrop: NodeId,
    frame: NodeId,
    visible: bool,
}

impl OverlaySurface {
    /// Builds the backdrop on the body and parents `frame` inside it.
    ///
    /// The surface starts hidden regardless of the frame's previous styling.
    pub fn new(page: Arc<dyn HostPage>, frame: NodeId, options: &OverlayOptions) -> Self {
        let backdrop = page.create_element("div", "wembed-backdrop");
        if let Some(class) = &options.backdrop_class {
            page.add_class(backdrop, class);
        }

        // Full-viewport dimming layer, centering its content.
        page.set_style(backdrop, "position", "fixed");
        page.set_style(backdrop, "inset", "0");
        page.set_style(backdrop, "display", "flex");
        page.set_style(backdrop, "align-items", "center");
        page.set_style(backdrop, "justify-content", "center");
        page.set_style(backdrop, "background", &options.backdrop_background);
        page.set_style(backdrop, "z-index", &options.z_index.to_string());
        page.set_style(backdrop, "transition", "opacity 0.2s ease");
        page.set_style(backdrop, "opacity", "0");
        page.set_style(backdrop, "pointer-events", "none");

        page.set_style(frame, "border", "none");
        page.set_style(frame, "width", &px(DEFAULT_FRAME_WIDTH));
        page.set_style(frame, "height", &px(DEFAULT_FRAME_HEIGHT));

        page.append_child(BODY_NODE, backdrop);
        page.append_child(backdrop, frame);

        Self { page, backdrop, frame, visible: false }
    }

    /// The backdrop element, exposed for styling assertions in tests.
    pub fn backdrop_node(&self) -> NodeId {
        self.backdrop
    }
}

impl VisibilitySurface for OverlaySurface {
    fn show(&mut self) {
        if self.visible {
            return;
        }
        // Interactivity and visibility flip together: a clickable invisible
        // backdrop would swallow the page's own clicks.
        self.page.set_style(self.backdrop, "opacity", "1");
        self.page.set_style(self.backdrop, "pointer-events", "auto");
        self.visible = true;
        debug!("overlay surface shown");
    }

    fn hide(&mut self) {
        if !self.visible {
            return;
        }
        self.page.set_style(self.backdrop, "opacity", "0");
        self.page.set_style(self.backdrop, "pointer-events", "none");
        self.visible = false;
        debug!("overlay surface hidden");
    }

    fn resize(&mut self, config: &RouteConfig) {
        match config.width {
            Some(width) => self.page.set_style(self.frame, "width", &px(width)),
            // Absent width hands the decision back to the stylesheet.
            None => self.page.clear_style(self.frame, "width"),
        }
        self.page.set_style(self.frame, "height", &px(config.height));

        match config.preferred_layout {
            PreferredLayout::Wide => {
                self.page.add_class(self.frame, LAYOUT_WIDE_CLASS);
                self.page.remove_class(self.frame, LAYOUT_COMPACT_CLASS);
            }
            PreferredLayout::Compact => {
                self.page.add_class(self.frame, LAYOUT_COMPACT_CLASS);
                self.page.remove_class(self.frame, LAYOUT_WIDE_CLASS);
            }
        }
    }

    fn frame_node(&self) -> NodeId {
        self.frame
    }

    fn backdrop_obscures_page(&self) -> bool {
        self.visible && self.page.background_alpha(self.backdrop) > BACKDROP_ALPHA_THRESHOLD
    }

    fn destroy(&mut self) {
        self.visible = false;
        // The frame was created by the library and lives inside the
        // backdrop, so removing the backdrop removes the whole subtree.
        self.page.remove_element(self.backdrop);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
