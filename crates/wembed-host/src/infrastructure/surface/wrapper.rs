//! Wrapper strategy: inline presentation inside the host page's layout flow.
//!
//! Instead of a backdrop, a positioning wrapper is inserted directly before
//! the caller-supplied frame element, sized from the frame's measured rect
//! so the splice is visually seamless.  The frame is re-parented into the
//! wrapper and its position reset to "relative to wrapper".  Show/hide use
//! an opacity+scale transition (a "pop") rather than a visibility toggle,
//! suited to non-modal embedding where the page around the embed stays
//! interactive.
//!
//! `destroy` reverses the re-parenting and clears every style this strategy
//! wrote, so the host page's layout is left exactly as before construction.

use std::sync::Arc;

use tracing::debug;
use wembed_core::RouteConfig;

use crate::infrastructure::page::{HostPage, NodeId};

use super::{px, VisibilitySurface};

/// Styles written onto the frame at construction, cleared again at destroy.
const FRAME_STYLE_PROPERTIES: [&str; 7] =
    ["position", "top", "left", "width", "height", "opacity", "transform"];

/// The pop transition shared by show and hide.
const POP_TRANSITION: &str = "opacity 0.15s ease, transform 0.15s ease";

/// Inline presentation around a caller-supplied frame element.
pub struct WrapperSurface {
    page: Arc<dyn HostPage>,
    wrapper: NodeId,
    frame: NodeId,
    visible: bool,
}

impl WrapperSurface {
    /// Splices a wrapper into the layout flow around `frame`.
    ///
    /// The wrapper inherits the frame's current footprint so surrounding
    /// content does not reflow; the frame starts concealed (popped out).
    pub fn new(page: Arc<dyn HostPage>, frame: NodeId) -> Self {
        let rect = page.measure(frame);
        let wrapper = page.create_element("div", "wembed-wrapper");
        page.set_style(wrapper, "position", "relative");
        page.set_style(wrapper, "width", &px(rect.width));
        page.set_style(wrapper, "height", &px(rect.height));

        page.insert_before(wrapper, frame);
        page.append_child(wrapper, frame);

        page.set_style(frame, "position", "relative");
        page.set_style(frame, "top", "0");
        page.set_style(frame, "left", "0");
        page.set_style(frame, "width", "100%");
        page.set_style(frame, "height", "100%");
        page.set_style(frame, "transition", POP_TRANSITION);
        page.set_style(frame, "opacity", "0");
        page.set_style(frame, "transform", "scale(0.8)");

        Self { page, wrapper, frame, visible: false }
    }

    /// The wrapper element, exposed for layout assertions in tests.
    pub fn wrapper_node(&self) -> NodeId {
        self.wrapper
    }
}

impl VisibilitySurface for WrapperSurface {
    fn show(&mut self) {
        if self.visible {
            return;
        }
        self.page.set_style(self.frame, "opacity", "1");
        self.page.set_style(self.frame, "transform", "scale(1)");
        self.visible = true;
        debug!("wrapper surface shown");
    }

    fn hide(&mut self) {
        if !self.visible {
            return;
        }
        self.page.set_style(self.frame, "opacity", "0");
        self.page.set_style(self.frame, "transform", "scale(0.8)");
        self.visible = false;
        debug!("wrapper surface hidden");
    }

    fn resize(&mut self, config: &RouteConfig) {
        // The wrapper owns the layout slot; the frame fills it at 100%.
        match config.width {
            Some(width) => self.page.set_style(self.wrapper, "width", &px(width)),
            None => self.page.clear_style(self.wrapper, "width"),
        }
        self.page.set_style(self.wrapper, "height", &px(config.height));
    }

    fn frame_node(&self) -> NodeId {
        self.frame
    }

    fn backdrop_obscures_page(&self) -> bool {
        // No backdrop exists in inline presentation.
        false
    }

    fn destroy(&mut self) {
        self.visible = false;
        // Reverse the re-parenting: frame back where the wrapper stands,
        // then drop the wrapper and every style this strategy wrote.
        self.page.insert_before(self.frame, self.wrapper);
        self.page.remove_element(self.wrapper);
        for property in FRAME_STYLE_PROPERTIES {
            self.page.clear_style(self.frame, property);
        }
        self.page.clear_style(self.frame, "transition");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
