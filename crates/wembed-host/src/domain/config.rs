//! Embed construction options.
//!
//! [`EmbedOptions`] is the single source of truth for how an embed instance
//! is put together: where the embedded document loads from, which visibility
//! strategy hosts it, whether the floating trigger exists, and how
//! click-outside dismissal behaves.  It is a plain struct with no globals
//! and no environment reads, so multiple embeds with different configurations can
//! coexist on one page and tests can construct any shape directly.
//!
//! Contradictory options do not fail construction.  The documented
//! precedence applies (an explicit `frame_element` wins over a requested
//! overlay) and the conflict is logged as a warning.

use crate::infrastructure::page::NodeId;

// ── Click-outside behavior ────────────────────────────────────────────────────

/// When a click outside the embed's own surfaces should close it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickOutsideBehavior {
    /// Close only while the surface presents a perceptibly non-transparent
    /// backdrop; never dismiss against an invisible or absent one.
    #[default]
    Auto,
    /// Close on any outside click, backdrop or not.
    Always,
    /// Never close on outside clicks.
    Off,
}

// ── Overlay styling hooks ─────────────────────────────────────────────────────

/// Configuration for the overlay (modal) visibility strategy.
#[derive(Debug, Clone)]
pub struct OverlayOptions {
    /// CSS background of the dimming backdrop.
    pub backdrop_background: String,
    /// Extra class added to the backdrop, as a styling hook for the
    /// embedding application.
    pub backdrop_class: Option<String>,
    /// Stacking order of the backdrop.
    pub z_index: u32,
    /// Click-outside dismissal policy.
    pub click_outside: ClickOutsideBehavior,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            backdrop_background: "rgba(33, 37, 41, 0.45)".to_string(),
            backdrop_class: None,
            z_index: 999_999,
            click_outside: ClickOutsideBehavior::Auto,
        }
    }
}

// ── Trigger options ───────────────────────────────────────────────────────────

/// Viewport corner the trigger control is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

/// Configuration for the floating trigger control.
#[derive(Debug, Clone)]
pub struct ButtonOptions {
    /// Which viewport corner hosts the trigger.
    pub position: ButtonPosition,
    /// Wallet logo image shown on the trigger, if any.
    pub logo_url: Option<String>,
    /// Whether the trigger renders the current balance.
    pub show_balance: bool,
    /// Whether the trigger renders the pending-request badge.
    pub show_notifications: bool,
}

impl Default for ButtonOptions {
    fn default() -> Self {
        Self {
            position: ButtonPosition::default(),
            logo_url: None,
            show_balance: true,
            show_notifications: true,
        }
    }
}

// ── Top-level options ─────────────────────────────────────────────────────────

/// Everything the embedding application decides at construction time.
#[derive(Debug, Clone)]
pub struct EmbedOptions {
    /// Address the embedded document loads from.
    pub src: String,
    /// A pre-existing host element supplied by the caller.  Selects the
    /// wrapper (inline) strategy and wins over `overlay` when both are set.
    pub frame_element: Option<NodeId>,
    /// Overlay (modal) strategy configuration.  Used when no
    /// `frame_element` is supplied; `None` means overlay with defaults.
    pub overlay: Option<OverlayOptions>,
    /// Trigger control configuration; `None` disables the trigger.
    pub button: Option<ButtonOptions>,
}

impl EmbedOptions {
    /// Options for embedding the document at `src`, with the overlay
    /// strategy, default styling, and no trigger.
    pub fn new(src: impl Into<String>) -> Self {
        Self { src: src.into(), frame_element: None, overlay: None, button: None }
    }

    /// Selects the wrapper strategy around a caller-supplied element.
    pub fn with_frame_element(mut self, element: NodeId) -> Self {
        self.frame_element = Some(element);
        self
    }

    /// Overrides the overlay configuration.
    pub fn with_overlay(mut self, overlay: OverlayOptions) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// Enables the trigger control.
    pub fn with_button(mut self, button: ButtonOptions) -> Self {
        self.button = Some(button);
        self
    }

    /// The effective click-outside policy (from the overlay configuration,
    /// defaulting to [`ClickOutsideBehavior::Auto`]).
    pub fn click_outside(&self) -> ClickOutsideBehavior {
        self.overlay.as_ref().map_or(ClickOutsideBehavior::Auto, |o| o.click_outside)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
