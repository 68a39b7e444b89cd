//! The orchestrator: the long-lived object the embedding application owns.
//!
//! [`WalletEmbed`] wires the validator, the visibility surface, and the
//! trigger control together, owns the synchronized [`EmbeddingState`], and
//! runs the open/close state machine.
//!
//! # Event model
//!
//! ```text
//! transport subscription ─┐
//! document click listener ─┼──► event queue ──► handle_event ──► surfaces,
//! trigger click sink      ─┘    (mpsc)          (single owner)   trigger,
//!                                                                callbacks
//! ```
//!
//! Message arrival, click events, and public API calls are all serialized
//! through the one owner of this struct, so `EmbeddingState` needs no
//! locking and every effect runs synchronously inside its handler.  The
//! queue is drained with [`WalletEmbed::process_pending`] (non-blocking) or
//! [`WalletEmbed::next_event`] (async), whichever fits the embedding
//! application's loop.
//!
//! # State machine
//!
//! Two states, Closed and Open, starting Closed.
//!
//! - Closed → Open: explicit `open()`, a trigger click, or an inbound
//!   `resize` with the auth-request route kind while auto-open is permitted.
//! - Open → Closed: explicit `close()`, an inbound `closed`, a trigger
//!   click, or a qualifying click outside the embed's surfaces.
//! - Guard: any *manual* close (everything except the frame-initiated
//!   `closed` message) while requests are pending permanently revokes
//!   auto-open for this instance.
//!
//! `isOpen` and the surface's shown/hidden status always toggle together;
//! `pending_requests` is always a replacement value from the embedded
//! document, never incremented locally.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::{debug, info, trace, warn};

use wembed_core::{
    decode_frame_to_host, BalanceInfo, Envelope, FrameToHostMsg, HostToFrameMsg, RouteConfig,
    RouteKind,
};

use crate::application::callbacks::EmbedCallbacks;
use crate::domain::config::{ClickOutsideBehavior, EmbedOptions, OverlayOptions};
use crate::infrastructure::page::{HostPage, ListenerId, NodeId};
use crate::infrastructure::surface::overlay::OverlaySurface;
use crate::infrastructure::surface::wrapper::WrapperSurface;
use crate::infrastructure::surface::VisibilitySurface;
use crate::infrastructure::transport::{FrameTransport, SubscriptionId};
use crate::infrastructure::trigger::{TriggerControl, TriggerFlag};

// ── Errors ────────────────────────────────────────────────────────────────────

/// Errors surfaced synchronously to the embedding application.
///
/// Malformed channel traffic never appears here; it is dropped inside the
/// dispatcher.  Contradictory construction options never appear here either:
/// construction warns and proceeds under the documented precedence.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// A public operation was invoked but the owned component it drives no
    /// longer exists because the instance was destroyed.  This is a caller
    /// programming error, reported synchronously rather than via callbacks.
    #[error("cannot {operation}: this embed's surfaces are gone (already destroyed)")]
    MissingSurface { operation: &'static str },
}

// ── Synchronized state ────────────────────────────────────────────────────────

/// The single mutable record the orchestrator keeps in sync with the
/// embedded document.  Owned exclusively by one [`WalletEmbed`] instance,
/// never process-wide, so multiple embeds on one page cannot interfere.
#[derive(Debug)]
pub struct EmbeddingState {
    /// Whether the surface is currently presented.  Toggled strictly in
    /// lockstep with the visibility surface's own shown/hidden status.
    pub is_open: bool,
    /// The signed-in user's opaque record, `None` when signed out.
    pub user_details: Option<Value>,
    /// The embedded document's current footprint.  Replaced wholesale on
    /// every resize; `None` until the first one.
    pub route_config: Option<RouteConfig>,
    /// The last balance snapshot, if any arrived.
    pub balance_info: Option<BalanceInfo>,
    /// Replacement count of requests awaiting the user.
    pub pending_requests: u64,
    /// Whether an auth-request resize may still open the surface on its
    /// own.  Starts `true`; revoked for the lifetime of the instance by a
    /// manual close while requests are pending.
    pub should_open_automatically: bool,
}

impl Default for EmbeddingState {
    fn default() -> Self {
        Self {
            is_open: false,
            user_details: None,
            route_config: None,
            balance_info: None,
            pending_requests: 0,
            should_open_automatically: true,
        }
    }
}

// ── Event queue ───────────────────────────────────────────────────────────────

/// Everything that can wake the orchestrator, in delivery order.
#[derive(Debug)]
enum PageEvent {
    /// A raw value arrived from the embedded document's context.
    Frame(Value),
    /// A click happened somewhere on the page (target node).
    DocumentClick(NodeId),
    /// The trigger control was clicked.
    TriggerClick,
}

// ── The orchestrator ──────────────────────────────────────────────────────────

/// A wallet embed instance on a host page.
pub struct WalletEmbed {
    page: Arc<dyn HostPage>,
    transport: Arc<dyn FrameTransport>,
    surface: Option<Box<dyn VisibilitySurface>>,
    trigger: Option<TriggerControl>,
    callbacks: EmbedCallbacks,
    state: EmbeddingState,
    click_outside: ClickOutsideBehavior,
    events: UnboundedReceiver<PageEvent>,
    subscription: Option<SubscriptionId>,
    document_click_listener: Option<ListenerId>,
    destroyed: bool,
}

impl WalletEmbed {
    /// Builds an embed from construction options.
    ///
    /// Never fails: contradictory options are resolved under a documented
    /// precedence (an explicit `frame_element` wins over a requested
    /// overlay) with a warning, and missing options fall back to defaults.
    pub fn new(
        options: EmbedOptions,
        callbacks: EmbedCallbacks,
        transport: Arc<dyn FrameTransport>,
        page: Arc<dyn HostPage>,
    ) -> Self {
        let (events_tx, events) = unbounded_channel();

        if options.frame_element.is_some() && options.overlay.is_some() {
            warn!(
                "both a caller-supplied frame element and an overlay configuration were given; \
                 the explicit element wins and the overlay configuration is ignored"
            );
        }

        // Strategy selection happens exactly once, here.  Nothing below
        // ever branches on which strategy was chosen.
        let surface: Box<dyn VisibilitySurface> = match options.frame_element {
            Some(frame) => {
                page.set_attribute(frame, "src", &options.src);
                Box::new(WrapperSurface::new(Arc::clone(&page), frame))
            }
            None => {
                let frame = page.create_element("iframe", "wembed-frame");
                page.set_attribute(frame, "src", &options.src);
                let overlay_options = options.overlay.clone().unwrap_or_else(OverlayOptions::default);
                Box::new(OverlaySurface::new(Arc::clone(&page), frame, &overlay_options))
            }
        };

        let trigger = options.button.as_ref().map(|button_options| {
            let tx = events_tx.clone();
            TriggerControl::new(
                Arc::clone(&page),
                button_options,
                Box::new(move |_| {
                    let _ = tx.send(PageEvent::TriggerClick);
                }),
            )
        });

        let click_outside = options.click_outside();
        let document_click_listener = match click_outside {
            ClickOutsideBehavior::Off => None,
            ClickOutsideBehavior::Auto | ClickOutsideBehavior::Always => {
                let tx = events_tx.clone();
                Some(page.add_document_click_listener(Box::new(move |target| {
                    let _ = tx.send(PageEvent::DocumentClick(target));
                })))
            }
        };

        let subscription = {
            let tx = events_tx;
            Some(transport.subscribe(Box::new(move |value| {
                let _ = tx.send(PageEvent::Frame(value));
            })))
        };

        info!(src = %options.src, "wallet embed constructed");

        Self {
            page,
            transport,
            surface: Some(surface),
            trigger,
            callbacks,
            state: EmbeddingState::default(),
            click_outside,
            events,
            subscription,
            document_click_listener,
            destroyed: false,
        }
    }

    // ── Public operations ─────────────────────────────────────────────────────

    /// Presents the surface.  A no-op when already open.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::MissingSurface`] after `destroy()`.
    pub fn open(&mut self) -> Result<(), EmbedError> {
        if self.destroyed {
            return Err(EmbedError::MissingSurface { operation: "open" });
        }
        self.transition_open();
        Ok(())
    }

    /// Conceals the surface.  A no-op when already closed.
    ///
    /// A manual close while requests are pending revokes auto-open for the
    /// remainder of this instance's lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::MissingSurface`] after `destroy()`.
    pub fn close(&mut self) -> Result<(), EmbedError> {
        if self.destroyed {
            return Err(EmbedError::MissingSurface { operation: "close" });
        }
        self.close_internal(true);
        Ok(())
    }

    /// Tears the embed down: cancels the message subscription and the
    /// click-outside listener, then removes the trigger and the surface.
    ///
    /// Safe to call more than once; the second call is a no-op.  Events
    /// already queued produce no observable effect afterwards.
    pub fn destroy(&mut self) {
        if self.destroyed {
            debug!("destroy called twice; ignoring");
            return;
        }
        self.destroyed = true;
        if let Some(id) = self.subscription.take() {
            self.transport.unsubscribe(id);
        }
        if let Some(id) = self.document_click_listener.take() {
            self.page.remove_click_listener(id);
        }
        if let Some(mut trigger) = self.trigger.take() {
            trigger.destroy();
        }
        if let Some(mut surface) = self.surface.take() {
            surface.destroy();
        }
        info!("wallet embed destroyed");
    }

    // ── Push channel (host → embedded document, unacknowledged) ───────────────

    /// Pushes a theme record to the embedded document.
    pub fn push_theme(&self, payload: Value) {
        self.push(HostToFrameMsg::ThemeUpdate(payload));
    }

    /// Pushes the display currency to the embedded document.
    pub fn push_balance_currency(&self, payload: Value) {
        self.push(HostToFrameMsg::BalanceCurrency(payload));
    }

    fn push(&self, message: HostToFrameMsg) {
        if self.destroyed {
            return;
        }
        let envelope = Envelope::new(message);
        if let Err(error) = self.transport.post(envelope.to_value()) {
            // Fire-and-forget: the channel has no acknowledgement concept,
            // so a failed push is diagnostics, not a retryable condition.
            debug!(%error, "push to embedded document dropped");
        }
    }

    // ── Reads ─────────────────────────────────────────────────────────────────

    /// Whether a user is currently signed in.
    pub fn is_authenticated(&self) -> bool {
        self.state.user_details.is_some()
    }

    /// Whether the surface is currently presented.
    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// Current frame width, if the embedded document pinned one.
    pub fn width(&self) -> Option<f64> {
        self.state.route_config.as_ref().and_then(|c| c.width)
    }

    /// Current frame height, once the first footprint arrived.
    pub fn height(&self) -> Option<f64> {
        self.state.route_config.as_ref().map(|c| c.height)
    }

    /// The full synchronized state, for inspection.
    pub fn state(&self) -> &EmbeddingState {
        &self.state
    }

    // ── Event pump ────────────────────────────────────────────────────────────

    /// Drains every queued event without blocking.  Returns the number of
    /// events handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Waits for and handles the next event.  Returns `false` once the
    /// queue can produce no more events.
    pub async fn next_event(&mut self) -> bool {
        match self.events.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    // ── Event dispatch ────────────────────────────────────────────────────────

    fn handle_event(&mut self, event: PageEvent) {
        if self.destroyed {
            // The subscription is already cancelled; this only catches
            // events that were queued before destroy().
            trace!("event after destroy ignored");
            return;
        }
        match event {
            PageEvent::Frame(value) => self.handle_frame(&value),
            PageEvent::DocumentClick(target) => self.handle_document_click(target),
            PageEvent::TriggerClick => self.handle_trigger_click(),
        }
    }

    fn handle_frame(&mut self, value: &Value) {
        let Some(envelope) = decode_frame_to_host(value) else {
            // The channel is shared with unrelated page traffic; dropping
            // unrecognizable values silently is the contract.
            trace!("unrecognized channel value dropped");
            return;
        };
        match envelope.message {
            FrameToHostMsg::AuthStatus(payload) => self.apply_auth_status(payload.user_details),
            FrameToHostMsg::Closed => self.close_internal(false),
            FrameToHostMsg::Resize(config) => self.apply_resize(config),
            FrameToHostMsg::Balance(info) => self.apply_balance(info),
            FrameToHostMsg::PendingRequests(payload) => self.apply_pending_requests(payload.count),
        }
    }

    // ── Inbound message handlers ──────────────────────────────────────────────

    fn apply_auth_status(&mut self, user_details: Option<Value>) {
        let signed_in = user_details.is_some();
        self.state.user_details = user_details;

        if let Some(trigger) = &self.trigger {
            if signed_in {
                trigger.set_status(TriggerFlag::Authenticated);
            } else {
                trigger.unset_status(TriggerFlag::Authenticated);
            }
        }

        // Steer the frame toward the matching screen.  The embedded
        // document's own resize replaces this preset wholesale when it
        // repaints.
        let preset = RouteConfig::preset(if signed_in { RouteKind::Default } else { RouteKind::Auth });
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(&preset);
        }
        self.state.route_config = Some(preset);

        debug!(signed_in, "auth status applied");
        if let Some(on_auth) = self.callbacks.on_auth.as_mut() {
            on_auth(self.state.user_details.as_ref());
        }
    }

    fn apply_resize(&mut self, config: RouteConfig) {
        let wants_auto_open = config.route_kind == RouteKind::AuthRequest;

        if let Some(surface) = self.surface.as_mut() {
            surface.resize(&config);
        }
        self.state.route_config = Some(config.clone());
        if let Some(on_resize) = self.callbacks.on_resize.as_mut() {
            on_resize(&config);
        }

        if wants_auto_open && self.state.should_open_automatically && !self.state.is_open {
            debug!("auth-request route arrived while closed; auto-opening");
            self.transition_open();
        }
    }

    fn apply_balance(&mut self, info: BalanceInfo) {
        if let Some(trigger) = &self.trigger {
            trigger.set_balance(&info);
        }
        if let Some(on_balance) = self.callbacks.on_balance.as_mut() {
            on_balance(&info);
        }
        self.state.balance_info = Some(info);
    }

    fn apply_pending_requests(&mut self, count: u64) {
        // Always a replacement, never a local increment; and never a reason
        // to auto-open by itself; only a fresh auth-request resize opens.
        self.state.pending_requests = count;
        if let Some(trigger) = &self.trigger {
            trigger.set_notification_count(count);
        }
        if let Some(on_request) = self.callbacks.on_request.as_mut() {
            on_request(count);
        }
    }

    // ── Click handlers ────────────────────────────────────────────────────────

    fn handle_trigger_click(&mut self) {
        if self.state.is_open {
            self.close_internal(true);
        } else {
            self.transition_open();
        }
    }

    fn handle_document_click(&mut self, target: NodeId) {
        if matches!(self.click_outside, ClickOutsideBehavior::Off) {
            return;
        }
        if !self.state.is_open {
            return;
        }

        let inside_frame = self
            .surface
            .as_ref()
            .is_some_and(|s| self.page.contains(s.frame_node(), target));
        let inside_trigger = self
            .trigger
            .as_ref()
            .is_some_and(|t| self.page.contains(t.root_node(), target));
        if inside_frame || inside_trigger {
            return;
        }

        if matches!(self.click_outside, ClickOutsideBehavior::Auto) {
            let obscuring = self.surface.as_ref().is_some_and(|s| s.backdrop_obscures_page());
            if !obscuring {
                // An invisible or absent backdrop must not swallow the
                // page's own clicks as a dismissal gesture.
                return;
            }
        }

        debug!("click outside the embed surfaces; closing");
        self.close_internal(true);
    }

    // ── Transitions ───────────────────────────────────────────────────────────

    fn transition_open(&mut self) {
        if self.state.is_open {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.show();
        }
        self.state.is_open = true;
        if let Some(trigger) = &self.trigger {
            trigger.set_status(TriggerFlag::Open);
        }
        debug!("embed opened");
        if let Some(on_open) = self.callbacks.on_open.as_mut() {
            on_open();
        }
    }

    /// Open → Closed.  `manual` is true for every path except the
    /// frame-initiated `closed` message: the explicit `close()` call, a
    /// trigger click, and a click outside all count as the user dismissing
    /// the embed.
    fn close_internal(&mut self, manual: bool) {
        if !self.state.is_open {
            return;
        }
        if manual && self.state.pending_requests > 0 && self.state.should_open_automatically {
            // The user dismissed the embed while it wanted attention;
            // stop re-opening on its behalf for this instance's lifetime.
            self.state.should_open_automatically = false;
            debug!(
                pending = self.state.pending_requests,
                "manual close with pending requests; auto-open revoked"
            );
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.hide();
        }
        self.state.is_open = false;
        if let Some(trigger) = &self.trigger {
            trigger.unset_status(TriggerFlag::Open);
        }
        debug!("embed closed");
        if let Some(on_close) = self.callbacks.on_close.as_mut() {
            on_close();
        }
    }
}

impl Drop for WalletEmbed {
    fn drop(&mut self) {
        self.destroy();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
