//! The trigger control: the small always-visible open/close affordance.
//!
//! A pure display sink.  It holds no business state: the orchestrator pushes
//! status flags, balance text, and the notification count into it, and its
//! click goes out through a single injected sink; the trigger never calls
//! back into orchestrator internals, which keeps it independently testable.

use std::sync::Arc;

use wembed_core::BalanceInfo;

use crate::domain::config::{ButtonOptions, ButtonPosition};
use crate::infrastructure::page::{ClickSink, HostPage, ListenerId, NodeId, BODY_NODE};

/// Distance from the configured viewport corner.
const CORNER_OFFSET: &str = "16px";

// ── Status flags ──────────────────────────────────────────────────────────────

/// Independent display flags reflected as CSS classes on the trigger.
///
/// These are independent booleans, not one enum: a signed-in user can have
/// the embed open or closed, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerFlag {
    /// A user is signed in.
    Authenticated,
    /// The embed surface is currently presented.
    Open,
}

impl TriggerFlag {
    /// The CSS class carrying this flag on the trigger element.
    pub fn class_name(self) -> &'static str {
        match self {
            TriggerFlag::Authenticated => "is-authenticated",
            TriggerFlag::Open => "is-open",
        }
    }
}

// ── The control ───────────────────────────────────────────────────────────────

/// The floating open/close button, present only when configured.
pub struct TriggerControl {
    page: Arc<dyn HostPage>,
    root: NodeId,
    balance_node: Option<NodeId>,
    badge_node: Option<NodeId>,
    listener: ListenerId,
}

impl TriggerControl {
    /// Builds the trigger on the body and wires its click into `click_sink`.
    pub fn new(page: Arc<dyn HostPage>, options: &ButtonOptions, click_sink: ClickSink) -> Self {
        let root = page.create_element("button", "wembed-trigger");
        page.set_style(root, "position", "fixed");
        page.set_style(root, "z-index", "2147483000");
        let (vertical, horizontal) = options.position.anchor_properties();
        page.set_style(root, vertical, CORNER_OFFSET);
        page.set_style(root, horizontal, CORNER_OFFSET);

        if let Some(url) = &options.logo_url {
            let logo = page.create_element("img", "wembed-trigger-logo");
            page.set_attribute(logo, "src", url);
            page.set_attribute(logo, "alt", "");
            page.append_child(root, logo);
        }

        let balance_node = options.show_balance.then(|| {
            let node = page.create_element("span", "wembed-trigger-balance");
            page.append_child(root, node);
            node
        });

        let badge_node = options.show_notifications.then(|| {
            let node = page.create_element("span", "wembed-trigger-badge");
            // Hidden until the first non-zero count arrives.
            page.set_style(node, "display", "none");
            page.append_child(root, node);
            node
        });

        page.append_child(BODY_NODE, root);
        let listener = page.add_click_listener(root, click_sink);

        Self { page, root, balance_node, badge_node, listener }
    }

    /// Raises a display flag.
    pub fn set_status(&self, flag: TriggerFlag) {
        self.page.add_class(self.root, flag.class_name());
    }

    /// Clears a display flag.
    pub fn unset_status(&self, flag: TriggerFlag) {
        self.page.remove_class(self.root, flag.class_name());
    }

    /// Renders a balance snapshot, e.g. `"12.5 USD"`.
    ///
    /// No-op when the balance line was not configured.
    pub fn set_balance(&self, info: &BalanceInfo) {
        if let Some(node) = self.balance_node {
            self.page.set_text(node, &format!("{} {}", info.amount, info.currency));
        }
    }

    /// Renders the pending-request badge; a count of zero hides it.
    pub fn set_notification_count(&self, count: u64) {
        let Some(node) = self.badge_node else {
            return;
        };
        if count == 0 {
            self.page.set_style(node, "display", "none");
        } else {
            self.page.set_text(node, &count.to_string());
            self.page.set_style(node, "display", "inline-flex");
        }
    }

    /// The trigger's host element, for hit-testing clicks against it.
    pub fn root_node(&self) -> NodeId {
        self.root
    }

    /// Removes the trigger and its click listener from the page.
    pub fn destroy(&mut self) {
        self.page.remove_click_listener(self.listener);
        self.page.remove_element(self.root);
    }
}

impl ButtonPosition {
    /// The pair of CSS anchor properties for this corner.
    fn anchor_properties(self) -> (&'static str, &'static str) {
        match self {
            ButtonPosition::TopLeft => ("top", "left"),
            ButtonPosition::TopRight => ("top", "right"),
            ButtonPosition::BottomLeft => ("bottom", "left"),
            ButtonPosition::BottomRight => ("bottom", "right"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::page::mock::MockHostPage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn make_trigger(options: &ButtonOptions) -> (TriggerControl, Arc<MockHostPage>, Arc<AtomicUsize>) {
        let page = Arc::new(MockHostPage::new());
        let clicks = Arc::new(AtomicUsize::new(0));
        let clicks_clone = Arc::clone(&clicks);
        let trigger = TriggerControl::new(
            Arc::clone(&page) as Arc<dyn HostPage>,
            options,
            Box::new(move |_| {
                clicks_clone.fetch_add(1, Ordering::Relaxed);
            }),
        );
        (trigger, page, clicks)
    }

    #[test]
    fn test_trigger_is_attached_to_the_body() {
        let (trigger, page, _) = make_trigger(&ButtonOptions::default());
        assert!(page.is_attached(trigger.root_node()));
    }

    #[test]
    fn test_default_position_anchors_bottom_right() {
        let (trigger, page, _) = make_trigger(&ButtonOptions::default());
        assert_eq!(page.style_of(trigger.root_node(), "bottom").as_deref(), Some("16px"));
        assert_eq!(page.style_of(trigger.root_node(), "right").as_deref(), Some("16px"));
    }

    #[test]
    fn test_top_left_position_anchors_top_left() {
        let options = ButtonOptions { position: ButtonPosition::TopLeft, ..ButtonOptions::default() };
        let (trigger, page, _) = make_trigger(&options);
        assert_eq!(page.style_of(trigger.root_node(), "top").as_deref(), Some("16px"));
        assert_eq!(page.style_of(trigger.root_node(), "left").as_deref(), Some("16px"));
    }

    #[test]
    fn test_status_flags_are_independent_classes() {
        let (trigger, page, _) = make_trigger(&ButtonOptions::default());
        let root = trigger.root_node();

        trigger.set_status(TriggerFlag::Authenticated);
        trigger.set_status(TriggerFlag::Open);
        assert!(page.has_class(root, "is-authenticated"));
        assert!(page.has_class(root, "is-open"));

        trigger.unset_status(TriggerFlag::Open);
        assert!(page.has_class(root, "is-authenticated"), "flags must not interfere");
        assert!(!page.has_class(root, "is-open"));
    }

    #[test]
    fn test_set_balance_renders_amount_and_currency() {
        let (trigger, page, _) = make_trigger(&ButtonOptions::default());
        trigger.set_balance(&BalanceInfo { amount: 12.5, currency: "USD".to_string() });

        let balance_nodes = page.nodes_with_class("wembed-trigger-balance");
        assert_eq!(balance_nodes.len(), 1);
        assert_eq!(page.text_of(balance_nodes[0]).as_deref(), Some("12.5 USD"));
    }

    #[test]
    fn test_set_balance_without_balance_line_is_a_no_op() {
        let options = ButtonOptions { show_balance: false, ..ButtonOptions::default() };
        let (trigger, page, _) = make_trigger(&options);

        trigger.set_balance(&BalanceInfo { amount: 1.0, currency: "ETH".to_string() });

        assert!(page.nodes_with_class("wembed-trigger-balance").is_empty());
    }

    #[test]
    fn test_badge_shows_the_count_and_hides_at_zero() {
        let (trigger, page, _) = make_trigger(&ButtonOptions::default());
        let badge = page.nodes_with_class("wembed-trigger-badge")[0];

        trigger.set_notification_count(3);
        assert_eq!(page.text_of(badge).as_deref(), Some("3"));
        assert_eq!(page.style_of(badge, "display").as_deref(), Some("inline-flex"));

        trigger.set_notification_count(0);
        assert_eq!(page.style_of(badge, "display").as_deref(), Some("none"));
    }

    #[test]
    fn test_logo_is_created_only_when_configured() {
        let with_logo = ButtonOptions {
            logo_url: Some("https://wallet.example/logo.svg".to_string()),
            ..ButtonOptions::default()
        };
        let (_trigger, page, _) = make_trigger(&with_logo);
        let logos = page.nodes_with_class("wembed-trigger-logo");
        assert_eq!(logos.len(), 1);
        assert_eq!(
            page.attribute_of(logos[0], "src").as_deref(),
            Some("https://wallet.example/logo.svg")
        );

        let (_trigger, page, _) = make_trigger(&ButtonOptions::default());
        assert!(page.nodes_with_class("wembed-trigger-logo").is_empty());
    }

    #[test]
    fn test_click_anywhere_inside_the_trigger_reaches_the_sink() {
        let (trigger, page, clicks) = make_trigger(&ButtonOptions::default());
        let badge = page.nodes_with_class("wembed-trigger-badge")[0];

        page.click(trigger.root_node());
        page.click(badge); // a descendant counts too

        assert_eq!(clicks.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_destroy_removes_element_and_listener() {
        let (mut trigger, page, clicks) = make_trigger(&ButtonOptions::default());
        let root = trigger.root_node();

        trigger.destroy();

        assert!(!page.exists(root));
        assert_eq!(page.listener_count(), 0);
        page.click(root);
        assert_eq!(clicks.load(Ordering::Relaxed), 0);
    }
}
