//! Recording host-page facade for unit testing.
//!
//! # Why a mock page?
//!
//! The real facade binding manipulates a live document: it creates elements,
//! mutates inline styles, and registers click listeners.  None of that can
//! run, or be observed, inside a Rust test.  `MockHostPage` replaces every
//! page effect with in-memory recording: a node table with parent/child
//! links, style and attribute maps, and listener registries.
//!
//! Tests drive it from both directions:
//!
//! - Inspect what the code under test did (`style_of`, `has_class`,
//!   `is_attached`, `children_of`, ...).
//! - Simulate what the page does (`click` to fire listeners,
//!   `register_existing_element` for a caller-supplied iframe, `set_rect`
//!   and `set_background_alpha` to shape measurements).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use super::{ClickSink, HostPage, ListenerId, NodeId, Rect, BODY_NODE};

// ── Node records ──────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct NodeRecord {
    tag: String,
    classes: Vec<String>,
    styles: HashMap<String, String>,
    attributes: HashMap<String, String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    alive: bool,
}

struct ListenerRecord {
    /// `None` for document-wide listeners, `Some(node)` for scoped ones.
    scope: Option<NodeId>,
    sink: ClickSink,
}

// ── The mock ──────────────────────────────────────────────────────────────────

/// A mock page that records all calls without touching any real document.
pub struct MockHostPage {
    nodes: Mutex<HashMap<NodeId, NodeRecord>>,
    listeners: Mutex<HashMap<ListenerId, ListenerRecord>>,
    rects: Mutex<HashMap<NodeId, Rect>>,
    alpha_overrides: Mutex<HashMap<NodeId, f64>>,
    next_node: AtomicU64,
    next_listener: AtomicU64,
}

impl Default for MockHostPage {
    fn default() -> Self {
        let mut nodes = HashMap::new();
        // The body pre-exists; it is never created or removed.
        nodes.insert(
            BODY_NODE,
            NodeRecord { tag: "body".to_string(), alive: true, ..NodeRecord::default() },
        );
        Self {
            nodes: Mutex::new(nodes),
            listeners: Mutex::new(HashMap::new()),
            rects: Mutex::new(HashMap::new()),
            alpha_overrides: Mutex::new(HashMap::new()),
            next_node: AtomicU64::new(1),
            next_listener: AtomicU64::new(1),
        }
    }
}

impl MockHostPage {
    /// Creates an empty mock page containing only the body node.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Test-side drivers ─────────────────────────────────────────────────────

    /// Registers an element that "already existed" on the page, attached to
    /// the body, e.g. a caller-supplied iframe.
    pub fn register_existing_element(&self, tag: &str) -> NodeId {
        let id = self.next_node.fetch_add(1, Ordering::Relaxed);
        let mut nodes = self.nodes.lock().unwrap();
        nodes.insert(
            id,
            NodeRecord {
                tag: tag.to_string(),
                parent: Some(BODY_NODE),
                alive: true,
                ..NodeRecord::default()
            },
        );
        if let Some(body) = nodes.get_mut(&BODY_NODE) {
            body.children.push(id);
        }
        id
    }

    /// Fires a click whose target is `target`: scoped listeners whose scope
    /// contains the target fire first, then every document-wide listener.
    pub fn click(&self, target: NodeId) {
        let listeners = self.listeners.lock().unwrap();
        for record in listeners.values() {
            if let Some(scope) = record.scope {
                if self.contains(scope, target) {
                    (record.sink)(target);
                }
            }
        }
        for record in listeners.values() {
            if record.scope.is_none() {
                (record.sink)(target);
            }
        }
    }

    /// Pins the rect `measure` reports for a node.
    pub fn set_rect(&self, node: NodeId, rect: Rect) {
        self.rects.lock().unwrap().insert(node, rect);
    }

    /// Overrides the effective background alpha reported for a node,
    /// regardless of its styles.  Used to simulate a styling hook that made
    /// the backdrop invisible.
    pub fn set_background_alpha(&self, node: NodeId, alpha: f64) {
        self.alpha_overrides.lock().unwrap().insert(node, alpha);
    }

    // ── Test-side inspection ──────────────────────────────────────────────────

    /// Returns the recorded inline style value, if set.
    pub fn style_of(&self, node: NodeId, property: &str) -> Option<String> {
        self.nodes.lock().unwrap().get(&node)?.styles.get(property).cloned()
    }

    /// Returns the recorded attribute value, if set.
    pub fn attribute_of(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes.lock().unwrap().get(&node)?.attributes.get(name).cloned()
    }

    /// Returns the node's current text content.
    pub fn text_of(&self, node: NodeId) -> Option<String> {
        self.nodes.lock().unwrap().get(&node).map(|n| n.text.clone())
    }

    /// Returns `true` if the node currently carries the class.
    pub fn has_class(&self, node: NodeId, class_name: &str) -> bool {
        self.nodes
            .lock()
            .unwrap()
            .get(&node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class_name))
    }

    /// Returns the node's parent, if attached to one.
    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.lock().unwrap().get(&node)?.parent
    }

    /// Returns the node's children in document order.
    pub fn children_of(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .lock()
            .unwrap()
            .get(&node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Returns `true` if the node has not been removed.
    pub fn exists(&self, node: NodeId) -> bool {
        self.nodes.lock().unwrap().get(&node).is_some_and(|n| n.alive)
    }

    /// Returns `true` if the node's parent chain reaches the body.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let nodes = self.nodes.lock().unwrap();
        let mut current = node;
        loop {
            if current == BODY_NODE {
                return true;
            }
            match nodes.get(&current) {
                Some(record) if record.alive => match record.parent {
                    Some(parent) => current = parent,
                    None => return false,
                },
                _ => return false,
            }
        }
    }

    /// Returns every live node carrying the given class.
    pub fn nodes_with_class(&self, class_name: &str) -> Vec<NodeId> {
        let nodes = self.nodes.lock().unwrap();
        let mut found: Vec<NodeId> = nodes
            .iter()
            .filter(|(_, n)| n.alive && n.classes.iter().any(|c| c == class_name))
            .map(|(id, _)| *id)
            .collect();
        found.sort_unstable();
        found
    }

    /// Returns the number of currently registered listeners (any scope).
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    fn detach(nodes: &mut HashMap<NodeId, NodeRecord>, node: NodeId) {
        let parent = nodes.get(&node).and_then(|n| n.parent);
        if let Some(parent) = parent {
            if let Some(record) = nodes.get_mut(&parent) {
                record.children.retain(|c| *c != node);
            }
        }
        if let Some(record) = nodes.get_mut(&node) {
            record.parent = None;
        }
    }
}

// ── HostPage implementation ───────────────────────────────────────────────────

impl HostPage for MockHostPage {
    fn create_element(&self, tag: &str, class_name: &str) -> NodeId {
        let id = self.next_node.fetch_add(1, Ordering::Relaxed);
        self.nodes.lock().unwrap().insert(
            id,
            NodeRecord {
                tag: tag.to_string(),
                classes: vec![class_name.to_string()],
                alive: true,
                ..NodeRecord::default()
            },
        );
        id
    }

    fn remove_element(&self, node: NodeId) {
        let mut nodes = self.nodes.lock().unwrap();
        Self::detach(&mut nodes, node);
        if let Some(record) = nodes.get_mut(&node) {
            record.alive = false;
        }
    }

    fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut nodes = self.nodes.lock().unwrap();
        Self::detach(&mut nodes, child);
        if let Some(record) = nodes.get_mut(&parent) {
            record.children.push(child);
        }
        if let Some(record) = nodes.get_mut(&child) {
            record.parent = Some(parent);
        }
    }

    fn insert_before(&self, node: NodeId, reference: NodeId) {
        let mut nodes = self.nodes.lock().unwrap();
        let Some(parent) = nodes.get(&reference).and_then(|n| n.parent) else {
            return;
        };
        Self::detach(&mut nodes, node);
        if let Some(record) = nodes.get_mut(&parent) {
            let index = record
                .children
                .iter()
                .position(|c| *c == reference)
                .unwrap_or(record.children.len());
            record.children.insert(index, node);
        }
        if let Some(record) = nodes.get_mut(&node) {
            record.parent = Some(parent);
        }
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(record) = self.nodes.lock().unwrap().get_mut(&node) {
            record.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        if let Some(record) = self.nodes.lock().unwrap().get_mut(&node) {
            record.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn clear_style(&self, node: NodeId, property: &str) {
        if let Some(record) = self.nodes.lock().unwrap().get_mut(&node) {
            record.styles.remove(property);
        }
    }

    fn set_text(&self, node: NodeId, text: &str) {
        if let Some(record) = self.nodes.lock().unwrap().get_mut(&node) {
            record.text = text.to_string();
        }
    }

    fn add_class(&self, node: NodeId, class_name: &str) {
        if let Some(record) = self.nodes.lock().unwrap().get_mut(&node) {
            if !record.classes.iter().any(|c| c == class_name) {
                record.classes.push(class_name.to_string());
            }
        }
    }

    fn remove_class(&self, node: NodeId, class_name: &str) {
        if let Some(record) = self.nodes.lock().unwrap().get_mut(&node) {
            record.classes.retain(|c| c != class_name);
        }
    }

    fn measure(&self, node: NodeId) -> Rect {
        self.rects.lock().unwrap().get(&node).copied().unwrap_or_default()
    }

    fn background_alpha(&self, node: NodeId) -> f64 {
        if let Some(alpha) = self.alpha_overrides.lock().unwrap().get(&node) {
            return *alpha;
        }
        // Without an override, approximate the rendered alpha with the
        // element's own opacity style (unset means fully rendered).
        self.nodes
            .lock()
            .unwrap()
            .get(&node)
            .and_then(|n| n.styles.get("opacity"))
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(1.0)
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let nodes = self.nodes.lock().unwrap();
        let mut current = node;
        loop {
            if current == ancestor {
                return true;
            }
            match nodes.get(&current).and_then(|n| n.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn add_document_click_listener(&self, sink: ClickSink) -> ListenerId {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().unwrap().insert(id, ListenerRecord { scope: None, sink });
        id
    }

    fn add_click_listener(&self, node: NodeId, sink: ClickSink) -> ListenerId {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().unwrap().insert(id, ListenerRecord { scope: Some(node), sink });
        id
    }

    fn remove_click_listener(&self, id: ListenerId) {
        self.listeners.lock().unwrap().remove(&id);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn test_created_element_is_detached_until_appended() {
        let page = MockHostPage::new();
        let node = page.create_element("div", "box");
        assert!(page.exists(node));
        assert!(!page.is_attached(node));

        page.append_child(BODY_NODE, node);
        assert!(page.is_attached(node));
    }

    #[test]
    fn test_insert_before_preserves_sibling_order() {
        let page = MockHostPage::new();
        let first = page.register_existing_element("iframe");
        let wrapper = page.create_element("div", "wrap");

        page.insert_before(wrapper, first);

        assert_eq!(page.children_of(BODY_NODE), vec![wrapper, first]);
    }

    #[test]
    fn test_append_child_moves_between_parents() {
        let page = MockHostPage::new();
        let frame = page.register_existing_element("iframe");
        let wrapper = page.create_element("div", "wrap");
        page.append_child(BODY_NODE, wrapper);

        page.append_child(wrapper, frame);

        assert_eq!(page.parent_of(frame), Some(wrapper));
        assert!(!page.children_of(BODY_NODE).contains(&frame));
        assert!(page.is_attached(frame));
    }

    #[test]
    fn test_remove_element_detaches_subtree_from_body() {
        let page = MockHostPage::new();
        let backdrop = page.create_element("div", "backdrop");
        let frame = page.create_element("iframe", "frame");
        page.append_child(BODY_NODE, backdrop);
        page.append_child(backdrop, frame);

        page.remove_element(backdrop);

        assert!(!page.exists(backdrop));
        // The frame still exists as a record but is no longer reachable.
        assert!(!page.is_attached(frame));
    }

    #[test]
    fn test_contains_is_inclusive_of_the_ancestor_itself() {
        let page = MockHostPage::new();
        let node = page.register_existing_element("button");
        assert!(page.contains(node, node));
        assert!(page.contains(BODY_NODE, node));
        assert!(!page.contains(node, BODY_NODE));
    }

    #[test]
    fn test_scoped_click_listener_fires_only_inside_its_scope() {
        // Arrange
        let page = MockHostPage::new();
        let button = page.register_existing_element("button");
        let icon = page.create_element("span", "icon");
        page.append_child(button, icon);
        let elsewhere = page.register_existing_element("div");

        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        page.add_click_listener(
            button,
            Box::new(move |_| {
                hits_clone.fetch_add(1, Ordering::Relaxed);
            }),
        );

        // Act: one click inside (on a descendant), one outside
        page.click(icon);
        page.click(elsewhere);

        // Assert
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_document_click_listener_sees_every_click() {
        let page = MockHostPage::new();
        let a = page.register_existing_element("div");
        let b = page.register_existing_element("div");

        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        let id = page.add_document_click_listener(Box::new(move |_| {
            hits_clone.fetch_add(1, Ordering::Relaxed);
        }));

        page.click(a);
        page.click(b);
        assert_eq!(hits.load(Ordering::Relaxed), 2);

        page.remove_click_listener(id);
        page.click(a);
        assert_eq!(hits.load(Ordering::Relaxed), 2, "removed listener must not fire");
    }

    #[test]
    fn test_background_alpha_tracks_opacity_style_unless_overridden() {
        let page = MockHostPage::new();
        let node = page.create_element("div", "backdrop");
        assert!((page.background_alpha(node) - 1.0).abs() < f64::EPSILON);

        page.set_style(node, "opacity", "0");
        assert!(page.background_alpha(node).abs() < f64::EPSILON);

        page.set_background_alpha(node, 0.02);
        page.set_style(node, "opacity", "1");
        assert!((page.background_alpha(node) - 0.02).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clear_style_removes_the_property() {
        let page = MockHostPage::new();
        let node = page.create_element("div", "x");
        page.set_style(node, "width", "375px");
        page.clear_style(node, "width");
        assert_eq!(page.style_of(node, "width"), None);
    }
}
