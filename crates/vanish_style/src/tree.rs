//! In-memory styled element tree
//!
//! `StyleTree` stores tag names, parent/child links and inline style
//! declarations. Node ids are plain handles: holding one never keeps a node
//! alive, and writes through a stale id are dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;
use slotmap::{new_key_type, SlotMap};

use crate::renderer::{ElementQuery, StyleApplier};
use crate::style::StyleProperty;

new_key_type! {
    /// Handle to an element in a styled tree
    pub struct NodeId;
}

#[derive(Debug, Clone)]
struct ElementNode {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Inline declarations in the order they were first set
    style: IndexMap<StyleProperty, String>,
}

/// An element tree with inline styles
#[derive(Debug, Default)]
pub struct StyleTree {
    nodes: SlotMap<NodeId, ElementNode>,
}

impl StyleTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element with the given tag name
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.nodes.insert(ElementNode {
            tag: tag.into(),
            parent: None,
            children: Vec::new(),
            style: IndexMap::new(),
        })
    }

    /// Append `child` as the last child of `parent`
    ///
    /// The child is moved out of its previous parent. Returns `false` if
    /// either node is missing or the move would create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return false;
        }
        if parent == child || self.is_ancestor(child, parent) {
            return false;
        }

        if let Some(old_parent) = self.nodes[child].parent {
            self.nodes[old_parent].children.retain(|c| *c != child);
        }
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        true
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Remove a node and its whole subtree
    pub fn remove_node(&mut self, node: NodeId) {
        let Some(removed) = self.nodes.remove(node) else {
            return;
        };
        if let Some(parent) = removed.parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|c| *c != node);
        }

        let mut stack = removed.children;
        while let Some(id) = stack.pop() {
            if let Some(child) = self.nodes.remove(id) {
                stack.extend(child.children);
            }
        }
    }

    /// Check if the node is still part of the tree
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|n| n.tag.as_str())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// First descendant with a matching tag, in document order
    ///
    /// Tag names compare ASCII case-insensitively, as HTML tag names do.
    pub fn find_descendant(&self, host: NodeId, tag: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.children(host).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = self.nodes.get(id)?;
            if node.tag.eq_ignore_ascii_case(tag) {
                return Some(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// Get an inline property value
    pub fn inline_style(&self, node: NodeId, property: StyleProperty) -> Option<&str> {
        self.nodes
            .get(node)
            .and_then(|n| n.style.get(&property))
            .map(String::as_str)
    }

    /// Set an inline property. Returns `false` if the node is gone.
    pub fn set_inline(&mut self, node: NodeId, property: StyleProperty, value: &str) -> bool {
        match self.nodes.get_mut(node) {
            Some(n) => {
                n.style.insert(property, value.to_string());
                true
            }
            None => false,
        }
    }

    /// Remove an inline property. Returns `false` if the node is gone.
    pub fn remove_inline(&mut self, node: NodeId, property: StyleProperty) -> bool {
        match self.nodes.get_mut(node) {
            Some(n) => {
                n.style.shift_remove(&property);
                true
            }
            None => false,
        }
    }

    /// Render the inline declarations as a `style` attribute value
    pub fn css_text(&self, node: NodeId) -> Option<String> {
        let n = self.nodes.get(node)?;
        Some(
            n.style
                .iter()
                .map(|(property, value)| format!("{}: {}", property, value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Thread-safe handle to a [`StyleTree`], usable as a renderer
///
/// Clones share the same tree.
#[derive(Debug, Clone, Default)]
pub struct SharedStyleTree {
    inner: Arc<Mutex<StyleTree>>,
}

impl SharedStyleTree {
    pub fn new(tree: StyleTree) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tree)),
        }
    }

    /// Lock the tree for direct access
    pub fn lock(&self) -> MutexGuard<'_, StyleTree> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a closure with shared access to the tree
    pub fn with<R>(&self, f: impl FnOnce(&StyleTree) -> R) -> R {
        f(&self.lock())
    }

    /// Run a closure with exclusive access to the tree
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut StyleTree) -> R) -> R {
        f(&mut self.lock())
    }
}

impl StyleApplier for SharedStyleTree {
    fn set_property(&self, node: NodeId, property: StyleProperty, value: &str) {
        if !self.lock().set_inline(node, property, value) {
            tracing::warn!(?node, %property, "style write to a detached node ignored");
        }
    }

    fn remove_property(&self, node: NodeId, property: StyleProperty) {
        if !self.lock().remove_inline(node, property) {
            tracing::warn!(?node, %property, "style removal on a detached node ignored");
        }
    }
}

impl ElementQuery for SharedStyleTree {
    fn find_descendant(&self, host: NodeId, tag: &str) -> Option<NodeId> {
        self.lock().find_descendant(host, tag)
    }
}
