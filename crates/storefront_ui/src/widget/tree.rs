//! Widget tree for hierarchical UI management.
//!
//! The tree is what gives "which element" a meaning: notifications raised on
//! a node bubble through its ancestors, and handlers compare the node that
//! raised the notification with the node they are attached to.

use super::{WidgetId, WidgetState};
use std::collections::HashMap;

/// Manages the widget hierarchy.
#[derive(Debug)]
pub struct WidgetTree {
    /// Widget states indexed by ID.
    widgets: HashMap<WidgetId, WidgetState>,
    /// Root widget IDs.
    roots: Vec<WidgetId>,
    /// Parent-child relationships.
    children: HashMap<WidgetId, Vec<WidgetId>>,
    /// ID counter for generating unique IDs.
    next_id: u64,
}

impl WidgetTree {
    /// Creates a new empty widget tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            widgets: HashMap::with_capacity(16),
            roots: Vec::with_capacity(4),
            children: HashMap::with_capacity(16),
            next_id: 1,
        }
    }

    /// Generates a new unique widget ID.
    pub fn next_id(&mut self) -> WidgetId {
        let id = WidgetId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Registers a root widget.
    pub fn add_root(&mut self, state: WidgetState) {
        let id = state.id;
        self.widgets.insert(id, state);
        self.roots.push(id);
        self.children.insert(id, Vec::new());
    }

    /// Adds a child widget to a parent.
    pub fn add_child(&mut self, parent: WidgetId, state: WidgetState) {
        let id = state.id;
        let mut state = state;
        state.parent = Some(parent);

        self.widgets.insert(id, state);
        self.children.entry(parent).or_default().push(id);
        self.children.insert(id, Vec::new());
    }

    /// Removes a widget and all its children.
    pub fn remove(&mut self, id: WidgetId) {
        if let Some(children) = self.children.remove(&id) {
            for child in children {
                self.remove(child);
            }
        }

        if let Some(parent) = self.widgets.get(&id).and_then(|state| state.parent) {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|&c| c != id);
            }
        }

        self.roots.retain(|&r| r != id);
        self.widgets.remove(&id);
    }

    /// Returns true if the widget is registered.
    #[must_use]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    /// Returns the parent of a widget.
    #[must_use]
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.widgets.get(&id).and_then(|state| state.parent)
    }

    /// Returns the children of a widget.
    #[must_use]
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the node followed by its ancestors, innermost first.
    #[must_use]
    pub fn ancestry(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut path = Vec::with_capacity(4);
        let mut cursor = self.contains(id).then_some(id);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.parent(node);
        }
        path
    }

    /// Returns the number of registered widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Returns true if no widgets are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ancestry_walks_to_root() {
        let mut tree = WidgetTree::new();
        let root = tree.next_id();
        let track = tree.next_id();
        let slot = tree.next_id();

        tree.add_root(WidgetState::new(root));
        tree.add_child(root, WidgetState::new(track));
        tree.add_child(track, WidgetState::new(slot));

        assert_eq!(tree.ancestry(slot), vec![slot, track, root]);
        assert_eq!(tree.children(track), &[slot]);
    }

    #[test]
    fn test_remove_is_recursive() {
        let mut tree = WidgetTree::new();
        let root = tree.next_id();
        let child = tree.next_id();
        tree.add_root(WidgetState::new(root));
        tree.add_child(root, WidgetState::new(child));

        tree.remove(root);

        assert!(tree.is_empty());
        assert!(tree.ancestry(child).is_empty());
    }
}
