//! The [`MenuTree`] arena: node ownership, insertion, cascading removal and
//! the `current` browsing pointer.
//!
//! Nodes are stored in generation-tagged slots. The tree owns every node;
//! children are listed by handle in their parent and the parent link is a
//! plain handle, so removal is a bounded walk over the subtree with no
//! shared ownership. The root is an implicit, unlabeled node created by the
//! first insertion; parentless insertions become root-level items.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::MenuError;
use crate::node::{Action, Label, MenuNode, NodeId};

static NEXT_TREE_ID: AtomicU32 = AtomicU32::new(1);

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<MenuNode>,
}

/// Owner of the menu node graph.
#[derive(Debug)]
pub struct MenuTree {
    id: u32,
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: Option<NodeId>,
    current: Option<NodeId>,
    len: usize,
}

impl MenuTree {
    /// Create an empty tree. No root exists until the first
    /// [`add_node`](Self::add_node).
    pub fn new() -> Self {
        Self {
            id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            current: None,
            len: 0,
        }
    }

    // -- queries --

    /// The implicit top-level node, `None` before the first insertion.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// The node whose children are being browsed.
    #[inline]
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Number of nodes, not counting the implicit root.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `id` names a live node of this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Look up a live node.
    pub fn get(&self, id: NodeId) -> Option<&MenuNode> {
        if id.tree != self.id {
            return None;
        }
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut MenuNode> {
        if id.tree != self.id {
            return None;
        }
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    /// Label of a live node.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(MenuNode::label)
    }

    /// Children of `id`; empty for unknown handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(MenuNode::children).unwrap_or(&[])
    }

    /// Children of the node being browsed.
    pub fn current_children(&self) -> &[NodeId] {
        self.current.map(|c| self.children(c)).unwrap_or(&[])
    }

    /// Whether `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = self.get(node).and_then(MenuNode::parent);
        while let Some(p) = cursor {
            if p == ancestor {
                return true;
            }
            cursor = self.get(p).and_then(MenuNode::parent);
        }
        false
    }

    /// Distance from the root (the root itself is at depth 0).
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut node = self.get(id)?;
        let mut depth = 0;
        while let Some(p) = node.parent() {
            depth += 1;
            node = self.get(p)?;
        }
        Some(depth)
    }

    /// Labels from the root-level item down to `id`. Empty for the root or
    /// an unknown handle.
    pub fn path(&self, id: NodeId) -> Vec<&str> {
        let mut labels = Vec::new();
        let mut cursor = Some(id);
        while let Some(c) = cursor {
            if Some(c) == self.root {
                break;
            }
            let Some(node) = self.get(c) else {
                return Vec::new();
            };
            labels.push(node.label());
            cursor = node.parent();
        }
        labels.reverse();
        labels
    }

    // -- mutation --

    /// Create a node and append it as the last child of `parent`.
    ///
    /// With no parent the node becomes a root-level item; the first such
    /// insertion also creates the root and points `current` at it.
    pub fn add_node(
        &mut self,
        label: impl Into<Label>,
        action: Option<Action>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, MenuError> {
        let parent = match parent {
            Some(p) if self.contains(p) => p,
            Some(p) => {
                log::warn!("add_node: rejected parent {p}");
                return Err(MenuError::InvalidParent(p));
            }
            None => self.ensure_root(),
        };
        let id = self.alloc(MenuNode::new(label.into(), action, Some(parent)));
        if let Some(p) = self.get_mut(parent) {
            p.children.push(id);
        }
        self.len += 1;
        log::debug!("add_node: {id} under {parent}");
        Ok(id)
    }

    /// Convenience for [`add_node`](Self::add_node) with a closure action.
    pub fn add_command<F>(
        &mut self,
        label: impl Into<Label>,
        parent: Option<NodeId>,
        f: F,
    ) -> Result<NodeId, MenuError>
    where
        F: FnMut() + 'static,
    {
        self.add_node(label, Some(Box::new(f)), parent)
    }

    /// Detach `id` from its parent and free its whole subtree.
    ///
    /// No-op for the root or for a handle that is not in this tree. If
    /// `current` is `id` or one of its descendants it moves to `id`'s parent
    /// first, so it never names a freed node.
    pub fn remove_node(&mut self, id: NodeId) {
        if Some(id) == self.root {
            return;
        }
        let Some(parent) = self.get(id).and_then(MenuNode::parent) else {
            return;
        };

        if let Some(cur) = self.current {
            if cur == id || self.is_ancestor(id, cur) {
                log::debug!("remove_node: current {cur} falls back to {parent}");
                self.current = Some(parent);
            }
        }

        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|c| *c != id);
        }

        let mut stack = vec![id];
        let mut freed = 0;
        while let Some(n) = stack.pop() {
            if let Some(node) = self.release(n) {
                stack.extend(node.children);
                freed += 1;
            }
        }
        self.len -= freed;
        log::debug!("remove_node: {id} freed {freed} node(s)");
    }

    /// Remove every child of `parent` (the root when `None`), keeping
    /// `parent` itself. Clearing the root also returns navigation to the
    /// root level.
    pub fn clear(&mut self, parent: Option<NodeId>) {
        let Some(target) = parent.or(self.root) else {
            return;
        };
        let children = self.children(target).to_vec();
        for child in children {
            self.remove_node(child);
        }
        if Some(target) == self.root {
            self.current = self.root;
        }
    }

    /// Browse the children of `id`. No-op unless `id` is live and has at
    /// least one child. Returns whether `current` was set.
    pub fn enter_submenu(&mut self, id: NodeId) -> bool {
        if !self.get(id).is_some_and(MenuNode::has_children) {
            return false;
        }
        self.current = Some(id);
        true
    }

    /// Move `current` to its parent. No-op at the root. Returns whether
    /// `current` changed.
    pub fn exit_to_parent(&mut self) -> bool {
        let parent = self
            .current
            .and_then(|c| self.get(c))
            .and_then(MenuNode::parent);
        match parent {
            Some(p) => {
                self.current = Some(p);
                true
            }
            None => false,
        }
    }

    /// Run the action of `id`. Returns whether an action ran.
    pub(crate) fn activate(&mut self, id: NodeId) -> bool {
        self.get_mut(id).is_some_and(MenuNode::activate)
    }

    // -- private helpers --

    fn ensure_root(&mut self) -> NodeId {
        if let Some(root) = self.root {
            return root;
        }
        let root = self.alloc(MenuNode::new(Label::Borrowed(""), None, None));
        self.root = Some(root);
        self.current = Some(root);
        root
    }

    fn alloc(&mut self, node: MenuNode) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                tree: self.id,
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                tree: self.id,
                index,
                generation: 0,
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Option<MenuNode> {
        if id.tree != self.id {
            return None;
        }
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(node)
    }
}

impl Default for MenuTree {
    fn default() -> Self {
        Self::new()
    }
}
