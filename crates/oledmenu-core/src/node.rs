//! The [`MenuNode`] entity and its [`NodeId`] handle.

use std::borrow::Cow;
use std::fmt;

/// A zero-argument callback run when a leaf command is activated.
pub type Action = Box<dyn FnMut()>;

/// Display text of a node: a `&'static str` or an owned `String`.
pub type Label = Cow<'static, str>;

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// A copyable handle to a node inside a [`MenuTree`](crate::MenuTree).
///
/// The handle remembers which tree issued it and the generation of the arena
/// slot, so a handle that outlived its node (or came from another tree) is
/// recognised instead of aliasing a newer node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) tree: u32,
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}@{}", self.index, self.generation, self.tree)
    }
}

// ---------------------------------------------------------------------------
// NodeKind
// ---------------------------------------------------------------------------

/// What selecting a node does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Has at least one child; selecting it navigates into the children.
    Submenu,
    /// No children, carries an action.
    Command,
    /// Neither children nor action; selecting it does nothing.
    Inert,
}

// ---------------------------------------------------------------------------
// MenuNode
// ---------------------------------------------------------------------------

/// One entry of the menu tree.
///
/// Children are owned by the tree's arena and listed here in display order;
/// `parent` is a plain back-reference used for "go back".
pub struct MenuNode {
    label: Label,
    pub(crate) action: Option<Action>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl MenuNode {
    pub(crate) fn new(label: Label, action: Option<Action>, parent: Option<NodeId>) -> Self {
        Self {
            label,
            action,
            children: Vec::new(),
            parent,
        }
    }

    /// Display text.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Child handles in display order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The parent handle, `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    #[inline]
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Classify the node by what selecting it does. Children win over an
    /// action.
    pub fn kind(&self) -> NodeKind {
        if self.has_children() {
            NodeKind::Submenu
        } else if self.has_action() {
            NodeKind::Command
        } else {
            NodeKind::Inert
        }
    }

    /// Run the node's action, if any. Returns whether something ran.
    pub(crate) fn activate(&mut self) -> bool {
        match self.action.as_mut() {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for MenuNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuNode")
            .field("label", &self.label)
            .field("action", &self.action.as_ref().map(|_| ".."))
            .field("children", &self.children.len())
            .field("parent", &self.parent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_prefers_children_over_action() {
        let child = NodeId {
            tree: 0,
            index: 0,
            generation: 0,
        };
        let mut node = MenuNode::new("Save".into(), Some(Box::new(|| {})), None);
        assert_eq!(node.kind(), NodeKind::Command);
        node.children.push(child);
        assert_eq!(node.kind(), NodeKind::Submenu);

        let inert = MenuNode::new(Label::Owned(String::from("About")), None, None);
        assert_eq!(inert.kind(), NodeKind::Inert);
        assert_eq!(inert.label(), "About");
    }

    #[test]
    fn activate_runs_action_once() {
        use std::cell::Cell;
        use std::rc::Rc;

        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let mut node = MenuNode::new("Ping".into(), Some(Box::new(move || h.set(h.get() + 1))), None);
        assert!(node.activate());
        assert_eq!(hits.get(), 1);

        let mut inert = MenuNode::new("Nop".into(), None, None);
        assert!(!inert.activate());
    }
}
