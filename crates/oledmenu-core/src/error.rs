//! The [`MenuError`] type.

use std::fmt;

use crate::node::NodeId;

/// Errors returned by menu tree construction.
///
/// Everything else in the core degrades to a silent no-op: boundary moves,
/// backing out of the root, or activating an entry with no handler are not
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum MenuError {
    /// The parent handle does not belong to this tree (another tree's
    /// handle, or a node that has since been removed).
    InvalidParent(NodeId),
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParent(id) => write!(f, "menu: parent {id} is not part of this tree"),
        }
    }
}

impl std::error::Error for MenuError {}
