//! **oledmenu-core** — menu tree, viewport cursor and navigation state
//! machine for small fixed-size displays.
//!
//! The core owns no hardware. Button samples come in through [`Input`],
//! frames go out through [`Render`], and press confirmation through
//! [`Feedback`]. [`MenuUi`] bundles the three with a
//! [`NavigationController`] behind a single [`MenuUi::poll_once`] step.

pub mod config;
pub mod cursor;
pub mod error;
pub mod feedback;
pub mod input;
pub mod nav;
pub mod node;
pub mod render;
pub mod tree;
pub mod ui;

pub use config::MenuConfig;
pub use cursor::ViewportCursor;
pub use error::MenuError;
pub use feedback::{Feedback, FeedbackKind, Silent};
pub use input::{Button, EdgeTriggered, Input, InputState, Scripted};
pub use nav::{ListSource, NavAction, NavigationController};
pub use node::{Action, Label, MenuNode, NodeId, NodeKind};
pub use render::{Recorder, Render, Snapshot, View, VisibleItem};
pub use tree::MenuTree;
pub use ui::MenuUi;
