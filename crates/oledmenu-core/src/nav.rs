//! [`NavigationController`]: maps [`Button`] presses onto cursor moves,
//! tree traversal and user callbacks, over either a static label list or a
//! [`MenuTree`].
//!
//! The two modes are variants of [`ListSource`] and never coexist: setting a
//! static list drops the tree, and building a tree drops the static list.

use crate::cursor::ViewportCursor;
use crate::error::MenuError;
use crate::input::Button;
use crate::node::{Action, Label, MenuNode, NodeId, NodeKind};
use crate::render::{View, VisibleItem};
use crate::tree::MenuTree;

/// Callback for Select in static mode; receives the selected index.
pub type SelectCallback = Box<dyn FnMut(usize)>;

/// Callback for Back in static mode.
pub type BackCallback = Box<dyn FnMut()>;

// ---------------------------------------------------------------------------
// ListSource
// ---------------------------------------------------------------------------

/// The collection being browsed.
#[derive(Debug, Default)]
pub enum ListSource {
    /// Nothing configured yet.
    #[default]
    Empty,
    /// A fixed list of labels.
    Static(Vec<Label>),
    /// A dynamic tree; the browsed list is the children of `current`.
    Tree(MenuTree),
}

impl ListSource {
    fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Static(items) => items.len(),
            Self::Tree(tree) => tree.current_children().len(),
        }
    }

    fn label(&self, i: usize) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Static(items) => items.get(i).map(|l| l.as_ref()),
            Self::Tree(tree) => tree
                .current_children()
                .get(i)
                .and_then(|id| tree.label(*id)),
        }
    }

    fn opens_submenu(&self, i: usize) -> bool {
        match self {
            Self::Tree(tree) => tree
                .current_children()
                .get(i)
                .and_then(|id| tree.get(*id))
                .is_some_and(MenuNode::has_children),
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// NavAction
// ---------------------------------------------------------------------------

/// Outcome of [`NavigationController::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    /// Nothing changed and nothing ran.
    Pass,
    /// The selection moved.
    Move,
    /// A submenu was entered.
    Enter,
    /// Navigation returned to the parent level.
    Exit,
    /// A select callback or node action ran.
    Activate,
    /// The static-mode back callback ran.
    Back,
}

impl NavAction {
    /// Whether the action changed what is on screen.
    pub fn redraws(self) -> bool {
        matches!(self, Self::Move | Self::Enter | Self::Exit)
    }
}

// ---------------------------------------------------------------------------
// NavigationController
// ---------------------------------------------------------------------------

/// The menu state machine.
pub struct NavigationController {
    source: ListSource,
    cursor: ViewportCursor,
    on_select: Option<SelectCallback>,
    on_back: Option<BackCallback>,
    dirty: bool,
}

impl NavigationController {
    /// Create a controller with nothing to browse and a window of
    /// `max_visible` rows.
    pub fn new(max_visible: usize) -> Self {
        Self {
            source: ListSource::Empty,
            cursor: ViewportCursor::new(max_visible),
            on_select: None,
            on_back: None,
            dirty: false,
        }
    }

    // -- state --

    pub fn source(&self) -> &ListSource {
        &self.source
    }

    pub fn cursor(&self) -> &ViewportCursor {
        &self.cursor
    }

    #[inline]
    pub fn selected(&self) -> usize {
        self.cursor.selected()
    }

    #[inline]
    pub fn is_tree(&self) -> bool {
        matches!(self.source, ListSource::Tree(_))
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        matches!(self.source, ListSource::Static(_))
    }

    /// The tree, in tree mode.
    pub fn tree(&self) -> Option<&MenuTree> {
        match &self.source {
            ListSource::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    /// The node being browsed, in tree mode.
    pub fn current(&self) -> Option<NodeId> {
        self.tree().and_then(MenuTree::current)
    }

    /// The highlighted node, in tree mode.
    pub fn selected_node(&self) -> Option<NodeId> {
        self.tree()
            .and_then(|t| t.current_children().get(self.cursor.selected()).copied())
    }

    /// Length of the list being browsed.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label of entry `i` of the list being browsed.
    pub fn label(&self, i: usize) -> Option<&str> {
        self.source.label(i)
    }

    /// Labels leading to the level being browsed; empty at the root level
    /// and in static mode.
    pub fn breadcrumb(&self) -> Vec<&str> {
        match (&self.source, self.current()) {
            (ListSource::Tree(tree), Some(cur)) => tree.path(cur),
            _ => Vec::new(),
        }
    }

    /// Whether state changed since the last [`take_dirty`](Self::take_dirty).
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear and return the redraw flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Request a redraw without changing state.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    // -- static mode --

    /// Browse a fixed list of labels, starting at the first entry. Any tree
    /// is dropped.
    pub fn set_items<I, L>(&mut self, items: I)
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        self.assign_static(items, true);
    }

    /// Swap the labels of the static list, keeping the selection when the
    /// list was already static (for labels that show a live value).
    pub fn replace_items<I, L>(&mut self, items: I)
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        let keep = self.is_static();
        self.assign_static(items, !keep);
    }

    fn assign_static<I, L>(&mut self, items: I, reset: bool)
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        let items: Vec<Label> = items.into_iter().map(Into::into).collect();
        if self.is_tree() {
            log::debug!("nav: static list replaces tree");
        }
        let n = items.len();
        self.source = ListSource::Static(items);
        if reset {
            self.cursor.set_count(n);
        } else {
            self.cursor.resize(n);
        }
        self.dirty = true;
    }

    /// Register the static-mode Select callback.
    pub fn on_select<F: FnMut(usize) + 'static>(&mut self, f: F) {
        self.on_select = Some(Box::new(f));
    }

    /// Register the static-mode Back callback.
    pub fn on_back<F: FnMut() + 'static>(&mut self, f: F) {
        self.on_back = Some(Box::new(f));
    }

    // -- tree mode --

    /// Add a node to the tree, switching to tree mode (and dropping any
    /// static list) first.
    ///
    /// Outside tree mode no parent can be valid yet, so a parent is rejected
    /// before the mode switch and the static list survives.
    ///
    /// A redraw is requested only when the node lands in the list being
    /// browsed or gives a visible row its submenu marker.
    pub fn add_node(
        &mut self,
        label: impl Into<Label>,
        action: Option<Action>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, MenuError> {
        let mut tree = match std::mem::take(&mut self.source) {
            ListSource::Tree(tree) => tree,
            source => {
                if let Some(p) = parent {
                    log::warn!("nav: parent {p} given before any tree exists");
                    self.source = source;
                    return Err(MenuError::InvalidParent(p));
                }
                log::debug!("nav: switching to tree mode");
                self.cursor.set_count(0);
                self.dirty = true;
                MenuTree::new()
            }
        };
        let added = tree.add_node(label, action, parent);
        if let Ok(id) = added {
            self.note_insert(&tree, id);
        }
        self.source = ListSource::Tree(tree);
        added
    }

    fn note_insert(&mut self, tree: &MenuTree, id: NodeId) {
        let Some(parent) = tree.get(id).and_then(MenuNode::parent) else {
            return;
        };
        if Some(parent) == tree.current() {
            self.cursor.resize(tree.current_children().len());
            self.dirty = true;
            return;
        }
        let row = tree.current_children().iter().position(|c| *c == parent);
        let first_child = tree.children(parent).len() == 1;
        if first_child && row.is_some_and(|r| self.cursor.visible_range().contains(&r)) {
            self.dirty = true;
        }
    }

    /// [`add_node`](Self::add_node) with a closure action.
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

    /// Remove a node and its subtree. No-op outside tree mode.
    pub fn remove_node(&mut self, id: NodeId) {
        self.mutate_tree(|tree| tree.remove_node(id));
    }

    /// Remove all children of `parent` (the root when `None`). No-op outside
    /// tree mode.
    pub fn clear(&mut self, parent: Option<NodeId>) {
        self.mutate_tree(|tree| tree.clear(parent));
    }

    /// Browse the children of `id`, starting at the first. No-op unless
    /// `id` has children.
    pub fn enter_submenu(&mut self, id: NodeId) -> bool {
        let ListSource::Tree(tree) = &mut self.source else {
            return false;
        };
        if !tree.enter_submenu(id) {
            return false;
        }
        log::debug!("nav: enter {id}");
        let n = tree.current_children().len();
        self.cursor.set_count(n);
        self.dirty = true;
        true
    }

    /// Return to the parent level, starting at its first entry. No-op at
    /// the root.
    pub fn exit_to_parent(&mut self) -> bool {
        let ListSource::Tree(tree) = &mut self.source else {
            return false;
        };
        if !tree.exit_to_parent() {
            return false;
        }
        log::debug!("nav: exit to {:?}", tree.current());
        let n = tree.current_children().len();
        self.cursor.set_count(n);
        self.dirty = true;
        true
    }

    fn mutate_tree(&mut self, f: impl FnOnce(&mut MenuTree)) {
        let ListSource::Tree(tree) = &mut self.source else {
            return;
        };
        let (before, len) = (tree.current(), tree.len());
        f(tree);
        if tree.current() == before && tree.len() == len {
            return;
        }
        let n = tree.current_children().len();
        if tree.current() == before {
            self.cursor.resize(n);
        } else {
            self.cursor.set_count(n);
        }
        self.dirty = true;
    }

    // -- events --

    /// Apply one button press.
    pub fn handle(&mut self, button: Button) -> NavAction {
        let action = match button {
            Button::Up => self.step(ViewportCursor::move_up),
            Button::Down => self.step(ViewportCursor::move_down),
            Button::Select => self.select(),
            Button::Back => self.back(),
        };
        if action != NavAction::Pass {
            log::debug!("nav: {button:?} -> {action:?}");
        }
        action
    }

    fn step(&mut self, f: fn(&mut ViewportCursor) -> bool) -> NavAction {
        if f(&mut self.cursor) {
            self.dirty = true;
            NavAction::Move
        } else {
            NavAction::Pass
        }
    }

    fn select(&mut self) -> NavAction {
        let selected = self.cursor.selected();
        let submenu = match &mut self.source {
            ListSource::Empty => return NavAction::Pass,
            ListSource::Static(items) => {
                if selected >= items.len() {
                    return NavAction::Pass;
                }
                return match self.on_select.as_mut() {
                    Some(cb) => {
                        cb(selected);
                        NavAction::Activate
                    }
                    None => NavAction::Pass,
                };
            }
            ListSource::Tree(tree) => {
                let Some(&child) = tree.current_children().get(selected) else {
                    return NavAction::Pass;
                };
                match tree.get(child).map(MenuNode::kind) {
                    Some(NodeKind::Submenu) => child,
                    Some(NodeKind::Command) if tree.activate(child) => return NavAction::Activate,
                    _ => return NavAction::Pass,
                }
            }
        };
        if self.enter_submenu(submenu) {
            NavAction::Enter
        } else {
            NavAction::Pass
        }
    }

    fn back(&mut self) -> NavAction {
        match self.source {
            ListSource::Empty => NavAction::Pass,
            ListSource::Static(_) => match self.on_back.as_mut() {
                Some(cb) => {
                    cb();
                    NavAction::Back
                }
                None => NavAction::Pass,
            },
            ListSource::Tree(_) => {
                if self.exit_to_parent() {
                    NavAction::Exit
                } else {
                    NavAction::Pass
                }
            }
        }
    }

    // -- rendering --

    /// The render request for the current window.
    pub fn view(&self) -> View<'_> {
        let selected = self.cursor.selected();
        let items = self
            .cursor
            .visible_range()
            .map(|i| VisibleItem {
                label: self.source.label(i).unwrap_or_default(),
                highlighted: i == selected,
                has_children: self.source.opens_submenu(i),
            })
            .collect();
        View {
            items,
            more_above: self.cursor.has_more_above(),
            more_below: self.cursor.has_more_below(),
        }
    }
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("source", &self.source)
            .field("cursor", &self.cursor)
            .field("on_select", &self.on_select.is_some())
            .field("on_back", &self.on_back.is_some())
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    const LETTERS: [&str; 5] = ["A", "B", "C", "D", "E"];

    fn labels(nav: &NavigationController) -> Vec<&str> {
        nav.view().items.iter().map(|i| i.label).collect()
    }

    #[test]
    fn static_windowing_scenario() {
        let mut nav = NavigationController::new(2);
        nav.set_items(LETTERS);
        for _ in 0..3 {
            assert_eq!(nav.handle(Button::Down), NavAction::Move);
        }
        assert_eq!(nav.selected(), 3);
        assert_eq!(nav.cursor().top(), 2);
        assert_eq!(labels(&nav), vec!["C", "D"]);

        nav.handle(Button::Down);
        assert_eq!(labels(&nav), vec!["D", "E"]);
        assert!(nav.view().more_above);
        assert!(!nav.view().more_below);

        nav.take_dirty();
        assert_eq!(nav.handle(Button::Down), NavAction::Pass);
        assert!(!nav.is_dirty());
        assert_eq!(nav.selected(), 4);
    }

    #[test]
    fn static_select_and_back_callbacks() {
        let picked = Rc::new(Cell::new(None));
        let backs = Rc::new(Cell::new(0));
        let mut nav = NavigationController::new(2);
        nav.set_items(LETTERS);
        let p = Rc::clone(&picked);
        nav.on_select(move |i| p.set(Some(i)));
        let b = Rc::clone(&backs);
        nav.on_back(move || b.set(b.get() + 1));

        nav.handle(Button::Down);
        assert_eq!(nav.handle(Button::Select), NavAction::Activate);
        assert_eq!(picked.get(), Some(1));
        assert_eq!(nav.handle(Button::Back), NavAction::Back);
        assert_eq!(backs.get(), 1);
    }

    #[test]
    fn missing_callbacks_are_ignored() {
        let mut nav = NavigationController::new(2);
        nav.set_items(LETTERS);
        assert_eq!(nav.handle(Button::Select), NavAction::Pass);
        assert_eq!(nav.handle(Button::Back), NavAction::Pass);
    }

    #[test]
    fn empty_controller_ignores_everything() {
        let mut nav = NavigationController::new(2);
        for b in Button::ALL {
            assert_eq!(nav.handle(b), NavAction::Pass);
        }
        assert!(nav.view().items.is_empty());
        nav.set_items(Vec::<String>::new());
        let hit = Rc::new(Cell::new(false));
        let h = Rc::clone(&hit);
        nav.on_select(move |_| h.set(true));
        assert_eq!(nav.handle(Button::Select), NavAction::Pass);
        assert!(!hit.get());
    }

    #[test]
    fn replace_items_keeps_selection() {
        let mut nav = NavigationController::new(2);
        nav.set_items(LETTERS);
        nav.handle(Button::Down);
        nav.handle(Button::Down);
        nav.replace_items(["a", "b", "c", "d", "e"]);
        assert_eq!(nav.selected(), 2);
        assert_eq!(labels(&nav), vec!["b", "c"]);

        nav.set_items(LETTERS);
        assert_eq!(nav.selected(), 0);
    }

    fn settings_tree(nav: &mut NavigationController, saved: &Rc<Cell<u32>>) -> (NodeId, NodeId) {
        let settings = nav.add_node("Settings", None, None).unwrap();
        let display = nav.add_node("Display", None, Some(settings)).unwrap();
        let s = Rc::clone(saved);
        nav.add_command("Save", Some(settings), move || s.set(s.get() + 1))
            .unwrap();
        (settings, display)
    }

    #[test]
    fn tree_select_enters_and_activates() {
        let saved = Rc::new(Cell::new(0));
        let mut nav = NavigationController::new(2);
        let (settings, _) = settings_tree(&mut nav, &saved);
        let root = nav.tree().unwrap().root();

        assert_eq!(nav.current(), root);
        assert_eq!(labels(&nav), vec!["Settings"]);
        assert!(nav.view().items[0].has_children);

        assert_eq!(nav.handle(Button::Select), NavAction::Enter);
        assert_eq!(nav.current(), Some(settings));
        assert_eq!((nav.selected(), nav.cursor().top()), (0, 0));
        assert_eq!(labels(&nav), vec!["Display", "Save"]);
        assert_eq!(nav.breadcrumb(), vec!["Settings"]);

        nav.handle(Button::Down);
        assert_eq!(nav.handle(Button::Select), NavAction::Activate);
        assert_eq!(saved.get(), 1);
        assert_eq!(nav.current(), Some(settings));

        assert_eq!(nav.handle(Button::Back), NavAction::Exit);
        assert_eq!(nav.current(), root);
        assert_eq!(nav.selected(), 0);
        assert_eq!(nav.handle(Button::Back), NavAction::Pass);
    }

    #[test]
    fn inert_leaf_select_is_noop() {
        let saved = Rc::new(Cell::new(0));
        let mut nav = NavigationController::new(2);
        settings_tree(&mut nav, &saved);
        nav.handle(Button::Select);
        nav.take_dirty();
        assert_eq!(nav.handle(Button::Select), NavAction::Pass);
        assert!(!nav.is_dirty());
    }

    #[test]
    fn static_list_replaces_tree() {
        let saved = Rc::new(Cell::new(0));
        let picked = Rc::new(RefCell::new(Vec::new()));
        let mut nav = NavigationController::new(2);
        settings_tree(&mut nav, &saved);
        let p = Rc::clone(&picked);
        nav.on_select(move |i| p.borrow_mut().push(i));

        nav.set_items(["One", "Two"]);
        assert!(nav.is_static());
        assert!(nav.tree().is_none());
        assert_eq!(nav.current(), None);
        assert_eq!(nav.handle(Button::Select), NavAction::Activate);
        assert_eq!(nav.handle(Button::Back), NavAction::Pass);
        assert_eq!(*picked.borrow(), vec![0]);
        assert_eq!(saved.get(), 0);
    }

    #[test]
    fn tree_replaces_static_list() {
        let mut nav = NavigationController::new(2);
        nav.set_items(LETTERS);
        nav.handle(Button::Down);
        nav.add_node("Only", None, None).unwrap();
        assert!(nav.is_tree());
        assert_eq!(nav.selected(), 0);
        assert_eq!(labels(&nav), vec!["Only"]);
    }

    #[test]
    fn parent_before_tree_keeps_static_list() {
        let mut other = MenuTree::new();
        let foreign = other.add_node("X", None, None).unwrap();
        let mut nav = NavigationController::new(2);
        nav.set_items(LETTERS);
        assert_eq!(
            nav.add_node("child", None, Some(foreign)),
            Err(MenuError::InvalidParent(foreign))
        );
        assert!(nav.is_static());
        assert_eq!(nav.len(), 5);
    }

    #[test]
    fn rejected_parent_in_tree_mode_keeps_tree() {
        let saved = Rc::new(Cell::new(0));
        let mut nav = NavigationController::new(2);
        let (settings, _) = settings_tree(&mut nav, &saved);
        nav.remove_node(settings);
        nav.take_dirty();
        assert_eq!(
            nav.add_node("orphan", None, Some(settings)),
            Err(MenuError::InvalidParent(settings))
        );
        assert!(nav.is_tree());
        assert_eq!(nav.tree().unwrap().len(), 0);
        assert!(!nav.is_dirty());
    }

    #[test]
    fn hidden_insertions_do_not_redraw() {
        let saved = Rc::new(Cell::new(0));
        let mut nav = NavigationController::new(2);
        let (settings, display) = settings_tree(&mut nav, &saved);
        nav.take_dirty();

        // below a row that already shows its submenu marker
        nav.add_node("Wifi", None, Some(settings)).unwrap();
        nav.add_node("Contrast", None, Some(display)).unwrap();
        assert!(!nav.is_dirty());

        let about = nav.add_node("About", None, None).unwrap();
        assert!(nav.take_dirty());
        assert_eq!(labels(&nav), vec!["Settings", "About"]);

        // a visible leaf gaining its first child grows a marker
        nav.add_node("Version", None, Some(about)).unwrap();
        assert!(nav.take_dirty());
        assert!(nav.view().items[1].has_children);
        nav.add_node("License", None, Some(about)).unwrap();
        assert!(!nav.is_dirty());
    }

    #[test]
    fn removing_browsed_submenu_resets_cursor() {
        let saved = Rc::new(Cell::new(0));
        let mut nav = NavigationController::new(2);
        let (settings, _) = settings_tree(&mut nav, &saved);
        nav.enter_submenu(settings);
        nav.handle(Button::Down);
        nav.take_dirty();

        nav.remove_node(settings);
        assert_eq!(nav.current(), nav.tree().unwrap().root());
        assert_eq!(nav.selected(), 0);
        assert!(nav.is_empty());
        assert!(nav.is_dirty());
        assert_eq!(nav.handle(Button::Select), NavAction::Pass);
    }

    #[test]
    fn removing_selected_sibling_clamps_cursor() {
        let mut nav = NavigationController::new(2);
        nav.add_node("A", None, None).unwrap();
        nav.add_node("B", None, None).unwrap();
        let c = nav.add_node("C", None, None).unwrap();
        nav.handle(Button::Down);
        nav.handle(Button::Down);
        assert_eq!(nav.selected(), 2);

        nav.remove_node(c);
        assert_eq!(nav.selected(), 1);
        assert_eq!(labels(&nav), vec!["A", "B"]);
    }

    #[test]
    fn clear_root_from_deep_level() {
        let saved = Rc::new(Cell::new(0));
        let mut nav = NavigationController::new(2);
        let (settings, display) = settings_tree(&mut nav, &saved);
        nav.add_node("Contrast", None, Some(display)).unwrap();
        nav.enter_submenu(settings);
        nav.enter_submenu(display);
        nav.clear(None);
        assert_eq!(nav.current(), nav.tree().unwrap().root());
        assert!(nav.is_empty());
    }

    #[test]
    fn submenu_round_trip_restores_current() {
        let saved = Rc::new(Cell::new(0));
        let mut nav = NavigationController::new(2);
        let (settings, _) = settings_tree(&mut nav, &saved);
        let before = nav.current();
        assert!(nav.enter_submenu(settings));
        nav.handle(Button::Down);
        assert!(nav.exit_to_parent());
        assert_eq!(nav.current(), before);
        assert_eq!(nav.selected(), 0);
    }

    #[test]
    fn tree_mutation_outside_tree_mode_is_noop() {
        let mut nav = NavigationController::new(2);
        nav.set_items(LETTERS);
        nav.take_dirty();
        nav.clear(None);
        assert!(!nav.is_dirty());
        assert_eq!(nav.len(), 5);
    }
}
