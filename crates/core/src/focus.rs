//! Focus state machine (C7): the focused window, the insertion-point hint,
//! the marked window, and cross-workspace focus handoff.
//!
//! Grounded on the teacher's `FocusManager` (`window_manager/focus.rs`),
//! generalized from Alt-Tab history tracking (out of scope here — the spec
//! has no history requirement) to the insertion-point/mark anchor policy of
//! `spec.md` §4.7.

use crate::registry::Wid;
use crate::tree::{LeafSlot, NodeId, Tree};
use crate::workspace::WorkspaceId;

/// `insertion_point_wid`, `marked_wid`, and the current-screen pointer of
/// `spec.md` §3/§9 — process-wide singletons in the source, here fields of
/// one owned struct rather than statics (design note 9).
#[derive(Debug, Clone)]
pub struct FocusState {
    pub insertion_point: Option<Wid>,
    /// At most one globally — `spec.md` §9's documented global-scope quirk
    /// (mirroring the floating set) is *not* present here: the mark itself
    /// was always specified as a single global in `spec.md` §3, so there is
    /// nothing to decide.
    pub marked: Option<Wid>,
    pub current_workspace: WorkspaceId,
}

impl FocusState {
    pub fn new(initial_workspace: WorkspaceId) -> Self {
        FocusState {
            insertion_point: None,
            marked: None,
            current_workspace: initial_workspace,
        }
    }

    /// Clear the mark, e.g. when the marked window is destroyed, floats, or
    /// a workspace switch happens (`spec.md` §3 "Marked window" lifecycle,
    /// and the Open Question decision in `DESIGN.md` that a mark does not
    /// carry across workspaces).
    pub fn clear_mark(&mut self) {
        self.marked = None;
    }

    pub fn set_mark(&mut self, wid: Wid) {
        self.marked = Some(wid);
    }

    /// Record a user-originated focus (explicit focus by id or direction).
    /// Never called from focus-follows-cursor (`spec.md` §4.7).
    pub fn record_user_focus(&mut self, wid: Wid) {
        self.insertion_point = Some(wid);
    }
}

/// Anchor-leaf selection policy used by `add`/C3 and C8 (`spec.md` §4.7):
/// insertion point, else mark, else leftmost leaf. Returns the anchor and
/// whether the mark was consumed (caller must clear it).
pub fn anchor_leaf(
    tree: &Tree,
    state: &FocusState,
    on_active_workspace: impl Fn(Wid) -> bool,
    tilable: impl Fn(Wid) -> bool,
    incoming: Wid,
) -> (Option<NodeId>, bool) {
    if let Some(ip) = state.insertion_point {
        if ip != incoming && on_active_workspace(ip) {
            if let Some(leaf) = tree.find_leaf(ip) {
                return (Some(leaf), false);
            }
        }
    }
    if let Some(mark) = state.marked {
        if mark != incoming && tilable(mark) {
            if let Some(leaf) = tree.find_leaf(mark) {
                return (Some(leaf), true);
            }
        }
    }
    (tree.leftmost_leaf(), false)
}

/// Focus-follows-cursor (`spec.md` §4.7): scan `F` in order, find the first
/// window whose rectangle contains the cursor, skipping dock helpers and
/// the dock's launchpad overlay. Idempotent when the result equals the
/// current focus (the caller compares before re-issuing `focus_ref`).
pub fn window_under_cursor<'a>(
    candidates: impl Iterator<Item = &'a crate::registry::WindowDescriptor>,
    cursor: (i32, i32),
    is_dock: impl Fn(Wid) -> bool,
) -> Option<Wid> {
    for w in candidates {
        if is_dock(w.wid) {
            continue;
        }
        let r = w.rect;
        if cursor.0 >= r.x && cursor.0 < r.right() && cursor.1 >= r.y && cursor.1 < r.bottom() {
            return Some(w.wid);
        }
    }
    None
}

/// Stack head for a leaf, used by the Monocle "stack neighbour" commands of
/// `spec.md` §4.8 (swap-nearest/shift-focus in Monocle mode).
pub fn stack_neighbour(tree: &Tree, leaf: NodeId, wid: Wid, forward: bool, wrap: bool) -> Option<Wid> {
    if let LeafSlot::Stacked(list) = tree.leaf_slot(leaf) {
        let pos = list.iter().position(|w| *w == wid)?;
        let next = if forward { pos + 1 } else { pos.checked_sub(1)? };
        if next < list.len() {
            return Some(list[next]);
        }
        if wrap {
            return Some(if forward { list[0] } else { list[list.len() - 1] });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{WindowDescriptor, Wid};
    use crate::geometry::Rect;

    fn w(n: i64) -> Wid {
        Wid::new(1, n, 0)
    }

    #[test]
    fn anchor_prefers_insertion_point_over_mark() {
        let mut tree = Tree::new();
        tree.add(w(1), None, None);
        let root = tree.root.unwrap();
        tree.add(w(2), Some(root), None);

        let mut state = FocusState::new(WorkspaceId(0));
        state.insertion_point = Some(w(1));
        state.marked = Some(w(2));

        let (anchor, consumed_mark) = anchor_leaf(&tree, &state, |_| true, |_| true, w(99));
        assert_eq!(anchor, tree.find_leaf(w(1)));
        assert!(!consumed_mark);
    }

    #[test]
    fn anchor_falls_back_to_mark_then_leftmost() {
        let tree_leaf = {
            let mut tree = Tree::new();
            tree.add(w(1), None, None);
            tree
        };
        let state = FocusState::new(WorkspaceId(0));
        let (anchor, _) = anchor_leaf(&tree_leaf, &state, |_| false, |_| true, w(99));
        assert_eq!(anchor, tree_leaf.leftmost_leaf());
    }

    #[test]
    fn window_under_cursor_skips_docks() {
        let dock = WindowDescriptor {
            wid: w(1),
            owner: "Dock".into(),
            title: String::new(),
            rect: Rect::new(0, 0, 100, 100),
            workspace: None,
        };
        let app = WindowDescriptor {
            wid: w(2),
            owner: "App".into(),
            title: String::new(),
            rect: Rect::new(0, 0, 100, 100),
            workspace: None,
        };
        let found = window_under_cursor([&dock, &app].into_iter(), (10, 10), |wid| wid == w(1));
        assert_eq!(found, Some(w(2)));
    }
}
