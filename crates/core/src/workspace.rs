//! One workspace: its layout mode, padding/gap offset, focused window, and
//! layout tree. Ties together the tree (C3) and container solver (C4).
//!
//! Grounded on the teacher's `Workspace`/`WorkspaceManager`
//! (`workspace/core.rs`, `workspace/manager.rs`), generalized from a
//! `Vec<isize>` of HWNDs plus a Win32-Virtual-Desktop `GUID` to the
//! mode/offset/tree model of `spec.md` §3.

use crate::geometry::{Axis, Offset, Rect};
use crate::registry::Wid;
use crate::tree::{NodeId, Tree};
use std::collections::HashMap;

/// `mode ∈ {BSP, Monocle, Float}` of `spec.md` §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Bsp,
    Monocle,
    Float,
}

/// Opaque workspace identity — one per (display, virtual-desktop) pair.
/// The display/virtual-desktop enumeration itself is an external
/// collaborator (`spec.md` §1); the core only ever sees this handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkspaceId(pub u64);

pub struct Workspace {
    pub initialized: bool,
    pub mode: LayoutMode,
    pub offset: Offset,
    pub focused_wid: Option<Wid>,
    pub tree: Tree,
    pub usable_area: Rect,
    /// Per-workspace axis override (`spec.md` §4.3: "unless the user has
    /// preset an override"); `None` means use the optimal-split heuristic.
    pub axis_override: Option<Axis>,
    /// Window this workspace's fullscreen slot currently holds, if any.
    pub fullscreen_wid: Option<Wid>,
    /// Window currently promoted to its parent Branch's rectangle.
    pub parent_promoted_wid: Option<Wid>,
    tiles: HashMap<Wid, Rect>,
}

impl Workspace {
    pub fn new(usable_area: Rect, offset: Offset) -> Self {
        Workspace {
            initialized: false,
            mode: LayoutMode::Bsp,
            offset,
            focused_wid: None,
            tree: Tree::new(),
            usable_area,
            axis_override: None,
            fullscreen_wid: None,
            parent_promoted_wid: None,
            tiles: HashMap::new(),
        }
    }

    /// Leftmost leaf in in-order traversal — anchor-leaf fallback of
    /// `spec.md` §4.7, used when no insertion point or mark applies.
    pub fn anchor_leaf(&self, _incoming: Wid) -> Option<NodeId> {
        self.tree.leftmost_leaf()
    }

    /// Re-run the container solver (C4) over the whole tree and cache the
    /// resulting tile rectangles, honouring any active fullscreen/parent
    /// promotion override (`spec.md` §4.3 `set_fullscreen`/`set_parent`).
    pub fn resolve_geometry(&mut self) {
        let mut tiles = crate::solver::resolve(&mut self.tree, self.usable_area, self.offset);

        if let Some(wid) = self.fullscreen_wid {
            if let std::collections::hash_map::Entry::Occupied(mut e) = tiles.entry(wid) {
                e.insert(self.usable_area.inset(self.offset));
            }
        }
        if let Some(wid) = self.parent_promoted_wid {
            if let Some(leaf) = self.tree.find_leaf(wid) {
                if let Some(parent) = self.tree.parent_of(leaf) {
                    tiles.insert(wid, self.tree.rect_of_node(parent));
                }
            }
        }
        self.tiles = tiles;
    }

    /// Final per-window tile rectangles to push to the platform bridge.
    pub fn tiles(&self) -> &HashMap<Wid, Rect> {
        &self.tiles
    }

    /// `set_fullscreen(wid, on)` of `spec.md` §4.3.
    pub fn set_fullscreen(&mut self, wid: Wid, on: bool) {
        self.fullscreen_wid = if on { Some(wid) } else { None };
        self.resolve_geometry();
    }

    pub fn is_fullscreen(&self, wid: Wid) -> bool {
        self.fullscreen_wid == Some(wid)
    }

    /// `set_parent(wid, on)` of `spec.md` §4.3.
    pub fn set_parent_promoted(&mut self, wid: Wid, on: bool) {
        self.parent_promoted_wid = if on { Some(wid) } else { None };
        self.resolve_geometry();
    }

    /// Rebuild the tree from scratch for the new mode, preserving every
    /// currently tiled window (`spec.md` §4.5 step 5 / §8 scenario 6:
    /// "Switch to BSP: tree is rebuilt ... no window is lost").
    pub fn switch_mode(&mut self, mode: LayoutMode) {
        if self.mode == mode {
            return;
        }
        let wids = self.tree.all_wids();
        self.mode = mode;
        self.tree = Tree::new();
        match mode {
            LayoutMode::Monocle => {
                for wid in wids {
                    match self.tree.root {
                        None => {
                            self.tree.add(wid, None, None);
                            let root = self.tree.root.unwrap();
                            self.tree.mark_stacked(root);
                        }
                        Some(root) => self.tree.add(wid, Some(root), None),
                    }
                }
            }
            LayoutMode::Bsp => {
                for wid in wids {
                    let anchor = self.anchor_leaf(wid);
                    self.tree.add(wid, anchor, self.axis_override);
                }
            }
            LayoutMode::Float => {}
        }
        self.resolve_geometry();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Wid;

    fn w(n: i64) -> Wid {
        Wid::new(1, n, 0)
    }

    #[test]
    fn fullscreen_paints_root_rect_and_restores_on_clear() {
        let mut ws = Workspace::new(Rect::new(0, 0, 1920, 1080), Offset::default());
        ws.tree.add(w(10), None, None);
        let root = ws.tree.root.unwrap();
        ws.tree.add(w(20), Some(root), None);
        ws.resolve_geometry();
        let original = ws.tiles()[&w(10)];

        ws.set_fullscreen(w(10), true);
        assert_eq!(ws.tiles()[&w(10)], Rect::new(0, 0, 1920, 1080));

        ws.set_fullscreen(w(10), false);
        assert_eq!(ws.tiles()[&w(10)], original);
    }
}
