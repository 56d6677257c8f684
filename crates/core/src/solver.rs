//! Container solver (C4): turns a tree's raw split geometry into the final
//! per-window "tile rectangles" pushed to the platform bridge.
//!
//! Grounded on the teacher's `Rect::apply_gaps`/`shrink` (`window_manager/tree.rs`)
//! and `TreeNode::with_rect`/`rebalance`, generalized to the root-only outer
//! padding and per-split inner-gap shrink of `spec.md` §4.4.

use crate::geometry::{split, Offset, Rect};
use crate::registry::Wid;
use crate::tree::{LeafSlot, NodeId, Tree};
use std::collections::HashMap;

/// Recompute every node's raw (pre-leaf-inset) assigned rectangle from the
/// workspace's usable area, then return the final tile rectangle for every
/// tiled window — `spec.md` §4.4's gap/padding pipeline.
pub fn resolve(tree: &mut Tree, usable_area: Rect, offset: Offset) -> HashMap<Wid, Rect> {
    let mut tiles = HashMap::new();
    if let Some(root) = tree.root {
        let root_rect = usable_area.inset(offset);
        resolve_node(tree, root, root_rect, offset.gap, &mut tiles);
    }
    tiles
}

fn resolve_node(tree: &mut Tree, id: NodeId, rect: Rect, gap: i32, tiles: &mut HashMap<Wid, Rect>) {
    tree.set_node_rect(id, rect);
    match tree.node_kind_owned(id) {
        crate::tree::NodeKindOwned::Branch { axis, ratio, left, right } => {
            let (r1, r2) = split(rect, axis, crate::geometry::Ratio::new(ratio));
            let half_gap = gap / 2;
            let r1 = shrink_trailing_edge(r1, axis, half_gap);
            let r2 = shrink_leading_edge(r2, axis, half_gap);
            resolve_node(tree, left, r1, gap, tiles);
            resolve_node(tree, right, r2, gap, tiles);
        }
        crate::tree::NodeKindOwned::Leaf { slot } => {
            let tile = rect.inset_uniform(gap / 2);
            match slot {
                LeafSlot::Empty => {}
                LeafSlot::Single(w) => {
                    tiles.insert(w, tile);
                }
                LeafSlot::Stacked(list) => {
                    for w in list {
                        tiles.insert(w, tile);
                    }
                }
            }
        }
    }
}

fn shrink_trailing_edge(r: Rect, axis: crate::geometry::Axis, half_gap: i32) -> Rect {
    match axis {
        crate::geometry::Axis::Vertical => Rect::new(r.x, r.y, r.w - half_gap, r.h),
        crate::geometry::Axis::Horizontal => Rect::new(r.x, r.y, r.w, r.h - half_gap),
    }
}

fn shrink_leading_edge(r: Rect, axis: crate::geometry::Axis, half_gap: i32) -> Rect {
    match axis {
        crate::geometry::Axis::Vertical => Rect::new(r.x + half_gap, r.y, r.w - half_gap, r.h),
        crate::geometry::Axis::Horizontal => Rect::new(r.x, r.y + half_gap, r.w, r.h - half_gap),
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
    fn zero_gap_zero_padding_matches_raw_split() {
        let mut t = Tree::new();
        t.add(w(10), None, None);
        let root = t.root.unwrap();
        t.add(w(20), Some(root), None);

        let tiles = resolve(&mut t, Rect::new(0, 0, 1920, 1080), Offset::default());
        assert_eq!(tiles[&w(10)], Rect::new(0, 0, 960, 1080));
        assert_eq!(tiles[&w(20)], Rect::new(960, 0, 960, 1080));
    }

    #[test]
    fn gap_and_padding_shrink_every_tile() {
        let mut t = Tree::new();
        t.add(w(10), None, None);
        let root = t.root.unwrap();
        t.add(w(20), Some(root), None);

        let offset = Offset::new(10, 20);
        let tiles = resolve(&mut t, Rect::new(0, 0, 1920, 1080), offset);
        // Root usable area after 10px padding: (10,10,1900,1060). Split in
        // half at x=960 producing two 950-wide halves, each shaved by
        // gap/2=10 on the shared edge, then inset by another uniform 10 for
        // the leaf's own tile rectangle.
        assert_eq!(tiles[&w(10)], Rect::new(20, 20, 920, 1040));
        assert_eq!(tiles[&w(20)], Rect::new(980, 20, 920, 1040));
    }

    #[test]
    fn stacked_leaf_shares_one_tile_rect() {
        let mut t = Tree::new();
        t.add(w(10), None, None);
        let root = t.root.unwrap();
        t.mark_stacked(root);
        t.add(w(20), Some(root), None);

        let tiles = resolve(&mut t, Rect::new(0, 0, 1920, 1080), Offset::default());
        assert_eq!(tiles[&w(10)], tiles[&w(20)]);
    }
}
