//! End-to-end scenarios of `spec.md` §8, driven through the crate's public
//! surface rather than `#[cfg(test)]` unit tests beside each module — the
//! six literal scenarios as written, one test each.

use std::collections::{HashSet, VecDeque};

use tiling_core::geometry::{Axis, Offset, Rect};
use tiling_core::navigation::{self, Candidate, Direction, NavigationBias, ScreenExtent};
use tiling_core::reconciler::reconcile;
use tiling_core::registry::Wid;
use tiling_core::tree::LeafSlot;
use tiling_core::workspace::{LayoutMode, Workspace};

fn w(n: i64) -> Wid {
    Wid::new(1, n, 0)
}

fn workspace() -> Workspace {
    Workspace::new(Rect::new(0, 0, 1920, 1080), Offset::default())
}

/// Scenario 1: two windows, BSP, optimal split.
#[test]
fn two_windows_bsp_optimal_split() {
    let mut ws = workspace();
    reconcile(&mut ws, &[w(10), w(20)], &mut HashSet::new(), &mut None);

    let leaves = ws.tree.leaves_in_order();
    assert_eq!(leaves.len(), 2);
    assert_eq!(ws.tree.leaf_slot(leaves[0]), &LeafSlot::Single(w(10)));
    assert_eq!(ws.tree.rect_of_node(leaves[0]), Rect::new(0, 0, 960, 1080));
    assert_eq!(ws.tree.leaf_slot(leaves[1]), &LeafSlot::Single(w(20)));
    assert_eq!(ws.tree.rect_of_node(leaves[1]), Rect::new(960, 0, 960, 1080));
}

/// Scenario 2: remove middle of three.
#[test]
fn remove_middle_of_three() {
    let mut ws = workspace();
    reconcile(&mut ws, &[w(10)], &mut HashSet::new(), &mut None);
    let root = ws.tree.root.unwrap();
    ws.tree.add(w(20), Some(root), None);
    ws.resolve_geometry();
    let right_leaf = ws.tree.leaves_in_order()[1];
    ws.tree.add(w(30), Some(right_leaf), Some(Axis::Horizontal));
    ws.resolve_geometry();

    ws.tree.remove(w(20));
    ws.resolve_geometry();

    let leaves = ws.tree.leaves_in_order();
    assert_eq!(leaves.len(), 2);
    assert_eq!(ws.tree.leaf_slot(leaves[0]), &LeafSlot::Single(w(10)));
    assert_eq!(ws.tree.rect_of_node(leaves[0]), Rect::new(0, 0, 960, 1080));
    assert_eq!(ws.tree.leaf_slot(leaves[1]), &LeafSlot::Single(w(30)));
    assert_eq!(ws.tree.rect_of_node(leaves[1]), Rect::new(960, 0, 960, 1080));
}

/// Scenario 3: stacked leaf — mark an empty leaf stacked, then add 10, 20,
/// 30; remove 20, then 10.
#[test]
fn stacked_leaf_lifecycle() {
    let mut ws = workspace();
    ws.tree.add(w(10), None, None);
    let root = ws.tree.root.unwrap();
    ws.tree.mark_stacked(root);
    ws.tree.add(w(20), Some(root), None);
    ws.tree.add(w(30), Some(root), None);

    assert_eq!(
        ws.tree.leaf_slot(root),
        &LeafSlot::Stacked(VecDeque::from([w(10), w(20), w(30)]))
    );

    ws.tree.remove(w(20));
    assert_eq!(ws.tree.leaf_slot(root), &LeafSlot::Stacked(VecDeque::from([w(10), w(30)])));

    ws.tree.remove(w(10));
    assert_eq!(ws.tree.leaf_slot(root), &LeafSlot::Stacked(VecDeque::from([w(30)])));
}

/// Scenario 4: swap preserves geometry.
#[test]
fn swap_preserves_geometry() {
    let mut ws = workspace();
    reconcile(&mut ws, &[w(10), w(20)], &mut HashSet::new(), &mut None);
    let leaves = ws.tree.leaves_in_order();
    let (left_rect, right_rect) = (ws.tree.rect_of_node(leaves[0]), ws.tree.rect_of_node(leaves[1]));

    ws.tree.swap(w(10), w(20)).unwrap();

    assert_eq!(ws.tree.leaf_slot(leaves[0]), &LeafSlot::Single(w(20)));
    assert_eq!(ws.tree.rect_of_node(leaves[0]), left_rect);
    assert_eq!(ws.tree.leaf_slot(leaves[1]), &LeafSlot::Single(w(10)));
    assert_eq!(ws.tree.rect_of_node(leaves[1]), right_rect);
}

/// Scenario 5: spatial navigation with alignment bias — four windows in a
/// quadrant layout, origin top-left.
#[test]
fn spatial_navigation_with_alignment_bias() {
    let origin = Rect::new(0, 0, 960, 540);
    let candidates = vec![
        Candidate { wid: w(2), rect: Rect::new(960, 0, 960, 540) },   // top-right
        Candidate { wid: w(3), rect: Rect::new(0, 540, 960, 540) },   // bottom-left
        Candidate { wid: w(4), rect: Rect::new(960, 540, 960, 540) }, // bottom-right
    ];
    let screen = ScreenExtent { width: 1920, height: 1080 };
    let bias = NavigationBias::default();

    let right = navigation::find_closest(origin, Direction::Right, false, &candidates, screen, bias);
    assert_eq!(right, Some(w(2)));

    // Bottom-left, not bottom-right, despite comparable Euclidean distance:
    // the perpendicular-alignment weight dominates.
    let down = navigation::find_closest(origin, Direction::Down, false, &candidates, screen, bias);
    assert_eq!(down, Some(w(3)));
}

/// Scenario 6: Monocle round-trip — no window is lost across a mode switch
/// and back.
#[test]
fn monocle_round_trip_loses_no_window() {
    let mut ws = workspace();
    ws.mode = LayoutMode::Monocle;
    reconcile(&mut ws, &[w(10), w(20), w(30)], &mut HashSet::new(), &mut None);
    assert_eq!(ws.tree.leaves_in_order().len(), 1);

    ws.switch_mode(LayoutMode::Bsp);
    let mut wids = ws.tree.all_wids();
    wids.sort_by_key(|w| w.wid);
    assert_eq!(wids, vec![w(10), w(20), w(30)]);

    ws.switch_mode(LayoutMode::Monocle);
    assert_eq!(ws.tree.leaves_in_order().len(), 1);
    let mut wids = ws.tree.all_wids();
    wids.sort_by_key(|w| w.wid);
    assert_eq!(wids, vec![w(10), w(20), w(30)]);
}
