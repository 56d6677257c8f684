//! Command surface (C8): the operations `spec.md` §4.8 exposes to whatever
//! dispatches hotkeys — an external collaborator this crate does not define.
//!
//! Grounded on the teacher's `window_manager/commands.rs` dispatch table,
//! generalized from a Win32-`HWND`-keyed `WindowOperation` enum to the
//! `Wid`/`Direction`/`Axis` vocabulary of this spec.

use crate::context::CoreContext;
use crate::error::CoreError;
use crate::geometry::Axis;
use crate::navigation::{self, Candidate, Direction, ScreenExtent};
use crate::registry::Wid;
use crate::workspace::LayoutMode;

/// One user-originated operation (`spec.md` §4.8).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    FocusDirection(Direction),
    FocusWindow(Wid),
    SwapDirection(Direction),
    SwapWithMark,
    ShiftDirection(Direction),
    ToggleFloat(Wid),
    ToggleFullscreen,
    ToggleParent,
    DetachReinsert(Wid, Direction),
    Mark(Wid),
    SetSplitAxis(Axis),
    SetSpaceMode(LayoutMode),
}

pub fn execute(ctx: &mut CoreContext, cmd: Command) -> Result<(), CoreError> {
    if ctx.collaborators.sentinel.space_transition_in_progress() {
        return Err(CoreError::Transitioning);
    }
    match cmd {
        Command::FocusDirection(dir) => focus_direction(ctx, dir),
        Command::FocusWindow(wid) => ctx.focus_window(wid),
        Command::SwapDirection(dir) => swap_direction(ctx, dir),
        Command::SwapWithMark => swap_with_mark(ctx),
        Command::ShiftDirection(dir) => shift_direction(ctx, dir),
        Command::ToggleFloat(wid) => toggle_float(ctx, wid),
        Command::ToggleFullscreen => toggle_fullscreen(ctx),
        Command::ToggleParent => toggle_parent(ctx),
        Command::DetachReinsert(wid, dir) => detach_reinsert(ctx, wid, dir),
        Command::Mark(wid) => mark(ctx, wid),
        Command::SetSplitAxis(axis) => set_split_axis(ctx, axis),
        Command::SetSpaceMode(mode) => set_space_mode(ctx, mode),
    }
}

fn current_workspace_id(ctx: &CoreContext) -> crate::workspace::WorkspaceId {
    ctx.focus.current_workspace
}

fn screen_extent(ctx: &CoreContext) -> ScreenExtent {
    let area = ctx
        .workspaces
        .get(&current_workspace_id(ctx))
        .map(|ws| ws.usable_area)
        .unwrap_or(crate::geometry::Rect::new(0, 0, 1920, 1080));
    ScreenExtent { width: area.w, height: area.h }
}

fn candidates_excluding(ctx: &CoreContext, origin: Wid) -> Vec<Candidate> {
    let workspace_id = current_workspace_id(ctx);
    let Some(workspace) = ctx.workspaces.get(&workspace_id) else { return Vec::new() };
    workspace
        .tiles()
        .iter()
        .filter(|(wid, _)| **wid != origin)
        .map(|(wid, rect)| Candidate { wid: *wid, rect: *rect })
        .collect()
}

fn origin_rect(ctx: &CoreContext, wid: Wid) -> Option<crate::geometry::Rect> {
    ctx.workspaces.get(&current_workspace_id(ctx))?.tiles().get(&wid).copied()
}

/// `focus(direction)` of `spec.md` §4.8.
fn focus_direction(ctx: &mut CoreContext, dir: Direction) -> Result<(), CoreError> {
    let workspace_id = current_workspace_id(ctx);
    let origin_wid = ctx.focused_wid(workspace_id).ok_or(CoreError::NotFound(Wid::new(0, 0, 0)))?;
    let origin = origin_rect(ctx, origin_wid).ok_or(CoreError::NotFound(origin_wid))?;
    let candidates = candidates_excluding(ctx, origin_wid);
    let bias = ctx.active_bias();
    let screen = screen_extent(ctx);
    let found = navigation::find_closest(origin, dir, false, &candidates, screen, bias)
        .ok_or(CoreError::NotFound(origin_wid))?;
    ctx.focus_window(found)
}

/// `swap(direction)` of `spec.md` §4.8: exchange the focused window and its
/// spatial neighbour without moving focus.
fn swap_direction(ctx: &mut CoreContext, dir: Direction) -> Result<(), CoreError> {
    let workspace_id = current_workspace_id(ctx);
    let focused = ctx.focused_wid(workspace_id).ok_or(CoreError::NotFound(Wid::new(0, 0, 0)))?;
    let origin = origin_rect(ctx, focused).ok_or(CoreError::NotFound(focused))?;
    let candidates = candidates_excluding(ctx, focused);
    let bias = ctx.active_bias();
    let screen = screen_extent(ctx);
    let neighbour = navigation::find_closest(origin, dir, false, &candidates, screen, bias)
        .ok_or(CoreError::NotFound(focused))?;
    let workspace = ctx.workspaces.get_mut(&workspace_id).ok_or(CoreError::NotFound(focused))?;
    workspace.tree.swap(focused, neighbour).ok_or(CoreError::NotFound(neighbour))?;
    workspace.resolve_geometry();
    Ok(())
}

/// `swap_with_mark()` of `spec.md` §4.8: exchange the focused window with
/// the globally marked window, then clear the mark.
fn swap_with_mark(ctx: &mut CoreContext) -> Result<(), CoreError> {
    let mark = ctx.focus.marked.ok_or(CoreError::Invariant("no window marked".into()))?;
    let workspace_id = current_workspace_id(ctx);
    let focused = ctx.focused_wid(workspace_id).ok_or(CoreError::NotFound(mark))?;
    let workspace = ctx.workspaces.get_mut(&workspace_id).ok_or(CoreError::NotFound(mark))?;
    workspace.tree.swap(focused, mark).ok_or(CoreError::NotFound(mark))?;
    workspace.resolve_geometry();
    ctx.focus.clear_mark();
    Ok(())
}

/// `shift(direction)` of `spec.md` §4.8, Monocle-mode stack-neighbour
/// variant of focus movement: advance to the next/previous stack member
/// without consulting spatial navigation.
fn shift_direction(ctx: &mut CoreContext, dir: Direction) -> Result<(), CoreError> {
    let workspace_id = current_workspace_id(ctx);
    let workspace = ctx.workspaces.get(&workspace_id).ok_or(CoreError::NotFound(Wid::new(0, 0, 0)))?;
    if workspace.mode == LayoutMode::Monocle {
        let focused = workspace.focused_wid.ok_or(CoreError::NotFound(Wid::new(0, 0, 0)))?;
        let leaf = workspace.tree.find_leaf(focused).ok_or(CoreError::NotFound(focused))?;
        let forward = matches!(dir, Direction::Right | Direction::Down);
        let next = crate::focus::stack_neighbour(&workspace.tree, leaf, focused, forward, true)
            .ok_or(CoreError::NotFound(focused))?;
        return ctx.focus_window(next);
    }
    focus_direction(ctx, dir)
}

/// `toggle_float(wid)` of `spec.md` §4.8: pull a tiled window out into the
/// global floating set, or return a floating window to its workspace's tree.
fn toggle_float(ctx: &mut CoreContext, wid: Wid) -> Result<(), CoreError> {
    let workspace_id = current_workspace_id(ctx);
    if ctx.floating.remove(&wid) {
        let workspace = ctx.workspaces.get_mut(&workspace_id).ok_or(CoreError::NotFound(wid))?;
        let anchor = workspace.anchor_leaf(wid);
        workspace.tree.add(wid, anchor, workspace.axis_override);
        workspace.resolve_geometry();
        return Ok(());
    }
    let workspace = ctx.workspaces.get_mut(&workspace_id).ok_or(CoreError::NotFound(wid))?;
    if workspace.tree.find_leaf(wid).is_none() {
        return Err(CoreError::NotFound(wid));
    }
    workspace.tree.remove(wid);
    workspace.resolve_geometry();
    ctx.floating.insert(wid);
    // `spec.md` §3: the mark is cleared when the marked window floats.
    if ctx.focus.marked == Some(wid) {
        ctx.focus.clear_mark();
    }
    Ok(())
}

/// `toggle_fullscreen()` of `spec.md` §4.8, applied to the focused window.
fn toggle_fullscreen(ctx: &mut CoreContext) -> Result<(), CoreError> {
    let workspace_id = current_workspace_id(ctx);
    let workspace = ctx.workspaces.get_mut(&workspace_id).ok_or(CoreError::NotFound(Wid::new(0, 0, 0)))?;
    let focused = workspace.focused_wid.ok_or(CoreError::Invariant("no focused window".into()))?;
    let on = !workspace.is_fullscreen(focused);
    workspace.set_fullscreen(focused, on);
    Ok(())
}

/// `toggle_parent()` of `spec.md` §4.8: promote the focused window to its
/// parent Branch's rectangle, or demote it back to its own leaf rectangle.
fn toggle_parent(ctx: &mut CoreContext) -> Result<(), CoreError> {
    let workspace_id = current_workspace_id(ctx);
    let workspace = ctx.workspaces.get_mut(&workspace_id).ok_or(CoreError::NotFound(Wid::new(0, 0, 0)))?;
    let focused = workspace.focused_wid.ok_or(CoreError::Invariant("no focused window".into()))?;
    let on = workspace.parent_promoted_wid != Some(focused);
    workspace.set_parent_promoted(focused, on);
    Ok(())
}

/// `detach_reinsert(wid, direction)` of `spec.md` §4.8: remove a window from
/// its current leaf, then re-insert it at the leaf reached by walking
/// `direction` once from its former position — used to relocate a window
/// across a split boundary without a full spatial search.
fn detach_reinsert(ctx: &mut CoreContext, wid: Wid, dir: Direction) -> Result<(), CoreError> {
    let workspace_id = current_workspace_id(ctx);
    let origin = origin_rect(ctx, wid).ok_or(CoreError::NotFound(wid))?;
    let candidates = candidates_excluding(ctx, wid);
    let bias = ctx.active_bias();
    let screen = screen_extent(ctx);
    let target = navigation::find_closest(origin, dir, false, &candidates, screen, bias);

    let workspace = ctx.workspaces.get_mut(&workspace_id).ok_or(CoreError::NotFound(wid))?;
    if workspace.tree.find_leaf(wid).is_none() {
        return Err(CoreError::NotFound(wid));
    }
    workspace.tree.remove(wid);
    let anchor = target.and_then(|t| workspace.tree.find_leaf(t)).or_else(|| workspace.anchor_leaf(wid));
    workspace.tree.add(wid, anchor, workspace.axis_override);
    workspace.resolve_geometry();
    Ok(())
}

/// `mark(wid)` of `spec.md` §4.8: set the single global mark.
fn mark(ctx: &mut CoreContext, wid: Wid) -> Result<(), CoreError> {
    ctx.focus.set_mark(wid);
    ctx.collaborators.borders.update(crate::collaborators::BorderMarker::Marked);
    Ok(())
}

/// `set_split_axis(axis)` of `spec.md` §4.8: set the per-workspace axis
/// override consulted by `add` on the next insertion. Meaningless outside
/// `Bsp` (`spec.md` §7's `WrongMode`): Monocle always stacks, Float never
/// splits.
fn set_split_axis(ctx: &mut CoreContext, axis: Axis) -> Result<(), CoreError> {
    let workspace_id = current_workspace_id(ctx);
    let workspace = ctx.workspaces.get_mut(&workspace_id).ok_or(CoreError::Invariant("no active workspace".into()))?;
    if workspace.mode != LayoutMode::Bsp {
        return Err(CoreError::WrongMode { expected: LayoutMode::Bsp, actual: workspace.mode });
    }
    workspace.axis_override = Some(axis);
    Ok(())
}

/// `set_space_mode(mode)` of `spec.md` §4.8.
fn set_space_mode(ctx: &mut CoreContext, mode: LayoutMode) -> Result<(), CoreError> {
    let workspace_id = current_workspace_id(ctx);
    let workspace = ctx.workspaces.get_mut(&workspace_id).ok_or(CoreError::Invariant("no active workspace".into()))?;
    workspace.switch_mode(mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::Collaborators;
    use crate::config::CoreConfig;
    use crate::geometry::Rect;
    use crate::workspace::WorkspaceId;

    fn w(n: i64) -> Wid {
        Wid::new(1, n, 0)
    }

    fn ctx_with_two_windows() -> CoreContext {
        let mut ctx = CoreContext::new(Collaborators::null(), CoreConfig::default(), WorkspaceId(0));
        ctx.assign_screen(crate::collaborators::ScreenId(0), WorkspaceId(0), Rect::new(0, 0, 1920, 1080));
        let workspace = ctx.workspaces.get_mut(&WorkspaceId(0)).unwrap();
        workspace.tree.add(w(1), None, None);
        let root = workspace.tree.root.unwrap();
        workspace.tree.add(w(2), Some(root), None);
        workspace.resolve_geometry();
        workspace.focused_wid = Some(w(1));
        ctx
    }

    #[test]
    fn focus_direction_moves_to_spatial_neighbour() {
        let mut ctx = ctx_with_two_windows();
        execute(&mut ctx, Command::FocusDirection(Direction::Right)).unwrap();
        assert_eq!(ctx.focused_wid(WorkspaceId(0)), Some(w(2)));
    }

    #[test]
    fn swap_direction_exchanges_without_moving_focus() {
        let mut ctx = ctx_with_two_windows();
        execute(&mut ctx, Command::SwapDirection(Direction::Right)).unwrap();
        assert_eq!(ctx.focused_wid(WorkspaceId(0)), Some(w(1)));
        let workspace = ctx.workspaces.get(&WorkspaceId(0)).unwrap();
        let leaves = workspace.tree.leaves_in_order();
        assert_eq!(workspace.tree.leaf_slot(leaves[0]), &crate::tree::LeafSlot::Single(w(2)));
    }

    #[test]
    fn toggle_float_round_trips_through_the_tree() {
        let mut ctx = ctx_with_two_windows();
        execute(&mut ctx, Command::ToggleFloat(w(2))).unwrap();
        assert!(ctx.is_floating(w(2)));
        let workspace = ctx.workspaces.get(&WorkspaceId(0)).unwrap();
        assert!(workspace.tree.find_leaf(w(2)).is_none());

        execute(&mut ctx, Command::ToggleFloat(w(2))).unwrap();
        assert!(!ctx.is_floating(w(2)));
        let workspace = ctx.workspaces.get(&WorkspaceId(0)).unwrap();
        assert!(workspace.tree.find_leaf(w(2)).is_some());
    }

    #[test]
    fn toggle_float_clears_mark_on_the_floated_window() {
        let mut ctx = ctx_with_two_windows();
        execute(&mut ctx, Command::Mark(w(2))).unwrap();
        execute(&mut ctx, Command::ToggleFloat(w(2))).unwrap();
        assert_eq!(ctx.focus.marked, None);
    }

    #[test]
    fn toggle_float_leaves_mark_on_a_different_window_untouched() {
        let mut ctx = ctx_with_two_windows();
        execute(&mut ctx, Command::Mark(w(1))).unwrap();
        execute(&mut ctx, Command::ToggleFloat(w(2))).unwrap();
        assert_eq!(ctx.focus.marked, Some(w(1)));
    }

    #[test]
    fn toggle_fullscreen_paints_usable_area() {
        let mut ctx = ctx_with_two_windows();
        execute(&mut ctx, Command::ToggleFullscreen).unwrap();
        let workspace = ctx.workspaces.get(&WorkspaceId(0)).unwrap();
        assert_eq!(workspace.tiles()[&w(1)], Rect::new(0, 0, 1920, 1080));
        execute(&mut ctx, Command::ToggleFullscreen).unwrap();
        let workspace = ctx.workspaces.get(&WorkspaceId(0)).unwrap();
        assert_ne!(workspace.tiles()[&w(1)], Rect::new(0, 0, 1920, 1080));
    }

    #[test]
    fn mark_then_swap_with_mark_exchanges_and_clears() {
        let mut ctx = ctx_with_two_windows();
        execute(&mut ctx, Command::Mark(w(2))).unwrap();
        assert_eq!(ctx.focus.marked, Some(w(2)));
        execute(&mut ctx, Command::SwapWithMark).unwrap();
        assert_eq!(ctx.focus.marked, None);
        let workspace = ctx.workspaces.get(&WorkspaceId(0)).unwrap();
        let leaves = workspace.tree.leaves_in_order();
        assert_eq!(workspace.tree.leaf_slot(leaves[0]), &crate::tree::LeafSlot::Single(w(2)));
    }

    #[test]
    fn set_split_axis_rejected_outside_bsp() {
        let mut ctx = ctx_with_two_windows();
        execute(&mut ctx, Command::SetSpaceMode(LayoutMode::Monocle)).unwrap();
        let err = execute(&mut ctx, Command::SetSplitAxis(Axis::Horizontal)).unwrap_err();
        assert_eq!(
            err,
            CoreError::WrongMode { expected: LayoutMode::Bsp, actual: LayoutMode::Monocle }
        );
    }
}
