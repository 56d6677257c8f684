//! The owning core context: every workspace, the window registry, the
//! focus state machine, and the collaborators, wired together behind the
//! tick entry point and the command surface.
//!
//! Design note 9: "global singletons... lifted into an explicit core
//! context passed to every entry point, with one such context per
//! process." `CoreContext` is that context; it owns everything and is not
//! `Sync` — see `SPEC_FULL.md` §5 on the single-cooperative-thread model.

use crate::collaborators::{BorderMarker, Collaborators, RuleEffect, ScreenId};
use crate::commands::Command;
use crate::config::CoreConfig;
use crate::error::CoreError;
use crate::focus::FocusState;
use crate::geometry::Rect;
use crate::navigation::NavigationBias;
use crate::reconciler::{self, ReconcileOutcome};
use crate::registry::{Wid, WindowRegistry};
use crate::workspace::{Workspace, WorkspaceId};
use std::collections::{HashMap, HashSet};

pub struct CoreContext {
    pub workspaces: HashMap<WorkspaceId, Workspace>,
    pub registry: WindowRegistry,
    /// Core-wide floating set (`spec.md` §9: the source keeps a single
    /// global list, not per-workspace; this spec preserves that scope).
    pub floating: HashSet<Wid>,
    pub focus: FocusState,
    pub collaborators: Collaborators,
    pub config: CoreConfig,
    /// Window → workspace assignment, populated once per new window via the
    /// rules engine (`spec.md` §6: "consulted once per new window") and
    /// otherwise defaulting to the screen's active workspace.
    assignments: HashMap<Wid, WorkspaceId>,
    screen_workspace: HashMap<ScreenId, WorkspaceId>,
}

impl CoreContext {
    pub fn new(collaborators: Collaborators, config: CoreConfig, initial_workspace: WorkspaceId) -> Self {
        CoreContext {
            workspaces: HashMap::new(),
            registry: WindowRegistry::new(),
            floating: HashSet::new(),
            focus: FocusState::new(initial_workspace),
            collaborators,
            config,
            assignments: HashMap::new(),
            screen_workspace: HashMap::new(),
        }
    }

    pub fn assign_screen(&mut self, screen: ScreenId, workspace: WorkspaceId, usable_area: Rect) {
        self.screen_workspace.insert(screen, workspace);
        self.workspaces.entry(workspace).or_insert_with(|| {
            Workspace::new(usable_area, self.config.layout.offset())
        });
    }

    fn navigation_bias(&self) -> NavigationBias {
        NavigationBias::from(&self.config.navigation)
    }

    /// Tick entry point (`spec.md` §6 `on_snapshot()`): drives the fixed
    /// intra-tick order of `spec.md` §5 —
    /// `refresh → filter_for_screen → reconcile → repaint → focus update`.
    pub fn on_snapshot(&mut self, screen: ScreenId) -> Result<(), CoreError> {
        if self.collaborators.sentinel.space_transition_in_progress() {
            return Err(CoreError::Transitioning);
        }
        if !self.collaborators.sentinel.active_space_managed() {
            return Ok(());
        }

        let snapshot = self.collaborators.platform.snapshot();
        let platform = &self.collaborators.platform;
        self.registry.refresh(&snapshot, |wid| platform.role(wid));

        for obs in &snapshot {
            self.assignments.entry(obs.wid).or_insert_with(|| {
                match self.collaborators.rules.apply(obs) {
                    RuleEffect::WorkspaceAssign(id) => WorkspaceId(id as u64),
                    RuleEffect::Float => {
                        self.floating.insert(obs.wid);
                        self.screen_workspace.get(&screen).copied().unwrap_or(WorkspaceId(0))
                    }
                    RuleEffect::Ignore | RuleEffect::None => {
                        self.screen_workspace.get(&screen).copied().unwrap_or(WorkspaceId(0))
                    }
                }
            });
        }

        let workspace_id = match self.screen_workspace.get(&screen) {
            Some(id) => *id,
            None => return Ok(()),
        };

        let members: HashSet<Wid> = self
            .assignments
            .iter()
            .filter(|(_, ws)| **ws == workspace_id)
            .map(|(wid, _)| *wid)
            .collect();

        let overrides: HashSet<Wid> = HashSet::new();
        let ok = self.registry.filter_for_screen(screen, &members, self.collaborators.rules.as_ref(), &overrides);
        if !ok {
            tracing::debug!(?screen, "filter_for_screen bailed on system-modal sentinel");
            return Ok(());
        }

        let tilable: Vec<Wid> = self
            .registry
            .active()
            .iter()
            .map(|w| w.wid)
            .filter(|wid| self.collaborators.platform.is_tilable(*wid) && !self.floating.contains(wid))
            .collect();

        let Some(workspace) = self.workspaces.get_mut(&workspace_id) else {
            return Ok(());
        };
        if !workspace.initialized && !tilable.is_empty() {
            workspace.initialized = true;
        }

        let outcome: ReconcileOutcome =
            reconciler::reconcile(workspace, &tilable, &mut self.floating, &mut self.focus.marked);

        self.repaint(workspace_id);

        if let Some(wid) = outcome.pending_focus {
            let _ = self.focus_set(workspace_id, wid);
            self.collaborators.cursor.warp(self.window_center(workspace_id, wid).unwrap_or((0, 0)));
        }
        if outcome.tree_destroyed {
            self.focus.insertion_point = None;
        }

        Ok(())
    }

    fn window_center(&self, workspace_id: WorkspaceId, wid: Wid) -> Option<(i32, i32)> {
        self.workspaces.get(&workspace_id)?.tiles().get(&wid).map(|r| r.center())
    }

    /// Push every workspace tile rectangle to the platform bridge.
    fn repaint(&mut self, workspace_id: WorkspaceId) {
        let Some(workspace) = self.workspaces.get(&workspace_id) else { return };
        for (&wid, &rect) in workspace.tiles() {
            self.collaborators.platform.set_rect(wid, rect);
        }
    }

    /// Standard focus-set: raise+mark via the platform bridge, update
    /// `focused_wid`, and refresh the border overlay. On refusal
    /// (`CoreError::Unfocusable`), focus state is left untouched and the
    /// border overlay is cleared (`spec.md` §7).
    fn focus_set(&mut self, workspace_id: WorkspaceId, wid: Wid) -> Result<(), CoreError> {
        if !self.collaborators.platform.focus_ref(wid) {
            self.collaborators.borders.clear();
            return Err(CoreError::Unfocusable(wid));
        }
        if let Some(workspace) = self.workspaces.get_mut(&workspace_id) {
            workspace.focused_wid = Some(wid);
        }
        self.collaborators.borders.update(BorderMarker::Focused);
        self.collaborators.notifications.subscribe(wid.pid);
        Ok(())
    }

    /// User-originated focus by id, updating the insertion point
    /// (`spec.md` §4.7: "updated whenever a focus command originates from
    /// the user").
    pub fn focus_window(&mut self, wid: Wid) -> Result<(), CoreError> {
        if self.collaborators.sentinel.space_transition_in_progress() {
            return Err(CoreError::Transitioning);
        }
        let workspace_id = self.workspace_of(wid).ok_or(CoreError::NotFound(wid))?;
        self.focus_set(workspace_id, wid)?;
        self.focus.record_user_focus(wid);
        Ok(())
    }

    /// Cross-workspace focus handoff (`spec.md` §4.7): ensure the target
    /// workspace is initialized, switch the current-screen pointer, then
    /// perform a standard focus set.
    pub fn focus_window_on(&mut self, screen: ScreenId, workspace_id: WorkspaceId, wid: Wid) -> Result<(), CoreError> {
        {
            let workspace = self.workspaces.get(&workspace_id).ok_or(CoreError::NotFound(wid))?;
            if !workspace.initialized {
                let mut ws_mut = self.workspaces.remove(&workspace_id).unwrap();
                reconciler::reconcile(&mut ws_mut, &[wid], &mut self.floating, &mut self.focus.marked);
                ws_mut.initialized = true;
                self.workspaces.insert(workspace_id, ws_mut);
            }
        }
        self.screen_workspace.insert(screen, workspace_id);
        self.focus.current_workspace = workspace_id;
        // `spec.md` §3: the mark does not carry across workspaces.
        self.focus.clear_mark();
        self.focus_set(workspace_id, wid)?;
        self.focus.record_user_focus(wid);
        Ok(())
    }

    fn workspace_of(&self, wid: Wid) -> Option<WorkspaceId> {
        self.workspaces
            .iter()
            .find(|(_, ws)| ws.tree.find_leaf(wid).is_some() || self.floating.contains(&wid))
            .map(|(id, _)| *id)
            .or_else(|| self.assignments.get(&wid).copied())
    }

    pub fn is_floating(&self, wid: Wid) -> bool {
        self.floating.contains(&wid)
    }

    pub fn is_fullscreen(&self, wid: Wid) -> bool {
        self.workspaces.values().any(|ws| ws.is_fullscreen(wid))
    }

    pub fn focused_wid(&self, workspace_id: WorkspaceId) -> Option<Wid> {
        self.workspaces.get(&workspace_id).and_then(|ws| ws.focused_wid)
    }

    pub fn windows_on_workspace(&self, workspace_id: WorkspaceId) -> Vec<Wid> {
        self.workspaces.get(&workspace_id).map(|ws| ws.tree.all_wids()).unwrap_or_default()
    }

    pub fn execute(&mut self, cmd: Command) -> Result<(), CoreError> {
        crate::commands::execute(self, cmd)
    }

    pub(crate) fn active_bias(&self) -> NavigationBias {
        self.navigation_bias()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::Collaborators;
    use crate::config::CoreConfig;

    fn w(n: i64) -> Wid {
        Wid::new(1, n, 0)
    }

    #[test]
    fn focus_window_on_clears_mark_on_workspace_switch() {
        let mut ctx = CoreContext::new(Collaborators::null(), CoreConfig::default(), WorkspaceId(0));
        ctx.assign_screen(ScreenId(0), WorkspaceId(0), Rect::new(0, 0, 1920, 1080));
        ctx.assign_screen(ScreenId(0), WorkspaceId(1), Rect::new(0, 0, 1920, 1080));
        ctx.workspaces.get_mut(&WorkspaceId(0)).unwrap().tree.add(w(1), None, None);
        ctx.workspaces.get_mut(&WorkspaceId(1)).unwrap().tree.add(w(2), None, None);

        ctx.focus.set_mark(w(1));
        assert_eq!(ctx.focus.marked, Some(w(1)));

        ctx.focus_window_on(ScreenId(0), WorkspaceId(1), w(2)).unwrap();
        assert_eq!(ctx.focus.marked, None);
    }
}
