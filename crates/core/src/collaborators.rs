//! External collaborator interfaces (`spec.md` §6).
//!
//! The core never talks to a real platform, hotkey dispatcher, or overlay
//! directly; it consumes these traits. Production wiring supplies real
//! implementations (see `platform::win32` for the one the teacher repo's
//! `utils/win32` module grounds); tests and the demo binary use the no-op
//! implementations gated behind the `testing` feature.

use crate::geometry::Rect;
use crate::registry::Wid;

/// Role/sub-role pair used by the registry to filter non-standard windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Standard,
    Dialog,
    Sheet,
    SystemDialog,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubRole {
    StandardWindow,
    Dock,
    DockLaunchpad,
    SystemDialog,
    Unknown,
}

/// One window as reported by a platform snapshot tick.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowObservation {
    pub wid: Wid,
    pub owner: String,
    pub title: String,
    pub rect: Rect,
}

/// Effect the rules engine assigns to a freshly observed window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleEffect {
    Ignore,
    Float,
    WorkspaceAssign(usize),
    None,
}

/// An opaque handle the screen/display/virtual-desktop layer identifies
/// workspaces by. The core never interprets its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenId(pub u32);

/// `snapshot`, `set_rect`, `role`, `is_tilable`, `focus_ref` of `spec.md` §6.
pub trait PlatformBridge {
    fn snapshot(&self) -> Vec<WindowObservation>;

    /// Best-effort move/resize. The bridge clips against window-imposed min
    /// sizes and reports the adjusted rect back.
    fn set_rect(&self, wid: Wid, rect: Rect) -> Rect;

    fn role(&self, wid: Wid) -> (Role, SubRole);

    /// Resizable ∧ movable.
    fn is_tilable(&self, wid: Wid) -> bool;

    /// Raise and mark as key window. Returns `false` if the platform
    /// refused (`CoreError::Unfocusable`).
    fn focus_ref(&self, wid: Wid) -> bool;
}

/// `position`, `warp` of `spec.md` §6.
pub trait Cursor {
    fn position(&self) -> (i32, i32);
    fn warp(&self, point: (i32, i32));
}

/// `apply` of `spec.md` §6, consulted once per new window.
pub trait RulesEngine {
    fn apply(&self, observation: &WindowObservation) -> RuleEffect;
}

/// `update`, `clear` of `spec.md` §6.
pub trait BorderOverlay {
    fn update(&self, marker: BorderMarker);
    fn clear(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderMarker {
    Focused,
    Marked,
}

/// `subscribe`, `unsubscribe` of `spec.md` §6, one per focused application.
pub trait NotificationHub {
    fn subscribe(&self, pid: i32);
    fn unsubscribe(&self);
}

/// Gate for all entry points (`spec.md` §5, §6).
pub trait TransitionSentinel {
    fn space_transition_in_progress(&self) -> bool;
    fn active_space_managed(&self) -> bool;
}

/// Every collaborator the core needs, bundled so `CoreContext` holds one
/// field instead of five.
pub struct Collaborators {
    pub platform: Box<dyn PlatformBridge>,
    pub cursor: Box<dyn Cursor>,
    pub rules: Box<dyn RulesEngine>,
    pub borders: Box<dyn BorderOverlay>,
    pub notifications: Box<dyn NotificationHub>,
    pub sentinel: Box<dyn TransitionSentinel>,
}

#[cfg(any(test, feature = "testing"))]
pub mod null {
    //! No-op collaborator implementations for tests and the demo binary.

    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    pub struct NullPlatformBridge {
        pub windows: RefCell<Vec<WindowObservation>>,
        pub tilable: RefCell<std::collections::HashSet<Wid>>,
    }

    impl PlatformBridge for NullPlatformBridge {
        fn snapshot(&self) -> Vec<WindowObservation> {
            self.windows.borrow().clone()
        }
        fn set_rect(&self, _wid: Wid, rect: Rect) -> Rect {
            rect
        }
        fn role(&self, _wid: Wid) -> (Role, SubRole) {
            (Role::Standard, SubRole::StandardWindow)
        }
        fn is_tilable(&self, wid: Wid) -> bool {
            self.tilable.borrow().is_empty() || self.tilable.borrow().contains(&wid)
        }
        fn focus_ref(&self, _wid: Wid) -> bool {
            true
        }
    }

    #[derive(Default)]
    pub struct NullCursor {
        pub at: RefCell<(i32, i32)>,
    }

    impl Cursor for NullCursor {
        fn position(&self) -> (i32, i32) {
            *self.at.borrow()
        }
        fn warp(&self, point: (i32, i32)) {
            *self.at.borrow_mut() = point;
        }
    }

    #[derive(Default)]
    pub struct NullRulesEngine;

    impl RulesEngine for NullRulesEngine {
        fn apply(&self, _observation: &WindowObservation) -> RuleEffect {
            RuleEffect::None
        }
    }

    #[derive(Default)]
    pub struct NullBorderOverlay;

    impl BorderOverlay for NullBorderOverlay {
        fn update(&self, _marker: BorderMarker) {}
        fn clear(&self) {}
    }

    #[derive(Default)]
    pub struct NullNotificationHub;

    impl NotificationHub for NullNotificationHub {
        fn subscribe(&self, _pid: i32) {}
        fn unsubscribe(&self) {}
    }

    #[derive(Default)]
    pub struct AlwaysReady;

    impl TransitionSentinel for AlwaysReady {
        fn space_transition_in_progress(&self) -> bool {
            false
        }
        fn active_space_managed(&self) -> bool {
            true
        }
    }

    impl Collaborators {
        /// A fully no-op collaborator set, wired for tests and demos.
        pub fn null() -> Collaborators {
            Collaborators {
                platform: Box::new(NullPlatformBridge::default()),
                cursor: Box::new(NullCursor::default()),
                rules: Box::new(NullRulesEngine),
                borders: Box::new(NullBorderOverlay),
                notifications: Box::new(NullNotificationHub),
                sentinel: Box::new(AlwaysReady),
            }
        }
    }
}
