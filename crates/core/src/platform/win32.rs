//! Win32 `PlatformBridge`/`Cursor` (`spec.md` §6), grounded on the teacher's
//! `utils::win32` wrapper layer (`handle.rs`, `enumeration.rs`, `filters.rs`):
//! `WindowHandle` already exposes the exact primitives the trait needs —
//! enumeration, rect get/set, title/owner, foreground-window set — this
//! module is the thin adapter from that wrapper to the collaborator trait.

use crate::collaborators::{Cursor, PlatformBridge, Role, SubRole, WindowObservation};
use crate::geometry::Rect;
use crate::registry::Wid;
use crate::utils::win32::{enumerate_app_windows, WindowHandle};
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::{GetCursorPos, SetCursorPos};

/// Layer is always 0: this platform has no notion of window layers beyond
/// the single desktop the Win32 APIs expose.
fn wid_of(handle: WindowHandle) -> Wid {
    Wid::new(handle.get_process_id() as i32, handle.hwnd().0 as i64, 0)
}

fn handle_of(wid: Wid) -> WindowHandle {
    WindowHandle::from_hwnd(windows::Win32::Foundation::HWND(wid.wid as isize))
}

pub struct Win32PlatformBridge;

impl PlatformBridge for Win32PlatformBridge {
    fn snapshot(&self) -> Vec<WindowObservation> {
        let Ok(windows) = enumerate_app_windows() else { return Vec::new() };
        windows
            .into_iter()
            .filter_map(|h| {
                let rect = h.get_rect().ok()?;
                Some(WindowObservation {
                    wid: wid_of(h),
                    owner: h.get_process_name().unwrap_or_default(),
                    title: h.get_title().unwrap_or_default(),
                    rect: Rect::new(rect.left, rect.top, rect.right - rect.left, rect.bottom - rect.top),
                })
            })
            .collect()
    }

    fn set_rect(&self, wid: Wid, rect: Rect) -> Rect {
        let handle = handle_of(wid);
        let _ = handle.set_pos(rect.x, rect.y, rect.w, rect.h);
        handle
            .get_rect()
            .map(|r| Rect::new(r.left, r.top, r.right - r.left, r.bottom - r.top))
            .unwrap_or(rect)
    }

    fn role(&self, wid: Wid) -> (Role, SubRole) {
        let handle = handle_of(wid);
        if handle.is_app_window() {
            (Role::Standard, SubRole::StandardWindow)
        } else {
            (Role::Unknown, SubRole::Unknown)
        }
    }

    fn is_tilable(&self, wid: Wid) -> bool {
        let handle = handle_of(wid);
        handle.is_app_window() && !handle.is_minimized()
    }

    fn focus_ref(&self, wid: Wid) -> bool {
        handle_of(wid).set_foreground().is_ok()
    }
}

pub struct Win32Cursor;

impl Cursor for Win32Cursor {
    fn position(&self) -> (i32, i32) {
        unsafe {
            let mut point = POINT::default();
            let _ = GetCursorPos(&mut point);
            (point.x, point.y)
        }
    }

    fn warp(&self, point: (i32, i32)) {
        unsafe {
            let _ = SetCursorPos(point.0, point.1);
        }
    }
}
