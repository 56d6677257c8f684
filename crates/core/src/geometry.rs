//! Geometry primitives: rectangles, split axes, ratio-based partitioning.
//!
//! Grounded on `window_manager/tree.rs`'s `Rect`/`Split` in the teacher
//! repo, generalized to a single axis-parametrized `split` and to validated
//! `Ratio` values instead of a hardcoded `0.5`.

use serde::{Deserialize, Serialize};

/// A rectangle in display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// Centre point of the rectangle, used by spatial navigation scoring.
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Subtract uniform padding from every side.
    pub fn inset_uniform(&self, amount: i32) -> Rect {
        Rect::new(
            self.x + amount,
            self.y + amount,
            self.w - 2 * amount,
            self.h - 2 * amount,
        )
    }

    /// Subtract per-side padding.
    pub fn inset(&self, padding: Offset) -> Rect {
        Rect::new(
            self.x + padding.left,
            self.y + padding.top,
            self.w - padding.left - padding.right,
            self.h - padding.top - padding.bottom,
        )
    }
}

/// Per-side outer padding plus the inner gap between siblings, the
/// workspace's `offset` of `spec.md` §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Offset {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
    pub gap: i32,
}

impl Offset {
    pub fn new(padding: i32, gap: i32) -> Self {
        Offset {
            left: padding,
            right: padding,
            top: padding,
            bottom: padding,
            gap,
        }
    }
}

/// Split axis of a Branch container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Children sit side by side (left/right).
    Vertical,
    /// Children stack top/bottom.
    Horizontal,
}

impl Axis {
    pub fn opposite(self) -> Axis {
        match self {
            Axis::Vertical => Axis::Horizontal,
            Axis::Horizontal => Axis::Vertical,
        }
    }
}

/// A validated split ratio, always within `[0.05, 0.95]` (`spec.md` §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ratio(f64);

impl Ratio {
    pub const MIN: f64 = 0.05;
    pub const MAX: f64 = 0.95;

    pub fn new(r: f64) -> Self {
        Ratio(r.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Ratio(0.5)
    }
}

/// Split rectangle `r` by `axis` at `ratio`, producing `(first, second)` such
/// that `first ∪ second = r` and the shared edge is perpendicular to `axis`.
pub fn split(r: Rect, axis: Axis, ratio: Ratio) -> (Rect, Rect) {
    match axis {
        Axis::Vertical => {
            let left_w = (r.w as f64 * ratio.get()).round() as i32;
            let left = Rect::new(r.x, r.y, left_w, r.h);
            let right = Rect::new(r.x + left_w, r.y, r.w - left_w, r.h);
            (left, right)
        }
        Axis::Horizontal => {
            let top_h = (r.h as f64 * ratio.get()).round() as i32;
            let top = Rect::new(r.x, r.y, r.w, top_h);
            let bottom = Rect::new(r.x, r.y + top_h, r.w, r.h - top_h);
            (top, bottom)
        }
    }
}

/// The optimal split axis for a rectangle: `Vertical` when width ≥ height,
/// otherwise `Horizontal` (`spec.md` §4.1).
pub fn optimal_axis(r: Rect) -> Axis {
    if r.w >= r.h {
        Axis::Vertical
    } else {
        Axis::Horizontal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_clamps_to_range() {
        assert_eq!(Ratio::new(0.0).get(), Ratio::MIN);
        assert_eq!(Ratio::new(1.0).get(), Ratio::MAX);
        assert_eq!(Ratio::new(0.5).get(), 0.5);
    }

    #[test]
    fn optimal_axis_prefers_vertical_for_wide_rects() {
        assert_eq!(optimal_axis(Rect::new(0, 0, 1920, 1080)), Axis::Vertical);
        assert_eq!(optimal_axis(Rect::new(0, 0, 500, 1080)), Axis::Horizontal);
    }

    #[test]
    fn split_vertical_covers_the_whole_rect() {
        let r = Rect::new(0, 0, 1920, 1080);
        let (left, right) = split(r, Axis::Vertical, Ratio::new(0.5));
        assert_eq!(left, Rect::new(0, 0, 960, 1080));
        assert_eq!(right, Rect::new(960, 0, 960, 1080));
    }

    #[test]
    fn split_horizontal_covers_the_whole_rect() {
        let r = Rect::new(0, 0, 1920, 1080);
        let (top, bottom) = split(r, Axis::Horizontal, Ratio::new(0.5));
        assert_eq!(top, Rect::new(0, 0, 1920, 540));
        assert_eq!(bottom, Rect::new(0, 540, 1920, 540));
    }
}
