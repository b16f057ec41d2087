//! Axis-aligned collision primitive
//!
//! Every gameplay collision in Car Rush reduces to one rectangle test,
//! invoked for each (player, obstacle), (player, powerup), (player, coin)
//! and (bullet, obstacle) pair per tick. O(n*m) is fine at the entity
//! counts this game produces (tens, not thousands).

use glam::Vec2;

/// Axis-aligned rectangle, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// True iff the rectangles' open intervals overlap on both axes.
///
/// Touching edges do NOT count as colliding - strict inequality on all
/// four comparisons. No side effects.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}
