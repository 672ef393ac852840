//! Axis-aligned bounding boxes and overlap tests
//!
//! Every entity in the arena is an upright rectangle. Collision is a plain
//! strict-overlap test; touching edges do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
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

/// Anything that occupies space in the arena
pub trait Body {
    fn rect(&self) -> Rect;

    /// Dead bodies are ignored by collision resolution
    fn is_alive(&self) -> bool {
        true
    }

    fn center(&self) -> Vec2 {
        self.rect().center()
    }
}

/// True iff the rectangles intersect with positive area
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

/// Overlap test between two bodies, regardless of alive state
#[inline]
pub fn bodies_overlap(a: &impl Body, b: &impl Body) -> bool {
    overlaps(&a.rect(), &b.rect())
}
