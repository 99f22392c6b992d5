//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D position on the playfield (pixels). Refers to the top-left corner
/// of the entity's body; y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Per-tick displacement (pixels per tick). Integer-valued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: i32,
    pub y: i32,
}

/// Axis-aligned rectangle used for overlap queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Logical simulation clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick, reset on life loss).
    pub tick: u64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Overlap test. Rectangles that merely touch along an edge count as
    /// intersecting.
    pub fn intersects(&self, other: &Rect) -> bool {
        other.left <= self.right()
            && other.right() >= self.left
            && other.top <= self.bottom()
            && other.bottom() >= self.top
    }

    /// Area of the intersection, 0.0 when the rectangles are disjoint or
    /// only touch.
    pub fn overlap_area(&self, other: &Rect) -> f64 {
        let w = self.right().min(other.right()) - self.left.max(other.left);
        let h = self.bottom().min(other.bottom()) - self.top.max(other.top);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }

    /// Rewind the clock to zero (start of a new life).
    pub fn reset(&mut self) {
        self.tick = 0;
    }
}
