//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box: top-left corner plus extent, in arena pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Aabb {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box anchored at `origin` (top-left) with the given `size`.
    pub fn from_origin_size(origin: DVec2, size: DVec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True when the box has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Exact overlap test for the narrow phase.
    ///
    /// Edges that merely touch do not intersect, and an empty box never
    /// intersects anything.
    pub fn intersects(&self, other: &Aabb) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// True when `other` lies entirely inside this box (edges inclusive).
    pub fn contains(&self, other: &Aabb) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of completed updates.
    pub tick: u64,
}

impl SimTime {
    /// Seconds per tick at the fixed update rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Simulated seconds elapsed.
    pub fn elapsed_secs(&self) -> f64 {
        self.tick as f64 * self.dt()
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}
