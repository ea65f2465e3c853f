//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in the simulation
//! crate's systems; the kinematics and hardpoint components that carry
//! invariants of their own are defined there too.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::BarTint;
use crate::types::Aabb;

/// Placement, extent and lifecycle flags shared by every entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner of the sprite, in arena pixels.
    pub position: DVec2,
    /// Position at the start of the current tick, for render interpolation.
    pub last_position: DVec2,
    /// Sprite extent. The bounding box is `position` + `size`.
    pub size: DVec2,
    /// Facing in radians, mirrored from the entity's kinematics.
    pub heading: f64,
    /// Cleared when the entity leaves the arena or is destroyed.
    pub enabled: bool,
    pub visible: bool,
}

impl Body {
    pub fn new(position: DVec2, size: DVec2) -> Self {
        Self {
            position,
            last_position: position,
            size,
            heading: 0.0,
            enabled: true,
            visible: true,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_origin_size(self.position, self.size)
    }

    pub fn center(&self) -> DVec2 {
        self.bounds().center()
    }
}

/// Hull integrity of a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hull {
    pub integrity: i32,
    pub max: i32,
}

/// Flight characteristics of a piloted ship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pilot {
    /// Speed gained per tick of forward thrust.
    pub thrust: f64,
    pub max_speed: f64,
    /// Heading change per tick of turning, in radians.
    pub turning_rate: f64,
}

/// Destination seeking for autonomous ships.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Seeker {
    pub destination: DVec2,
    /// Set when the ship comes within `tolerance` of its destination.
    pub arrived: bool,
    /// Arrival tolerance on each axis; the ship's own top speed.
    pub tolerance: f64,
}

/// Segmented health bar drawn for a ship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthBar {
    pub max_units: i32,
    pub units: i32,
    pub tint: BarTint,
    /// Top-left of the bar in arena pixels.
    pub anchor: DVec2,
    /// When set the bar tracks its ship; otherwise it stays at `anchor`.
    pub follows_owner: bool,
}
