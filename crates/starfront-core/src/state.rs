//! Arena snapshot: the complete visible state handed to the renderer each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::components::HealthBar;
use crate::enums::{ArenaOutcome, EntityKind};
use crate::types::SimTime;

/// Complete arena state published after each update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub arena_width: f64,
    pub arena_height: f64,
    pub outcome: ArenaOutcome,
    /// Narrow-phase box tests performed since the engine started.
    pub collisions_checked: u64,
    pub entities: Vec<EntityView>,
}

impl ArenaSnapshot {
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn player(&self) -> Option<&EntityView> {
        self.entities.iter().find(|e| e.kind.is_player())
    }
}

/// A live entity as seen by the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u64,
    pub kind: EntityKind,
    pub position: DVec2,
    pub last_position: DVec2,
    pub size: DVec2,
    pub heading: f64,
    pub visible: bool,
    pub hull: Option<i32>,
    pub health_bar: Option<HealthBar>,
    pub mounts: Vec<MountView>,
}

impl EntityView {
    /// Position blended between the last two ticks by `alpha` in [0, 1].
    pub fn interpolated(&self, alpha: f64) -> DVec2 {
        self.last_position + (self.position - self.last_position) * alpha
    }
}

/// A hardpoint-mounted component as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MountView {
    pub position: DVec2,
    pub last_position: DVec2,
    pub size: DVec2,
}

impl MountView {
    pub fn interpolated(&self, alpha: f64) -> DVec2 {
        self.last_position + (self.position - self.last_position) * alpha
    }
}
