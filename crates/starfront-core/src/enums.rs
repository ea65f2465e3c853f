//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which side an entity fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Hostile,
}

/// Tagged entity kind. Collision rules and update behavior dispatch on this
/// rather than on the concrete set of components an entity carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// The controllable ship.
    PlayerShip,
    /// An autonomous enemy ship.
    HostileShip,
    /// A shot, tagged with the faction that fired it.
    Projectile(Faction),
}

impl EntityKind {
    pub fn is_projectile(self) -> bool {
        matches!(self, EntityKind::Projectile(_))
    }

    pub fn is_player(self) -> bool {
        self == EntityKind::PlayerShip
    }

    /// Ships that pursue random destinations on their own.
    pub fn is_autonomous(self) -> bool {
        self == EntityKind::HostileShip
    }

    pub fn faction(self) -> Faction {
        match self {
            EntityKind::PlayerShip => Faction::Player,
            EntityKind::HostileShip => Faction::Hostile,
            EntityKind::Projectile(faction) => faction,
        }
    }
}

/// Health bar tint, degrading as hull integrity drops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarTint {
    #[default]
    Green,
    Yellow,
    Red,
}

/// State of the match after the most recent tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaOutcome {
    #[default]
    InProgress,
    /// Every hostile ship has been destroyed.
    Victory,
    /// The player ship is gone.
    Defeat,
}
