//! Match outcome after a tick.

use hecs::Entity;

use starfront_core::enums::{ArenaOutcome, EntityKind};

use crate::registry::Registry;

/// Defeat once the player is gone, victory once no hostile ship remains.
pub fn evaluate(registry: &Registry, player: Option<Entity>) -> ArenaOutcome {
    let player_alive = player.is_some_and(|p| registry.is_live(p));
    if !player_alive {
        return ArenaOutcome::Defeat;
    }

    let hostiles_left = registry
        .entities()
        .iter()
        .any(|&e| registry.kind(e) == Some(EntityKind::HostileShip) && registry.is_live(e));
    if hostiles_left {
        ArenaOutcome::InProgress
    } else {
        ArenaOutcome::Victory
    }
}
