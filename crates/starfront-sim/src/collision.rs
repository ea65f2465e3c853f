//! Collision resolution.
//!
//! Broad phase: the quadtree is cleared and refilled from the live entities
//! once per tick. Narrow phase: an exact box test on each candidate, then
//! the faction rule decides whether the overlap is a hit.

use hecs::Entity;
use serde::{Deserialize, Serialize};

use starfront_core::components::{Body, Hull};
use starfront_core::enums::{EntityKind, Faction};
use starfront_core::types::Aabb;

use crate::quadtree::Quadtree;
use crate::registry::Registry;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionStats {
    /// Narrow-phase box tests performed.
    pub checks: u64,
    /// Overlaps the faction rule accepted.
    pub hits: u64,
}

/// Only a ship and a projectile fired by the other side can hit each other.
pub fn hit_registers(subject: EntityKind, other: EntityKind) -> bool {
    use EntityKind::*;
    matches!(
        (subject, other),
        (PlayerShip, Projectile(Faction::Hostile))
            | (Projectile(Faction::Hostile), PlayerShip)
            | (HostileShip, Projectile(Faction::Player))
            | (Projectile(Faction::Player), HostileShip)
    )
}

/// Empty the index and insert every live entity.
pub fn rebuild_index(index: &mut Quadtree<Entity>, registry: &Registry) {
    index.clear();
    for &entity in registry.entities() {
        if let Some((_, bounds)) = live_parts(registry, entity) {
            index.insert(entity, bounds);
        }
    }
}

/// Test every live ship against its broad-phase candidates and apply hits.
///
/// Projectiles never query; they are found from the ship side, so each
/// ship/projectile pair is tested once.
pub fn resolve(registry: &mut Registry, index: &Quadtree<Entity>) -> CollisionStats {
    let mut stats = CollisionStats::default();

    for position in 0..registry.len() {
        let subject = registry.entities()[position];
        let Some((kind, bounds)) = live_parts(registry, subject) else {
            continue;
        };
        if kind.is_projectile() {
            continue;
        }

        for candidate in index.retrieve(&bounds) {
            if candidate == subject {
                continue;
            }
            let Some((other_kind, other_bounds)) = live_parts(registry, candidate) else {
                continue;
            };

            stats.checks += 1;
            if !bounds.intersects(&other_bounds) || !hit_registers(kind, other_kind) {
                continue;
            }

            log::trace!("{kind:?} {subject:?} hit by {other_kind:?} {candidate:?}");
            stats.hits += 1;
            respond(registry, subject, kind);
            respond(registry, candidate, other_kind);

            if !registry.is_live(subject) {
                break;
            }
        }
    }

    stats
}

/// A projectile is spent by any hit. A ship loses one hull point and is
/// destroyed once its hull reaches zero.
fn respond(registry: &mut Registry, entity: Entity, kind: EntityKind) {
    if kind.is_projectile() {
        registry.disable(entity);
        return;
    }

    let destroyed = match registry.world_mut().get::<&mut Hull>(entity) {
        Ok(mut hull) => {
            hull.integrity -= 1;
            hull.integrity <= 0
        }
        Err(_) => false,
    };
    if destroyed {
        log::debug!("{kind:?} {entity:?} destroyed");
        registry.disable(entity);
    }
}

fn live_parts(registry: &Registry, entity: Entity) -> Option<(EntityKind, Aabb)> {
    let kind = registry.kind(entity)?;
    let body = registry.world().get::<&Body>(entity).ok()?;
    if body.enabled {
        Some((kind, body.bounds()))
    } else {
        None
    }
}
