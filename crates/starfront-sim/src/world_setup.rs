//! Entity spawn factories.
//!
//! Builds the player ship, hostile destroyers and projectiles with their
//! component bundles.

use glam::DVec2;
use hecs::Entity;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starfront_core::components::{Body, Hull, Pilot, Seeker};
use starfront_core::constants::*;
use starfront_core::enums::EntityKind;

use crate::assets::SpriteCatalog;
use crate::hardpoint::{Component, Hardpoint, Hardpoints, ShotRequest, Turret};
use crate::kinematics::Kinematics;
use crate::registry::Registry;
use crate::systems::health_bar;

/// Spawn the player ship with its corner at the arena center.
pub fn spawn_player(registry: &mut Registry, arena: DVec2, catalog: &SpriteCatalog) -> Entity {
    let body = Body::new(arena / 2.0, catalog.player.size());

    let mounts = PLAYER_HARDPOINTS
        .iter()
        .map(|&(across, up)| {
            let turret = Turret::new(PLAYER_FIRE_RATE, PROJECTILE_SPEED).player_aimed();
            Hardpoint::new(&body, across, up).with_component(Component::Turret(turret))
        })
        .collect();

    let bar_anchor = DVec2::new(arena.x * PLAYER_BAR_ANCHOR.0, arena.y * PLAYER_BAR_ANCHOR.1);

    let entity = registry.spawn((
        EntityKind::PlayerShip,
        body,
        Kinematics::with_heading(0.0, PLAYER_INITIAL_SPEED),
        Pilot {
            thrust: PLAYER_THRUST,
            max_speed: PLAYER_MAX_SPEED,
            turning_rate: PLAYER_TURNING_RATE,
        },
        Hull {
            integrity: PLAYER_HULL,
            max: PLAYER_HULL,
        },
        health_bar::full(PLAYER_HULL, bar_anchor, false),
        Hardpoints::new(mounts),
    ));
    log::debug!("Spawned player ship {entity:?} at {}", arena / 2.0);
    entity
}

/// Spawn one destroyer at a random arena position, its turret aimed at
/// `target` when there is one.
pub fn spawn_hostile(
    registry: &mut Registry,
    rng: &mut ChaCha8Rng,
    arena: DVec2,
    catalog: &SpriteCatalog,
    target: Option<Entity>,
) -> Entity {
    let position = DVec2::new(rng.gen_range(0.0..arena.x), rng.gen_range(0.0..arena.y));
    let body = Body::new(position, catalog.hostile.size());

    let mut turret = Turret::new(HOSTILE_FIRE_RATE, PROJECTILE_SPEED);
    if let Some(target) = target {
        turret = turret.targeting(target);
    }
    let mut mount = Hardpoint::new(&body, HOSTILE_HARDPOINT.0, HOSTILE_HARDPOINT.1);
    mount.install(Component::Turret(turret));

    let bar_anchor = DVec2::new(position.x, position.y + body.size.y + HEALTH_BAR_GAP);

    let entity = registry.spawn((
        EntityKind::HostileShip,
        body,
        Kinematics::with_heading(0.0, HOSTILE_SPEED),
        // Starts arrived so the first update picks a destination.
        Seeker {
            destination: position,
            arrived: true,
            tolerance: HOSTILE_MAX_SPEED,
        },
        Hull {
            integrity: HOSTILE_HULL,
            max: HOSTILE_HULL,
        },
        health_bar::full(HOSTILE_HULL, bar_anchor, true),
        Hardpoints::new(vec![mount]),
    ));
    log::debug!("Spawned hostile {entity:?} at {position}");
    entity
}

pub fn spawn_hostiles(
    registry: &mut Registry,
    rng: &mut ChaCha8Rng,
    arena: DVec2,
    catalog: &SpriteCatalog,
    target: Option<Entity>,
    count: usize,
) -> Vec<Entity> {
    (0..count)
        .map(|_| spawn_hostile(registry, rng, arena, catalog, target))
        .collect()
}

/// Turn a fired shot into a projectile entity flying at its destination.
pub fn spawn_projectile(registry: &mut Registry, shot: &ShotRequest, catalog: &SpriteCatalog) -> Entity {
    let kinematics = Kinematics::toward(shot.origin, shot.destination, shot.speed);
    let mut body = Body::new(shot.origin, catalog.projectile.size());
    body.heading = kinematics.heading();
    registry.spawn((EntityKind::Projectile(shot.faction), body, kinematics))
}
