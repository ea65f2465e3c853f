//! Snapshot system: reads the registry and builds an `ArenaSnapshot`.
//!
//! This system is read-only.

use hecs::Entity;

use starfront_core::components::{Body, HealthBar, Hull};
use starfront_core::enums::ArenaOutcome;
use starfront_core::state::{ArenaSnapshot, EntityView, MountView};
use starfront_core::types::SimTime;

use crate::assets::SpriteCatalog;
use crate::hardpoint::Hardpoints;
use crate::registry::Registry;

/// Arena-wide values copied into every snapshot.
pub struct SnapshotHeader {
    pub time: SimTime,
    pub arena_width: f64,
    pub arena_height: f64,
    pub outcome: ArenaOutcome,
    pub collisions_checked: u64,
}

/// Build a snapshot of every live entity, in update order.
pub fn build_snapshot(
    registry: &Registry,
    header: SnapshotHeader,
    catalog: &SpriteCatalog,
) -> ArenaSnapshot {
    ArenaSnapshot {
        time: header.time,
        arena_width: header.arena_width,
        arena_height: header.arena_height,
        outcome: header.outcome,
        collisions_checked: header.collisions_checked,
        entities: registry
            .entities()
            .iter()
            .filter_map(|&entity| build_view(registry, entity, catalog))
            .collect(),
    }
}

fn build_view(registry: &Registry, entity: Entity, catalog: &SpriteCatalog) -> Option<EntityView> {
    let world = registry.world();
    let kind = registry.kind(entity)?;
    let body = world.get::<&Body>(entity).ok()?;
    if !body.enabled {
        return None;
    }

    let mounts: Vec<MountView> = world
        .get::<&Hardpoints>(entity)
        .map(|mounts| {
            mounts
                .points
                .iter()
                .filter_map(|point| point.component())
                .map(|component| MountView {
                    position: component.position(),
                    last_position: component.last_position(),
                    size: catalog.turret.size(),
                })
                .collect()
        })
        .unwrap_or_default();

    Some(EntityView {
        id: entity.to_bits().get(),
        kind,
        position: body.position,
        last_position: body.last_position,
        size: body.size,
        heading: body.heading,
        visible: body.visible,
        hull: world.get::<&Hull>(entity).ok().map(|hull| hull.integrity),
        health_bar: world.get::<&HealthBar>(entity).ok().map(|bar| *bar),
        mounts,
    })
}
