//! Entity registry: the live entity set and its per-tick update pass.
//!
//! Entities live in a hecs world; `order` keeps their insertion order so
//! every pass visits them the same way. Nothing is despawned while a pass
//! is running. Entities are marked disabled and removed by `compact`.

use glam::DVec2;
use hecs::{DynamicBundle, Entity, World};
use rand_chacha::ChaCha8Rng;

use starfront_core::components::{Body, HealthBar, Hull, Seeker};
use starfront_core::enums::EntityKind;
use starfront_core::input::InputState;

use crate::hardpoint::{Hardpoints, MountContext, ShotRequest};
use crate::kinematics::Kinematics;
use crate::systems::{health_bar, movement, navigation};

/// Everything one registry pass reads or produces besides the entities.
pub struct UpdateContext<'a> {
    /// Arena width and height in pixels.
    pub arena: DVec2,
    pub input: &'a InputState,
    pub rng: &'a mut ChaCha8Rng,
    /// Shots fired during the pass, spawned by the caller afterwards.
    pub shots: &'a mut Vec<ShotRequest>,
}

#[derive(Default)]
pub struct Registry {
    world: World,
    order: Vec<Entity>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an entity at the end of the update order.
    pub fn spawn(&mut self, components: impl DynamicBundle) -> Entity {
        let entity = self.world.spawn(components);
        self.order.push(entity);
        entity
    }

    /// Live entities in update order.
    pub fn entities(&self) -> &[Entity] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    /// Present and not yet disabled.
    pub fn is_live(&self, entity: Entity) -> bool {
        self.world
            .get::<&Body>(entity)
            .map(|body| body.enabled)
            .unwrap_or(false)
    }

    pub fn kind(&self, entity: Entity) -> Option<EntityKind> {
        self.world.get::<&EntityKind>(entity).ok().map(|kind| *kind)
    }

    /// Mark an entity for removal at the next `compact`.
    pub fn disable(&mut self, entity: Entity) {
        if let Ok(mut body) = self.world.get::<&mut Body>(entity) {
            body.enabled = false;
        }
    }

    /// Despawn every disabled entity in a single pass, keeping the order of
    /// the survivors. Returns how many were removed.
    pub fn compact(&mut self) -> usize {
        let world = &mut self.world;
        let before = self.order.len();
        self.order.retain(|&entity| {
            let enabled = world
                .get::<&Body>(entity)
                .map(|body| body.enabled)
                .unwrap_or(false);
            if !enabled {
                let _ = world.despawn(entity);
            }
            enabled
        });
        before - self.order.len()
    }

    /// Run one update pass over every entity, then compact.
    pub fn update(&mut self, ctx: &mut UpdateContext) -> usize {
        for index in 0..self.order.len() {
            let entity = self.order[index];
            self.update_entity(entity, ctx);
        }
        self.compact()
    }

    fn update_entity(&mut self, entity: Entity, ctx: &mut UpdateContext) {
        let Some(kind) = self.kind(entity) else {
            return;
        };

        {
            let Ok(mut body) = self.world.get::<&mut Body>(entity) else {
                return;
            };
            if !body.enabled {
                return;
            }
            if movement::out_of_bounds(&body, ctx.arena) {
                log::debug!("{kind:?} {entity:?} left the arena at {}", body.position);
                body.enabled = false;
                return;
            }

            if let Ok(mut kinematics) = self.world.get::<&mut Kinematics>(entity) {
                movement::advance(&mut body, &kinematics);
                if kind.is_autonomous() {
                    if let Ok(mut seeker) = self.world.get::<&mut Seeker>(entity) {
                        navigation::seek(&body, &mut kinematics, &mut seeker, ctx.arena, ctx.rng);
                    }
                }
            }
        }

        let Ok(body) = self.world.get::<&Body>(entity) else {
            return;
        };

        if let Ok(mut mounts) = self.world.get::<&mut Hardpoints>(entity) {
            let mount_ctx = MountContext {
                faction: kind.faction(),
                input: ctx.input,
                world: &self.world,
            };
            mounts.update(&body, &mount_ctx, ctx.shots);
        }

        if let (Ok(mut bar), Ok(hull)) = (
            self.world.get::<&mut HealthBar>(entity),
            self.world.get::<&Hull>(entity),
        ) {
            health_bar::refresh(&mut bar, &hull, &body);
        }
    }
}
