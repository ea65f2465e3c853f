//! Simulation engine: the explicit context every system runs against.
//!
//! `SimulationEngine` owns the entity registry, the quadtree, the RNG and
//! the resolved sprite sizes. Each `tick` runs one fixed update and returns
//! the resulting `ArenaSnapshot`. Completely headless.

use glam::DVec2;
use hecs::Entity;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use starfront_core::config::{ConfigError, SimConfig};
use starfront_core::enums::ArenaOutcome;
use starfront_core::input::InputState;
use starfront_core::state::ArenaSnapshot;
use starfront_core::types::{Aabb, SimTime};

use crate::assets::{AssetError, BuiltinSprites, SpriteCache, SpriteCatalog, SpriteSource};
use crate::collision::{self, CollisionStats};
use crate::hardpoint::ShotRequest;
use crate::quadtree::Quadtree;
use crate::registry::{Registry, UpdateContext};
use crate::systems;
use crate::systems::snapshot::SnapshotHeader;
use crate::world_setup;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Asset(#[from] AssetError),
}

pub struct SimulationEngine {
    registry: Registry,
    index: Quadtree<Entity>,
    arena: DVec2,
    time: SimTime,
    rng: ChaCha8Rng,
    catalog: SpriteCatalog,
    player: Option<Entity>,
    shot_buffer: Vec<ShotRequest>,
    last_collisions: CollisionStats,
    collisions_checked: u64,
    outcome: ArenaOutcome,
}

impl SimulationEngine {
    /// Create an engine using the built-in sprite table.
    pub fn new(config: &SimConfig) -> Result<Self, EngineError> {
        let mut sprites = SpriteCache::new(BuiltinSprites::default());
        Self::with_sprites(config, &mut sprites)
    }

    /// Create an engine, resolving every sprite it spawns through `sprites`.
    /// The player ship and `config.hostile_count` hostiles are spawned.
    pub fn with_sprites<S: SpriteSource>(
        config: &SimConfig,
        sprites: &mut SpriteCache<S>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let catalog = SpriteCatalog::resolve(sprites)?;
        let arena = DVec2::new(config.arena.width, config.arena.height);

        let mut engine = Self {
            registry: Registry::new(),
            index: Quadtree::new(0, Aabb::new(0.0, 0.0, arena.x, arena.y)),
            arena,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            catalog,
            player: None,
            shot_buffer: Vec::new(),
            last_collisions: CollisionStats::default(),
            collisions_checked: 0,
            outcome: ArenaOutcome::default(),
        };

        engine.player = Some(world_setup::spawn_player(
            &mut engine.registry,
            arena,
            &engine.catalog,
        ));
        engine.spawn_hostiles(config.hostile_count as usize);
        engine.outcome = systems::outcome::evaluate(&engine.registry, engine.player);

        log::info!(
            "Simulation ready: {}x{} arena, seed {}, {} entities",
            arena.x,
            arena.y,
            config.seed,
            engine.registry.len()
        );
        Ok(engine)
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self, input: &InputState) -> ArenaSnapshot {
        systems::pilot::run(self.registry.world_mut(), self.player, input);

        let mut ctx = UpdateContext {
            arena: self.arena,
            input,
            rng: &mut self.rng,
            shots: &mut self.shot_buffer,
        };
        self.registry.update(&mut ctx);

        for shot in self.shot_buffer.drain(..) {
            world_setup::spawn_projectile(&mut self.registry, &shot, &self.catalog);
        }

        collision::rebuild_index(&mut self.index, &self.registry);
        self.last_collisions = collision::resolve(&mut self.registry, &self.index);
        self.collisions_checked += self.last_collisions.checks;
        self.registry.compact();

        self.time.advance();
        self.outcome = systems::outcome::evaluate(&self.registry, self.player);
        self.snapshot()
    }

    /// Snapshot of the current state without advancing.
    pub fn snapshot(&self) -> ArenaSnapshot {
        systems::snapshot::build_snapshot(
            &self.registry,
            SnapshotHeader {
                time: self.time,
                arena_width: self.arena.x,
                arena_height: self.arena.y,
                outcome: self.outcome,
                collisions_checked: self.collisions_checked,
            },
            &self.catalog,
        )
    }

    /// Spawn more hostiles mid-match, targeting the player if it is still alive.
    pub fn spawn_hostiles(&mut self, count: usize) -> Vec<Entity> {
        let target = self.player.filter(|&p| self.registry.is_live(p));
        world_setup::spawn_hostiles(
            &mut self.registry,
            &mut self.rng,
            self.arena,
            &self.catalog,
            target,
            count,
        )
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn outcome(&self) -> ArenaOutcome {
        self.outcome
    }

    /// Arena width and height in pixels.
    pub fn arena(&self) -> DVec2 {
        self.arena
    }

    /// The player ship, if it has not been removed.
    pub fn player(&self) -> Option<Entity> {
        self.player.filter(|&p| self.registry.contains(p))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The broad-phase index as rebuilt during the last tick.
    pub fn index(&self) -> &Quadtree<Entity> {
        &self.index
    }

    pub fn catalog(&self) -> &SpriteCatalog {
        &self.catalog
    }

    pub fn last_collisions(&self) -> CollisionStats {
        self.last_collisions
    }

    /// Narrow-phase tests performed since the engine started.
    pub fn collisions_checked(&self) -> u64 {
        self.collisions_checked
    }

    #[cfg(test)]
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }
}
