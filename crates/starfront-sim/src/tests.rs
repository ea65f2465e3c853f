use approx::assert_relative_eq;
use glam::DVec2;
use hecs::Entity;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use starfront_core::components::{Body, Hull};
use starfront_core::config::{ArenaConfig, SimConfig};
use starfront_core::enums::{ArenaOutcome, EntityKind, Faction};
use starfront_core::input::InputState;
use starfront_core::state::ArenaSnapshot;
use starfront_core::types::Aabb;

use crate::assets::{AssetError, BuiltinSprites, SpriteCache, SpriteCatalog};
use crate::collision;
use crate::engine::{EngineError, SimulationEngine};
use crate::hardpoint::{Component, Hardpoint, Hardpoints, Turret};
use crate::kinematics::Kinematics;
use crate::quadtree::Quadtree;
use crate::registry::{Registry, UpdateContext};
use crate::world_setup;

fn config(hostiles: u32) -> SimConfig {
    SimConfig {
        seed: 7,
        arena: ArenaConfig {
            width: 800.0,
            height: 600.0,
        },
        hostile_count: hostiles,
    }
}

fn catalog() -> SpriteCatalog {
    SpriteCatalog::resolve(&mut SpriteCache::new(BuiltinSprites::default())).unwrap()
}

fn count_shots(snapshot: &ArenaSnapshot, faction: Faction) -> usize {
    snapshot
        .entities
        .iter()
        .filter(|e| e.kind == EntityKind::Projectile(faction))
        .count()
}

fn random_box(rng: &mut ChaCha8Rng) -> Aabb {
    random_box_in(rng, Aabb::new(0.0, 0.0, 800.0, 600.0))
}

/// Random box lying inside `region`.
fn random_box_in(rng: &mut ChaCha8Rng, region: Aabb) -> Aabb {
    let w = rng.gen_range(1.0..80.0);
    let h = rng.gen_range(1.0..80.0);
    Aabb::new(
        rng.gen_range(region.x..region.right() - w),
        rng.gen_range(region.y..region.bottom() - h),
        w,
        h,
    )
}

/// Where entities may still be live: one arena extent past the top and
/// left edges, two past the origin on the bottom and right.
fn live_region() -> Aabb {
    Aabb::new(-800.0, -600.0, 2400.0, 1800.0)
}

// --- Quadtree properties ---

fn assert_no_missed_overlaps(rng: &mut ChaCha8Rng, region: Aabb) {
    for _ in 0..20 {
        let boxes: Vec<Aabb> = (0..150).map(|_| random_box_in(rng, region)).collect();
        let mut tree = Quadtree::new(0, Aabb::new(0.0, 0.0, 800.0, 600.0));
        for (id, b) in boxes.iter().enumerate() {
            tree.insert(id, *b);
        }
        assert_eq!(tree.len(), boxes.len());

        for _ in 0..50 {
            let query = random_box_in(rng, region);
            let found = tree.retrieve(&query);
            for (id, b) in boxes.iter().enumerate() {
                if b.intersects(&query) {
                    assert!(found.contains(&id), "box {id} {b:?} missed by {query:?}");
                }
            }
        }
    }
}

#[test]
fn test_quadtree_never_misses_an_overlap() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    assert_no_missed_overlaps(&mut rng, Aabb::new(0.0, 0.0, 800.0, 600.0));
}

#[test]
fn test_quadtree_never_misses_an_overlap_past_the_edges() {
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    assert_no_missed_overlaps(&mut rng, live_region());
}

fn check_placement(node: &Quadtree<usize>) {
    let bounds = node.bounds();
    let vertical_mid = bounds.x + bounds.width / 2.0;
    let horizontal_mid = bounds.y + bounds.height / 2.0;

    for (_, b) in node.objects() {
        if node.level() > 0 {
            assert!(bounds.contains(b), "{b:?} outside {bounds:?}");
        }
        if node.children().is_some() && bounds.contains(b) {
            let fits_column = b.right() < vertical_mid || b.x > vertical_mid;
            let fits_row = b.bottom() < horizontal_mid || b.y > horizontal_mid;
            assert!(!(fits_column && fits_row), "{b:?} fits a child of {bounds:?}");
        }
    }
    if let Some(children) = node.children() {
        for child in children {
            assert_eq!(child.level(), node.level() + 1);
            check_placement(child);
        }
    }
}

#[test]
fn test_quadtree_placement_invariant() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut tree = Quadtree::new(0, Aabb::new(0.0, 0.0, 800.0, 600.0));
    for id in 0..400 {
        tree.insert(id, random_box(&mut rng));
    }
    assert!(tree.children().is_some());
    check_placement(&tree);
}

#[test]
fn test_quadtree_placement_invariant_past_the_edges() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let mut tree = Quadtree::new(0, Aabb::new(0.0, 0.0, 800.0, 600.0));
    for id in 0..400 {
        tree.insert(id, random_box_in(&mut rng, live_region()));
    }
    assert!(tree.children().is_some());
    check_placement(&tree);
}

#[test]
fn test_quadtree_rebuild_is_idempotent() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let boxes: Vec<Aabb> = (0..120).map(|_| random_box(&mut rng)).collect();
    let build = || {
        let mut tree = Quadtree::new(0, Aabb::new(0.0, 0.0, 800.0, 600.0));
        for (id, b) in boxes.iter().enumerate() {
            tree.insert(id, *b);
        }
        tree
    };
    let first = build();
    let mut second = build();

    for b in &boxes {
        assert_eq!(first.retrieve(b), second.retrieve(b));
    }

    // Clearing and refilling the same tree gives the same answers too.
    second.clear();
    for (id, b) in boxes.iter().enumerate() {
        second.insert(id, *b);
    }
    for b in &boxes {
        assert_eq!(first.retrieve(b), second.retrieve(b));
    }
}

// --- Component pipeline ---

#[test]
fn test_turret_fires_once_in_five_ticks_at_target_center() {
    let catalog = catalog();
    let mut registry = Registry::new();
    let target = registry.spawn((
        EntityKind::PlayerShip,
        Body::new(DVec2::new(500.0, 300.0), DVec2::new(60.0, 40.0)),
    ));

    let gunship_body = Body::new(DVec2::new(100.0, 100.0), DVec2::new(48.0, 48.0));
    let mount = Hardpoint::new(&gunship_body, 0.5, 0.5)
        .with_component(Component::Turret(Turret::new(5, 25.0).targeting(target)));
    registry.spawn((EntityKind::HostileShip, gunship_body, Hardpoints::new(vec![mount])));

    let input = InputState::default();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut shots = Vec::new();
    for _ in 0..5 {
        let mut ctx = UpdateContext {
            arena: DVec2::new(800.0, 600.0),
            input: &input,
            rng: &mut rng,
            shots: &mut shots,
        };
        registry.update(&mut ctx);
    }
    assert_eq!(shots.len(), 1);

    let projectile = world_setup::spawn_projectile(&mut registry, &shots[0], &catalog);
    let world = registry.world();
    let kinematics = world.get::<&Kinematics>(projectile).unwrap();
    let origin = DVec2::new(124.0, 124.0);
    let aim = DVec2::new(530.0, 320.0) - origin;
    assert_eq!(world.get::<&Body>(projectile).unwrap().position, origin);
    assert_relative_eq!(kinematics.heading(), aim.y.atan2(aim.x));
    assert_eq!(kinematics.destination(), Some(DVec2::new(530.0, 320.0)));

    let projectiles = registry
        .entities()
        .iter()
        .filter(|&&e| registry.kind(e).is_some_and(EntityKind::is_projectile))
        .count();
    assert_eq!(projectiles, 1);
}

// --- Collision scenarios ---

#[test]
fn test_hull_three_survives_two_hits_and_dies_on_third() {
    let mut registry = Registry::new();
    let mut index: Quadtree<Entity> = Quadtree::new(0, Aabb::new(0.0, 0.0, 800.0, 600.0));
    let ship = registry.spawn((
        EntityKind::HostileShip,
        Body::new(DVec2::new(200.0, 200.0), DVec2::new(48.0, 48.0)),
        Hull {
            integrity: 3,
            max: 3,
        },
    ));

    for hit in 1..=3 {
        let shot = registry.spawn((
            EntityKind::Projectile(Faction::Player),
            Body::new(DVec2::new(220.0, 220.0), DVec2::new(6.0, 6.0)),
        ));
        collision::rebuild_index(&mut index, &registry);
        let stats = collision::resolve(&mut registry, &index);
        registry.compact();

        assert_eq!(stats.hits, 1);
        assert!(!registry.contains(shot));
        if hit < 3 {
            assert!(registry.is_live(ship), "ship died after hit {hit}");
            assert_eq!(registry.world().get::<&Hull>(ship).unwrap().integrity, 3 - hit);
        } else {
            assert!(!registry.contains(ship));
        }
    }
}

#[test]
fn test_hostile_shot_on_hostile_ship_is_harmless() {
    let mut registry = Registry::new();
    let mut index: Quadtree<Entity> = Quadtree::new(0, Aabb::new(0.0, 0.0, 800.0, 600.0));
    let ship = registry.spawn((
        EntityKind::HostileShip,
        Body::new(DVec2::new(200.0, 200.0), DVec2::new(48.0, 48.0)),
        Hull {
            integrity: 30,
            max: 30,
        },
    ));
    let shot = registry.spawn((
        EntityKind::Projectile(Faction::Hostile),
        Body::new(DVec2::new(210.0, 210.0), DVec2::new(6.0, 6.0)),
    ));
    collision::rebuild_index(&mut index, &registry);
    let stats = collision::resolve(&mut registry, &index);

    assert_eq!(stats.hits, 0);
    assert_eq!(stats.checks, 1);
    assert!(registry.is_live(shot));
    assert_eq!(registry.world().get::<&Hull>(ship).unwrap().integrity, 30);
}

// --- Engine ---

#[test]
fn test_engine_spawns_player_and_hostiles() {
    let engine = SimulationEngine::new(&config(7)).unwrap();
    let snapshot = engine.snapshot();

    assert_eq!(snapshot.entity_count(), 8);
    assert_eq!(snapshot.outcome, ArenaOutcome::InProgress);
    assert_eq!((snapshot.arena_width, snapshot.arena_height), (800.0, 600.0));

    let player = snapshot.player().unwrap();
    assert_eq!(player.position, DVec2::new(400.0, 300.0));
    assert_eq!(player.hull, Some(100));
    assert_eq!(player.mounts.len(), 2);
    assert!(player.mounts.iter().all(|m| m.size == DVec2::new(8.0, 8.0)));

    let bar = player.health_bar.unwrap();
    assert_eq!(bar.max_units, 50);
    assert!(!bar.follows_owner);
    assert_relative_eq!(bar.anchor.x, 72.0, epsilon = 1e-9);
    assert_relative_eq!(bar.anchor.y, 570.0, epsilon = 1e-9);
}

#[test]
fn test_engine_same_seed_same_run() {
    let run = || {
        let mut engine = SimulationEngine::new(&config(5)).unwrap();
        let mut input = InputState::default();
        let mut frames = Vec::new();
        for tick in 0..120 {
            input.turn_right = tick % 20 < 10;
            input.thrust_forward = tick < 30;
            input.pointer = DVec2::new(tick as f64 * 5.0, 100.0);
            input.pointer_down = tick % 3 == 0;
            frames.push(serde_json::to_string(&engine.tick(&input)).unwrap());
        }
        frames
    };
    assert_eq!(run(), run());
}

#[test]
fn test_engine_player_fires_only_with_pointer_down() {
    let mut engine = SimulationEngine::new(&config(0)).unwrap();
    let mut input = InputState {
        pointer: DVec2::new(100.0, 100.0),
        ..Default::default()
    };
    for _ in 0..5 {
        engine.tick(&input);
    }
    assert_eq!(count_shots(&engine.snapshot(), Faction::Player), 0);

    input.pointer_down = true;
    for _ in 0..4 {
        assert_eq!(count_shots(&engine.tick(&input), Faction::Player), 0);
    }
    let snapshot = engine.tick(&input);
    assert_eq!(count_shots(&snapshot, Faction::Player), 2);
}

#[test]
fn test_engine_hostiles_open_fire_on_tick_45() {
    let mut engine = SimulationEngine::new(&config(7)).unwrap();
    let input = InputState::default();
    for _ in 0..44 {
        let snapshot = engine.tick(&input);
        assert_eq!(count_shots(&snapshot, Faction::Hostile), 0);
    }

    let snapshot = engine.tick(&input);
    let damage = 100 - snapshot.player().unwrap().hull.unwrap();
    assert_eq!(count_shots(&snapshot, Faction::Hostile) + damage as usize, 7);
}

#[test]
fn test_engine_hostiles_keep_moving() {
    let mut engine = SimulationEngine::new(&config(3)).unwrap();
    let input = InputState::default();
    let before = engine.snapshot();
    let after = engine.tick(&input);

    for (old, new) in before.entities.iter().zip(&after.entities) {
        assert_eq!(old.id, new.id);
        if new.kind == EntityKind::HostileShip {
            assert_eq!(new.last_position, old.position);
            assert_relative_eq!(new.position.distance(old.position), 2.0, epsilon = 1e-9);
            assert_eq!(new.mounts.len(), 1);
        }
    }
}

#[test]
fn test_engine_victory_without_hostiles() {
    let mut engine = SimulationEngine::new(&config(0)).unwrap();
    assert_eq!(engine.outcome(), ArenaOutcome::Victory);

    engine.spawn_hostiles(2);
    let snapshot = engine.tick(&InputState::default());
    assert_eq!(snapshot.outcome, ArenaOutcome::InProgress);
    assert_eq!(snapshot.entity_count(), 3);
}

#[test]
fn test_engine_defeat_when_player_removed() {
    let mut engine = SimulationEngine::new(&config(2)).unwrap();
    let player = engine.player().unwrap();
    engine.registry_mut().disable(player);

    let snapshot = engine.tick(&InputState {
        thrust_forward: true,
        ..Default::default()
    });
    assert_eq!(snapshot.outcome, ArenaOutcome::Defeat);
    assert!(snapshot.player().is_none());
    assert!(engine.player().is_none());

    // Hostile turrets hold fire with no target.
    for _ in 0..60 {
        let snapshot = engine.tick(&InputState::default());
        assert_eq!(count_shots(&snapshot, Faction::Hostile), 0);
    }
}

#[test]
fn test_engine_counts_collision_checks() {
    let mut engine = SimulationEngine::new(&config(7)).unwrap();
    let input = InputState::default();
    let mut total = 0;
    for _ in 0..30 {
        engine.tick(&input);
        total += engine.last_collisions().checks;
    }
    assert_eq!(engine.collisions_checked(), total);
    assert_eq!(engine.snapshot().collisions_checked, total);
    assert_eq!(engine.time().tick, 30);
}

#[test]
fn test_engine_missing_sprite_is_an_error() {
    let sprites = BuiltinSprites::empty()
        .with_sprite("playerCruiser", 60.0, 40.0)
        .with_sprite("Green_Ship_Small", 48.0, 48.0);
    let result = SimulationEngine::with_sprites(&config(1), &mut SpriteCache::new(sprites));
    match result {
        Err(EngineError::Asset(AssetError::NotFound(name))) => assert_eq!(name, "red_shot"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("engine built without a projectile sprite"),
    }
}

#[test]
fn test_engine_rejects_bad_arena() {
    let mut bad = config(1);
    bad.arena.width = 0.0;
    assert!(matches!(
        SimulationEngine::new(&bad),
        Err(EngineError::Config(_))
    ));
}
