//! Simulation constants and tuning parameters.
//!
//! Distances are in arena pixels, speeds in pixels per tick and angles in
//! radians per tick. The simulation is tick-based, not time-based.

/// Simulation update rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Target render rate (Hz) the loop idles toward between updates.
pub const RENDER_RATE: u32 = 60;

/// Maximum catch-up updates run before the interpolation fraction is published.
pub const MAX_UPDATES_BEFORE_RENDER: u32 = 3;

// --- Arena ---

/// Default arena width in pixels.
pub const DEFAULT_ARENA_WIDTH: f64 = 1600.0;

/// Default arena height in pixels.
pub const DEFAULT_ARENA_HEIGHT: f64 = 1024.0;

/// Default number of hostile ships spawned at startup.
pub const DEFAULT_HOSTILE_COUNT: u32 = 7;

// --- Spatial index ---

/// Objects a quadtree node holds before it splits.
pub const QUADTREE_MAX_OBJECTS: usize = 10;

/// Deepest level a quadtree node may split to (root is level 0).
pub const QUADTREE_MAX_LEVELS: u32 = 5;

// --- Sprites ---

pub const SPRITE_PLAYER: &str = "playerCruiser";
pub const SPRITE_HOSTILE: &str = "Green_Ship_Small";
pub const SPRITE_PROJECTILE: &str = "red_shot";
pub const SPRITE_TURRET: &str = "turretPlaceholder";

// --- Player ship ---

pub const PLAYER_HULL: i32 = 100;
pub const PLAYER_THRUST: f64 = 0.5;
pub const PLAYER_INITIAL_SPEED: f64 = 1.0;
pub const PLAYER_MAX_SPEED: f64 = 8.0;
pub const PLAYER_TURNING_RATE: f64 = 0.02;
pub const PLAYER_FIRE_RATE: u32 = 5;

/// Hardpoint offsets (percent across, percent up) of the player's turrets.
pub const PLAYER_HARDPOINTS: [(f64, f64); 2] = [(0.75, 0.5), (0.5, 0.5)];

// --- Hostile ships ---

pub const HOSTILE_HULL: i32 = 30;
pub const HOSTILE_SPEED: f64 = 2.0;

/// Arrival tolerance for destination seeking; equals the hostile's top speed.
pub const HOSTILE_MAX_SPEED: f64 = 2.0;
pub const HOSTILE_FIRE_RATE: u32 = 45;
pub const HOSTILE_HARDPOINT: (f64, f64) = (0.5, 0.5);

// --- Weapons ---

/// Default projectile speed for all turrets.
pub const PROJECTILE_SPEED: f64 = 25.0;

// --- Health bar ---

/// Hull points represented by one health bar unit.
pub const HULL_PER_BAR_UNIT: i32 = 2;

/// Vertical gap between a hostile ship and its health bar.
pub const HEALTH_BAR_GAP: f64 = 2.0;

/// Player health bar anchor as a fraction of the arena size.
pub const PLAYER_BAR_ANCHOR: (f64, f64) = (0.09, 0.95);
