//! Sprite metadata service.
//!
//! The simulation only needs each sprite's intrinsic size, which fixes the
//! bounding box of every entity drawn with it. Sources are injected behind
//! `SpriteSource`; `SpriteCache` resolves each distinct name once.

use std::collections::HashMap;

use glam::DVec2;
use thiserror::Error;

use starfront_core::constants::{SPRITE_HOSTILE, SPRITE_PLAYER, SPRITE_PROJECTILE, SPRITE_TURRET};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("can't find sprite: {0}")]
    NotFound(String),
}

/// Intrinsic pixel size of a named image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteInfo {
    pub width: f64,
    pub height: f64,
}

impl SpriteInfo {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

/// Anything that can look up sprite metadata by name.
pub trait SpriteSource {
    fn resolve(&self, name: &str) -> Result<SpriteInfo, AssetError>;
}

/// Fixed table of the sprites shipped with the game.
#[derive(Debug, Clone)]
pub struct BuiltinSprites {
    table: HashMap<String, SpriteInfo>,
}

impl BuiltinSprites {
    /// A table with no sprites at all.
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    pub fn with_sprite(mut self, name: &str, width: f64, height: f64) -> Self {
        self.table
            .insert(name.to_string(), SpriteInfo::new(width, height));
        self
    }
}

impl Default for BuiltinSprites {
    fn default() -> Self {
        Self::empty()
            .with_sprite(SPRITE_PLAYER, 60.0, 40.0)
            .with_sprite(SPRITE_HOSTILE, 48.0, 48.0)
            .with_sprite(SPRITE_PROJECTILE, 6.0, 6.0)
            .with_sprite(SPRITE_TURRET, 8.0, 8.0)
    }
}

impl SpriteSource for BuiltinSprites {
    fn resolve(&self, name: &str) -> Result<SpriteInfo, AssetError> {
        self.table
            .get(name)
            .copied()
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }
}

/// Caches resolved sprites by name.
pub struct SpriteCache<S> {
    source: S,
    sprites: HashMap<String, SpriteInfo>,
}

impl<S: SpriteSource> SpriteCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            sprites: HashMap::new(),
        }
    }

    /// Look up a sprite, hitting the source only on the first request for a name.
    pub fn get(&mut self, name: &str) -> Result<SpriteInfo, AssetError> {
        if let Some(info) = self.sprites.get(name) {
            return Ok(*info);
        }
        let info = self.source.resolve(name)?;
        log::info!("Sprite {name} loaded ({}x{})", info.width, info.height);
        self.sprites.insert(name.to_string(), info);
        Ok(info)
    }

    /// Number of distinct sprites resolved so far.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

/// Sizes of every sprite the simulation spawns, resolved up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteCatalog {
    pub player: SpriteInfo,
    pub hostile: SpriteInfo,
    pub projectile: SpriteInfo,
    pub turret: SpriteInfo,
}

impl SpriteCatalog {
    pub fn resolve<S: SpriteSource>(cache: &mut SpriteCache<S>) -> Result<Self, AssetError> {
        Ok(Self {
            player: cache.get(SPRITE_PLAYER)?,
            hostile: cache.get(SPRITE_HOSTILE)?,
            projectile: cache.get(SPRITE_PROJECTILE)?,
            turret: cache.get(SPRITE_TURRET)?,
        })
    }
}
