//! Simulation engine for STARFRONT.
//!
//! Owns the entity registry (a hecs world plus a stable update order),
//! rebuilds the quadtree broad phase every tick, resolves collisions and
//! produces `ArenaSnapshot`s for the renderer.

pub mod assets;
pub mod collision;
pub mod engine;
pub mod hardpoint;
pub mod kinematics;
pub mod quadtree;
pub mod registry;
pub mod systems;
pub mod world_setup;

pub use starfront_core as core;
pub use engine::{EngineError, SimulationEngine};

#[cfg(test)]
mod tests;
