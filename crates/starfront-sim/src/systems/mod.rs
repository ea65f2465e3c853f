//! Per-entity systems run by the registry and the engine each tick.
//!
//! Systems are plain functions over components. They hold no state of
//! their own.

pub mod health_bar;
pub mod movement;
pub mod navigation;
pub mod outcome;
pub mod pilot;
pub mod snapshot;
