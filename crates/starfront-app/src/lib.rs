//! STARFRONT application layer.
//!
//! Runs the simulation engine on a dedicated logic thread at a fixed update
//! rate and publishes snapshots plus the render interpolation fraction for
//! whatever renders them.

pub mod game_loop;
pub mod state;

pub use starfront_core as core;
