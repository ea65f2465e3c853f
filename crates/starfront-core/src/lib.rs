//! Core types and definitions for the STARFRONT arena simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, input state, render snapshots, configuration and constants.
//! It has no dependency on any windowing or rendering framework.

pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod input;
pub mod state;
pub mod types;
pub mod vector_math;
