//! Raw input state supplied by the windowing collaborator.
//!
//! The input context writes this record whenever devices change; the
//! simulation samples a copy once per update tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Held keys and pointer state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    /// Forward thrust (W).
    pub thrust_forward: bool,
    /// Reverse thrust (S).
    pub thrust_reverse: bool,
    /// Turn counter-clockwise (A).
    pub turn_left: bool,
    /// Turn clockwise (D).
    pub turn_right: bool,
    /// Fire key (space). Carried for the input context; nothing reads it,
    /// player turrets fire on `pointer_down`.
    pub fire: bool,
    /// Pause key (P). The loop stays paused while this is held.
    pub pause: bool,
    /// Last pointer position in arena pixels.
    pub pointer: DVec2,
    pub pointer_down: bool,
}
