//! Kinematic integration and arena bounds.

use glam::DVec2;

use starfront_core::components::Body;

use crate::kinematics::Kinematics;

/// Record the pre-tick position, then step the body along its kinematics.
pub fn advance(body: &mut Body, kinematics: &Kinematics) {
    body.last_position = body.position;
    kinematics.step(body);
}

/// True once the body's corner is more than one arena extent past any edge.
pub fn out_of_bounds(body: &Body, arena: DVec2) -> bool {
    let p = body.position;
    p.x > arena.x * 2.0 || p.y > arena.y * 2.0 || p.x < -arena.x || p.y < -arena.y
}
