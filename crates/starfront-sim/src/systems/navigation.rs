//! Destination seeking for autonomous ships.

use glam::DVec2;
use rand::Rng;

use starfront_core::components::{Body, Seeker};

use crate::kinematics::Kinematics;

/// Check arrival and, once arrived, pick a fresh destination anywhere in the
/// arena and turn toward it. Returns true when a new destination was chosen.
///
/// Arrival needs both axes within `tolerance` of the destination. The
/// tolerance is the ship's top speed, so it cannot overshoot and circle.
pub fn seek<R: Rng>(
    body: &Body,
    kinematics: &mut Kinematics,
    seeker: &mut Seeker,
    arena: DVec2,
    rng: &mut R,
) -> bool {
    if has_arrived(body.position, seeker) {
        seeker.arrived = true;
    }
    if !seeker.arrived {
        return false;
    }

    let destination = DVec2::new(rng.gen_range(0.0..arena.x), rng.gen_range(0.0..arena.y));
    seeker.destination = destination;
    seeker.arrived = false;
    kinematics.retarget(body.position, destination);
    true
}

fn has_arrived(position: DVec2, seeker: &Seeker) -> bool {
    let gap = (position - seeker.destination).abs();
    gap.x <= seeker.tolerance && gap.y <= seeker.tolerance
}
