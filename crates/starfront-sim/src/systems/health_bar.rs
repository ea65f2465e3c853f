//! Segmented health bars for ships.

use glam::DVec2;

use starfront_core::components::{Body, HealthBar, Hull};
use starfront_core::constants::{HEALTH_BAR_GAP, HULL_PER_BAR_UNIT};
use starfront_core::enums::BarTint;

/// A full green bar for a ship with `max_hull` integrity.
pub fn full(max_hull: i32, anchor: DVec2, follows_owner: bool) -> HealthBar {
    let units = max_hull / HULL_PER_BAR_UNIT;
    HealthBar {
        max_units: units,
        units,
        tint: BarTint::Green,
        anchor,
        follows_owner,
    }
}

/// Sync the bar with its ship's hull and position.
pub fn refresh(bar: &mut HealthBar, hull: &Hull, body: &Body) {
    bar.units = hull.integrity.max(0) / HULL_PER_BAR_UNIT;
    bar.tint = degrade(bar.tint, tint_for(bar.units, bar.max_units));
    if bar.follows_owner {
        bar.anchor = DVec2::new(
            body.position.x,
            body.position.y + body.size.y + HEALTH_BAR_GAP,
        );
    }
}

fn tint_for(units: i32, max_units: i32) -> BarTint {
    if units <= max_units / 4 {
        BarTint::Red
    } else if units <= max_units / 2 {
        BarTint::Yellow
    } else {
        BarTint::Green
    }
}

// Tints only ever get worse.
fn degrade(current: BarTint, next: BarTint) -> BarTint {
    match (current, next) {
        (BarTint::Red, _) | (_, BarTint::Red) => BarTint::Red,
        (BarTint::Yellow, _) | (_, BarTint::Yellow) => BarTint::Yellow,
        _ => BarTint::Green,
    }
}
