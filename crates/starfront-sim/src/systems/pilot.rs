//! Applies sampled input to the player ship.

use hecs::{Entity, World};

use starfront_core::components::Pilot;
use starfront_core::input::InputState;

use crate::kinematics::Kinematics;

/// Thrust and turn the player ship. A missing player is skipped for the tick.
pub fn run(world: &mut World, player: Option<Entity>, input: &InputState) {
    let Some(player) = player else {
        log::trace!("No player ship; input ignored");
        return;
    };
    let (Ok(pilot), Ok(mut kinematics)) = (
        world.get::<&Pilot>(player),
        world.get::<&mut Kinematics>(player),
    ) else {
        log::trace!("Player ship {player:?} is gone; input ignored");
        return;
    };

    let mut speed = kinematics.speed();
    let mut heading = kinematics.heading();

    if input.thrust_forward && speed <= pilot.max_speed {
        speed += pilot.thrust;
    }
    if input.thrust_reverse && speed >= 0.0 {
        speed -= pilot.thrust * 0.5;
    }
    if input.turn_left {
        heading -= pilot.turning_rate;
    }
    if input.turn_right {
        heading += pilot.turning_rate;
    }

    kinematics.steer(heading, speed);
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn pilot() -> Pilot {
        Pilot {
            thrust: 0.5,
            max_speed: 8.0,
            turning_rate: 0.02,
        }
    }

    fn speed_and_heading(world: &World, entity: Entity) -> (f64, f64) {
        let kinematics = world.get::<&Kinematics>(entity).unwrap();
        (kinematics.speed(), kinematics.heading())
    }

    #[test]
    fn test_forward_thrust_stops_past_max_speed() {
        let mut world = World::new();
        let ship = world.spawn((pilot(), Kinematics::with_heading(0.0, 1.0)));
        let input = InputState {
            thrust_forward: true,
            ..Default::default()
        };
        for _ in 0..40 {
            run(&mut world, Some(ship), &input);
        }
        // Thrust is added while speed <= max, so the last step overshoots by one increment.
        assert_relative_eq!(speed_and_heading(&world, ship).0, 8.5);
    }

    #[test]
    fn test_reverse_thrust_bottoms_out_just_below_zero() {
        let mut world = World::new();
        let ship = world.spawn((pilot(), Kinematics::with_heading(0.0, 1.0)));
        let input = InputState {
            thrust_reverse: true,
            ..Default::default()
        };
        for _ in 0..10 {
            run(&mut world, Some(ship), &input);
        }
        assert_relative_eq!(speed_and_heading(&world, ship).0, -0.25);
    }

    #[test]
    fn test_turning_updates_heading_and_velocity() {
        let mut world = World::new();
        let ship = world.spawn((pilot(), Kinematics::with_heading(0.0, 2.0)));
        let right = InputState {
            turn_right: true,
            ..Default::default()
        };
        for _ in 0..5 {
            run(&mut world, Some(ship), &right);
        }
        let kinematics = *world.get::<&Kinematics>(ship).unwrap();
        assert_relative_eq!(kinematics.heading(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(kinematics.velocity().x, 2.0 * 0.1f64.cos(), epsilon = 1e-12);
        assert_relative_eq!(kinematics.velocity().y, 2.0 * 0.1f64.sin(), epsilon = 1e-12);

        let both = InputState {
            turn_left: true,
            turn_right: true,
            ..Default::default()
        };
        run(&mut world, Some(ship), &both);
        assert_relative_eq!(speed_and_heading(&world, ship).1, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_player_is_ignored() {
        let mut world = World::new();
        let ship = world.spawn((pilot(), Kinematics::with_heading(0.0, 1.0)));
        world.despawn(ship).unwrap();
        let input = InputState {
            thrust_forward: true,
            ..Default::default()
        };
        run(&mut world, Some(ship), &input);
        run(&mut world, None, &input);
        assert_eq!(world.len(), 0);
    }
}
