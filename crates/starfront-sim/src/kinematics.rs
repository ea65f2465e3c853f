//! Heading/speed motion model.
//!
//! `Kinematics` is a component living on the entity it moves. Velocity is
//! derived from heading and speed and is recomputed by every setter, so it
//! can never be observed out of date.

use glam::DVec2;

use starfront_core::components::Body;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    heading: f64,
    speed: f64,
    velocity: DVec2,
    destination: Option<DVec2>,
}

impl Kinematics {
    /// Motion with a known heading and no destination (piloted craft).
    pub fn with_heading(heading: f64, speed: f64) -> Self {
        Self {
            heading,
            speed,
            velocity: velocity_of(heading, speed),
            destination: None,
        }
    }

    /// Motion from `source` straight toward `destination` (autonomous and
    /// ballistic craft).
    pub fn toward(source: DVec2, destination: DVec2, speed: f64) -> Self {
        let heading = heading_between(source, destination);
        Self {
            heading,
            speed,
            velocity: velocity_of(heading, speed),
            destination: Some(destination),
        }
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn destination(&self) -> Option<DVec2> {
        self.destination
    }

    pub fn set_heading(&mut self, heading: f64) {
        self.steer(heading, self.speed);
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.steer(self.heading, speed);
    }

    /// Change heading and speed together.
    pub fn steer(&mut self, heading: f64, speed: f64) {
        self.heading = heading;
        self.speed = speed;
        self.velocity = velocity_of(heading, speed);
    }

    /// Aim from `from` at a new destination, keeping the current speed.
    pub fn retarget(&mut self, from: DVec2, destination: DVec2) {
        self.destination = Some(destination);
        self.set_heading(heading_between(from, destination));
    }

    /// Integrate one tick of motion into the owning entity's body.
    pub fn step(&self, body: &mut Body) {
        body.position += self.velocity;
        body.heading = self.heading;
    }
}

fn velocity_of(heading: f64, speed: f64) -> DVec2 {
    DVec2::new(speed * heading.cos(), speed * heading.sin())
}

fn heading_between(from: DVec2, to: DVec2) -> f64 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}
