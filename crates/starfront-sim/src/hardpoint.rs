//! Hardpoints and the components mounted on them.
//!
//! A hardpoint is a fixed anchor on a ship. Once per tick it recomputes its
//! world position from the owner's body and then drives whatever component
//! is installed there. Components never move themselves.

use glam::DVec2;
use hecs::{Entity, World};

use starfront_core::components::Body;
use starfront_core::enums::Faction;
use starfront_core::input::InputState;

/// A projectile the pipeline wants spawned. Collected during the registry
/// pass and turned into entities once the pass is over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRequest {
    pub origin: DVec2,
    pub destination: DVec2,
    pub speed: f64,
    pub faction: Faction,
}

/// What a mounted component can see while it updates.
pub struct MountContext<'a> {
    /// Faction of the ship carrying the mount.
    pub faction: Faction,
    pub input: &'a InputState,
    pub world: &'a World,
}

impl MountContext<'_> {
    /// Center of a live target, or `None` if it is gone or disabled.
    pub fn target_center(&self, target: Entity) -> Option<DVec2> {
        self.world
            .get::<&Body>(target)
            .ok()
            .filter(|body| body.enabled)
            .map(|body| body.center())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hardpoint {
    percent_across: f64,
    percent_up: f64,
    /// Offset from the owner's center at creation, before any rotation.
    offset: DVec2,
    position: DVec2,
    last_position: DVec2,
    component: Option<Component>,
}

impl Hardpoint {
    /// An empty hardpoint at a fraction of the owner's sprite extent.
    pub fn new(owner: &Body, percent_across: f64, percent_up: f64) -> Self {
        let position = owner.position + owner.size * DVec2::new(percent_across, percent_up);
        Self {
            percent_across,
            percent_up,
            offset: position - owner.center(),
            position,
            last_position: position,
            component: None,
        }
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.install(component);
        self
    }

    /// Mount `component` here, returning whatever was installed before.
    pub fn install(&mut self, mut component: Component) -> Option<Component> {
        component.mount_at(self.position, self.last_position);
        self.component.replace(component)
    }

    pub fn component(&self) -> Option<&Component> {
        self.component.as_ref()
    }

    pub fn percent_across(&self) -> f64 {
        self.percent_across
    }

    pub fn percent_up(&self) -> f64 {
        self.percent_up
    }

    pub fn offset(&self) -> DVec2 {
        self.offset
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn last_position(&self) -> DVec2 {
        self.last_position
    }

    /// Reposition against the owner's current body, then run the component.
    ///
    /// Each axis of the offset is scaled by cos/sin of the heading on its
    /// own. This is not a rigid rotation; mounts wobble as the ship turns.
    pub fn update(&mut self, owner: &Body, ctx: &MountContext) -> Option<ShotRequest> {
        let theta = owner.heading;
        self.last_position = self.position;
        self.position = owner.center()
            + DVec2::new(self.offset.x * theta.cos(), self.offset.y * theta.sin());

        let component = self.component.as_mut()?;
        component.mount_at(self.position, self.last_position);
        component.update(ctx)
    }
}

/// Ship sub-systems that can be installed on a hardpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Turret(Turret),
}

impl Component {
    pub fn position(&self) -> DVec2 {
        match self {
            Component::Turret(turret) => turret.position,
        }
    }

    pub fn last_position(&self) -> DVec2 {
        match self {
            Component::Turret(turret) => turret.last_position,
        }
    }

    fn mount_at(&mut self, position: DVec2, last_position: DVec2) {
        match self {
            Component::Turret(turret) => {
                turret.position = position;
                turret.last_position = last_position;
            }
        }
    }

    fn update(&mut self, ctx: &MountContext) -> Option<ShotRequest> {
        match self {
            Component::Turret(turret) => turret.update(ctx),
        }
    }
}

/// Fires a projectile every `fire_rate` ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Turret {
    fire_rate: u32,
    counter: u32,
    projectile_speed: f64,
    /// Fixed target; shots go at its center.
    target: Option<Entity>,
    /// Untargeted turrets with this set aim at the pointer while it is held.
    player_aim: bool,
    position: DVec2,
    last_position: DVec2,
}

impl Turret {
    pub fn new(fire_rate: u32, projectile_speed: f64) -> Self {
        Self {
            fire_rate,
            counter: 0,
            projectile_speed,
            target: None,
            player_aim: false,
            position: DVec2::ZERO,
            last_position: DVec2::ZERO,
        }
    }

    pub fn targeting(mut self, target: Entity) -> Self {
        self.target = Some(target);
        self
    }

    pub fn player_aimed(mut self) -> Self {
        self.player_aim = true;
        self
    }

    pub fn fire_rate(&self) -> u32 {
        self.fire_rate
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn projectile_speed(&self) -> f64 {
        self.projectile_speed
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    fn update(&mut self, ctx: &MountContext) -> Option<ShotRequest> {
        let target_center = match self.target {
            Some(target) => match ctx.target_center(target) {
                Some(center) => Some(center),
                None => {
                    log::trace!("Turret target {target:?} is gone; holding fire");
                    return None;
                }
            },
            None => None,
        };

        self.counter += 1;
        if self.counter < self.fire_rate {
            return None;
        }
        self.counter = 0;

        let destination = match target_center {
            Some(center) => center,
            None if self.player_aim && ctx.input.pointer_down => ctx.input.pointer,
            None => return None,
        };

        Some(ShotRequest {
            origin: self.position,
            destination,
            speed: self.projectile_speed,
            faction: ctx.faction,
        })
    }
}

/// Every hardpoint carried by one ship, in mount order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hardpoints {
    pub points: Vec<Hardpoint>,
}

impl Hardpoints {
    pub fn new(points: Vec<Hardpoint>) -> Self {
        Self { points }
    }

    /// Step every hardpoint, pushing any shots fired into `shots`.
    pub fn update(&mut self, owner: &Body, ctx: &MountContext, shots: &mut Vec<ShotRequest>) {
        for point in &mut self.points {
            if let Some(shot) = point.update(owner, ctx) {
                shots.push(shot);
            }
        }
    }
}
