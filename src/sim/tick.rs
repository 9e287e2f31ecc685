//! Fixed timestep simulation tick
//!
//! One frame: apply every tank's held controls, advance the update list,
//! then resolve collisions. Deterministic for a given world and inputs.

use glam::Vec2;

use super::actor::{ActorId, ActorKind, Entity};
use super::collision::{CollisionReport, resolve_collisions};
use super::intent::Intent;
use super::tank::Turn;
use super::world::World;

/// Input state for one controlled tank
///
/// Movement flags are held until released; `shoot` and `plant_mine` are
/// triggers the caller resets with [`TickInput::clear_triggers`] after each
/// tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub moving_forward: bool,
    pub moving_backward: bool,
    pub turning_left: bool,
    pub turning_right: bool,
    /// Fire once
    pub shoot: bool,
    /// Plant a mine once
    pub plant_mine: bool,
    /// World point the turret should track
    pub aim_target: Option<Vec2>,
}

impl TickInput {
    /// Fold a decoded control command into the held state
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::MoveForward(on) => self.moving_forward = on,
            Intent::MoveBackward(on) => self.moving_backward = on,
            Intent::TurnLeft(on) => self.turning_left = on,
            Intent::TurnRight(on) => self.turning_right = on,
            Intent::Shoot => self.shoot = true,
            Intent::PlantMine => self.plant_mine = true,
            Intent::Aim(target) => self.aim_target = Some(target),
        }
    }

    /// Decode and apply one control message; bad messages are logged and
    /// skipped. Returns whether the message was applied.
    pub fn apply_message(&mut self, message: &str) -> bool {
        match Intent::parse(message) {
            Ok(intent) => {
                self.apply(intent);
                true
            }
            Err(err) => {
                log::warn!("dropping control message {message:?}: {err}");
                false
            }
        }
    }

    pub fn clear_triggers(&mut self) {
        self.shoot = false;
        self.plant_mine = false;
    }
}

/// Input addressed to one tank
#[derive(Debug, Clone, PartialEq)]
pub struct TankControl {
    pub tank: ActorId,
    pub input: TickInput,
}

impl TankControl {
    pub fn new(tank: ActorId) -> Self {
        Self {
            tank,
            input: TickInput::default(),
        }
    }
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, controls: &[TankControl], dt: f32) -> CollisionReport {
    for control in controls {
        drive_tank(world, control, dt);
    }
    world.update(dt);
    resolve_collisions(world)
}

fn drive_tank(world: &mut World, control: &TankControl, dt: f32) {
    match world.get(control.tank).map(|actor| actor.kind()) {
        Some(ActorKind::Tank) => {}
        Some(kind) => {
            log::warn!("control for {:?} targets a {kind:?}", control.tank);
            return;
        }
        None => {
            log::trace!("control for dead tank {:?} ignored", control.tank);
            return;
        }
    }

    let input = &control.input;
    world.act(control.tank, |actor, fx| {
        let Entity::Tank(tank) = &mut actor.entity else {
            return;
        };
        let bounds = &mut actor.bounds;
        if input.moving_forward {
            tank.drive(bounds, dt, true);
        }
        if input.moving_backward {
            tank.drive(bounds, dt, false);
        }
        if input.turning_left {
            tank.turn(bounds, dt, Turn::Left);
        }
        if input.turning_right {
            tank.turn(bounds, dt, Turn::Right);
        }
        if let Some(target) = input.aim_target {
            tank.aim_at(target);
        }
        if input.shoot {
            tank.shoot(bounds, fx);
        }
        if input.plant_mine {
            tank.plant_mine(bounds, fx);
        }
    });
}
