//! Player/remote tank
//!
//! Tanks have no discrete states. Movement and turning act on the hull's
//! bounds directly; the turret follows an aim point. Tanks are not on the
//! update list: their controller drives them through [`super::tick`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Behavior, Effects, Spawn};
use super::collision::{Contact, collision_direction, push_out};
use super::obb::Obb;
use super::registry::Category;
use crate::normalize_angle;
use crate::settings::Tuning;

/// Turn direction as seen from above, in world orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    /// Counter-clockwise (angle increases)
    Left,
    /// Clockwise (angle decreases)
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tank {
    /// Units per second
    pub speed: f32,
    /// Radians per second
    pub rotation_speed: f32,
    /// World point the turret tracks
    pub aim_target: Vec2,
    muzzle_offset: f32,
}

impl Tank {
    pub fn new(tuning: &Tuning, aim_target: Vec2) -> Self {
        Self {
            speed: tuning.tank_speed,
            rotation_speed: tuning.tank_turn_speed,
            aim_target,
            muzzle_offset: tuning.muzzle_offset,
        }
    }

    /// World angle from the hull center to the aim target
    pub fn aim_angle(&self, bounds: &Obb) -> f32 {
        let to_target = self.aim_target - bounds.center;
        to_target.y.atan2(to_target.x)
    }

    /// Turret angle relative to the hull, in [-π, π)
    pub fn turret_rotation(&self, bounds: &Obb) -> f32 {
        normalize_angle(self.aim_angle(bounds) - bounds.angle)
    }

    /// Where bullets leave the barrel
    pub fn muzzle(&self, bounds: &Obb) -> Vec2 {
        bounds.center + crate::heading(self.aim_angle(bounds)) * self.muzzle_offset
    }

    /// Drive along the hull heading
    pub fn drive(&self, bounds: &mut Obb, dt: f32, forward: bool) {
        let distance = self.speed * dt * if forward { 1.0 } else { -1.0 };
        bounds.translate(Vec2::new(distance, 0.0));
    }

    /// Rotate the hull; the angle stays within [-π, π)
    pub fn turn(&self, bounds: &mut Obb, dt: f32, direction: Turn) {
        let amount = self.rotation_speed * dt;
        bounds.rotate_by(match direction {
            Turn::Left => amount,
            Turn::Right => -amount,
        });
        bounds.angle = normalize_angle(bounds.angle);
    }

    pub fn aim_at(&mut self, target: Vec2) {
        self.aim_target = target;
    }

    /// Fire a bullet from the muzzle along the aim direction
    pub fn shoot(&self, bounds: &Obb, fx: &mut Effects) {
        fx.spawn(Spawn::Bullet {
            position: self.muzzle(bounds),
            heading: self.aim_angle(bounds),
        });
    }

    /// Drop a mine under the hull
    pub fn plant_mine(&self, bounds: &Obb, fx: &mut Effects) {
        fx.spawn(Spawn::Mine {
            position: bounds.center,
        });
    }
}

impl Behavior for Tank {
    /// Walls stop the hull flush against their face
    fn on_collide(&mut self, bounds: &mut Obb, other: &Contact, _fx: &mut Effects) {
        if other.category != Category::Wall {
            return;
        }
        let direction = collision_direction(&other.bounds, bounds);
        push_out(bounds, &other.bounds, direction);
    }
}
