//! Mine explosion
//!
//! Short-lived area effect. Its radius grows linearly over the lifetime and
//! every tank or bullet reaching into the current disc is destroyed.

use serde::{Deserialize, Serialize};

use super::actor::{Behavior, Effects};
use super::obb::Obb;
use super::registry::Category;
use crate::settings::Tuning;

/// Categories the blast destroys
pub const BLAST_TARGETS: [Category; 2] = [Category::Tank, Category::Bullet];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    lifetime: f32,
    remaining: f32,
    max_radius: f32,
}

impl Explosion {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            lifetime: tuning.explosion_lifetime,
            remaining: tuning.explosion_lifetime,
            max_radius: tuning.explosion_radius,
        }
    }

    /// Seconds left before the explosion disappears
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Current blast radius
    pub fn radius(&self) -> f32 {
        if self.lifetime <= 0.0 {
            return self.max_radius;
        }
        let progress = ((self.lifetime - self.remaining) / self.lifetime).clamp(0.0, 1.0);
        self.max_radius * progress
    }
}

impl Behavior for Explosion {
    fn wants_update(&self) -> bool {
        true
    }

    fn update(&mut self, bounds: &mut Obb, dt: f32, fx: &mut Effects) {
        self.remaining -= dt;
        fx.destroy_within(bounds.center, self.radius(), &BLAST_TARGETS);
        if self.remaining <= 0.0 {
            fx.destroy_self();
        }
    }
}
