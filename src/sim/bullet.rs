//! Bouncing bullet
//!
//! Flies at constant speed along its bounds' heading. A wall hit mirrors the
//! heading across the classified axis while bounces remain; the hit after
//! that destroys it. Two bullets that meet destroy each other.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Behavior, Effects};
use super::collision::{Contact, collision_direction, push_out};
use super::obb::Obb;
use super::registry::Category;
use super::world::GameEvent;
use crate::settings::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    /// Units per second
    pub speed: f32,
    pub bounces_remaining: u32,
}

impl Bullet {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            speed: tuning.bullet_speed,
            bounces_remaining: tuning.bullet_bounces,
        }
    }

    fn bounce(&mut self, bounds: &mut Obb, wall: &Obb, fx: &mut Effects) {
        if self.bounces_remaining == 0 {
            fx.destroy_self();
            return;
        }
        let direction = collision_direction(wall, bounds);
        bounds.angle = if direction.is_vertical() {
            // Horizontal face: mirror the lateral component
            -bounds.angle
        } else {
            // Vertical face: mirror the longitudinal component
            PI - bounds.angle
        };
        push_out(bounds, wall, direction);
        self.bounces_remaining -= 1;

        log::debug!(
            "bullet {:?} bounced off {direction:?} face, {} left",
            fx.this(),
            self.bounces_remaining
        );
        fx.emit(GameEvent::BulletBounced {
            id: fx.this(),
            position: bounds.center,
        });
    }
}

impl Behavior for Bullet {
    fn wants_update(&self) -> bool {
        true
    }

    fn update(&mut self, bounds: &mut Obb, dt: f32, _fx: &mut Effects) {
        bounds.translate(Vec2::new(self.speed * dt, 0.0));
    }

    fn on_collide(&mut self, bounds: &mut Obb, other: &Contact, fx: &mut Effects) {
        match other.category {
            Category::Bullet => {
                fx.destroy(other.id);
                fx.destroy_self();
            }
            Category::Wall => self.bounce(bounds, &other.bounds, fx),
            Category::Tank | Category::Mine => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::{ActorId, Effect};
    use std::f32::consts::FRAC_PI_4;

    const ME: ActorId = ActorId::new(1, 0);

    fn bullet_at(x: f32, y: f32, angle: f32) -> (Bullet, Obb) {
        let tuning = Tuning::default();
        (
            Bullet::new(&tuning),
            Obb::new(Vec2::new(x, y), tuning.bullet_half_size, angle),
        )
    }

    fn wall(x: f32, y: f32) -> Contact {
        Contact {
            id: ActorId::new(7, 0),
            category: Category::Wall,
            bounds: Obb::from_size(Vec2::new(x, y), 1.0, 1.0),
        }
    }

    #[test]
    fn test_moves_along_heading() {
        let (mut bullet, mut bounds) = bullet_at(0.0, 0.0, FRAC_PI_4);
        bullet.update(&mut bounds, 0.5, &mut Effects::new(ME));
        let step = bullet.speed * 0.5 / 2f32.sqrt();
        assert!((bounds.center - Vec2::splat(step)).length() < 1e-5);
    }

    #[test]
    fn test_head_on_bounce_flips_x() {
        let (mut bullet, mut bounds) = bullet_at(0.35, 0.0, 0.0);
        let mut fx = Effects::new(ME);
        bullet.on_collide(&mut bounds, &wall(1.0, 0.0), &mut fx);

        assert!((bounds.angle.cos() + 1.0).abs() < 1e-6);
        assert!(bounds.angle.sin().abs() < 1e-6);
        assert_eq!(bullet.bounces_remaining, 0);
        // Pushed clear of the wall face
        assert!(bounds.project(Vec2::X).max < 0.5);
        assert!(matches!(
            fx.into_effects().as_slice(),
            [Effect::Emit(GameEvent::BulletBounced { id: ME, .. })]
        ));
    }

    #[test]
    fn test_glancing_bounce_flips_y() {
        // Travelling up-right into a ceiling
        let (mut bullet, mut bounds) = bullet_at(0.0, -0.3, FRAC_PI_4);
        let mut fx = Effects::new(ME);
        bullet.on_collide(&mut bounds, &wall(0.1, 0.3), &mut fx);
        assert!((bounds.angle + FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_bounces_destroys() {
        let (mut bullet, mut bounds) = bullet_at(0.35, 0.0, 0.0);
        bullet.bounces_remaining = 0;
        let mut fx = Effects::new(ME);
        bullet.on_collide(&mut bounds, &wall(1.0, 0.0), &mut fx);
        assert_eq!(fx.into_effects(), vec![Effect::Destroy(ME)]);
        assert_eq!(bounds.angle, 0.0);
    }

    #[test]
    fn test_bullets_destroy_each_other() {
        let (mut bullet, mut bounds) = bullet_at(0.0, 0.0, 0.0);
        let other = Contact {
            id: ActorId::new(2, 0),
            category: Category::Bullet,
            bounds: Obb::new(Vec2::new(0.1, 0.0), Vec2::new(0.2, 0.06), PI),
        };
        let mut fx = Effects::new(ME);
        bullet.on_collide(&mut bounds, &other, &mut fx);
        assert_eq!(
            fx.into_effects(),
            vec![Effect::Destroy(other.id), Effect::Destroy(ME)]
        );
    }

    #[test]
    fn test_tank_and_mine_contacts_ignored() {
        let (mut bullet, mut bounds) = bullet_at(0.0, 0.0, 0.0);
        for category in [Category::Tank, Category::Mine] {
            let contact = Contact {
                id: ActorId::new(5, 0),
                category,
                bounds: Obb::from_size(Vec2::ZERO, 0.5, 0.5),
            };
            let mut fx = Effects::new(ME);
            bullet.on_collide(&mut bounds, &contact, &mut fx);
            assert!(fx.is_empty());
        }
        assert_eq!(bullet.bounces_remaining, 1);
    }
}
