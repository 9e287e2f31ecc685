//! Timed mine
//!
//! Counts down from the tuned fuse, blinking its warning light on a fixed
//! period, then destroys itself. The explosion is spawned from the destroy
//! hook so a mine removed by any other means still goes off, while a level
//! clear (which skips hooks) leaves nothing behind.

use serde::{Deserialize, Serialize};

use super::actor::{Behavior, Effects, Spawn};
use super::obb::Obb;
use crate::settings::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mine {
    /// Seconds until detonation
    pub countdown: f32,
    elapsed: f32,
    blink_period: f32,
}

impl Mine {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            countdown: tuning.mine_countdown,
            elapsed: 0.0,
            blink_period: tuning.mine_blink_period,
        }
    }

    /// Warning light state; starts dark and toggles every blink period
    pub fn warning_lit(&self) -> bool {
        if self.blink_period <= 0.0 {
            return false;
        }
        (self.elapsed / self.blink_period).floor() as u32 % 2 == 1
    }
}

impl Behavior for Mine {
    fn wants_update(&self) -> bool {
        true
    }

    fn update(&mut self, _bounds: &mut Obb, dt: f32, fx: &mut Effects) {
        self.countdown -= dt;
        self.elapsed += dt;
        if self.countdown <= 0.0 {
            log::debug!("mine {:?} fuse expired", fx.this());
            fx.destroy_self();
        }
    }

    fn on_destroy(&mut self, bounds: &Obb, fx: &mut Effects) {
        fx.spawn(Spawn::Explosion {
            position: bounds.center,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::{ActorId, ActorKind, Effect};
    use crate::sim::world::{GameEvent, World};
    use glam::Vec2;

    const ME: ActorId = ActorId::new(4, 2);

    fn mine() -> (Mine, Obb) {
        let tuning = Tuning::default();
        (
            Mine::new(&tuning),
            Obb::new(Vec2::new(1.5, -2.0), tuning.mine_half_size, 0.0),
        )
    }

    #[test]
    fn test_countdown_then_self_destroy() {
        let (mut mine, mut bounds) = mine();
        for _ in 0..4 {
            let mut fx = Effects::new(ME);
            mine.update(&mut bounds, 1.0, &mut fx);
            assert!(fx.is_empty());
        }
        let mut fx = Effects::new(ME);
        mine.update(&mut bounds, 1.0, &mut fx);
        assert_eq!(fx.into_effects(), vec![Effect::Destroy(ME)]);
    }

    #[test]
    fn test_destroy_hook_spawns_explosion_in_place() {
        let (mut mine, bounds) = mine();
        let mut fx = Effects::new(ME);
        mine.on_destroy(&bounds, &mut fx);
        assert_eq!(
            fx.into_effects(),
            vec![Effect::Spawn(Spawn::Explosion {
                position: Vec2::new(1.5, -2.0)
            })]
        );
    }

    #[test]
    fn test_warning_light_blinks() {
        let (mut mine, mut bounds) = mine();
        let mut fx = Effects::new(ME);
        assert!(!mine.warning_lit());
        mine.update(&mut bounds, 0.6, &mut fx);
        assert!(mine.warning_lit());
        mine.update(&mut bounds, 0.5, &mut fx);
        assert!(!mine.warning_lit());
    }

    #[test]
    fn test_world_handoff_spawns_exactly_one_explosion() {
        let mut world = World::default();
        let id = world.spawn(Spawn::Mine {
            position: Vec2::new(2.0, 3.0),
        });
        world.drain_events();

        // Deltas that overshoot the fuse, plus extra frames afterwards
        for _ in 0..10 {
            world.update(0.8);
        }
        assert!(!world.is_alive(id));

        let events = world.drain_events();
        let destroyed = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ActorDestroyed { id: d, .. } if *d == id))
            .count();
        assert_eq!(destroyed, 1);

        let explosions: Vec<Vec2> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::ExplosionSpawned { position, .. } => Some(*position),
                _ => None,
            })
            .collect();
        assert_eq!(explosions, vec![Vec2::new(2.0, 3.0)]);
        assert!(world.ids_of(ActorKind::Mine).is_empty());
    }
}
