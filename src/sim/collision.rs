//! Collision classification and the per-frame resolver
//!
//! Two passes run after all actor updates:
//! 1. Blocking: every wall against every tank; the tank gets the callback.
//! 2. Projectile: every bullet against every other collidable; the bullet
//!    gets the callback.
//!
//! Callbacks are dispatched as soon as a pair overlaps, so later pairs in the
//! same pass see the corrected geometry (a tank pushed out of one wall is
//! tested against the next wall at its new position).

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::ActorId;
use super::obb::{Obb, are_colliding};
use super::registry::Category;
use super::world::World;
use crate::consts::CONTACT_SKIN;

/// Where the subject of a contact lies relative to the mover
///
/// Uses screen orientation: `Top` means the subject is on the mover's -y side,
/// `Left` means it is on the mover's -x side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionDirection {
    Top,
    Bottom,
    Left,
    Right,
}

impl CollisionDirection {
    pub fn opposite(self) -> Self {
        match self {
            CollisionDirection::Top => CollisionDirection::Bottom,
            CollisionDirection::Bottom => CollisionDirection::Top,
            CollisionDirection::Left => CollisionDirection::Right,
            CollisionDirection::Right => CollisionDirection::Left,
        }
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, CollisionDirection::Top | CollisionDirection::Bottom)
    }

    /// World direction the mover has to travel to leave the subject
    pub fn push_direction(self) -> Vec2 {
        match self {
            CollisionDirection::Top => Vec2::Y,
            CollisionDirection::Bottom => Vec2::NEG_Y,
            CollisionDirection::Left => Vec2::X,
            CollisionDirection::Right => Vec2::NEG_X,
        }
    }
}

/// Classify a contact by the dominant axis of the center-to-center delta
///
/// An approximation, not a penetration-depth solve. Ties between the axes
/// resolve to the vertical pair; coincident centers give `Bottom`.
pub fn collision_direction(subject: &Obb, mover: &Obb) -> CollisionDirection {
    let delta = mover.center - subject.center;
    if delta.x.abs() > delta.y.abs() {
        if delta.x > 0.0 {
            CollisionDirection::Left
        } else {
            CollisionDirection::Right
        }
    } else if delta.y > 0.0 {
        CollisionDirection::Top
    } else {
        CollisionDirection::Bottom
    }
}

/// Move `mover` along the classified world axis until it no longer overlaps
/// `obstacle` on that axis. Returns the applied world-space shift.
///
/// Works on projected extents, so rotated movers end up flush too. A mover
/// that is already clear on that axis is left alone.
pub fn push_out(mover: &mut Obb, obstacle: &Obb, direction: CollisionDirection) -> Vec2 {
    let axis = direction.push_direction();
    let m = mover.project(axis);
    let o = obstacle.project(axis);
    let distance = (o.max - m.min + CONTACT_SKIN).max(0.0);
    let shift = axis * distance;
    mover.shift(shift);
    shift
}

/// The other side of a contact, as seen by the actor receiving the callback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ActorId,
    pub category: Category,
    pub bounds: Obb,
}

/// Everything that overlapped during one resolver run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionReport {
    /// `(wall, tank)` from the blocking pass, `(bullet, other)` from the
    /// projectile pass, in detection order
    pub pairs: Vec<(ActorId, ActorId)>,
}

impl CollisionReport {
    fn record(&mut self, a: ActorId, b: ActorId) {
        log::trace!("contact {a:?} <-> {b:?}");
        self.pairs.push((a, b));
    }

    /// Actors that took part in at least one overlap
    pub fn involved(&self) -> BTreeSet<ActorId> {
        self.pairs.iter().flat_map(|&(a, b)| [a, b]).collect()
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.pairs.iter().any(|&(a, b)| a == id || b == id)
    }

    /// Whether `a` and `b` overlapped, in either order
    pub fn collided(&self, a: ActorId, b: ActorId) -> bool {
        self.pairs
            .iter()
            .any(|&pair| pair == (a, b) || pair == (b, a))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Run both passes and dispatch callbacks
pub fn resolve_collisions(world: &mut World) -> CollisionReport {
    let mut report = CollisionReport::default();

    // Blocking pass: tanks cannot pass through walls
    let walls = world.registry().bucket(Category::Wall).to_vec();
    let tanks = world.registry().bucket(Category::Tank).to_vec();
    for &wall in &walls {
        let Some(wall_bounds) = world.bounds(wall) else {
            continue;
        };
        for &tank in &tanks {
            let Some(tank_bounds) = world.bounds(tank) else {
                continue;
            };
            if are_colliding(&wall_bounds, &tank_bounds) {
                report.record(wall, tank);
                let contact = Contact {
                    id: wall,
                    category: Category::Wall,
                    bounds: wall_bounds,
                };
                world.collide(tank, &contact);
            }
        }
    }

    // Projectile pass: bullets against everything else, themselves excluded
    let bullets = world.registry().bucket(Category::Bullet).to_vec();
    let targets = world.registry().entries(&Category::PROJECTILE_TARGETS);
    for &bullet in &bullets {
        for &(category, other) in &targets {
            if other == bullet {
                continue;
            }
            // Re-read every time: an earlier callback may have moved or killed it
            let Some(bullet_bounds) = world.bounds(bullet) else {
                break;
            };
            let Some(other_bounds) = world.bounds(other) else {
                continue;
            };
            if are_colliding(&bullet_bounds, &other_bounds) {
                report.record(bullet, other);
                let contact = Contact {
                    id: other,
                    category,
                    bounds: other_bounds,
                };
                world.collide(bullet, &contact);
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::Spawn;
    use crate::sim::world::GameEvent;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_4;

    fn bullet_at(world: &mut World, x: f32) -> ActorId {
        world.spawn(Spawn::Bullet {
            position: Vec2::new(x, 0.0),
            heading: 0.0,
        })
    }

    fn destroyed_count(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::ActorDestroyed { .. }))
            .count()
    }

    fn square(x: f32, y: f32, half: f32) -> Obb {
        Obb::new(Vec2::new(x, y), Vec2::splat(half), 0.0)
    }

    #[test]
    fn test_direction_dominant_axis() {
        let wall = square(0.0, 0.0, 0.5);
        assert_eq!(
            collision_direction(&wall, &square(0.8, 0.1, 0.5)),
            CollisionDirection::Left
        );
        assert_eq!(
            collision_direction(&wall, &square(-0.8, 0.1, 0.5)),
            CollisionDirection::Right
        );
        assert_eq!(
            collision_direction(&wall, &square(0.1, 0.8, 0.5)),
            CollisionDirection::Top
        );
        assert_eq!(
            collision_direction(&wall, &square(0.1, -0.8, 0.5)),
            CollisionDirection::Bottom
        );
    }

    #[test]
    fn test_direction_tie_goes_vertical() {
        let wall = square(0.0, 0.0, 0.5);
        assert_eq!(
            collision_direction(&wall, &square(0.5, 0.5, 0.5)),
            CollisionDirection::Top
        );
    }

    #[test]
    fn test_push_out_leaves_flush_contact() {
        let wall = square(0.0, 0.0, 0.5);
        let mut tank = Obb::new(Vec2::new(0.9, 0.1), Vec2::new(0.54, 0.42), 0.0);
        assert!(are_colliding(&wall, &tank));

        let dir = collision_direction(&wall, &tank);
        assert_eq!(dir, CollisionDirection::Left);
        let shift = push_out(&mut tank, &wall, dir);

        assert!(shift.x > 0.0 && shift.y == 0.0);
        assert!(!are_colliding(&wall, &tank));
        let gap = tank.project(Vec2::X).min - wall.project(Vec2::X).max;
        assert!(gap >= 0.0 && gap < 1e-3);
        // Lateral position untouched
        assert_eq!(tank.center.y, 0.1);
    }

    #[test]
    fn test_push_out_rotated_mover() {
        let wall = square(0.0, 0.0, 0.5);
        let mut mover = Obb::new(Vec2::new(0.0, -1.0), Vec2::new(0.6, 0.3), FRAC_PI_4);
        assert!(are_colliding(&wall, &mover));

        let dir = collision_direction(&wall, &mover);
        assert_eq!(dir, CollisionDirection::Bottom);
        push_out(&mut mover, &wall, dir);
        assert!(!are_colliding(&wall, &mover));
    }

    #[test]
    fn test_push_out_noop_when_clear() {
        let wall = square(0.0, 0.0, 0.5);
        let mut mover = square(3.0, 0.0, 0.5);
        let shift = push_out(&mut mover, &wall, CollisionDirection::Left);
        assert_eq!(shift, Vec2::ZERO);
        assert_eq!(mover.center, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_report_queries() {
        let a = ActorId::new(0, 0);
        let b = ActorId::new(1, 0);
        let c = ActorId::new(2, 0);
        let mut report = CollisionReport::default();
        assert!(report.is_empty());
        report.record(a, b);
        report.record(c, a);
        assert!(report.collided(b, a));
        assert!(!report.collided(b, c));
        assert!(report.contains(c));
        assert_eq!(report.involved().len(), 3);
    }

    #[test]
    fn test_bullet_pair_destroyed_once_in_pass() {
        let mut world = World::default();
        let a = bullet_at(&mut world, 0.0);
        let b = bullet_at(&mut world, 0.1);
        world.drain_events();

        let report = resolve_collisions(&mut world);

        assert!(!world.is_alive(a));
        assert!(!world.is_alive(b));
        // b never gets its own turn: it died during a's
        assert_eq!(report.pairs, vec![(a, b)]);
        assert_eq!(destroyed_count(&world.drain_events()), 2);
        assert!(world.registry().bucket(Category::Bullet).is_empty());
    }

    #[test]
    fn test_dead_targets_skipped_in_same_pass() {
        let mut world = World::default();
        let a = bullet_at(&mut world, 0.0);
        let b = bullet_at(&mut world, 0.1);
        // Overlaps both, but both are gone before it is tested
        let c = bullet_at(&mut world, 0.05);
        world.drain_events();

        let report = resolve_collisions(&mut world);

        assert_eq!(report.pairs, vec![(a, b)]);
        assert!(!world.is_alive(a));
        assert!(!world.is_alive(b));
        assert!(world.is_alive(c));
        assert!(!report.contains(c));
        assert_eq!(destroyed_count(&world.drain_events()), 2);
        assert_eq!(world.registry().bucket(Category::Bullet), &[c]);
    }

    proptest! {
        #[test]
        fn prop_direction_is_antisymmetric(
            x1 in -10.0f32..10.0, y1 in -10.0f32..10.0,
            x2 in -10.0f32..10.0, y2 in -10.0f32..10.0,
        ) {
            let d = Vec2::new(x2 - x1, y2 - y1);
            // Diagonal ties and coincident centers have no opposite
            prop_assume!((d.x.abs() - d.y.abs()).abs() > 1e-4);
            prop_assume!(d.x != 0.0 && d.y != 0.0);
            let a = square(x1, y1, 0.5);
            let b = square(x2, y2, 0.5);
            prop_assert_eq!(
                collision_direction(&a, &b),
                collision_direction(&b, &a).opposite()
            );
        }
    }
}
