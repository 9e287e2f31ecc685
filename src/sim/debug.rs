//! Collider overlay data
//!
//! Lets a front end draw every registered collider as an outline, tinted
//! when it took part in a contact this frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::ActorId;
use super::collision::CollisionReport;
use super::registry::Category;
use super::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebugRect {
    pub id: ActorId,
    pub category: Category,
    /// Corners in winding order
    pub vertices: [Vec2; 4],
    /// Overlapped something during the last resolve
    pub hit: bool,
}

/// Outline of every registered collider, bucket by bucket
pub fn debug_shapes(world: &World, report: &CollisionReport) -> Vec<DebugRect> {
    let involved = report.involved();
    world
        .registry()
        .entries(&Category::ALL)
        .into_iter()
        .filter_map(|(category, id)| {
            world.bounds(id).map(|bounds| DebugRect {
                id,
                category,
                vertices: bounds.vertices(),
                hit: involved.contains(&id),
            })
        })
        .collect()
}
