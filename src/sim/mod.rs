//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay single-threaded and
//! deterministic:
//! - Caller-supplied timestep only
//! - Stable iteration order (spawn order within each registry bucket)
//! - No rendering, audio or transport dependencies

pub mod actor;
pub mod bullet;
pub mod collision;
pub mod debug;
pub mod explosion;
pub mod intent;
pub mod level;
pub mod mine;
pub mod obb;
pub mod registry;
pub mod tank;
pub mod tick;
pub mod wall;
pub mod world;

pub use actor::{Actor, ActorId, ActorKind, Behavior, Effect, Effects, Entity, Spawn};
pub use collision::{
    CollisionDirection, CollisionReport, Contact, collision_direction, push_out, resolve_collisions,
};
pub use debug::{DebugRect, debug_shapes};
pub use intent::{Intent, IntentError};
pub use level::{Cell, Level, LevelIssue, grid_to_world};
pub use obb::{Interval, Obb, are_colliding};
pub use registry::{Category, Registry};
pub use tick::{TankControl, TickInput, tick};
pub use world::{ActorSnapshot, GameEvent, Transform, World};
