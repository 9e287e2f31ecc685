//! Actor handles, the entity sum type and the behavior interface
//!
//! Behaviors never reach into the world. Each call receives the actor's own
//! bounds plus an [`Effects`] buffer, and the world applies whatever was
//! queued once the call returns.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::collision::Contact;
use super::explosion::Explosion;
use super::mine::Mine;
use super::obb::Obb;
use super::registry::Category;
use super::tank::Tank;
use super::wall::Wall;
use super::world::GameEvent;

/// Generation-checked handle to an actor slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId {
    index: u32,
    generation: u32,
}

impl ActorId {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index as usize
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Which variant an actor is, without its state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Tank,
    Bullet,
    Mine,
    Wall,
    Explosion,
}

impl ActorKind {
    /// Registry bucket, if the kind collides at all
    pub fn category(self) -> Option<Category> {
        match self {
            ActorKind::Tank => Some(Category::Tank),
            ActorKind::Bullet => Some(Category::Bullet),
            ActorKind::Mine => Some(Category::Mine),
            ActorKind::Wall => Some(Category::Wall),
            ActorKind::Explosion => None,
        }
    }
}

/// Request to create an actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Spawn {
    Tank { position: Vec2, heading: f32 },
    Bullet { position: Vec2, heading: f32 },
    Mine { position: Vec2 },
    Wall { position: Vec2, breakable: bool },
    Explosion { position: Vec2 },
}

impl Spawn {
    pub fn kind(&self) -> ActorKind {
        match self {
            Spawn::Tank { .. } => ActorKind::Tank,
            Spawn::Bullet { .. } => ActorKind::Bullet,
            Spawn::Mine { .. } => ActorKind::Mine,
            Spawn::Wall { .. } => ActorKind::Wall,
            Spawn::Explosion { .. } => ActorKind::Explosion,
        }
    }
}

/// A deferred world mutation queued by a behavior
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Spawn(Spawn),
    Destroy(ActorId),
    /// Destroy every actor in `categories` whose bounds reach into the disc
    DestroyWithin {
        center: Vec2,
        radius: f32,
        categories: Vec<Category>,
    },
    Emit(GameEvent),
}

/// Effect buffer handed to a behavior for one call
#[derive(Debug)]
pub struct Effects {
    this: ActorId,
    queue: Vec<Effect>,
}

impl Effects {
    pub fn new(this: ActorId) -> Self {
        Self {
            this,
            queue: Vec::new(),
        }
    }

    /// The actor the current call runs for
    #[inline]
    pub fn this(&self) -> ActorId {
        self.this
    }

    pub fn spawn(&mut self, spawn: Spawn) {
        self.queue.push(Effect::Spawn(spawn));
    }

    pub fn destroy(&mut self, id: ActorId) {
        self.queue.push(Effect::Destroy(id));
    }

    pub fn destroy_self(&mut self) {
        self.queue.push(Effect::Destroy(self.this));
    }

    pub fn destroy_within(&mut self, center: Vec2, radius: f32, categories: &[Category]) {
        self.queue.push(Effect::DestroyWithin {
            center,
            radius,
            categories: categories.to_vec(),
        });
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.queue.push(Effect::Emit(event));
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn into_effects(self) -> Vec<Effect> {
        self.queue
    }
}

/// Per-variant reaction rules
///
/// All hooks default to doing nothing; walls rely on that entirely.
pub trait Behavior {
    /// Whether the actor joins the per-frame update list
    fn wants_update(&self) -> bool {
        false
    }

    fn update(&mut self, _bounds: &mut Obb, _dt: f32, _fx: &mut Effects) {}

    fn on_collide(&mut self, _bounds: &mut Obb, _other: &Contact, _fx: &mut Effects) {}

    fn on_destroy(&mut self, _bounds: &Obb, _fx: &mut Effects) {}
}

/// Behavior state of one actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Tank(Tank),
    Bullet(Bullet),
    Mine(Mine),
    Wall(Wall),
    Explosion(Explosion),
}

impl Entity {
    pub fn kind(&self) -> ActorKind {
        match self {
            Entity::Tank(_) => ActorKind::Tank,
            Entity::Bullet(_) => ActorKind::Bullet,
            Entity::Mine(_) => ActorKind::Mine,
            Entity::Wall(_) => ActorKind::Wall,
            Entity::Explosion(_) => ActorKind::Explosion,
        }
    }

    fn behavior(&self) -> &dyn Behavior {
        match self {
            Entity::Tank(t) => t,
            Entity::Bullet(b) => b,
            Entity::Mine(m) => m,
            Entity::Wall(w) => w,
            Entity::Explosion(e) => e,
        }
    }

    fn behavior_mut(&mut self) -> &mut dyn Behavior {
        match self {
            Entity::Tank(t) => t,
            Entity::Bullet(b) => b,
            Entity::Mine(m) => m,
            Entity::Wall(w) => w,
            Entity::Explosion(e) => e,
        }
    }
}

impl Behavior for Entity {
    fn wants_update(&self) -> bool {
        self.behavior().wants_update()
    }

    fn update(&mut self, bounds: &mut Obb, dt: f32, fx: &mut Effects) {
        self.behavior_mut().update(bounds, dt, fx);
    }

    fn on_collide(&mut self, bounds: &mut Obb, other: &Contact, fx: &mut Effects) {
        self.behavior_mut().on_collide(bounds, other, fx);
    }

    fn on_destroy(&mut self, bounds: &Obb, fx: &mut Effects) {
        self.behavior_mut().on_destroy(bounds, fx);
    }
}

/// A live actor: exclusively owned bounds plus behavior state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub bounds: Obb,
    pub entity: Entity,
}

impl Actor {
    pub fn new(bounds: Obb, entity: Entity) -> Self {
        Self { bounds, entity }
    }

    #[inline]
    pub fn kind(&self) -> ActorKind {
        self.entity.kind()
    }

    #[inline]
    pub fn category(&self) -> Option<Category> {
        self.kind().category()
    }

    pub fn as_tank(&self) -> Option<&Tank> {
        match &self.entity {
            Entity::Tank(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_bullet(&self) -> Option<&Bullet> {
        match &self.entity {
            Entity::Bullet(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_mine(&self) -> Option<&Mine> {
        match &self.entity {
            Entity::Mine(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_explosion(&self) -> Option<&Explosion> {
        match &self.entity {
            Entity::Explosion(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explosion_has_no_category() {
        assert_eq!(ActorKind::Explosion.category(), None);
        assert_eq!(ActorKind::Mine.category(), Some(Category::Mine));
        assert_eq!(
            Spawn::Explosion {
                position: Vec2::ZERO
            }
            .kind(),
            ActorKind::Explosion
        );
    }

    #[test]
    fn test_effects_queue_in_order() {
        let me = ActorId::new(3, 1);
        let other = ActorId::new(7, 0);
        let mut fx = Effects::new(me);
        assert!(fx.is_empty());
        fx.destroy(other);
        fx.destroy_self();
        fx.spawn(Spawn::Mine { position: Vec2::ONE });
        assert_eq!(
            fx.into_effects(),
            vec![
                Effect::Destroy(other),
                Effect::Destroy(me),
                Effect::Spawn(Spawn::Mine { position: Vec2::ONE }),
            ]
        );
    }
}
