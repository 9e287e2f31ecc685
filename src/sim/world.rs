//! The simulation world: actor arena, collidable registry, update list
//!
//! Owned by the frame orchestrator and passed by reference into every
//! spawn/update/resolve call. Actor slots are reused, but every reuse bumps
//! the slot generation so stale [`ActorId`]s never alias a newer actor.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, ActorKind, Behavior, Effect, Effects, Entity, Spawn};
use super::bullet::Bullet;
use super::collision::Contact;
use super::explosion::Explosion;
use super::mine::Mine;
use super::obb::Obb;
use super::registry::{Category, Registry};
use super::tank::Tank;
use super::wall::Wall;
use crate::settings::Tuning;

/// Discrete outputs for rendering and audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ActorSpawned {
        id: ActorId,
        kind: ActorKind,
        position: Vec2,
    },
    ActorDestroyed {
        id: ActorId,
        kind: ActorKind,
        position: Vec2,
    },
    /// A bullet glanced off a wall (audio cue)
    BulletBounced { id: ActorId, position: Vec2 },
    /// A mine went off (visual effect)
    ExplosionSpawned { id: ActorId, position: Vec2 },
}

/// Placement of an actor's visual
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: f32,
}

/// Everything a renderer needs to draw one actor this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub id: ActorId,
    pub kind: ActorKind,
    pub transform: Transform,
    /// Turret angle relative to the hull (tanks only)
    pub turret_rotation: Option<f32>,
    /// Mine warning light state
    pub lit: bool,
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    actor: Option<Actor>,
}

/// Live simulation state for one level session
#[derive(Debug, Clone)]
pub struct World {
    tuning: Tuning,
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    registry: Registry,
    /// Actors with a recurring per-frame update, in spawn order
    updatables: Vec<ActorId>,
    events: Vec<GameEvent>,
}

impl Default for World {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl World {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            registry: Registry::new(),
            updatables: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Handles currently on the per-frame update list
    pub fn updatables(&self) -> &[ActorId] {
        &self.updatables
    }

    /// Number of live actors
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.actor.as_ref())
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.actor.as_mut())
    }

    #[inline]
    pub fn is_alive(&self, id: ActorId) -> bool {
        self.get(id).is_some()
    }

    pub fn bounds(&self, id: ActorId) -> Option<Obb> {
        self.get(id).map(|actor| actor.bounds)
    }

    /// Live actors in slot order
    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.actor
                .as_ref()
                .map(|actor| (ActorId::new(i as u32, slot.generation), actor))
        })
    }

    /// Live actors of one kind, in slot order
    pub fn ids_of(&self, kind: ActorKind) -> Vec<ActorId> {
        self.actors()
            .filter(|(_, actor)| actor.kind() == kind)
            .map(|(id, _)| id)
            .collect()
    }

    /// Create an actor, register it and queue its spawn events
    pub fn spawn(&mut self, spawn: Spawn) -> ActorId {
        let actor = self.build(spawn);
        let kind = actor.kind();
        let position = actor.bounds.center;
        let wants_update = actor.entity.wants_update();

        let id = self.alloc(actor);
        if let Some(category) = kind.category() {
            self.registry.register(category, id);
        }
        if wants_update {
            self.updatables.push(id);
        }

        log::debug!("spawned {kind:?} {id:?} at {position}");
        self.events.push(GameEvent::ActorSpawned { id, kind, position });
        if kind == ActorKind::Explosion {
            self.events.push(GameEvent::ExplosionSpawned { id, position });
        }
        id
    }

    fn build(&self, spawn: Spawn) -> Actor {
        let t = &self.tuning;
        match spawn {
            Spawn::Tank { position, heading } => {
                let aim = position + crate::heading(heading) * t.aim_offset;
                Actor::new(
                    Obb::new(position, t.tank_half_size, heading),
                    Entity::Tank(Tank::new(t, aim)),
                )
            }
            Spawn::Bullet { position, heading } => Actor::new(
                Obb::new(position, t.bullet_half_size, heading),
                Entity::Bullet(Bullet::new(t)),
            ),
            Spawn::Mine { position } => Actor::new(
                Obb::new(position, t.mine_half_size, 0.0),
                Entity::Mine(Mine::new(t)),
            ),
            Spawn::Wall {
                position,
                breakable,
            } => Actor::new(
                Obb::from_size(position, t.wall_size, t.wall_size),
                Entity::Wall(Wall::new(breakable)),
            ),
            Spawn::Explosion { position } => Actor::new(
                Obb::new(position, t.explosion_half_size, 0.0),
                Entity::Explosion(Explosion::new(t)),
            ),
        }
    }

    fn alloc(&mut self, actor: Actor) -> ActorId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.actor = Some(actor);
            return ActorId::new(index, slot.generation);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            actor: Some(actor),
        });
        ActorId::new(index, 0)
    }

    /// Destroy an actor and run its destroy hook.
    ///
    /// Idempotent: returns false for a handle that is already dead, which
    /// happens whenever two contacts in one pass race to kill the same actor.
    pub fn destroy(&mut self, id: ActorId) -> bool {
        let Some(slot) = self
            .slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
        else {
            return false;
        };
        let Some(mut actor) = slot.actor.take() else {
            return false;
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index() as u32);
        self.live -= 1;

        let kind = actor.kind();
        if let Some(category) = kind.category() {
            self.registry.unregister(category, id);
        }
        self.updatables.retain(|&other| other != id);

        log::debug!("destroyed {kind:?} {id:?}");
        self.events.push(GameEvent::ActorDestroyed {
            id,
            kind,
            position: actor.bounds.center,
        });

        let mut fx = Effects::new(id);
        actor.entity.on_destroy(&actor.bounds, &mut fx);
        self.apply(fx);
        true
    }

    /// Destroy every actor in `categories` whose bounds reach into the disc
    pub fn destroy_within(&mut self, center: Vec2, radius: f32, categories: &[Category]) -> usize {
        let victims: Vec<ActorId> = self
            .registry
            .entries(categories)
            .into_iter()
            .map(|(_, id)| id)
            .filter(|&id| {
                self.bounds(id)
                    .is_some_and(|bounds| bounds.intersects_circle(center, radius))
            })
            .collect();
        victims.into_iter().filter(|&id| self.destroy(id)).count()
    }

    /// Run `f` against a live actor, then apply the effects it queued.
    ///
    /// Returns false if the handle is stale.
    pub fn act<F>(&mut self, id: ActorId, f: F) -> bool
    where
        F: FnOnce(&mut Actor, &mut Effects),
    {
        let Some(actor) = self.get_mut(id) else {
            return false;
        };
        let mut fx = Effects::new(id);
        f(actor, &mut fx);
        self.apply(fx);
        true
    }

    /// Deliver a contact to `id`'s collision hook
    pub(crate) fn collide(&mut self, id: ActorId, contact: &Contact) {
        self.act(id, |actor, fx| {
            actor.entity.on_collide(&mut actor.bounds, contact, fx);
        });
    }

    fn apply(&mut self, fx: Effects) {
        for effect in fx.into_effects() {
            match effect {
                Effect::Spawn(spawn) => {
                    self.spawn(spawn);
                }
                Effect::Destroy(id) => {
                    self.destroy(id);
                }
                Effect::DestroyWithin {
                    center,
                    radius,
                    categories,
                } => {
                    self.destroy_within(center, radius, &categories);
                }
                Effect::Emit(event) => self.events.push(event),
            }
        }
    }

    /// Advance every actor on the update list by `dt` seconds.
    ///
    /// Iterates a snapshot of the list: actors destroyed mid-frame are
    /// skipped, actors spawned mid-frame get their first update next frame.
    pub fn update(&mut self, dt: f32) {
        let ids = self.updatables.clone();
        for id in ids {
            self.act(id, |actor, fx| actor.entity.update(&mut actor.bounds, dt, fx));
        }
    }

    /// Drop every actor without running destroy hooks or queuing events.
    ///
    /// Outstanding handles stay stale afterwards.
    pub fn clear(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.actor.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(i as u32);
            }
        }
        self.live = 0;
        self.registry.clear();
        self.updatables.clear();
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Render state of every live actor
    pub fn snapshots(&self) -> Vec<ActorSnapshot> {
        self.actors()
            .map(|(id, actor)| {
                let bounds = &actor.bounds;
                let scale = actor.as_explosion().map_or(1.0, Explosion::radius);
                ActorSnapshot {
                    id,
                    kind: actor.kind(),
                    transform: Transform {
                        position: bounds.center,
                        rotation: bounds.angle,
                        scale,
                    },
                    turret_rotation: actor.as_tank().map(|tank| tank.turret_rotation(bounds)),
                    lit: actor.as_mine().is_some_and(Mine::warning_lit),
                }
            })
            .collect()
    }
}
