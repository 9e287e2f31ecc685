//! Category-partitioned index of live collidables
//!
//! The registry never owns actor state. It stores generation-checked handles,
//! so a handle left behind by a destroyed actor simply stops resolving.

use serde::{Deserialize, Serialize};

use super::actor::ActorId;

/// Collision category; decides which resolver pass an actor takes part in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Wall,
    Tank,
    Bullet,
    Mine,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Wall, Category::Tank, Category::Bullet, Category::Mine];

    /// Order in which bullets are tested against the other categories
    pub const PROJECTILE_TARGETS: [Category; 4] =
        [Category::Wall, Category::Mine, Category::Tank, Category::Bullet];

    #[inline]
    fn index(self) -> usize {
        match self {
            Category::Wall => 0,
            Category::Tank => 1,
            Category::Bullet => 2,
            Category::Mine => 3,
        }
    }
}

/// Live collidables, bucketed by category
#[derive(Debug, Clone, Default)]
pub struct Registry {
    buckets: [Vec<ActorId>; 4],
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` under `category`
    pub fn register(&mut self, category: Category, id: ActorId) {
        let bucket = &mut self.buckets[category.index()];
        debug_assert!(!bucket.contains(&id), "{id:?} registered twice");
        bucket.push(id);
    }

    /// Remove `id` from `category` by identity.
    ///
    /// Returns false (and does nothing) if it was not registered there.
    pub fn unregister(&mut self, category: Category, id: ActorId) -> bool {
        let bucket = &mut self.buckets[category.index()];
        match bucket.iter().position(|&other| other == id) {
            Some(i) => {
                // Keep insertion order; resolver passes iterate it
                bucket.remove(i);
                true
            }
            None => false,
        }
    }

    /// Empty every bucket (level reload)
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    pub fn bucket(&self, category: Category) -> &[ActorId] {
        &self.buckets[category.index()]
    }

    pub fn contains(&self, category: Category, id: ActorId) -> bool {
        self.bucket(category).contains(&id)
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Every registered handle with its category, in `categories` order
    pub fn entries(&self, categories: &[Category]) -> Vec<(Category, ActorId)> {
        categories
            .iter()
            .flat_map(|&c| self.bucket(c).iter().map(move |&id| (c, id)))
            .collect()
    }
}
