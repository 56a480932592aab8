//! Roster - HashMap-backed entity resolver

use super::{Collider, EntityResolver, Hull, Target};
use crate::types::EntityId;
use std::collections::{HashMap, HashSet};

/// Hulls and obstacles known to the entity layer
#[derive(Debug, Clone, Default)]
pub struct Roster {
    hulls: HashMap<EntityId, Hull>,
    obstacles: HashSet<EntityId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hull, replacing any entity with the same id
    pub fn add_hull(&mut self, hull: Hull) {
        self.obstacles.remove(&hull.id);
        self.hulls.insert(hull.id, hull);
    }

    pub fn add_obstacle(&mut self, id: EntityId) {
        self.hulls.remove(&id);
        self.obstacles.insert(id);
    }

    pub fn hull(&self, id: EntityId) -> Option<&Hull> {
        self.hulls.get(&id)
    }

    pub fn hull_mut(&mut self, id: EntityId) -> Option<&mut Hull> {
        self.hulls.get_mut(&id)
    }

    pub fn hulls(&self) -> impl Iterator<Item = &Hull> {
        self.hulls.values()
    }

    pub fn is_obstacle(&self, id: EntityId) -> bool {
        self.obstacles.contains(&id)
    }

    /// Hulls with health left
    pub fn survivors(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .hulls
            .values()
            .filter(|h| !h.is_dead())
            .map(|h| h.id)
            .collect();
        ids.sort();
        ids
    }
}

impl EntityResolver for Roster {
    fn resolve(&mut self, id: EntityId) -> Option<Collider<'_>> {
        if let Some(hull) = self.hulls.get_mut(&id) {
            return Some(Collider::Target(hull));
        }
        if self.obstacles.contains(&id) {
            return Some(Collider::Obstacle);
        }
        None
    }
}
