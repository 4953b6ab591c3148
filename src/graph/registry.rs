//! Canonical name -> entity table.

use std::collections::HashMap;

use super::{Entity, EntityId, VisitStatus};

/// Arena of every entity discovered during a run, keyed by canonical name.
///
/// Entities are interned the first time their name is seen, so a name maps to
/// exactly one record for the lifetime of the registry. Whether the entity's
/// page has been processed is tracked separately through [`VisitStatus`].
#[derive(Debug, Default)]
pub struct Registry {
    entities: Vec<Entity>,
    by_name: HashMap<String, EntityId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the entity recorded under a canonical name.
    pub fn lookup(&self, name: &str) -> Option<EntityId> {
        self.by_name.get(name).copied()
    }

    /// Whether any entity is recorded under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Return the entity recorded under `name`, creating an unvisited one with
    /// `locator` if absent. An existing entity keeps its original locator.
    pub fn intern(&mut self, name: &str, locator: &str) -> EntityId {
        if let Some(id) = self.lookup(name) {
            return id;
        }
        let id = EntityId(self.entities.len());
        self.entities
            .push(Entity::new(name.to_string(), locator.to_string()));
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Mark an entity as visited. Returns `false` if it already was.
    pub fn register(&mut self, id: EntityId) -> bool {
        let entity = &mut self.entities[id.0];
        if entity.status != VisitStatus::Unvisited {
            return false;
        }
        entity.status = VisitStatus::Visited;
        true
    }

    pub fn is_visited(&self, id: EntityId) -> bool {
        self.entities[id.0].status != VisitStatus::Unvisited
    }

    /// # Panics
    ///
    /// Panics if `id` was issued by a different registry.
    pub fn get(&self, id: EntityId) -> &Entity {
        &self.entities[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> &mut Entity {
        &mut self.entities[id.0]
    }

    /// Names of the given entities, in order.
    pub fn names(&self, ids: &[EntityId]) -> Vec<String> {
        ids.iter().map(|id| self.get(*id).name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn visited_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.status != VisitStatus::Unvisited)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_failed()).count()
    }

    /// All entities in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, e)| (EntityId(i), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_reuses_existing() {
        let mut registry = Registry::new();
        let a = registry.intern("Oberon", "/wiki/Oberon_(programming_language)");
        let b = registry.intern("Oberon", "/wiki/Oberon");
        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
        // First locator wins
        assert_eq!(registry.get(a).locator, "/wiki/Oberon_(programming_language)");
    }

    #[test]
    fn test_lookup_and_contains() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());
        assert!(!registry.contains("C"));
        assert!(registry.lookup("C").is_none());

        let id = registry.intern("C", "/wiki/C_(programming_language)");
        assert!(registry.contains("C"));
        assert_eq!(registry.lookup("C"), Some(id));
        assert!(!registry.contains("c"));
    }

    #[test]
    fn test_register_only_once() {
        let mut registry = Registry::new();
        let id = registry.intern("Go", "/wiki/Go_(programming_language)");
        assert!(!registry.is_visited(id));
        assert!(registry.register(id));
        assert!(registry.is_visited(id));
        assert!(!registry.register(id));
        assert_eq!(registry.visited_count(), 1);
    }

    #[test]
    fn test_failed_counts_as_visited() {
        let mut registry = Registry::new();
        let id = registry.intern("B", "/wiki/B");
        registry.register(id);
        registry.get_mut(id).status = VisitStatus::Failed("boom".to_string());
        assert!(registry.is_visited(id));
        assert!(!registry.register(id));
        assert_eq!(registry.failed_count(), 1);
    }

    #[test]
    fn test_iter_in_creation_order() {
        let mut registry = Registry::new();
        registry.intern("Go", "/a");
        registry.intern("C", "/b");
        registry.intern("Python", "/c");
        let names: Vec<_> = registry.iter().map(|(_, e)| e.name.as_str()).collect();
        assert_eq!(names, vec!["Go", "C", "Python"]);
    }
}
