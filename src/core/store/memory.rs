//! In-memory document store

use super::{Document, Store};
use crate::core::error::StoreError;
use crate::core::models::EntityId;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

type Collection = BTreeMap<EntityId, Value>;

/// Documents held as JSON values, one map per collection
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<&'static str, Collection>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    ///
    /// # Errors
    /// Returns [`StoreError::Poisoned`] if a writer panicked
    pub fn count<T: Document>(&self) -> Result<usize, StoreError> {
        let guard = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.get(T::COLLECTION).map_or(0, BTreeMap::len))
    }
}

impl Store for MemoryStore {
    fn find_by_id<T: Document>(&self, id: EntityId) -> Result<Option<T>, StoreError> {
        let guard = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        guard
            .get(T::COLLECTION)
            .and_then(|docs| docs.get(&id))
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
            .map_err(StoreError::from)
    }

    fn find<T, F>(&self, filter: F) -> Result<Vec<T>, StoreError>
    where
        T: Document,
        F: Fn(&T) -> bool,
    {
        let guard = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        let Some(docs) = guard.get(T::COLLECTION) else {
            return Ok(Vec::new());
        };
        let mut matches = Vec::new();
        for value in docs.values() {
            let document: T = serde_json::from_value(value.clone())?;
            if filter(&document) {
                matches.push(document);
            }
        }
        Ok(matches)
    }

    fn save<T: Document>(&self, document: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(document)?;
        let mut guard = self.collections.write().map_err(|_| StoreError::Poisoned)?;
        guard
            .entry(T::COLLECTION)
            .or_default()
            .insert(document.id(), value);
        Ok(())
    }

    fn delete<T: Document>(&self, id: EntityId) -> Result<bool, StoreError> {
        let mut guard = self.collections.write().map_err(|_| StoreError::Poisoned)?;
        Ok(guard
            .get_mut(T::COLLECTION)
            .is_some_and(|docs| docs.remove(&id).is_some()))
    }

    fn update<T, R, F>(&self, id: EntityId, mutate: F) -> Result<Option<(R, T)>, StoreError>
    where
        T: Document,
        F: FnOnce(&mut T) -> R,
    {
        let mut guard = self.collections.write().map_err(|_| StoreError::Poisoned)?;
        let Some(slot) = guard
            .get_mut(T::COLLECTION)
            .and_then(|docs| docs.get_mut(&id))
        else {
            return Ok(None);
        };

        let mut document: T = serde_json::from_value(slot.clone())?;
        let result = mutate(&mut document);
        let updated = serde_json::to_value(&document)?;
        if updated != *slot {
            *slot = updated;
        }
        Ok(Some((result, document)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Category, Course};

    #[test]
    fn test_save_and_find() {
        let store = MemoryStore::new();
        let category = Category::new("Mathematics".to_string());
        store.save(&category).unwrap();

        let loaded: Category = store.load(category.id).unwrap();
        assert_eq!(loaded, category);
        assert_eq!(store.count::<Category>().unwrap(), 1);
        assert_eq!(store.count::<Course>().unwrap(), 0);
    }

    #[test]
    fn test_missing_document() {
        let store = MemoryStore::new();
        let missing = EntityId::new();

        assert!(store.find_by_id::<Course>(missing).unwrap().is_none());
        assert!(matches!(
            store.load::<Course>(missing),
            Err(StoreError::NotFound {
                collection: "courses",
                ..
            })
        ));
        assert!(store
            .update(missing, |c: &mut Course| c.total_enrollments += 1)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_update_persists_changes() {
        let store = MemoryStore::new();
        let course = Course::new("Arabic Calligraphy".to_string(), EntityId::new(), EntityId::new());
        store.save(&course).unwrap();

        let student = EntityId::new();
        let (outcome, updated) = store
            .update(course.id, |c: &mut Course| c.enroll(student))
            .unwrap()
            .unwrap();

        assert!(outcome.is_applied());
        assert_eq!(updated.total_enrollments, 1);
        let reloaded: Course = store.load(course.id).unwrap();
        assert!(reloaded.is_enrolled(student));
    }

    #[test]
    fn test_find_filters_and_delete() {
        let store = MemoryStore::new();
        let keep = Category::new("Science".to_string());
        let mut hidden = Category::new("Retired".to_string());
        hidden.is_active = false;
        store.save(&keep).unwrap();
        store.save(&hidden).unwrap();

        let active: Vec<Category> = store.find(|c: &Category| c.is_active).unwrap();
        assert_eq!(active, vec![keep.clone()]);

        assert!(store.delete::<Category>(keep.id).unwrap());
        assert!(!store.delete::<Category>(keep.id).unwrap());
        assert_eq!(store.all::<Category>().unwrap().len(), 1);
    }
}
