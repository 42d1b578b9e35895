//! Document storage collaborators
//!
//! The aggregation core only needs load-by-id, load-by-filter and whole
//! document saves. [`Store::update`] adds an atomic read-modify-write so
//! concurrent mutations of one document cannot overwrite each other.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::core::error::StoreError;
use crate::core::models::{Category, Course, EntityId, User, Video};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A persisted top-level document
pub trait Document: Clone + Serialize + DeserializeOwned {
    /// Collection name the document lives in
    const COLLECTION: &'static str;

    /// Document identity
    fn id(&self) -> EntityId;
}

impl Document for Course {
    const COLLECTION: &'static str = "courses";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Document for Video {
    const COLLECTION: &'static str = "videos";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Document for Category {
    const COLLECTION: &'static str = "categories";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> EntityId {
        self.id
    }
}

/// Persistence over the four document collections
pub trait Store {
    /// Load one document by identity
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read or decoded
    fn find_by_id<T: Document>(&self, id: EntityId) -> Result<Option<T>, StoreError>;

    /// Load every document matching `filter`
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read or decoded
    fn find<T, F>(&self, filter: F) -> Result<Vec<T>, StoreError>
    where
        T: Document,
        F: Fn(&T) -> bool;

    /// Insert or replace a whole document
    ///
    /// # Errors
    /// Returns an error if the document cannot be encoded or written
    fn save<T: Document>(&self, document: &T) -> Result<(), StoreError>;

    /// Remove a document; returns whether it existed
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be modified
    fn delete<T: Document>(&self, id: EntityId) -> Result<bool, StoreError>;

    /// Load, mutate and save one document while holding the collection lock.
    ///
    /// The document is written back only if `mutate` changed it. Returns
    /// `None` when no document has that identity.
    ///
    /// # Errors
    /// Returns an error if the document cannot be read, decoded or written
    fn update<T, R, F>(&self, id: EntityId, mutate: F) -> Result<Option<(R, T)>, StoreError>
    where
        T: Document,
        F: FnOnce(&mut T) -> R;

    /// First document matching `filter`
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read or decoded
    fn find_one<T, F>(&self, filter: F) -> Result<Option<T>, StoreError>
    where
        T: Document,
        F: Fn(&T) -> bool,
    {
        Ok(self.find(filter)?.into_iter().next())
    }

    /// Load a document that must exist
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] when it is missing
    fn load<T: Document>(&self, id: EntityId) -> Result<T, StoreError> {
        self.find_by_id(id)?.ok_or(StoreError::NotFound {
            collection: T::COLLECTION,
            id,
        })
    }

    /// Every document in a collection
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read or decoded
    fn all<T: Document>(&self) -> Result<Vec<T>, StoreError> {
        self.find(|_: &T| true)
    }
}
