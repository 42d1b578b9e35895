//! Directory-backed document store: `<root>/<collection>/<id>.json`

use super::{Document, Store};
use crate::core::error::StoreError;
use crate::core::models::EntityId;
use crate::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Stores each document as a pretty-printed JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `root`
    ///
    /// # Errors
    /// Returns an error if the root directory cannot be created
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    /// Root directory of the store
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir<T: Document>(&self) -> PathBuf {
        self.root.join(T::COLLECTION)
    }

    fn document_path<T: Document>(&self, id: EntityId) -> PathBuf {
        self.collection_dir::<T>().join(format!("{id}.json"))
    }

    fn read<T: Document>(path: &Path) -> Result<Option<T>, StoreError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write through a temporary file so readers never see a partial document
    fn write<T: Document>(&self, document: &T) -> Result<(), StoreError> {
        let dir = self.collection_dir::<T>();
        fs::create_dir_all(&dir)?;
        let path = self.document_path::<T>(document.id());
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(document)?)?;
        fs::rename(&tmp, &path)?;
        debug!("Saved {} document {}", T::COLLECTION, document.id());
        Ok(())
    }
}

impl Store for JsonFileStore {
    fn find_by_id<T: Document>(&self, id: EntityId) -> Result<Option<T>, StoreError> {
        Self::read(&self.document_path::<T>(id))
    }

    fn find<T, F>(&self, filter: F) -> Result<Vec<T>, StoreError>
    where
        T: Document,
        F: Fn(&T) -> bool,
    {
        let dir = self.collection_dir::<T>();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut matches = Vec::new();
        for path in paths {
            if let Some(document) = Self::read::<T>(&path)? {
                if filter(&document) {
                    matches.push(document);
                }
            }
        }
        Ok(matches)
    }

    fn save<T: Document>(&self, document: &T) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        self.write(document)
    }

    fn delete<T: Document>(&self, id: EntityId) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        match fs::remove_file(self.document_path::<T>(id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn update<T, R, F>(&self, id: EntityId, mutate: F) -> Result<Option<(R, T)>, StoreError>
    where
        T: Document,
        F: FnOnce(&mut T) -> R,
    {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let Some(mut document) = Self::read::<T>(&self.document_path::<T>(id))? else {
            return Ok(None);
        };

        let before = serde_json::to_value(&document)?;
        let result = mutate(&mut document);
        if serde_json::to_value(&document)? != before {
            self.write(&document)?;
        }
        Ok(Some((result, document)))
    }
}
