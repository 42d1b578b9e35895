//! JSON bundle import
//!
//! A bundle is one JSON file holding any of the four collections:
//!
//! ```json
//! { "categories": [...], "courses": [...], "videos": [...], "users": [...] }
//! ```

use crate::core::models::{Category, Course, User, Video};
use crate::core::store::{Document, Store};
use crate::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::Path;

/// Documents to seed a store with
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bundle {
    /// Category documents
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Course documents
    #[serde(default)]
    pub courses: Vec<Course>,
    /// Video documents
    #[serde(default)]
    pub videos: Vec<Video>,
    /// User documents
    #[serde(default)]
    pub users: Vec<User>,
}

/// How many documents of each kind were written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Categories written
    pub categories: usize,
    /// Courses written
    pub courses: usize,
    /// Videos written
    pub videos: usize,
    /// Users written
    pub users: usize,
}

impl ImportSummary {
    /// Total documents written
    #[must_use]
    pub const fn total(&self) -> usize {
        self.categories + self.courses + self.videos + self.users
    }
}

/// Parse a bundle file
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid bundle
pub fn read_bundle<P: AsRef<Path>>(path: P) -> Result<Bundle, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn save_all<S: Store, T: Document>(store: &S, documents: &[T]) -> Result<usize, Box<dyn Error>> {
    for document in documents {
        store.save(document)?;
    }
    Ok(documents.len())
}

/// Write every document of a bundle into `store`, replacing existing ones
///
/// # Errors
/// Returns an error on the first document that cannot be saved
pub fn import_bundle<S: Store>(store: &S, bundle: &Bundle) -> Result<ImportSummary, Box<dyn Error>> {
    let summary = ImportSummary {
        categories: save_all(store, &bundle.categories)?,
        courses: save_all(store, &bundle.courses)?,
        videos: save_all(store, &bundle.videos)?,
        users: save_all(store, &bundle.users)?,
    };
    info!("Imported {} documents", summary.total());
    Ok(summary)
}
