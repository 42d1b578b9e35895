//! Core module: models, aggregation, storage and the mutation service

pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod outcome;
pub mod report;
pub mod service;
pub mod store;

pub use error::{RatingError, ServiceError, StoreError};
pub use outcome::{Mutation, Outcome};
pub use service::AcademyService;

/// Returns the current version of the `amal-stats` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
