//! Statistics core for the Amal Academy platform
//! Contains the document models, aggregation routines, storage collaborators
//! and the mutation service used by the `amalstats` CLI.

pub mod core;
pub mod logger;

pub use self::core::config;
pub use self::core::get_version;
