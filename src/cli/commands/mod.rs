//! CLI command handlers for `amalstats`.
//!
//! Store-backed handlers return `Err` with a user-facing message; the caller
//! prints it and sets the exit code.

pub mod academy;
pub mod config;
pub mod import;
pub mod report;
