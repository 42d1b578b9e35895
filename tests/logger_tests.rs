//! Integration tests for logger behavior.

use amal_stats::logger::{level, set_level, set_level_from_str, Level};
use amal_stats::{debug, error, info, verbose, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("WARN"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn level_ordering() {
    assert!(Level::Error < Level::Warn);
    assert!(Level::Info < Level::Debug);
    set_level(Level::Info);
    assert!(level() >= Level::Error);
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
    verbose!("verbose integration");
}
