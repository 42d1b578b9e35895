//! Import command handler

use amal_stats::core::import::{import_bundle, read_bundle};
use amal_stats::core::store::Store;
use amal_stats::core::AcademyService;
use amal_stats::error;
use std::path::Path;

/// Load a JSON bundle into the store
pub fn run<S: Store>(service: &AcademyService<S>, file: &Path) -> Result<(), String> {
    let bundle = read_bundle(file).map_err(|e| {
        error!("Failed to read bundle {}: {e}", file.display());
        format!("✗ Failed to read {}: {e}", file.display())
    })?;

    let summary = import_bundle(service.store(), &bundle).map_err(|e| {
        error!("Import of {} failed: {e}", file.display());
        format!("✗ Import failed: {e}")
    })?;

    println!(
        "✓ Imported {} categories, {} courses, {} videos, {} users",
        summary.categories, summary.courses, summary.videos, summary.users
    );
    Ok(())
}
