//! Rollup and report command handlers

use amal_stats::config::Config;
use amal_stats::core::models::EntityId;
use amal_stats::core::report::{category_report, write_report, ReportFormat};
use amal_stats::core::store::Store;
use amal_stats::core::AcademyService;
use amal_stats::{error, info};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Recompute a category's statistics and print them
pub fn rollup<S: Store>(service: &AcademyService<S>, category: EntityId) -> Result<(), String> {
    let updated = service.rollup_category(category).map_err(|e| {
        error!("Rollup of category {category} failed: {e}");
        format!("✗ Rollup failed: {e}")
    })?;

    let stats = &updated.stats;
    println!("✓ {} rolled up", updated.name);
    println!("  Courses:         {}", stats.total_courses);
    println!("  Students:        {}", stats.total_students);
    println!("  Instructors:     {}", stats.total_instructors);
    println!("  Average rating:  {:.2}", stats.average_rating);
    println!("  Watch time:      {:.0}s", stats.total_watch_time);
    println!("  Completion rate: {:.1}%", stats.completion_rate);
    Ok(())
}

/// Render a category report from the statistics currently stored
///
/// Run `rollup` first to refresh them.
pub fn run<S: Store>(
    service: &AcademyService<S>,
    category: EntityId,
    format_str: &str,
    output: Option<&Path>,
    config: &Config,
) -> Result<(), String> {
    let format = ReportFormat::from_str(format_str).map_err(|e| format!("✗ {e}"))?;

    let report = category_report(service.store(), category, Utc::now()).map_err(|e| {
        error!("Failed to load category {category}: {e}");
        format!("✗ Failed to load category {category}: {e}")
    })?;

    let reports_dir = PathBuf::from(&config.paths.reports_dir);
    let path = write_report(&report, format, output, &reports_dir).map_err(|e| {
        error!("Report generation failed for {category}: {e}");
        format!("✗ Failed to write {format} report: {e}")
    })?;

    info!("Report written: {}", path.display());
    println!("✓ Report generated: {}", path.display());
    Ok(())
}
