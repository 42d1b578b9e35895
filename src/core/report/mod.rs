//! Category report generation
//!
//! Reports summarize a category's rolled-up statistics and list each listed
//! course with its enrollment, completion, rating and watch-time figures.
//! Rendering goes through askama templates in `templates/`.

pub mod formats;

pub use formats::ReportFormat;

use crate::core::error::StoreError;
use crate::core::models::{Category, Course, EntityId};
use crate::core::store::Store;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// One course line in a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRow {
    /// Course title (Arabic title appended when present)
    pub title: String,
    /// Enrollment counter
    pub enrollments: String,
    /// Completion percentage
    pub completion: String,
    /// Average rating
    pub rating: String,
    /// Number of ratings
    pub rating_count: String,
    /// Watch time in hours
    pub watch_time: String,
}

impl CourseRow {
    fn from_course(course: &Course) -> Self {
        let title = match &course.title_ar {
            Some(ar) if !ar.is_empty() => format!("{} ({ar})", course.title),
            _ => course.title.clone(),
        };
        Self {
            title,
            enrollments: course.total_enrollments.to_string(),
            completion: format!("{:.1}%", course.completion_rate()),
            rating: format!("{:.2}", course.ratings.average),
            rating_count: course.ratings.count.to_string(),
            watch_time: format_hours(course.total_watch_time),
        }
    }
}

/// Pre-formatted values handed to the templates
#[derive(Debug, Clone)]
pub struct CategoryReport {
    /// Category name
    pub name: String,
    /// Default output file name, without extension
    pub file_stem: String,
    /// When the statistics were last rolled up
    pub stats_updated: String,
    /// When the report was rendered
    pub generated_at: String,
    /// Number of listed courses
    pub total_courses: String,
    /// Total enrollments
    pub total_students: String,
    /// Distinct instructors
    pub total_instructors: String,
    /// Weighted rating
    pub average_rating: String,
    /// Category watch time in hours
    pub total_watch_time: String,
    /// Completion percentage
    pub completion_rate: String,
    /// Listed courses, most enrolled first
    pub rows: Vec<CourseRow>,
}

impl CategoryReport {
    /// Build a report from a category and its courses.
    ///
    /// Only published, active courses of the category are listed.
    #[must_use]
    pub fn new(category: &Category, courses: &[Course], now: DateTime<Utc>) -> Self {
        let mut listed: Vec<&Course> = courses
            .iter()
            .filter(|c| c.category == category.id && c.is_listed())
            .collect();
        listed.sort_by(|a, b| {
            b.total_enrollments
                .cmp(&a.total_enrollments)
                .then_with(|| a.title.cmp(&b.title))
        });

        let stats = &category.stats;
        let name = match &category.name_ar {
            Some(ar) if !ar.is_empty() => format!("{} / {ar}", category.name),
            _ => category.name.clone(),
        };
        Self {
            name,
            file_stem: file_stem(category),
            stats_updated: stats.last_updated.map_or_else(
                || "never".to_string(),
                |at| at.format("%Y-%m-%d %H:%M UTC").to_string(),
            ),
            generated_at: now.format("%Y-%m-%d %H:%M UTC").to_string(),
            total_courses: stats.total_courses.to_string(),
            total_students: stats.total_students.to_string(),
            total_instructors: stats.total_instructors.to_string(),
            average_rating: format!("{:.2}", stats.average_rating),
            total_watch_time: format_hours(stats.total_watch_time),
            completion_rate: format!("{:.1}%", stats.completion_rate),
            rows: listed.into_iter().map(CourseRow::from_course).collect(),
        }
    }
}

/// Load a category and its courses from `store` and build its report
///
/// # Errors
/// Returns [`StoreError::NotFound`] if the category does not exist, or any
/// storage failure
pub fn category_report<S: Store>(
    store: &S,
    category: EntityId,
    now: DateTime<Utc>,
) -> Result<CategoryReport, StoreError> {
    let category: Category = store.load(category)?;
    let courses: Vec<Course> = store.find(|c: &Course| c.category == category.id)?;
    Ok(CategoryReport::new(&category, &courses, now))
}

/// File name stem for a category report: lowercase ASCII words joined by `_`
#[must_use]
pub fn file_stem(category: &Category) -> String {
    let words: Vec<String> = category
        .name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
        .collect();
    if words.is_empty() {
        category.id.to_string()
    } else {
        words.join("_")
    }
}

fn format_hours(seconds: f64) -> String {
    format!("{:.1} h", seconds / 3600.0)
}

/// Render a report and write it to `output`, or to
/// `<reports_dir>/<file_stem>.<ext>` when no output path is given. Returns
/// the written path.
///
/// # Errors
/// Returns an error if rendering fails or the file cannot be written
pub fn write_report(
    report: &CategoryReport,
    format: ReportFormat,
    output: Option<&Path>,
    reports_dir: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            fs::create_dir_all(reports_dir)?;
            reports_dir.join(format!("{}.{}", report.file_stem, format.extension()))
        }
    };
    let content = format.render(report)?;
    fs::write(&path, content)?;
    Ok(path)
}
