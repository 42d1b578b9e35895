//! Report formats and their templates

use super::CategoryReport;
use askama::Template;
use std::fmt;
use std::str::FromStr;

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Markdown tables
    Markdown,
    /// Standalone HTML page
    Html,
}

#[derive(Template)]
#[template(path = "category_report.md")]
struct MarkdownTemplate<'a> {
    report: &'a CategoryReport,
}

#[derive(Template)]
#[template(path = "category_report.html")]
struct HtmlTemplate<'a> {
    report: &'a CategoryReport,
}

impl ReportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }

    /// Render a report in this format
    ///
    /// # Errors
    /// Returns an error if template rendering fails
    pub fn render(self, report: &CategoryReport) -> Result<String, askama::Error> {
        match self {
            Self::Markdown => MarkdownTemplate { report }.render(),
            Self::Html => HtmlTemplate { report }.render(),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "html" | "htm" => Ok(Self::Html),
            _ => Err(format!("Unknown report format: {s}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Html => write!(f, "html"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Category, Course, CourseStatus, EntityId};
    use chrono::Utc;

    fn sample_report() -> CategoryReport {
        let mut category = Category::new("Programming".to_string());
        let mut course = Course::new(
            "Rust <Basics>".to_string(),
            EntityId::new(),
            category.id,
        );
        course.status = CourseStatus::Published;
        course.enroll(EntityId::new());
        category.update_stats(std::slice::from_ref(&course));
        CategoryReport::new(&category, &[course], Utc::now())
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("MD".parse::<ReportFormat>(), Ok(ReportFormat::Markdown));
        assert_eq!("htm".parse::<ReportFormat>(), Ok(ReportFormat::Html));
        assert!("pdf".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Html.to_string(), "html");
    }

    #[test]
    fn test_markdown_render() {
        let rendered = ReportFormat::Markdown.render(&sample_report()).unwrap();

        assert!(rendered.contains("# Programming"));
        assert!(rendered.contains("| Rust <Basics> | 1 | 0.0% |"));
    }

    #[test]
    fn test_html_escapes_titles() {
        let rendered = ReportFormat::Html.render(&sample_report()).unwrap();

        assert!(rendered.contains("<table"));
        assert!(rendered.contains("Rust &lt;Basics&gt;"));
    }
}
