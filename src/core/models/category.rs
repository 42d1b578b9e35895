//! Category model and the category statistics rollup

use super::course::percentage;
use super::{Course, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Statistics derived from a category's listed courses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Published, active courses in the category
    pub total_courses: u32,
    /// Sum of course enrollment counters
    pub total_students: u64,
    /// Distinct instructors teaching those courses
    pub total_instructors: u32,
    /// Rating average weighted by each course's rating count
    pub average_rating: f64,
    /// Seconds watched across the courses
    pub total_watch_time: f64,
    /// Percentage of enrollments that reached 100% progress
    pub completion_rate: f64,
    /// When the rollup last ran
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl CategoryStats {
    /// Compute statistics from scratch over `courses`.
    ///
    /// Courses that are not published and active are skipped, so callers may
    /// pass an unfiltered list.
    #[must_use]
    pub fn compute<'a, I>(courses: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a Course>,
    {
        let mut stats = Self {
            last_updated: Some(now),
            ..Self::default()
        };
        let mut instructors = HashSet::new();
        let mut rating_sum = 0.0;
        let mut rating_count = 0u64;
        let mut completed = 0usize;
        let mut enrollments = 0u64;

        for course in courses.into_iter().filter(|c| c.is_listed()) {
            stats.total_courses += 1;
            stats.total_students += u64::from(course.total_enrollments);
            stats.total_watch_time += course.total_watch_time;
            instructors.insert(course.instructor);

            rating_sum += course.ratings.average * f64::from(course.ratings.count);
            rating_count += u64::from(course.ratings.count);

            completed += course.completed_enrollments();
            enrollments += u64::from(course.total_enrollments);
        }

        stats.total_instructors = u32::try_from(instructors.len()).unwrap_or(u32::MAX);
        stats.average_rating = if rating_count == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let count = rating_count as f64;
            rating_sum / count
        };
        stats.completion_rate =
            percentage(completed, usize::try_from(enrollments).unwrap_or(usize::MAX));
        stats
    }
}

/// A course category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category identity
    pub id: EntityId,
    /// English name
    pub name: String,
    /// Arabic name
    #[serde(default)]
    pub name_ar: Option<String>,
    /// Soft-delete flag
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Rolled-up statistics
    #[serde(default)]
    pub stats: CategoryStats,
}

const fn default_active() -> bool {
    true
}

impl Category {
    /// Create a category with zeroed statistics
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            id: EntityId::new(),
            name,
            name_ar: None,
            is_active: true,
            stats: CategoryStats::default(),
        }
    }

    /// Replace the statistics with a full recompute over this category's courses.
    ///
    /// Courses from other categories are ignored.
    pub fn update_stats(&mut self, courses: &[Course]) {
        let id = self.id;
        self.stats =
            CategoryStats::compute(courses.iter().filter(|c| c.category == id), Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{CourseStatus, Stars};

    fn listed_course(category: EntityId, instructor: EntityId) -> Course {
        let mut course = Course::new("Course".to_string(), instructor, category);
        course.status = CourseStatus::Published;
        course
    }

    fn enroll_many(course: &mut Course, total: usize, completed: usize) {
        for index in 0..total {
            let student = EntityId::new();
            course.enroll(student);
            if index < completed {
                course.update_progress(student, 100);
            }
        }
    }

    #[test]
    fn test_completion_rollup() {
        let mut category = Category::new("Programming".to_string());
        let instructor = EntityId::new();

        let mut first = listed_course(category.id, instructor);
        enroll_many(&mut first, 10, 5);
        let mut second = listed_course(category.id, instructor);
        enroll_many(&mut second, 20, 10);

        category.update_stats(&[first, second]);

        assert_eq!(category.stats.total_courses, 2);
        assert_eq!(category.stats.total_students, 30);
        assert_eq!(category.stats.total_instructors, 1);
        assert!((category.stats.completion_rate - 50.0).abs() < f64::EPSILON);
        assert!(category.stats.last_updated.is_some());
    }

    #[test]
    fn test_weighted_rating() {
        let mut category = Category::new("Languages".to_string());

        let mut first = listed_course(category.id, EntityId::new());
        let mut second = listed_course(category.id, EntityId::new());
        for (course, ratings) in [(&mut first, vec![5, 5, 5]), (&mut second, vec![1])] {
            for value in ratings {
                let student = EntityId::new();
                course.enroll(student);
                course.add_rating(student, Stars::new(value).unwrap(), None);
            }
        }

        category.update_stats(&[first, second]);

        assert!((category.stats.average_rating - 4.0).abs() < f64::EPSILON);
        assert_eq!(category.stats.total_instructors, 2);
    }

    #[test]
    fn test_unlisted_and_foreign_courses_ignored() {
        let mut category = Category::new("Design".to_string());

        let draft = Course::new("Draft".to_string(), EntityId::new(), category.id);
        let mut inactive = listed_course(category.id, EntityId::new());
        inactive.is_active = false;
        let foreign = listed_course(EntityId::new(), EntityId::new());

        category.update_stats(&[draft, inactive, foreign]);

        assert_eq!(category.stats.total_courses, 0);
        assert!(category.stats.average_rating.abs() < f64::EPSILON);
        assert!(category.stats.completion_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_above_hundred_not_completed() {
        let mut category = Category::new("Physics".to_string());
        let mut course = listed_course(category.id, EntityId::new());
        let student = EntityId::new();
        course.enroll(student);
        course.update_progress(student, 150);

        assert!(course.enrollment(student).unwrap().completed_at.is_none());
        category.update_stats(&[course]);
        assert!(category.stats.completion_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn test_completion_rate_uses_enrollment_counter() {
        let mut category = Category::new("History".to_string());
        let mut course = listed_course(category.id, EntityId::new());
        enroll_many(&mut course, 2, 1);
        // Imported document whose counter includes enrollments without records
        course.total_enrollments = 4;

        category.update_stats(&[course]);
        assert_eq!(category.stats.total_students, 4);
        assert!((category.stats.completion_rate - 25.0).abs() < f64::EPSILON);
    }
}
