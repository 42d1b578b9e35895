//! User model and the user-side enrollment mirror

use super::enrollment::COURSE_COMPLETE;
use super::EntityId;
use crate::core::outcome::Outcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Learner
    #[default]
    Student,
    /// Course author
    Instructor,
    /// Platform administrator
    Admin,
}

/// User-side copy of an enrollment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEnrollment {
    /// Enrolled course
    pub course: EntityId,
    /// When the user enrolled
    pub enrolled_at: DateTime<Utc>,
    /// Last mirrored progress
    #[serde(default)]
    pub progress: u8,
    /// Mirrored completion stamp
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Counts over a user's enrollments
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LearningSummary {
    /// Courses enrolled in
    pub enrolled: usize,
    /// Courses finished
    pub completed: usize,
    /// Courses started but not finished
    pub in_progress: usize,
    /// Mean progress over all enrollments
    pub average_progress: f64,
}

/// A platform user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User identity
    pub id: EntityId,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Account role
    #[serde(default)]
    pub role: Role,
    /// Mirrored enrollments
    #[serde(default)]
    pub enrolled_courses: Vec<CourseEnrollment>,
}

impl User {
    /// Create a user without enrollments
    #[must_use]
    pub fn new(name: String, email: String, role: Role) -> Self {
        Self {
            id: EntityId::new(),
            name,
            email,
            role,
            enrolled_courses: Vec::new(),
        }
    }

    /// The mirrored enrollment for a course
    #[must_use]
    pub fn course_enrollment(&self, course: EntityId) -> Option<&CourseEnrollment> {
        self.enrolled_courses.iter().find(|e| e.course == course)
    }

    /// Mirror an enrollment; enrolling twice changes nothing
    pub fn enroll_in_course(&mut self, course: EntityId) -> Outcome {
        if self.course_enrollment(course).is_some() {
            return Outcome::Unchanged;
        }
        self.enrolled_courses.push(CourseEnrollment {
            course,
            enrolled_at: Utc::now(),
            progress: 0,
            completed_at: None,
        });
        Outcome::Applied
    }

    /// Copy course-side progress onto the mirror, keeping the larger value
    pub fn sync_course_progress(
        &mut self,
        course: EntityId,
        progress: u8,
        completed_at: Option<DateTime<Utc>>,
    ) -> Outcome {
        let Some(entry) = self.enrolled_courses.iter_mut().find(|e| e.course == course) else {
            return Outcome::NotEnrolled;
        };
        let before = (entry.progress, entry.completed_at);
        entry.progress = entry.progress.max(progress);
        if entry.completed_at.is_none() {
            entry.completed_at = completed_at;
        }
        if before == (entry.progress, entry.completed_at) {
            Outcome::Unchanged
        } else {
            Outcome::Applied
        }
    }

    /// Summarize the user's learning activity
    #[must_use]
    pub fn learning_summary(&self) -> LearningSummary {
        let enrolled = self.enrolled_courses.len();
        let completed = self
            .enrolled_courses
            .iter()
            .filter(|e| e.progress == COURSE_COMPLETE)
            .count();
        let in_progress = self
            .enrolled_courses
            .iter()
            .filter(|e| e.progress > 0 && e.progress != COURSE_COMPLETE)
            .count();
        let average_progress = if enrolled == 0 {
            0.0
        } else {
            let total: u32 = self
                .enrolled_courses
                .iter()
                .map(|e| u32::from(e.progress))
                .sum();
            #[allow(clippy::cast_precision_loss)]
            let count = enrolled as f64;
            f64::from(total) / count
        };

        LearningSummary {
            enrolled,
            completed,
            in_progress,
            average_progress,
        }
    }
}
