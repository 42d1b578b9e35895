//! Course model

use super::{EntityId, Enrollment, RatingSummary, Stars, StudentId};
use crate::core::outcome::Outcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication state of a course
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    /// Being authored; invisible to students
    #[default]
    Draft,
    /// Listed in the catalog
    Published,
    /// Retired from the catalog
    Archived,
}

/// A course and its embedded enrollment records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Course identity
    pub id: EntityId,

    /// English title
    pub title: String,

    /// Arabic title
    #[serde(default)]
    pub title_ar: Option<String>,

    /// Teaching instructor
    pub instructor: EntityId,

    /// Owning category
    pub category: EntityId,

    /// Publication state
    #[serde(default)]
    pub status: CourseStatus,

    /// Soft-delete flag
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// One record per enrolled student
    #[serde(default)]
    pub enrolled_students: Vec<Enrollment>,

    /// Denormalized enrollment counter
    #[serde(default)]
    pub total_enrollments: u32,

    /// Rating aggregate
    #[serde(default)]
    pub ratings: RatingSummary,

    /// Seconds watched across the course's videos (see `refresh_course_watch_time`)
    #[serde(default)]
    pub total_watch_time: f64,
}

const fn default_active() -> bool {
    true
}

impl Course {
    /// Create an empty draft course
    ///
    /// # Arguments
    /// * `title` - English title
    /// * `instructor` - Teaching instructor
    /// * `category` - Owning category
    #[must_use]
    pub fn new(title: String, instructor: EntityId, category: EntityId) -> Self {
        Self {
            id: EntityId::new(),
            title,
            title_ar: None,
            instructor,
            category,
            status: CourseStatus::Draft,
            is_active: true,
            enrolled_students: Vec::new(),
            total_enrollments: 0,
            ratings: RatingSummary::default(),
            total_watch_time: 0.0,
        }
    }

    /// Whether the course takes part in category rollups
    #[must_use]
    pub fn is_listed(&self) -> bool {
        self.status == CourseStatus::Published && self.is_active
    }

    /// Look up a student's enrollment record
    #[must_use]
    pub fn enrollment(&self, student: StudentId) -> Option<&Enrollment> {
        self.enrolled_students.iter().find(|e| e.student == student)
    }

    fn enrollment_mut(&mut self, student: StudentId) -> Option<&mut Enrollment> {
        self.enrolled_students
            .iter_mut()
            .find(|e| e.student == student)
    }

    /// Whether the student has an enrollment record
    #[must_use]
    pub fn is_enrolled(&self, student: StudentId) -> bool {
        self.enrollment(student).is_some()
    }

    /// Enroll a student; enrolling twice changes nothing
    pub fn enroll(&mut self, student: StudentId) -> Outcome {
        self.enroll_at(student, Utc::now())
    }

    /// [`enroll`](Self::enroll) with an explicit timestamp
    pub fn enroll_at(&mut self, student: StudentId, now: DateTime<Utc>) -> Outcome {
        if self.is_enrolled(student) {
            return Outcome::Unchanged;
        }
        self.enrolled_students.push(Enrollment::new(student, now));
        self.total_enrollments += 1;
        Outcome::Applied
    }

    /// Raise a student's progress; progress never decreases
    pub fn update_progress(&mut self, student: StudentId, progress: u8) -> Outcome {
        self.update_progress_at(student, progress, Utc::now())
    }

    /// [`update_progress`](Self::update_progress) with an explicit timestamp
    pub fn update_progress_at(
        &mut self,
        student: StudentId,
        progress: u8,
        now: DateTime<Utc>,
    ) -> Outcome {
        match self.enrollment_mut(student) {
            None => Outcome::NotEnrolled,
            Some(enrollment) => {
                if enrollment.advance(progress, now) {
                    Outcome::Applied
                } else {
                    Outcome::Unchanged
                }
            }
        }
    }

    /// Rate the course (or change an earlier rating) and recompute the summary
    pub fn add_rating(
        &mut self,
        student: StudentId,
        rating: Stars,
        review: Option<String>,
    ) -> Outcome {
        let Some(enrollment) = self.enrollment_mut(student) else {
            return Outcome::NotEnrolled;
        };
        let previous = enrollment.rating.replace(rating);
        enrollment.review = review;
        self.ratings.record(previous, rating);
        Outcome::Applied
    }

    /// Number of enrollments whose progress reached 100
    #[must_use]
    pub fn completed_enrollments(&self) -> usize {
        self.enrolled_students
            .iter()
            .filter(|e| e.is_complete())
            .count()
    }

    /// Completed enrollments as a percentage of the enrollment counter
    #[must_use]
    pub fn completion_rate(&self) -> f64 {
        let total = usize::try_from(self.total_enrollments).unwrap_or(usize::MAX);
        percentage(self.completed_enrollments(), total)
    }

    /// Mean progress over all enrollments
    #[must_use]
    pub fn average_progress(&self) -> f64 {
        if self.enrolled_students.is_empty() {
            return 0.0;
        }
        let total: u32 = self
            .enrolled_students
            .iter()
            .map(|e| u32::from(e.progress))
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let count = self.enrolled_students.len() as f64;
        f64::from(total) / count
    }
}

/// `100 * part / whole`, 0 when `whole` is 0
#[allow(clippy::cast_precision_loss)]
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}
