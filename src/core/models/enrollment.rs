//! Enrollment records embedded in courses

use super::{Stars, StudentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Progress value at which a course counts as completed
pub const COURSE_COMPLETE: u8 = 100;

/// One student's relationship to a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    /// The learner
    pub student: StudentId,

    /// When the student enrolled (never changes)
    pub enrolled_at: DateTime<Utc>,

    /// Percentage of the course completed; only ever grows
    #[serde(default)]
    pub progress: u8,

    /// Set the first time progress reaches 100
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    /// Star rating, at most one per student
    #[serde(default)]
    pub rating: Option<Stars>,

    /// Free-text review
    #[serde(default)]
    pub review: Option<String>,
}

impl Enrollment {
    /// Fresh enrollment with no progress
    #[must_use]
    pub const fn new(student: StudentId, enrolled_at: DateTime<Utc>) -> Self {
        Self {
            student,
            enrolled_at,
            progress: 0,
            completed_at: None,
            rating: None,
            review: None,
        }
    }

    /// Raise progress to `progress` if it is higher, stamping completion once.
    ///
    /// Returns `true` when anything changed.
    pub fn advance(&mut self, progress: u8, now: DateTime<Utc>) -> bool {
        let before = (self.progress, self.completed_at);
        self.progress = self.progress.max(progress);
        if self.is_complete() && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
        before != (self.progress, self.completed_at)
    }

    /// Whether progress is exactly 100
    ///
    /// Progress is not bounds-checked, so values above 100 do not count.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.progress == COURSE_COMPLETE
    }
}
