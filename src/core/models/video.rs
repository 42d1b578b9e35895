//! Video model: per-student watch progress, engagement and analytics

use super::{EntityId, StudentId};
use crate::core::outcome::Outcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Fraction of the duration a student must reach for the video to count as watched
pub const COMPLETION_RATIO: f64 = 0.9;

/// A saved position in the video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Position in seconds
    pub timestamp: f64,
    /// Student's note
    #[serde(default)]
    pub note: String,
    /// When it was saved
    pub created_at: DateTime<Utc>,
}

/// A graded quiz attempt attached to the video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    /// Correct answers
    pub score: u32,
    /// Questions asked
    pub total: u32,
    /// When the attempt was submitted
    pub attempted_at: DateTime<Utc>,
}

impl QuizAttempt {
    /// Score as a percentage (0 for an empty quiz)
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * f64::from(self.score) / f64::from(self.total)
        }
    }
}

/// One student's viewing state for a video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProgress {
    /// The learner
    pub student: StudentId,
    /// Furthest point reached, in seconds
    #[serde(default)]
    pub watch_time: f64,
    /// Last progress report
    pub last_watched_at: DateTime<Utc>,
    /// Set once; never cleared
    #[serde(default)]
    pub is_completed: bool,
    /// Stamped on the transition to completed
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Saved positions
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    /// Quiz history
    #[serde(default)]
    pub quiz_attempts: Vec<QuizAttempt>,
}

impl StudentProgress {
    fn new(student: StudentId, now: DateTime<Utc>) -> Self {
        Self {
            student,
            watch_time: 0.0,
            last_watched_at: now,
            is_completed: false,
            completed_at: None,
            bookmarks: Vec::new(),
            quiz_attempts: Vec::new(),
        }
    }

    /// Best quiz percentage so far
    #[must_use]
    pub fn best_quiz_score(&self) -> Option<f64> {
        self.quiz_attempts
            .iter()
            .map(QuizAttempt::percentage)
            .reduce(f64::max)
    }
}

/// A student's vote on a video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    /// Thumbs up
    Like,
    /// Thumbs down
    Dislike,
}

/// Reply to a comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// Who wrote it
    pub author: EntityId,
    /// Body text
    pub text: String,
    /// When it was posted
    pub created_at: DateTime<Utc>,
}

/// Top-level comment on a video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment identity
    pub id: EntityId,
    /// Who wrote it
    pub author: EntityId,
    /// Body text
    pub text: String,
    /// When it was posted
    pub created_at: DateTime<Utc>,
    /// Students who liked the comment
    #[serde(default)]
    pub likes: BTreeSet<StudentId>,
    /// Threaded replies
    #[serde(default)]
    pub replies: Vec<Reply>,
}

/// Denormalized engagement counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoAnalytics {
    /// Progress reports received
    pub total_views: u64,
    /// Sum over students of the furthest point reached, in seconds
    pub total_watch_time: f64,
    /// Students currently liking the video
    pub likes: u32,
    /// Students currently disliking the video
    pub dislikes: u32,
    /// Top-level comments posted
    pub comments: u32,
}

/// A lesson video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// Video identity
    pub id: EntityId,
    /// Course the video belongs to
    pub course: EntityId,
    /// Display title
    pub title: String,
    /// Length in seconds
    pub duration: f64,
    /// Per-student viewing state
    #[serde(default)]
    pub student_progress: Vec<StudentProgress>,
    /// One vote per student
    #[serde(default)]
    pub votes: BTreeMap<StudentId, Vote>,
    /// Discussion thread
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Engagement counters
    #[serde(default)]
    pub analytics: VideoAnalytics,
}

impl Video {
    /// Create a video with no viewers
    #[must_use]
    pub fn new(course: EntityId, title: String, duration: f64) -> Self {
        Self {
            id: EntityId::new(),
            course,
            title,
            duration,
            student_progress: Vec::new(),
            votes: BTreeMap::new(),
            comments: Vec::new(),
            analytics: VideoAnalytics::default(),
        }
    }

    /// A student's viewing state
    #[must_use]
    pub fn progress_for(&self, student: StudentId) -> Option<&StudentProgress> {
        self.student_progress.iter().find(|p| p.student == student)
    }

    fn progress_entry(&mut self, student: StudentId, now: DateTime<Utc>) -> &mut StudentProgress {
        let index = match self
            .student_progress
            .iter()
            .position(|p| p.student == student)
        {
            Some(index) => index,
            None => {
                self.student_progress
                    .push(StudentProgress::new(student, now));
                self.student_progress.len() - 1
            }
        };
        &mut self.student_progress[index]
    }

    /// Record a watch-progress report for a student
    ///
    /// `watch_time` is the furthest position the player reported; earlier
    /// positions (seeks, replays) never lower the stored value. The video
    /// completes once 90% of the duration is reached or `completed` is set.
    /// Negative or non-finite positions are rejected without touching the
    /// document.
    pub fn update_student_progress(
        &mut self,
        student: StudentId,
        watch_time: f64,
        completed: bool,
    ) -> Outcome {
        self.update_student_progress_at(student, watch_time, completed, Utc::now())
    }

    /// [`update_student_progress`](Self::update_student_progress) with an explicit timestamp
    pub fn update_student_progress_at(
        &mut self,
        student: StudentId,
        watch_time: f64,
        completed: bool,
        now: DateTime<Utc>,
    ) -> Outcome {
        if !is_valid_position(watch_time) {
            return Outcome::Rejected;
        }
        let duration = self.duration;
        let entry = self.progress_entry(student, now);

        let previous = entry.watch_time;
        entry.watch_time = previous.max(watch_time);
        entry.last_watched_at = now;

        let reached = duration > 0.0 && entry.watch_time / duration >= COMPLETION_RATIO;
        if (completed || reached) && !entry.is_completed {
            entry.is_completed = true;
            entry.completed_at = Some(now);
        }
        let advance = entry.watch_time - previous;

        self.analytics.total_views += 1;
        self.analytics.total_watch_time += advance;
        Outcome::Applied
    }

    /// Save a bookmark, creating the student's progress record if needed
    pub fn add_bookmark(&mut self, student: StudentId, timestamp: f64, note: String) -> Outcome {
        if !is_valid_position(timestamp) {
            return Outcome::Rejected;
        }
        let now = Utc::now();
        self.progress_entry(student, now).bookmarks.push(Bookmark {
            timestamp,
            note,
            created_at: now,
        });
        Outcome::Applied
    }

    /// Store a quiz attempt for the student
    pub fn record_quiz_attempt(&mut self, student: StudentId, score: u32, total: u32) -> Outcome {
        let now = Utc::now();
        self.progress_entry(student, now)
            .quiz_attempts
            .push(QuizAttempt {
                score,
                total,
                attempted_at: now,
            });
        Outcome::Applied
    }

    /// Cast, switch or withdraw a student's vote
    ///
    /// Repeating the current vote withdraws it. Like and dislike counters are
    /// recounted from the vote ledger afterwards.
    pub fn toggle_like(&mut self, student: StudentId, vote: Vote) -> Outcome {
        if self.votes.get(&student) == Some(&vote) {
            self.votes.remove(&student);
        } else {
            self.votes.insert(student, vote);
        }
        self.recount_votes();
        Outcome::Applied
    }

    /// The student's current vote
    #[must_use]
    pub fn vote_of(&self, student: StudentId) -> Option<Vote> {
        self.votes.get(&student).copied()
    }

    fn recount_votes(&mut self) {
        let (likes, dislikes) =
            self.votes
                .values()
                .fold((0u32, 0u32), |(likes, dislikes), vote| match vote {
                    Vote::Like => (likes + 1, dislikes),
                    Vote::Dislike => (likes, dislikes + 1),
                });
        self.analytics.likes = likes;
        self.analytics.dislikes = dislikes;
    }

    /// Post a top-level comment and return its id
    pub fn add_comment(&mut self, author: EntityId, text: String) -> EntityId {
        let comment = Comment {
            id: EntityId::new(),
            author,
            text,
            created_at: Utc::now(),
            likes: BTreeSet::new(),
            replies: Vec::new(),
        };
        let id = comment.id;
        self.comments.push(comment);
        self.analytics.comments += 1;
        id
    }

    fn comment_mut(&mut self, comment: EntityId) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| c.id == comment)
    }

    /// Reply to an existing comment
    pub fn add_reply(&mut self, comment: EntityId, author: EntityId, text: String) -> Outcome {
        let Some(target) = self.comment_mut(comment) else {
            return Outcome::NotFound;
        };
        target.replies.push(Reply {
            author,
            text,
            created_at: Utc::now(),
        });
        Outcome::Applied
    }

    /// Like a comment; each student counts once
    pub fn like_comment(&mut self, comment: EntityId, student: StudentId) -> Outcome {
        match self.comment_mut(comment) {
            None => Outcome::NotFound,
            Some(target) => {
                if target.likes.insert(student) {
                    Outcome::Applied
                } else {
                    Outcome::Unchanged
                }
            }
        }
    }

    /// Students who completed the video
    #[must_use]
    pub fn completed_viewers(&self) -> usize {
        self.student_progress
            .iter()
            .filter(|p| p.is_completed)
            .count()
    }
}

/// Whether `seconds` is a usable playback position
#[must_use]
pub fn is_valid_position(seconds: f64) -> bool {
    seconds.is_finite() && seconds >= 0.0
}
