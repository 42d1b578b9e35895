//! Mutation entry points
//!
//! Each entry point performs one atomic read-modify-write against a single
//! document through [`Store::update`]. Enrollment and progress are mirrored
//! onto the user document in a second, independent write; a failure there
//! does not undo the course write.

use crate::core::error::{ServiceError, StoreError};
use crate::core::models::{
    Category, Course, EntityId, Stars, StudentId, User, Video, Vote,
};
use crate::core::outcome::{Mutation, Outcome};
use crate::core::store::{Document, Store};
use crate::{debug, info, warn};

/// Service wrapping a [`Store`] with the statistics mutations
#[derive(Debug)]
pub struct AcademyService<S> {
    store: S,
}

impl<S: Store> AcademyService<S> {
    /// Wrap a store
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn mutate<T, F>(&self, id: EntityId, mutate: F) -> Result<Mutation<T>, StoreError>
    where
        T: Document,
        F: FnOnce(&mut T) -> Outcome,
    {
        self.store
            .update(id, mutate)?
            .map(|(outcome, document)| Mutation::new(outcome, document))
            .ok_or(StoreError::NotFound {
                collection: T::COLLECTION,
                id,
            })
    }

    /// Enroll a student in a course and mirror it on the user document
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the course does not exist, or any
    /// storage failure
    pub fn enroll(&self, course: EntityId, student: StudentId) -> Result<Mutation<Course>, StoreError> {
        let result = self.mutate(course, |c: &mut Course| c.enroll(student))?;
        debug!("enroll course={course} student={student}: {}", result.outcome);

        let mirrored = self
            .store
            .update(student, |u: &mut User| u.enroll_in_course(course))?;
        if mirrored.is_none() {
            warn!("No user document for student {student}; enrollment not mirrored");
        }
        Ok(result)
    }

    /// Raise a student's course progress
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the course does not exist, or any
    /// storage failure
    pub fn update_progress(
        &self,
        course: EntityId,
        student: StudentId,
        progress: u8,
    ) -> Result<Mutation<Course>, StoreError> {
        let result = self.mutate(course, |c: &mut Course| c.update_progress(student, progress))?;
        debug!(
            "progress course={course} student={student} value={progress}: {}",
            result.outcome
        );

        if let Some(enrollment) = result.document.enrollment(student) {
            let (value, completed_at) = (enrollment.progress, enrollment.completed_at);
            let mirrored = self.store.update(student, |u: &mut User| {
                u.sync_course_progress(course, value, completed_at)
            })?;
            if mirrored.is_none() {
                warn!("No user document for student {student}; progress not mirrored");
            }
        }
        Ok(result)
    }

    /// Rate a course on behalf of an enrolled student
    ///
    /// # Errors
    /// Returns [`ServiceError::Rating`] for ratings outside 1-5, or a store
    /// error if the course does not exist or cannot be saved
    pub fn add_rating(
        &self,
        course: EntityId,
        student: StudentId,
        rating: u8,
        review: Option<String>,
    ) -> Result<Mutation<Course>, ServiceError> {
        let stars = Stars::new(rating)?;
        let result = self.mutate(course, |c: &mut Course| c.add_rating(student, stars, review))?;
        debug!(
            "rating course={course} student={student} stars={rating}: {} (avg {:.2} over {})",
            result.outcome, result.document.ratings.average, result.document.ratings.count
        );
        Ok(result)
    }

    /// Record a video watch-progress report
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the video does not exist, or any
    /// storage failure
    pub fn update_student_progress(
        &self,
        video: EntityId,
        student: StudentId,
        watch_time: f64,
        completed: bool,
    ) -> Result<Mutation<Video>, StoreError> {
        let result = self.mutate(video, |v: &mut Video| {
            v.update_student_progress(student, watch_time, completed)
        })?;
        debug!("watch video={video} student={student} time={watch_time}: {}", result.outcome);
        Ok(result)
    }

    /// Bookmark a position in a video
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the video does not exist, or any
    /// storage failure
    pub fn add_bookmark(
        &self,
        video: EntityId,
        student: StudentId,
        timestamp: f64,
        note: String,
    ) -> Result<Mutation<Video>, StoreError> {
        self.mutate(video, |v: &mut Video| v.add_bookmark(student, timestamp, note))
    }

    /// Cast, switch or withdraw a vote on a video
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the video does not exist, or any
    /// storage failure
    pub fn toggle_like(
        &self,
        video: EntityId,
        student: StudentId,
        vote: Vote,
    ) -> Result<Mutation<Video>, StoreError> {
        self.mutate(video, |v: &mut Video| v.toggle_like(student, vote))
    }

    /// Post a comment; the new comment id is returned alongside the video
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the video does not exist, or any
    /// storage failure
    pub fn add_comment(
        &self,
        video: EntityId,
        author: EntityId,
        text: String,
    ) -> Result<(EntityId, Video), StoreError> {
        self.store
            .update(video, |v: &mut Video| v.add_comment(author, text))?
            .ok_or(StoreError::NotFound {
                collection: Video::COLLECTION,
                id: video,
            })
    }

    /// Reply to a comment
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the video does not exist, or any
    /// storage failure
    pub fn add_reply(
        &self,
        video: EntityId,
        comment: EntityId,
        author: EntityId,
        text: String,
    ) -> Result<Mutation<Video>, StoreError> {
        self.mutate(video, |v: &mut Video| v.add_reply(comment, author, text))
    }

    /// Like a comment
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the video does not exist, or any
    /// storage failure
    pub fn like_comment(
        &self,
        video: EntityId,
        comment: EntityId,
        student: StudentId,
    ) -> Result<Mutation<Video>, StoreError> {
        self.mutate(video, |v: &mut Video| v.like_comment(comment, student))
    }

    /// Store a quiz attempt
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the video does not exist, or any
    /// storage failure
    pub fn record_quiz_attempt(
        &self,
        video: EntityId,
        student: StudentId,
        score: u32,
        total: u32,
    ) -> Result<Mutation<Video>, StoreError> {
        self.mutate(video, |v: &mut Video| v.record_quiz_attempt(student, score, total))
    }

    /// Sum the watch time of a course's videos into the course document
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the course does not exist, or any
    /// storage failure
    pub fn refresh_course_watch_time(&self, course: EntityId) -> Result<Mutation<Course>, StoreError> {
        let videos: Vec<Video> = self.store.find(|v: &Video| v.course == course)?;
        let total: f64 = videos.iter().map(|v| v.analytics.total_watch_time).sum();

        self.mutate(course, |c: &mut Course| {
            if (c.total_watch_time - total).abs() < f64::EPSILON {
                Outcome::Unchanged
            } else {
                c.total_watch_time = total;
                Outcome::Applied
            }
        })
    }

    /// Recompute a category's statistics from its published, active courses
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the category does not exist, or any
    /// storage failure
    pub fn update_category_stats(&self, category: EntityId) -> Result<Category, StoreError> {
        let courses: Vec<Course> = self
            .store
            .find(|c: &Course| c.category == category && c.is_listed())?;

        let result = self.mutate(category, |cat: &mut Category| {
            cat.update_stats(&courses);
            Outcome::Applied
        })?;

        let stats = &result.document.stats;
        info!(
            "Category '{}' rollup: {} courses, {} students, rating {:.2}, completion {:.1}%",
            result.document.name,
            stats.total_courses,
            stats.total_students,
            stats.average_rating,
            stats.completion_rate
        );
        Ok(result.document)
    }

    /// Refresh watch time for every course in a category, then roll it up
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the category does not exist, or any
    /// storage failure
    pub fn rollup_category(&self, category: EntityId) -> Result<Category, StoreError> {
        let members: Vec<Course> = self.store.find(|c: &Course| c.category == category)?;
        for course in &members {
            self.refresh_course_watch_time(course.id)?;
        }
        self.update_category_stats(category)
    }
}
