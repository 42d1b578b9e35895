//! Enrollment, progress, rating and video handlers

use amal_stats::core::models::{EntityId, Vote};
use amal_stats::core::store::Store;
use amal_stats::core::{AcademyService, Mutation, Outcome};
use amal_stats::error;
use std::fmt::Display;

/// Turn a mutation result into a one-line status message
fn report<T, E: Display>(
    action: &str,
    result: Result<Mutation<T>, E>,
    detail: impl FnOnce(&T) -> String,
) -> Result<(), String> {
    match result {
        Ok(Mutation {
            outcome: Outcome::Applied,
            document,
        }) => {
            println!("✓ {action}: {}", detail(&document));
            Ok(())
        }
        Ok(Mutation { outcome, .. }) => {
            println!("✗ {action}: {outcome}");
            Ok(())
        }
        Err(e) => {
            error!("{action} failed: {e}");
            Err(format!("✗ {action} failed: {e}"))
        }
    }
}

/// Enroll a student in a course
pub fn enroll<S: Store>(
    service: &AcademyService<S>,
    course: EntityId,
    student: EntityId,
) -> Result<(), String> {
    report("Enroll", service.enroll(course, student), |c| {
        format!("{} now has {} enrollments", c.title, c.total_enrollments)
    })
}

/// Update a student's course progress
pub fn progress<S: Store>(
    service: &AcademyService<S>,
    course: EntityId,
    student: EntityId,
    value: u8,
) -> Result<(), String> {
    report("Progress", service.update_progress(course, student, value), |c| {
        c.enrollment(student).map_or_else(String::new, |e| {
            if e.is_complete() {
                format!("{}% (completed)", e.progress)
            } else {
                format!("{}%", e.progress)
            }
        })
    })
}

/// Rate a course
pub fn rate<S: Store>(
    service: &AcademyService<S>,
    course: EntityId,
    student: EntityId,
    stars: u8,
    review: Option<String>,
) -> Result<(), String> {
    report("Rate", service.add_rating(course, student, stars, review), |c| {
        format!(
            "{} averages {:.2} over {} ratings",
            c.title, c.ratings.average, c.ratings.count
        )
    })
}

/// Record video watch progress
pub fn watch<S: Store>(
    service: &AcademyService<S>,
    video: EntityId,
    student: EntityId,
    seconds: f64,
    completed: bool,
) -> Result<(), String> {
    report(
        "Watch",
        service.update_student_progress(video, student, seconds, completed),
        |v| {
            v.progress_for(student).map_or_else(String::new, |p| {
                let state = if p.is_completed { "completed" } else { "in progress" };
                format!("{:.0}s of {:.0}s, {state}", p.watch_time, v.duration)
            })
        },
    )
}

/// Toggle a like or dislike on a video
pub fn like<S: Store>(
    service: &AcademyService<S>,
    video: EntityId,
    student: EntityId,
    dislike: bool,
) -> Result<(), String> {
    let vote = if dislike { Vote::Dislike } else { Vote::Like };
    report("Vote", service.toggle_like(video, student, vote), |v| {
        format!(
            "{} likes, {} dislikes",
            v.analytics.likes, v.analytics.dislikes
        )
    })
}
