//! Document models for Amal Academy statistics

pub mod category;
pub mod course;
pub mod enrollment;
pub mod id;
pub mod rating;
pub mod user;
pub mod video;

pub use category::{Category, CategoryStats};
pub use course::{Course, CourseStatus};
pub use enrollment::Enrollment;
pub use id::{EntityId, StudentId};
pub use rating::{RatingDistribution, RatingSummary, Stars};
pub use user::{CourseEnrollment, LearningSummary, Role, User};
pub use video::{StudentProgress, Video, VideoAnalytics, Vote};
