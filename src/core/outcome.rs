//! Explicit results for mutations that used to no-op silently

use serde::Serialize;
use std::fmt;

/// What a mutation did to its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The document changed
    Applied,
    /// Nothing needed doing (e.g. enrolling a student twice)
    Unchanged,
    /// The student has no enrollment record on the course
    NotEnrolled,
    /// An embedded record the mutation targets does not exist
    NotFound,
    /// The input was unusable (e.g. a non-finite watch position); nothing changed
    Rejected,
}

impl Outcome {
    /// Whether the document was modified and should be persisted
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Applied => "applied",
            Self::Unchanged => "unchanged",
            Self::NotEnrolled => "student not enrolled",
            Self::NotFound => "record not found",
            Self::Rejected => "input rejected",
        };
        f.write_str(text)
    }
}

/// A mutation outcome together with the document as stored afterwards.
#[derive(Debug, Clone)]
pub struct Mutation<T> {
    /// What happened
    pub outcome: Outcome,
    /// The document after the mutation
    pub document: T,
}

impl<T> Mutation<T> {
    /// Pair an outcome with its document
    #[must_use]
    pub const fn new(outcome: Outcome, document: T) -> Self {
        Self { outcome, document }
    }
}
