//! Course rating aggregate

use crate::core::error::RatingError;
use serde::{Deserialize, Serialize};

/// A validated star rating (1 to 5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Stars(u8);

impl Stars {
    /// Lowest accepted rating
    pub const MIN: u8 = 1;
    /// Highest accepted rating
    pub const MAX: u8 = 5;

    /// Validate a raw rating
    ///
    /// # Errors
    /// Returns [`RatingError::OutOfRange`] for values outside 1-5
    pub const fn new(value: u8) -> Result<Self, RatingError> {
        if value >= Self::MIN && value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(RatingError::OutOfRange(value))
        }
    }

    /// Raw star count
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    const fn bucket(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<u8> for Stars {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Stars> for u8 {
    fn from(stars: Stars) -> Self {
        stars.0
    }
}

/// Number of ratings per star value, index 0 holds one-star ratings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingDistribution([u32; 5]);

impl RatingDistribution {
    /// Ratings recorded for a star value
    #[must_use]
    pub const fn count(&self, stars: Stars) -> u32 {
        self.0[stars.bucket()]
    }

    /// Total across all buckets
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Sum of `star * count`
    #[must_use]
    pub fn weighted_sum(&self) -> u64 {
        self.0
            .iter()
            .zip(1u64..)
            .map(|(&count, star)| star * u64::from(count))
            .sum()
    }

    fn increment(&mut self, stars: Stars) {
        self.0[stars.bucket()] += 1;
    }

    fn decrement(&mut self, stars: Stars) {
        let bucket = &mut self.0[stars.bucket()];
        *bucket = bucket.saturating_sub(1);
    }
}

/// Rating summary for a course, recomputed from the distribution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Mean star value (0 when there are no ratings)
    pub average: f64,
    /// Number of students who rated
    pub count: u32,
    /// Ratings per star value
    pub distribution: RatingDistribution,
}

impl RatingSummary {
    /// Record a rating, replacing `previous` when the student already rated.
    ///
    /// A re-rate moves one unit between buckets and leaves `count` alone.
    pub fn record(&mut self, previous: Option<Stars>, rating: Stars) {
        match previous {
            Some(old) => self.distribution.decrement(old),
            None => self.count += 1,
        }
        self.distribution.increment(rating);
        self.recompute_average();
    }

    /// Recompute `average` from the distribution
    pub fn recompute_average(&mut self) {
        self.average = if self.count == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let sum = self.distribution.weighted_sum() as f64;
            sum / f64::from(self.count)
        };
    }

    /// Whether `count` agrees with the distribution
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.count == self.distribution.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stars(value: u8) -> Stars {
        Stars::new(value).unwrap()
    }

    #[test]
    fn test_stars_bounds() {
        assert!(Stars::new(0).is_err());
        assert!(Stars::new(6).is_err());
        assert_eq!(Stars::new(5).unwrap().get(), 5);
    }

    #[test]
    fn test_first_rating() {
        let mut summary = RatingSummary::default();
        summary.record(None, stars(4));

        assert_eq!(summary.count, 1);
        assert_eq!(summary.distribution.count(stars(4)), 1);
        assert!((summary.average - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rerate_moves_bucket() {
        let mut summary = RatingSummary::default();
        summary.record(None, stars(5));
        summary.record(None, stars(1));
        summary.record(Some(stars(1)), stars(3));

        assert_eq!(summary.count, 2);
        assert_eq!(summary.distribution.count(stars(1)), 0);
        assert_eq!(summary.distribution.count(stars(3)), 1);
        assert!((summary.average - 4.0).abs() < f64::EPSILON);
        assert!(summary.is_consistent());
    }

    #[test]
    fn test_empty_average_is_zero() {
        let mut summary = RatingSummary::default();
        summary.recompute_average();
        assert!(summary.average.abs() < f64::EPSILON);
    }
}
