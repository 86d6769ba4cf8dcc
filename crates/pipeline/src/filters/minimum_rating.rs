//! Filter on IMDb rating.
//!
//! Backs both the "Top Rated" quick filter (a lower bound only) and an
//! explicit rating range.

use crate::traits::Filter;
use data_loader::FilmRecord;

/// Keeps films whose rating lies within the configured bounds.
///
/// ## Algorithm
/// For each film:
/// 1. Check `imdb_rating >= min` (if a minimum is set)
/// 2. Check `imdb_rating <= max` (if a maximum is set)
/// 3. Keep only if both conditions hold
pub struct RatingFilter {
    min: Option<f32>,
    max: Option<f32>,
}

impl RatingFilter {
    /// Ratings of at least `min`
    pub fn at_least(min: f32) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Ratings within `[min, max]`, inclusive
    pub fn between(min: f32, max: f32) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

impl Filter for RatingFilter {
    fn name(&self) -> &str {
        "RatingFilter"
    }

    fn keep(&self, film: &FilmRecord) -> bool {
        self.min.is_none_or(|min| film.imdb_rating >= min)
            && self.max.is_none_or(|max| film.imdb_rating <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{film, titles};

    fn rated(title: &str, rating: f32) -> FilmRecord {
        let mut f = film(title);
        f.imdb_rating = rating;
        f
    }

    #[test]
    fn test_minimum_rating_filter() {
        let high = rated("High", 8.1);
        let edge = rated("Edge", 7.0);
        let low = rated("Low", 6.9);

        let filtered = RatingFilter::at_least(7.0).apply(vec![&high, &edge, &low]);
        assert_eq!(titles(&filtered), vec!["High", "Edge"]);
    }

    #[test]
    fn test_rating_range_filter() {
        let a = rated("A", 3.0);
        let b = rated("B", 5.5);
        let c = rated("C", 9.0);

        let filtered = RatingFilter::between(5.0, 8.0).apply(vec![&a, &b, &c]);
        assert_eq!(titles(&filtered), vec!["B"]);
    }
}
