//! Filter on running time.

use crate::traits::Filter;
use data_loader::FilmRecord;

/// Keeps films whose runtime lies within the configured bounds.
///
/// Films without a known runtime never pass: a missing value cannot be
/// shown to satisfy any bound.
pub struct RuntimeFilter {
    min_minutes: Option<u32>,
    max_minutes: Option<u32>,
}

impl RuntimeFilter {
    /// Runtimes of at most `max_minutes` (the "Short" quick filter)
    pub fn at_most(max_minutes: u32) -> Self {
        Self {
            min_minutes: None,
            max_minutes: Some(max_minutes),
        }
    }

    /// Runtimes within `[min_minutes, max_minutes]`, inclusive
    pub fn between(min_minutes: u32, max_minutes: u32) -> Self {
        Self {
            min_minutes: Some(min_minutes),
            max_minutes: Some(max_minutes),
        }
    }
}

impl Filter for RuntimeFilter {
    fn name(&self) -> &str {
        "RuntimeFilter"
    }

    fn keep(&self, film: &FilmRecord) -> bool {
        let Some(runtime) = film.runtime_minutes else {
            return false;
        };
        self.min_minutes.is_none_or(|min| runtime >= min)
            && self.max_minutes.is_none_or(|max| runtime <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{film, titles};

    fn lasting(title: &str, runtime: Option<u32>) -> FilmRecord {
        let mut f = film(title);
        f.runtime_minutes = runtime;
        f
    }

    #[test]
    fn test_short_filter() {
        let short = lasting("Short", Some(90));
        let edge = lasting("Edge", Some(120));
        let long = lasting("Long", Some(170));
        let unknown = lasting("Unknown", None);

        let filtered = RuntimeFilter::at_most(120).apply(vec![&short, &edge, &long, &unknown]);
        assert_eq!(titles(&filtered), vec!["Short", "Edge"]);
    }

    #[test]
    fn test_runtime_range_filter() {
        let a = lasting("A", Some(80));
        let b = lasting("B", Some(100));
        let c = lasting("C", Some(150));

        let filtered = RuntimeFilter::between(90, 140).apply(vec![&a, &b, &c]);
        assert_eq!(titles(&filtered), vec!["B"]);
    }
}
