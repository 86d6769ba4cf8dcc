//! Filter on release year.

use crate::traits::Filter;
use data_loader::FilmRecord;

/// Keeps films released within `[min_year, max_year]`, both ends inclusive.
///
/// A range with `min_year > max_year` matches nothing.
pub struct YearRangeFilter {
    min_year: i32,
    max_year: i32,
}

impl YearRangeFilter {
    pub fn new(min_year: i32, max_year: i32) -> Self {
        Self { min_year, max_year }
    }
}

impl Filter for YearRangeFilter {
    fn name(&self) -> &str {
        "YearRangeFilter"
    }

    fn keep(&self, film: &FilmRecord) -> bool {
        film.year >= self.min_year && film.year <= self.max_year
    }
}
