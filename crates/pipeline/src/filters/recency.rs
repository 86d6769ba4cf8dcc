//! Filter for recent releases (the "Recent" quick filter).

use crate::traits::Filter;
use chrono::Datelike;
use data_loader::FilmRecord;

/// Keeps films released in or after `min_year`.
///
/// ## Algorithm
/// 1. Read the current calendar year from the local clock (once, when the
///    filter is built)
/// 2. Subtract the window, e.g. 2 years -> this year and the two before it
/// 3. Keep films with `year >= min_year`
pub struct RecencyFilter {
    min_year: i32,
}

impl RecencyFilter {
    /// Films from `current_year - years` onwards
    pub fn within_years(current_year: i32, years: i32) -> Self {
        Self {
            min_year: current_year - years,
        }
    }

    pub fn min_year(&self) -> i32 {
        self.min_year
    }
}

/// The current calendar year in local time
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

impl Filter for RecencyFilter {
    fn name(&self) -> &str {
        "RecencyFilter"
    }

    fn keep(&self, film: &FilmRecord) -> bool {
        film.year >= self.min_year
    }
}
