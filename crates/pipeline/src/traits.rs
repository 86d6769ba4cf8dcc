//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible predicates to be applied to the film table.

use data_loader::FilmRecord;
use rayon::prelude::*;

/// Inputs at least this large are filtered on the rayon pool
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Core trait for filtering films.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across request handlers
/// - Filters borrow rows from the catalog; they never clone a `FilmRecord`
/// - Filtering never fails: an empty result is a valid answer
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether `film` passes this filter
    fn keep(&self, film: &FilmRecord) -> bool;

    /// Apply this filter to a set of films, preserving their relative order.
    fn apply<'a>(&self, films: Vec<&'a FilmRecord>) -> Vec<&'a FilmRecord> {
        if films.len() >= PARALLEL_THRESHOLD {
            // Indexed collect keeps input order
            films.into_par_iter().filter(|film| self.keep(film)).collect()
        } else {
            films.into_iter().filter(|film| self.keep(film)).collect()
        }
    }
}
