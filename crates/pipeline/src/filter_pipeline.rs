//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::Filter;
use data_loader::FilmRecord;

/// Chains multiple filters together into a processing pipeline.
///
/// Every filter is an extra AND condition, so the order filters are added
/// in changes only how much work later filters do, never the result.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(YearRangeFilter::new(1990, 1999))
///     .add_filter(RatingFilter::at_least(7.0));
///
/// let films = pipeline.apply_to(catalog.films());
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Add an already-boxed filter to the pipeline.
    pub fn add_boxed(mut self, filter: Box<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Names of the filters in the order they run
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence to the films.
    ///
    /// ## Algorithm
    /// 1. Start with the input films
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return the survivors, in their original relative order
    pub fn apply<'a>(&self, films: Vec<&'a FilmRecord>) -> Vec<&'a FilmRecord> {
        let mut current = films;
        for filter in &self.filters {
            if current.is_empty() {
                break;
            }
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }

    /// Apply the pipeline to a whole table (usually `catalog.films()`)
    pub fn apply_to<'a>(&self, films: &'a [FilmRecord]) -> Vec<&'a FilmRecord> {
        self.apply(films.iter().collect())
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
