//! Query engine for the film table.
//!
//! This crate provides:
//! - Filter trait and implementations for the individual criteria
//! - FilterPipeline for composing filters
//! - FilmQuery, the criteria a UI fills in, and QuickFilter facets
//!
//! ## Architecture
//! A query is a pure filter: every active criterion becomes one filter in
//! the pipeline, all filters are AND-combined, and survivors keep the
//! catalog's baseline order. There is no ranking and no error path; an
//! empty result is a normal answer.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilmQuery, QuickFilter};
//!
//! let query = FilmQuery::new()
//!     .with_year_range(1990, 1999)
//!     .with_genre("Crime")
//!     .with_quick_filter(QuickFilter::TopRated);
//!
//! for film in query.run(catalog.films()) {
//!     println!("{} ({})", film.title, film.year);
//! }
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod query;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use query::{
    parse_quick_filters, FilmQuery, QueryError, QuickFilter, POPULAR_MIN_VOTES, RECENT_YEARS,
    SHORT_MAX_RUNTIME, TOP_RATED_MIN_RATING,
};
