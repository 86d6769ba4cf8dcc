//! Filter implementations for the query pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod director;
pub mod genre;
pub mod minimum_rating;
pub mod minimum_votes;
pub mod recency;
pub mod runtime;
pub mod title_search;
pub mod year_range;

// Re-export for convenience
pub use director::DirectorFilter;
pub use genre::GenreFilter;
pub use minimum_rating::RatingFilter;
pub use minimum_votes::MinimumVotesFilter;
pub use recency::RecencyFilter;
pub use runtime::RuntimeFilter;
pub use title_search::TitleSearchFilter;
pub use year_range::YearRangeFilter;
