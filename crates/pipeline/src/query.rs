//! Film query criteria and their translation into a FilterPipeline.
//!
//! A [`FilmQuery`] is what the UI or HTTP layer fills in: every criterion is
//! optional and an absent criterion imposes no constraint. Running a query
//! builds a fresh pipeline (so "Recent" always sees today's date) and
//! applies it to the catalog's baseline-ordered rows.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::*;
use crate::traits::Filter;
use data_loader::FilmRecord;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Minimum rating for "Top Rated"
pub const TOP_RATED_MIN_RATING: f32 = 7.0;
/// Minimum vote count for "Popular"
pub const POPULAR_MIN_VOTES: u32 = 100_000;
/// Maximum runtime for "Short", in minutes
pub const SHORT_MAX_RUNTIME: u32 = 120;
/// "Recent" covers this many years before the current one
pub const RECENT_YEARS: i32 = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unknown quick filter: {0:?} (expected top_rated, popular, short or recent)")]
    UnknownQuickFilter(String),
}

/// Named boolean facets, each an extra AND predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuickFilter {
    TopRated,
    Popular,
    Short,
    Recent,
}

impl QuickFilter {
    pub const ALL: [QuickFilter; 4] = [
        QuickFilter::TopRated,
        QuickFilter::Popular,
        QuickFilter::Short,
        QuickFilter::Recent,
    ];

    /// The filter implementing this facet, with "Recent" anchored at `current_year`
    pub fn to_filter(self, current_year: i32) -> Box<dyn Filter> {
        match self {
            QuickFilter::TopRated => Box::new(RatingFilter::at_least(TOP_RATED_MIN_RATING)),
            QuickFilter::Popular => Box::new(MinimumVotesFilter::new(POPULAR_MIN_VOTES)),
            QuickFilter::Short => Box::new(RuntimeFilter::at_most(SHORT_MAX_RUNTIME)),
            QuickFilter::Recent => Box::new(RecencyFilter::within_years(current_year, RECENT_YEARS)),
        }
    }

    /// Label as shown in the UI
    pub fn label(self) -> &'static str {
        match self {
            QuickFilter::TopRated => "Top Rated",
            QuickFilter::Popular => "Popular",
            QuickFilter::Short => "Short",
            QuickFilter::Recent => "Recent",
        }
    }
}

impl fmt::Display for QuickFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QuickFilter {
    type Err = QueryError;

    /// Accepts `top_rated`, `TopRated`, `Top Rated`, `top-rated` and so on
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = quick_filter_key(s);
        QuickFilter::ALL
            .into_iter()
            .find(|quick| quick_filter_key(quick.label()) == key)
            .ok_or_else(|| QueryError::UnknownQuickFilter(s.to_string()))
    }
}

/// Lowercase with spaces, `_` and `-` removed: "Top Rated" -> "toprated"
fn quick_filter_key(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parse a comma-separated list like `"top_rated,popular"`; blanks are ignored
pub fn parse_quick_filters(s: &str) -> Result<BTreeSet<QuickFilter>, QueryError> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(QuickFilter::from_str)
        .collect()
}

/// Filter criteria for the film table. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilmQuery {
    /// Inclusive `[min, max]` release years
    pub year_range: Option<(i32, i32)>,
    /// Substring of the comma-joined genre string (case-sensitive)
    pub genre: Option<String>,
    /// Case-insensitive substring of the title
    pub search_text: Option<String>,
    /// Exact director name
    pub director: Option<String>,
    /// Inclusive `[min, max]` IMDb rating
    pub rating_range: Option<(f32, f32)>,
    /// Inclusive `[min, max]` runtime in minutes
    pub runtime_range: Option<(u32, u32)>,
    pub quick_filters: BTreeSet<QuickFilter>,
    /// Cap on the number of rows returned
    pub limit: Option<usize>,
}

impl FilmQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year_range(mut self, min: i32, max: i32) -> Self {
        self.year_range = Some((min, max));
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    pub fn with_rating_range(mut self, min: f32, max: f32) -> Self {
        self.rating_range = Some((min, max));
        self
    }

    pub fn with_runtime_range(mut self, min: u32, max: u32) -> Self {
        self.runtime_range = Some((min, max));
        self
    }

    /// Year range from optional ends; a missing end takes the matching end
    /// of `bounds` (the catalog's year span, unbounded when `None`).
    /// Both ends missing leaves the criterion unset.
    pub fn with_year_ends(mut self, min: Option<i32>, max: Option<i32>, bounds: Option<(i32, i32)>) -> Self {
        self.year_range = complete_range(min, max, bounds.unwrap_or((i32::MIN, i32::MAX)));
        self
    }

    /// Rating range from optional ends, completed with 0-10
    pub fn with_rating_ends(mut self, min: Option<f32>, max: Option<f32>) -> Self {
        self.rating_range = complete_range(min, max, (0.0, 10.0));
        self
    }

    /// Runtime range from optional ends, completed with 0 and no upper limit
    pub fn with_runtime_ends(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.runtime_range = complete_range(min, max, (0, u32::MAX));
        self
    }

    pub fn with_quick_filter(mut self, quick: QuickFilter) -> Self {
        self.quick_filters.insert(quick);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Build the pipeline for this query, reading the current year from the clock
    pub fn build_pipeline(&self) -> FilterPipeline {
        self.build_pipeline_at(crate::filters::recency::current_year())
    }

    /// Build the pipeline for this query as if the current year were `current_year`
    ///
    /// Empty text criteria count as absent.
    pub fn build_pipeline_at(&self, current_year: i32) -> FilterPipeline {
        let mut pipeline = FilterPipeline::new();

        if let Some((min, max)) = self.year_range {
            pipeline = pipeline.add_filter(YearRangeFilter::new(min, max));
        }
        if self.quick_filters.contains(&QuickFilter::Recent) {
            pipeline = pipeline.add_boxed(QuickFilter::Recent.to_filter(current_year));
        }
        if let Some(genre) = non_empty(&self.genre) {
            pipeline = pipeline.add_filter(GenreFilter::new(genre));
        }
        if let Some(text) = non_empty(&self.search_text) {
            pipeline = pipeline.add_filter(TitleSearchFilter::new(text));
        }
        for quick in self.quick_filters.iter().filter(|q| **q != QuickFilter::Recent) {
            pipeline = pipeline.add_boxed(quick.to_filter(current_year));
        }
        if let Some(director) = non_empty(&self.director) {
            pipeline = pipeline.add_filter(DirectorFilter::new(director));
        }
        if let Some((min, max)) = self.rating_range {
            pipeline = pipeline.add_filter(RatingFilter::between(min, max));
        }
        if let Some((min, max)) = self.runtime_range {
            pipeline = pipeline.add_filter(RuntimeFilter::between(min, max));
        }

        pipeline
    }

    /// Run the query against baseline-ordered `films`
    ///
    /// Survivors keep their input order. Never fails; may be empty.
    pub fn run<'a>(&self, films: &'a [FilmRecord]) -> Vec<&'a FilmRecord> {
        self.run_at(films, crate::filters::recency::current_year())
    }

    /// Like [`FilmQuery::run`] with a fixed current year
    pub fn run_at<'a>(&self, films: &'a [FilmRecord], current_year: i32) -> Vec<&'a FilmRecord> {
        let pipeline = self.build_pipeline_at(current_year);
        let mut matches = pipeline.apply_to(films);
        if let Some(limit) = self.limit {
            matches.truncate(limit);
        }
        tracing::debug!(
            "Query matched {} of {} films ({} filters)",
            matches.len(),
            films.len(),
            pipeline.len()
        );
        matches
    }
}

fn complete_range<T: Copy>(min: Option<T>, max: Option<T>, (lo, hi): (T, T)) -> Option<(T, T)> {
    match (min, max) {
        (None, None) => None,
        (min, max) => Some((min.unwrap_or(lo), max.unwrap_or(hi))),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
