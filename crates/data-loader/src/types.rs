//! Core domain types for the film dataset.
//!
//! `FilmRecord` is one canonical film row; `FilmCatalog` owns the loaded
//! rows in baseline (popularity-descending) order together with the
//! indices derived from them at load time.

use serde::{Deserialize, Serialize};

/// Vote count above which a top-rated film is highlighted as a standout
pub const STANDOUT_MIN_VOTES: u32 = 100_000;

/// Rating at or above which a popular film is highlighted as a standout
pub const STANDOUT_MIN_RATING: f32 = 7.0;

// =============================================================================
// FilmRecord
// =============================================================================

/// One row per canonical film.
///
/// Only rows whose primary and original titles match make it into the
/// catalog, so `title` is both the display title and the original title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmRecord {
    pub title: String,
    /// Average IMDb rating, 0-10
    pub imdb_rating: f32,
    pub num_votes: u32,
    pub year: i32,
    /// `None` when the source row has no runtime
    pub runtime_minutes: Option<u32>,
    /// Genre tokens in source order, e.g. `["Action", "Crime", "Drama"]`
    pub genres: Vec<String>,
    pub director: String,
}

impl FilmRecord {
    /// The comma-joined genre string, as it appeared in the source file.
    ///
    /// Genre matching is a substring test against this string, not a
    /// membership test against `genres`.
    pub fn genre_field(&self) -> String {
        self.genres.join(",")
    }

    /// True for well-known, well-rated films (highlighted in result tables)
    pub fn is_standout(&self) -> bool {
        self.num_votes > STANDOUT_MIN_VOTES && self.imdb_rating >= STANDOUT_MIN_RATING
    }
}

// =============================================================================
// FilmCatalog - the immutable, loaded dataset
// =============================================================================

/// The loaded film table plus everything derived from it.
///
/// Built once at startup and never mutated afterwards, so it can be shared
/// behind an `Arc` between any number of readers without locking.
#[derive(Debug, Clone, Default)]
pub struct FilmCatalog {
    /// Films sorted by `num_votes`, descending (the baseline order)
    pub(crate) films: Vec<FilmRecord>,
    /// Distinct genre tokens, most frequent first
    pub(crate) genre_tokens: Vec<String>,
}

impl FilmCatalog {
    /// All films in baseline order
    pub fn films(&self) -> &[FilmRecord] {
        &self.films
    }

    /// Distinct genre tokens ordered by descending frequency
    pub fn genre_tokens(&self) -> &[String] {
        &self.genre_tokens
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }

    /// Smallest and largest release year in the catalog
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.films.iter().map(|f| f.year).min()?;
        let max = self.films.iter().map(|f| f.year).max()?;
        Some((min, max))
    }

    /// Distinct director names, sorted alphabetically
    pub fn directors(&self) -> Vec<&str> {
        let mut directors: Vec<&str> = self
            .films
            .iter()
            .map(|f| f.director.as_str())
            .filter(|d| !d.is_empty())
            .collect();
        directors.sort_unstable();
        directors.dedup();
        directors
    }

    /// Every film by `director` (exact match), oldest first
    pub fn films_by_director(&self, director: &str) -> Vec<&FilmRecord> {
        let mut films: Vec<&FilmRecord> = self
            .films
            .iter()
            .filter(|f| f.director == director)
            .collect();
        // Stable sort: equal years keep baseline order
        films.sort_by_key(|f| f.year);
        films
    }
}
