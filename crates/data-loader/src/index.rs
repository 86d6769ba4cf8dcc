//! FilmCatalog building and the genre index.
//!
//! Loading is run-once: parse the file, establish the baseline order
//! (most-voted first), then derive the genre facet from the sorted rows.

use crate::error::Result;
use crate::parser;
use crate::types::{FilmCatalog, FilmRecord};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

impl FilmCatalog {
    /// Load the film dataset from a delimited file
    ///
    /// This is the main entry point for loading data.
    ///
    /// Steps:
    /// 1. Parse the file, keeping canonical-title rows only
    /// 2. Sort by vote count, descending
    /// 3. Build the genre index
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading film dataset from {}", path.display());

        let films = parser::parse_films(path)?;
        let catalog = Self::from_records(films);

        info!(
            "Loaded {} films across {} genres",
            catalog.len(),
            catalog.genre_tokens.len()
        );
        Ok(catalog)
    }

    /// Build a catalog from already-parsed records
    ///
    /// Records are put into baseline order here, so callers may pass them
    /// in any order. The sort is stable: films with equal vote counts keep
    /// their input order.
    pub fn from_records(mut films: Vec<FilmRecord>) -> Self {
        films.sort_by(|a, b| b.num_votes.cmp(&a.num_votes));
        let genre_tokens = genre_tokens(&films);
        Self {
            films,
            genre_tokens,
        }
    }
}

/// Distinct genre tokens across `films`, most common first
///
/// Each film's genre list is flattened and counted. Ties keep the order in
/// which the tokens were first encountered.
pub fn genre_tokens(films: &[FilmRecord]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for genre in films.iter().flat_map(|f| f.genres.iter()) {
        let count = counts.entry(genre.as_str()).or_insert_with(|| {
            first_seen.push(genre.as_str());
            0
        });
        *count += 1;
    }

    // Stable sort keeps first-seen order among equal counts
    first_seen.sort_by(|a, b| counts[b].cmp(&counts[a]));
    first_seen.into_iter().map(str::to_string).collect()
}
