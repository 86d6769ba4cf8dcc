//! Filter on genre.

use crate::traits::Filter;
use data_loader::FilmRecord;

/// Keeps films whose comma-joined genre string contains `genre`.
///
/// This is a case-sensitive substring test, not token equality: "Action"
/// also matches a film tagged "Action-Adventure".
pub struct GenreFilter {
    genre: String,
}

impl GenreFilter {
    pub fn new(genre: impl Into<String>) -> Self {
        Self {
            genre: genre.into(),
        }
    }
}

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn keep(&self, film: &FilmRecord) -> bool {
        film.genre_field().contains(self.genre.as_str())
    }
}
