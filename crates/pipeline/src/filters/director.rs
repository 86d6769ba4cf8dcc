//! Filter on director.

use crate::traits::Filter;
use data_loader::FilmRecord;

/// Keeps films by exactly this director (case-sensitive).
pub struct DirectorFilter {
    director: String,
}

impl DirectorFilter {
    pub fn new(director: impl Into<String>) -> Self {
        Self {
            director: director.into(),
        }
    }
}

impl Filter for DirectorFilter {
    fn name(&self) -> &str {
        "DirectorFilter"
    }

    fn keep(&self, film: &FilmRecord) -> bool {
        film.director == self.director
    }
}
