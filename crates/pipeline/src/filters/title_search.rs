//! Free-text title search.

use crate::traits::Filter;
use data_loader::FilmRecord;

/// Keeps films whose title contains the search text, ignoring case.
///
/// The text is matched literally; no wildcards or tokenization.
pub struct TitleSearchFilter {
    needle: String,
}

impl TitleSearchFilter {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }
}

impl Filter for TitleSearchFilter {
    fn name(&self) -> &str {
        "TitleSearchFilter"
    }

    fn keep(&self, film: &FilmRecord) -> bool {
        film.title.to_lowercase().contains(&self.needle)
    }
}
