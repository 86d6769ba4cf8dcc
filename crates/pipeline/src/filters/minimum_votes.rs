//! Filter on vote count (the "Popular" quick filter).

use crate::traits::Filter;
use data_loader::FilmRecord;

/// Keeps films with at least `min_votes` IMDb votes.
pub struct MinimumVotesFilter {
    min_votes: u32,
}

impl MinimumVotesFilter {
    pub fn new(min_votes: u32) -> Self {
        Self { min_votes }
    }
}

impl Filter for MinimumVotesFilter {
    fn name(&self) -> &str {
        "MinimumVotesFilter"
    }

    fn keep(&self, film: &FilmRecord) -> bool {
        film.num_votes >= self.min_votes
    }
}
