//! The seam between the resolver and whatever catalog service backs it.

use crate::error::Result;
use crate::types::{CatalogEntry, CatalogOffer, Region};
use async_trait::async_trait;

/// A film catalog that can search titles and list their offers.
///
/// Implemented by [`crate::JustWatchClient`] in production and by in-memory
/// fakes in tests.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search for `title`, returning at most `count` candidates, best first
    async fn search(&self, title: &str, region: &Region, count: usize) -> Result<Vec<CatalogEntry>>;

    /// Offers for one catalog entry in `region`'s country
    ///
    /// With `best_only`, the catalog collapses multiple offers of the same
    /// package and monetization type into the best one.
    async fn offers(
        &self,
        entry_id: &str,
        region: &Region,
        best_only: bool,
    ) -> Result<Vec<CatalogOffer>>;
}
