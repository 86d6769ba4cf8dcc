//! # Streaming Resolver
//!
//! Answers "where can I stream this film in Australia?":
//! 1. Search the catalog for the title
//! 2. Take the best (first) candidate
//! 3. Fetch its best offers for the country
//! 4. Keep subscription and ad-supported offers that name a provider with an icon
//! 5. Deduplicate by provider name, first occurrence wins
//!
//! "Not found" and "nothing streamable" are both `Ok(vec![])`. Any provider
//! failure aborts the lookup and is returned as-is; there is no retry and
//! no partial result.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::Result;
use crate::provider::CatalogProvider;
use crate::types::{CatalogOffer, Region, StreamingOffer};

/// How many search candidates to ask the catalog for
pub const DEFAULT_MAX_CANDIDATES: usize = 5;

/// Resolves film titles to the streaming services offering them
#[derive(Clone)]
pub struct StreamingResolver {
    provider: Arc<dyn CatalogProvider>,
    region: Region,
    max_candidates: usize,
}

impl StreamingResolver {
    /// A resolver for Australia (`AU` / `en`) asking for five candidates
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self {
            provider,
            region: Region::australia(),
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Look up `title` with the configured candidate count
    pub async fn resolve(&self, title: &str) -> Result<Vec<StreamingOffer>> {
        self.resolve_with(title, self.max_candidates).await
    }

    /// Look up `title`, asking the catalog for up to `max_candidates` matches
    pub async fn resolve_with(&self, title: &str, max_candidates: usize) -> Result<Vec<StreamingOffer>> {
        let start = Instant::now();
        info!("Resolving streaming offers for {:?}", title);

        let entries = self
            .provider
            .search(title, &self.region, max_candidates)
            .await?;

        let Some(best) = entries.into_iter().next() else {
            info!("No catalog match for {:?}", title);
            return Ok(Vec::new());
        };
        debug!(
            "Best catalog match for {:?}: {} ({:?}, {})",
            title,
            best.entry_id,
            best.title,
            best.release_year.map(|y| y.to_string()).unwrap_or_else(|| "????".to_string())
        );

        let offers = self
            .provider
            .offers(&best.entry_id, &self.region, true)
            .await?;
        let offer_count = offers.len();

        let streaming = select_streaming_offers(offers);
        info!(
            "Resolved {:?}: {} of {} offers are streamable ({:.2?})",
            title,
            streaming.len(),
            offer_count,
            start.elapsed()
        );
        Ok(streaming)
    }
}

/// Keep streamable offers and deduplicate them by provider name
///
/// An offer survives if it is subscription or ad-supported and names a
/// provider package with a non-empty name and icon. Names are trimmed
/// before comparison; the first offer per name is kept and output order
/// follows input order.
pub fn select_streaming_offers(offers: Vec<CatalogOffer>) -> Vec<StreamingOffer> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut selected = Vec::new();

    for offer in offers {
        if !offer.monetization_type.is_streaming() {
            continue;
        }
        let Some(package) = offer.package else {
            continue;
        };
        let name = package.name.trim();
        if name.is_empty() || package.icon.is_empty() {
            continue;
        }
        if seen.insert(name.to_string()) {
            selected.push(StreamingOffer {
                service_name: name.to_string(),
                icon_url: package.icon,
                offer_url: offer.url,
            });
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StreamingError;
    use crate::types::{CatalogEntry, MonetizationType, Package};
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn offer(name: &str, kind: &str, icon: &str) -> CatalogOffer {
        CatalogOffer {
            monetization_type: MonetizationType::from(kind),
            package: Some(Package {
                name: name.to_string(),
                icon: icon.to_string(),
            }),
            url: format!("https://watch.example/{}", name.trim().to_lowercase()),
        }
    }

    /// In-memory catalog that records every call it receives
    #[derive(Default)]
    struct MockCatalog {
        entries: Vec<CatalogEntry>,
        offers: Vec<CatalogOffer>,
        fail_search: bool,
        fail_offers: bool,
        calls: Mutex<Vec<String>>,
    }

    impl MockCatalog {
        fn with_offers(offers: Vec<CatalogOffer>) -> Self {
            Self {
                entries: vec![
                    CatalogEntry {
                        entry_id: "tm1".to_string(),
                        title: "Heat".to_string(),
                        release_year: Some(1995),
                    },
                    CatalogEntry {
                        entry_id: "tm2".to_string(),
                        title: "Heat 2".to_string(),
                        release_year: None,
                    },
                ],
                offers,
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CatalogProvider for MockCatalog {
        async fn search(&self, title: &str, region: &Region, count: usize) -> Result<Vec<CatalogEntry>> {
            self.calls.lock().unwrap().push(format!(
                "search:{}:{}:{}:{}",
                title, region.country, region.language, count
            ));
            if self.fail_search {
                return Err(StreamingError::Http("connection reset".to_string()));
            }
            Ok(self.entries.clone())
        }

        async fn offers(
            &self,
            entry_id: &str,
            region: &Region,
            best_only: bool,
        ) -> Result<Vec<CatalogOffer>> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("offers:{}:{}:{}", entry_id, region.country, best_only));
            if self.fail_offers {
                return Err(StreamingError::Status {
                    status: 503,
                    body: "maintenance".to_string(),
                });
            }
            Ok(self.offers.clone())
        }
    }

    // ============================================================================
    // Unit Tests: select_streaming_offers
    // ============================================================================

    #[test]
    fn test_select_deduplicates_and_drops_purchases() {
        let selected = select_streaming_offers(vec![
            offer("Netflix", "FLATRATE", "x"),
            offer("Netflix", "FLATRATE", "x"),
            offer("Amazon", "BUY", "y"),
        ]);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].service_name, "Netflix");
        assert_eq!(selected[0].icon_url, "x");
    }

    #[test]
    fn test_select_keeps_ads_and_first_seen_order() {
        let selected = select_streaming_offers(vec![
            offer("Stan", "FLATRATE", "stan.png"),
            offer("SBS On Demand", "ADS", "sbs.png"),
            offer("Netflix", "RENT", "netflix.png"),
            offer("Netflix", "FLATRATE", "netflix.png"),
            offer("Stan", "ADS", "other.png"),
        ]);

        let names: Vec<&str> = selected.iter().map(|o| o.service_name.as_str()).collect();
        assert_eq!(names, vec!["Stan", "SBS On Demand", "Netflix"]);
        // First occurrence wins
        assert_eq!(selected[0].icon_url, "stan.png");
    }

    #[test]
    fn test_select_trims_names_before_deduplicating() {
        let selected = select_streaming_offers(vec![
            offer(" Binge ", "FLATRATE", "a.png"),
            offer("Binge", "FLATRATE", "b.png"),
        ]);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].service_name, "Binge");
        assert_eq!(selected[0].icon_url, "a.png");
    }

    #[test]
    fn test_select_requires_package_with_icon() {
        let mut no_package = offer("Kanopy", "FLATRATE", "k.png");
        no_package.package = None;

        let selected = select_streaming_offers(vec![
            no_package,
            offer("Tubi", "ADS", ""),
            offer("   ", "FLATRATE", "blank.png"),
        ]);
        assert!(selected.is_empty());
    }

    // ============================================================================
    // Unit Tests: resolve
    // ============================================================================

    #[tokio::test]
    async fn test_resolve_uses_best_candidate() {
        let catalog = Arc::new(MockCatalog::with_offers(vec![
            offer("Netflix", "FLATRATE", "netflix.png"),
            offer("Stan", "FLATRATE", "stan.png"),
        ]));
        let resolver = StreamingResolver::new(catalog.clone());

        let offers = resolver.resolve("Heat").await.unwrap();

        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].offer_url, "https://watch.example/netflix");
        assert_eq!(
            catalog.calls(),
            vec!["search:Heat:AU:en:5", "offers:tm1:AU:true"]
        );
    }

    #[tokio::test]
    async fn test_resolve_unknown_title_is_empty() {
        let catalog = Arc::new(MockCatalog::default());
        let resolver = StreamingResolver::new(catalog.clone());

        let offers = resolver.resolve("Unknown Film XYZ").await.unwrap();

        assert!(offers.is_empty());
        // No offers request without a candidate
        assert_eq!(catalog.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_nothing_streamable_is_empty() {
        let catalog = Arc::new(MockCatalog::with_offers(vec![
            offer("Apple TV", "BUY", "apple.png"),
            offer("Google Play", "RENT", "google.png"),
        ]));
        let resolver = StreamingResolver::new(catalog);

        assert!(resolver.resolve("Heat").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_custom_candidate_count() {
        let catalog = Arc::new(MockCatalog::default());
        let resolver = StreamingResolver::new(catalog.clone()).with_max_candidates(1);

        resolver.resolve("Heat").await.unwrap();
        resolver.resolve_with("Heat", 3).await.unwrap();

        assert_eq!(
            catalog.calls(),
            vec!["search:Heat:AU:en:1", "search:Heat:AU:en:3"]
        );
    }

    #[tokio::test]
    async fn test_resolve_surfaces_search_failure() {
        let catalog = Arc::new(MockCatalog {
            fail_search: true,
            ..MockCatalog::with_offers(vec![offer("Netflix", "FLATRATE", "x")])
        });
        let resolver = StreamingResolver::new(catalog);

        let err = resolver.resolve("Heat").await.unwrap_err();
        assert_eq!(err.to_string(), "Catalog request failed: connection reset");
    }

    #[tokio::test]
    async fn test_resolve_surfaces_offer_failure() {
        let catalog = Arc::new(MockCatalog {
            fail_offers: true,
            ..MockCatalog::with_offers(vec![offer("Netflix", "FLATRATE", "x")])
        });
        let resolver = StreamingResolver::new(catalog);

        let err = resolver.resolve("Heat").await.unwrap_err();
        assert!(matches!(err, StreamingError::Status { status: 503, .. }));
    }
}
