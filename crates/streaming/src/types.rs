//! Catalog-side and result-side types for streaming lookups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One streaming service offering a film, as returned to callers.
///
/// Unique by `service_name` within a single lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingOffer {
    pub service_name: String,
    pub icon_url: String,
    pub offer_url: String,
}

/// A search hit in the external catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Catalog node id, e.g. `"tm10"`
    pub entry_id: String,
    pub title: String,
    pub release_year: Option<i32>,
}

/// How an offer is paid for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MonetizationType {
    /// Included in a subscription
    Flatrate,
    /// Free with advertising
    Ads,
    Free,
    Rent,
    Buy,
    Cinema,
    Other(String),
}

impl MonetizationType {
    /// Subscription-inclusive or ad-supported: the tiers a streaming lookup reports
    pub fn is_streaming(&self) -> bool {
        matches!(self, MonetizationType::Flatrate | MonetizationType::Ads)
    }
}

impl From<&str> for MonetizationType {
    fn from(s: &str) -> Self {
        match s {
            "FLATRATE" => MonetizationType::Flatrate,
            "ADS" => MonetizationType::Ads,
            "FREE" => MonetizationType::Free,
            "RENT" => MonetizationType::Rent,
            "BUY" => MonetizationType::Buy,
            "CINEMA" => MonetizationType::Cinema,
            other => MonetizationType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MonetizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MonetizationType::Flatrate => "FLATRATE",
            MonetizationType::Ads => "ADS",
            MonetizationType::Free => "FREE",
            MonetizationType::Rent => "RENT",
            MonetizationType::Buy => "BUY",
            MonetizationType::Cinema => "CINEMA",
            MonetizationType::Other(other) => other,
        };
        f.write_str(s)
    }
}

/// The streaming service (provider) behind an offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    /// Absolute icon URL; empty when the catalog has no icon
    pub icon: String,
}

/// One offer for a title in one country
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOffer {
    pub monetization_type: MonetizationType,
    pub package: Option<Package>,
    pub url: String,
}

/// Where and how a lookup is scoped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// ISO 3166 country code, e.g. `"AU"`
    pub country: String,
    /// ISO 639 language code, e.g. `"en"`
    pub language: String,
}

impl Region {
    pub fn australia() -> Self {
        Self {
            country: "AU".to_string(),
            language: "en".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monetization_type_parsing() {
        assert_eq!(MonetizationType::from("FLATRATE"), MonetizationType::Flatrate);
        assert_eq!(MonetizationType::from("ADS"), MonetizationType::Ads);
        assert_eq!(MonetizationType::from("BUY"), MonetizationType::Buy);
        assert_eq!(
            MonetizationType::from("FAST"),
            MonetizationType::Other("FAST".to_string())
        );
        assert_eq!(MonetizationType::from("FAST").to_string(), "FAST");
    }

    #[test]
    fn test_only_subscription_and_ads_count_as_streaming() {
        assert!(MonetizationType::Flatrate.is_streaming());
        assert!(MonetizationType::Ads.is_streaming());
        assert!(!MonetizationType::Free.is_streaming());
        assert!(!MonetizationType::Rent.is_streaming());
        assert!(!MonetizationType::Buy.is_streaming());
        assert!(!MonetizationType::Cinema.is_streaming());
    }

    #[test]
    fn test_offer_serializes_with_snake_case_fields() {
        let offer = StreamingOffer {
            service_name: "Netflix".to_string(),
            icon_url: "https://images.example/netflix.png".to_string(),
            offer_url: "https://netflix.com/title/1".to_string(),
        };
        let json = serde_json::to_value(&offer).unwrap();
        assert_eq!(json["service_name"], "Netflix");
        assert_eq!(json["icon_url"], "https://images.example/netflix.png");
        assert_eq!(json["offer_url"], "https://netflix.com/title/1");
    }
}
