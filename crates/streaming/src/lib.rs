//! Streaming availability lookups against an external film catalog.
//!
//! This crate provides a Rust client for the JustWatch GraphQL catalog and
//! the resolver that turns a film title into the subscription services
//! carrying it. It handles:
//! - Searching the catalog and fetching per-country offers
//! - Keeping subscription (`FLATRATE`) and ad-supported (`ADS`) offers only
//! - Deduplicating offers by provider name
//! - Mapping transport, status and decode failures to [`StreamingError`]
//!
//! ## Example Usage
//! ```ignore
//! use std::sync::Arc;
//! use streaming::{ClientConfig, JustWatchClient, StreamingResolver};
//!
//! let client = JustWatchClient::new(ClientConfig::default())?;
//! let resolver = StreamingResolver::new(Arc::new(client));
//!
//! for offer in resolver.resolve("Heat").await? {
//!     println!("{}: {}", offer.service_name, offer.offer_url);
//! }
//! ```

pub mod error;
pub mod justwatch;
pub mod provider;
pub mod resolver;
pub mod types;

pub use error::{Result, StreamingError};
pub use justwatch::{ClientConfig, JustWatchClient, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use provider::CatalogProvider;
pub use resolver::{select_streaming_offers, StreamingResolver, DEFAULT_MAX_CANDIDATES};
pub use types::{CatalogEntry, CatalogOffer, MonetizationType, Package, Region, StreamingOffer};
