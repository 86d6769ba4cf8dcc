//! JustWatch GraphQL client.
//!
//! Two queries are used: `popularTitles` to find a title, then `node(id)`
//! to list that title's offers in one country. Both are sent as
//! `POST {endpoint}` with a `{ query, variables }` JSON body.

use crate::error::{Result, StreamingError};
use crate::provider::CatalogProvider;
use crate::types::{CatalogEntry, CatalogOffer, MonetizationType, Package, Region};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "https://apis.justwatch.com/graphql";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Package icons come back as paths relative to this host
const ICON_URL_PREFIX: &str = "https://images.justwatch.com";

/// Longest error body kept in a `StreamingError::Status`
const MAX_ERROR_BODY: usize = 200;

const SEARCH_QUERY: &str = r#"
query GetSearchTitles($searchTitlesFilter: TitleFilter!, $country: Country!, $language: Language!, $first: Int!) {
  popularTitles(country: $country, filter: $searchTitlesFilter, first: $first, sortBy: POPULAR, sortRandomSeed: 0) {
    edges {
      node {
        id
        content(country: $country, language: $language) {
          title
          originalReleaseYear
        }
      }
    }
  }
}
"#;

const OFFERS_QUERY: &str = r#"
query GetTitleOffers($nodeId: ID!, $country: Country!, $filter: OfferFilter!) {
  node(id: $nodeId) {
    ... on MovieOrShowOrSeasonOrEpisode {
      offers(country: $country, platform: WEB, filter: $filter) {
        monetizationType
        standardWebURL
        package {
          clearName
          icon(profile: S100, format: PNG)
        }
      }
    }
  }
}
"#;

/// Connection settings for [`JustWatchClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    /// Applies to each request as a whole (connect + response)
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client for the JustWatch catalog.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct JustWatchClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl JustWatchClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StreamingError::Config(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one GraphQL query and return its `data` payload
    async fn query<T: DeserializeOwned>(&self, query: &str, variables: serde_json::Value) -> Result<T> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|&i| body.is_char_boundary(i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(StreamingError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphQlResponse<T> = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.transport_error(e)
            } else {
                StreamingError::Decode(e.to_string())
            }
        })?;

        if !envelope.errors.is_empty() {
            let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(StreamingError::GraphQl(messages.join("; ")));
        }

        envelope
            .data
            .ok_or_else(|| StreamingError::Decode("response has no data".to_string()))
    }

    fn transport_error(&self, e: reqwest::Error) -> StreamingError {
        if e.is_timeout() {
            StreamingError::Timeout {
                timeout_ms: self.timeout.as_millis(),
            }
        } else {
            StreamingError::Http(e.to_string())
        }
    }
}

#[async_trait]
impl CatalogProvider for JustWatchClient {
    async fn search(&self, title: &str, region: &Region, count: usize) -> Result<Vec<CatalogEntry>> {
        debug!("Searching catalog for {:?} in {}", title, region.country);

        let variables = json!({
            "searchTitlesFilter": { "searchQuery": title },
            "country": region.country,
            "language": region.language,
            "first": count,
        });
        let data: SearchData = self.query(SEARCH_QUERY, variables).await?;

        let entries = data
            .popular_titles
            .edges
            .into_iter()
            .map(|edge| {
                let content = edge.node.content.unwrap_or_default();
                CatalogEntry {
                    entry_id: edge.node.id,
                    title: content.title,
                    release_year: content.original_release_year,
                }
            })
            .collect();
        Ok(entries)
    }

    async fn offers(
        &self,
        entry_id: &str,
        region: &Region,
        best_only: bool,
    ) -> Result<Vec<CatalogOffer>> {
        debug!("Fetching {} offers for {}", region.country, entry_id);

        let variables = json!({
            "nodeId": entry_id,
            "country": region.country,
            "filter": { "bestOnly": best_only },
        });
        let data: OffersData = self.query(OFFERS_QUERY, variables).await?;

        let offers = data
            .node
            .map(|node| node.offers)
            .unwrap_or_default()
            .into_iter()
            .map(|raw| CatalogOffer {
                monetization_type: MonetizationType::from(raw.monetization_type.as_str()),
                package: raw.package.map(|p| Package {
                    name: p.clear_name,
                    icon: p.icon.as_deref().map(icon_url).unwrap_or_default(),
                }),
                url: raw.standard_web_url.unwrap_or_default(),
            })
            .collect();
        Ok(offers)
    }
}

/// Turn a catalog icon path into an absolute URL
///
/// Example: "/icon/52449539/{profile}/netflix.{format}"
///       -> "https://images.justwatch.com/icon/52449539/s100/netflix.png"
pub fn icon_url(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let path = path.replace("{profile}", "s100").replace("{format}", "png");
    if path.starts_with("http://") || path.starts_with("https://") {
        path
    } else {
        format!("{}{}", ICON_URL_PREFIX, path)
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchData {
    popular_titles: TitleEdges,
}

#[derive(Deserialize)]
struct TitleEdges {
    #[serde(default)]
    edges: Vec<TitleEdge>,
}

#[derive(Deserialize)]
struct TitleEdge {
    node: TitleNode,
}

#[derive(Deserialize)]
struct TitleNode {
    id: String,
    content: Option<TitleContent>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TitleContent {
    #[serde(default)]
    title: String,
    original_release_year: Option<i32>,
}

#[derive(Deserialize)]
struct OffersData {
    node: Option<OffersNode>,
}

#[derive(Deserialize)]
struct OffersNode {
    #[serde(default)]
    offers: Vec<RawOffer>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOffer {
    monetization_type: String,
    #[serde(rename = "standardWebURL")]
    standard_web_url: Option<String>,
    package: Option<RawPackage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPackage {
    clear_name: String,
    icon: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::post};
    use serde_json::Value;
    use tokio::net::TcpListener;

    // ============================================================================
    // Mock catalog service
    // ============================================================================

    async fn mock_catalog(Json(body): Json<Value>) -> Json<Value> {
        let query = body["query"].as_str().unwrap_or_default();

        if query.contains("popularTitles") {
            assert_eq!(body["variables"]["country"], "AU");
            assert_eq!(body["variables"]["language"], "en");
            let search = body["variables"]["searchTitlesFilter"]["searchQuery"]
                .as_str()
                .unwrap_or_default();
            if search == "Nothing Matches" {
                return Json(json!({ "data": { "popularTitles": { "edges": [] } } }));
            }
            Json(json!({
                "data": { "popularTitles": { "edges": [
                    { "node": { "id": "tm10", "content": { "title": "Heat", "originalReleaseYear": 1995 } } },
                    { "node": { "id": "tm11", "content": { "title": "Heat Wave", "originalReleaseYear": null } } }
                ] } }
            }))
        } else {
            assert_eq!(body["variables"]["nodeId"], "tm10");
            assert_eq!(body["variables"]["filter"]["bestOnly"], true);
            Json(json!({
                "data": { "node": { "offers": [
                    {
                        "monetizationType": "FLATRATE",
                        "standardWebURL": "https://www.netflix.com/title/113",
                        "package": { "clearName": "Netflix", "icon": "/icon/207360008/{profile}/netflix.{format}" }
                    },
                    {
                        "monetizationType": "BUY",
                        "standardWebURL": "https://tv.apple.com/au/movie/heat",
                        "package": { "clearName": "Apple TV", "icon": null }
                    }
                ] } }
            }))
        }
    }

    async fn failing_catalog() -> impl IntoResponse {
        (StatusCode::BAD_GATEWAY, "upstream unavailable")
    }

    async fn erroring_catalog() -> Json<Value> {
        Json(json!({ "data": null, "errors": [{ "message": "Variable $country got invalid value" }] }))
    }

    async fn slow_catalog() -> Json<Value> {
        tokio::time::sleep(Duration::from_secs(2)).await;
        Json(json!({ "data": { "popularTitles": { "edges": [] } } }))
    }

    /// Start a mock catalog on a random port and return its endpoint URL
    async fn start_mock_catalog(app: Router) -> (String, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock catalog");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock catalog failed");
        });

        (format!("http://{}/graphql", addr), handle)
    }

    fn client_for(endpoint: String, timeout: Duration) -> JustWatchClient {
        JustWatchClient::new(ClientConfig { endpoint, timeout }).expect("Failed to build client")
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(
            icon_url("/icon/207360008/{profile}/netflix.{format}"),
            "https://images.justwatch.com/icon/207360008/s100/netflix.png"
        );
        assert_eq!(
            icon_url("/icon/52449539/s100/stan.png"),
            "https://images.justwatch.com/icon/52449539/s100/stan.png"
        );
        assert_eq!(icon_url("https://cdn.example/x.png"), "https://cdn.example/x.png");
        assert_eq!(icon_url(""), "");
    }

    #[tokio::test]
    async fn test_search_parses_entries() {
        let (endpoint, handle) =
            start_mock_catalog(Router::new().route("/graphql", post(mock_catalog))).await;
        let client = client_for(endpoint, DEFAULT_TIMEOUT);

        let entries = client.search("Heat", &Region::australia(), 5).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entry_id, "tm10");
        assert_eq!(entries[0].title, "Heat");
        assert_eq!(entries[0].release_year, Some(1995));
        assert_eq!(entries[1].release_year, None);

        handle.abort();
    }

    #[tokio::test]
    async fn test_search_without_hits_is_empty() {
        let (endpoint, handle) =
            start_mock_catalog(Router::new().route("/graphql", post(mock_catalog))).await;
        let client = client_for(endpoint, DEFAULT_TIMEOUT);

        let entries = client
            .search("Nothing Matches", &Region::australia(), 5)
            .await
            .unwrap();
        assert!(entries.is_empty());

        handle.abort();
    }

    #[tokio::test]
    async fn test_offers_parse_packages_and_icons() {
        let (endpoint, handle) =
            start_mock_catalog(Router::new().route("/graphql", post(mock_catalog))).await;
        let client = client_for(endpoint, DEFAULT_TIMEOUT);

        let offers = client.offers("tm10", &Region::australia(), true).await.unwrap();

        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].monetization_type, MonetizationType::Flatrate);
        assert_eq!(offers[0].url, "https://www.netflix.com/title/113");
        let netflix = offers[0].package.as_ref().unwrap();
        assert_eq!(netflix.name, "Netflix");
        assert_eq!(
            netflix.icon,
            "https://images.justwatch.com/icon/207360008/s100/netflix.png"
        );

        assert_eq!(offers[1].monetization_type, MonetizationType::Buy);
        assert_eq!(offers[1].package.as_ref().unwrap().icon, "");

        handle.abort();
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let (endpoint, handle) =
            start_mock_catalog(Router::new().route("/graphql", post(failing_catalog))).await;
        let client = client_for(endpoint, DEFAULT_TIMEOUT);

        let err = client.search("Heat", &Region::australia(), 5).await.unwrap_err();
        match err {
            StreamingError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream unavailable");
            }
            other => panic!("expected Status error, got {:?}", other),
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_graphql_errors_are_surfaced() {
        let (endpoint, handle) =
            start_mock_catalog(Router::new().route("/graphql", post(erroring_catalog))).await;
        let client = client_for(endpoint, DEFAULT_TIMEOUT);

        let err = client.offers("tm10", &Region::australia(), true).await.unwrap_err();
        assert!(matches!(err, StreamingError::GraphQl(ref msg) if msg.contains("$country")));

        handle.abort();
    }

    #[tokio::test]
    async fn test_timeout() {
        let (endpoint, handle) =
            start_mock_catalog(Router::new().route("/graphql", post(slow_catalog))).await;
        let client = client_for(endpoint, Duration::from_millis(200));

        let err = client.search("Heat", &Region::australia(), 5).await.unwrap_err();
        assert!(matches!(err, StreamingError::Timeout { timeout_ms: 200 }));

        handle.abort();
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop to get a port nobody is listening on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}/graphql", addr), DEFAULT_TIMEOUT);
        let err = client.search("Heat", &Region::australia(), 5).await.unwrap_err();
        assert!(matches!(err, StreamingError::Http(_)));
    }
}
