//! HTTP routes for the film browser.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/api/health` | Health check |
//! | `GET`  | `/api/streaming/{title}` | AU subscription services for a title |
//! | `GET`  | `/api/films` | Filtered film table |
//! | `GET`  | `/api/genres` | Genre facet, most common first |
//! | `GET`  | `/api/directors/{name}` | A director's films, oldest first |
//!
//! Streaming lookups answer `200` with `success: true` whether or not any
//! services were found, and `500` with `success: false` when the catalog
//! lookup itself fails.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use data_loader::FilmRecord;
use pipeline::{FilmQuery, parse_quick_filters};
use serde::{Deserialize, Serialize};
use streaming::StreamingOffer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::state::AppState;

/// Build the router with CORS open to any origin
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handle_health))
        .route("/api/streaming/{title}", get(handle_streaming))
        .route("/api/films", get(handle_films))
        .route("/api/genres", get(handle_genres))
        .route("/api/directors/{name}", get(handle_director))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============ Error response ============

/// Internal error type that converts into an Axum HTTP response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> ApiError {
    ApiError {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
    }
}

// ============ GET /api/health ============

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

// ============ GET /api/streaming/{title} ============

/// JSON body for a streaming lookup, success or failure
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StreamingResponse {
    pub success: bool,
    pub title: String,
    pub services: Vec<StreamingOffer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

async fn handle_streaming(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> (StatusCode, Json<StreamingResponse>) {
    info!("Fetching streaming services for: {}", title);

    match state.resolver.resolve(&title).await {
        Ok(services) => {
            let message = services
                .is_empty()
                .then(|| format!("No streaming services found for \"{}\"", title));
            (
                StatusCode::OK,
                Json(StreamingResponse {
                    success: true,
                    title,
                    services,
                    message,
                    error: None,
                }),
            )
        }
        Err(e) => {
            error!("Error fetching streaming services for {}: {}", title, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StreamingResponse {
                    success: false,
                    title,
                    services: Vec::new(),
                    message: None,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

// ============ GET /api/films ============

/// Query-string criteria for `/api/films`
///
/// A range given with only one end is completed from the widest bound
/// (the catalog's year span, 0-10 for ratings, 0-unbounded for runtime).
#[derive(Debug, Default, Deserialize)]
pub struct FilmsParams {
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub genre: Option<String>,
    pub search: Option<String>,
    pub director: Option<String>,
    /// Comma-separated quick filters, e.g. `top_rated,popular`
    pub quick: Option<String>,
    pub rating_min: Option<f32>,
    pub rating_max: Option<f32>,
    pub runtime_min: Option<u32>,
    pub runtime_max: Option<u32>,
    pub limit: Option<usize>,
}

/// A film row plus its highlight flag
#[derive(Debug, Serialize)]
pub struct FilmRow<'a> {
    #[serde(flatten)]
    pub film: &'a FilmRecord,
    pub standout: bool,
}

impl<'a> From<&'a FilmRecord> for FilmRow<'a> {
    fn from(film: &'a FilmRecord) -> Self {
        Self {
            film,
            standout: film.is_standout(),
        }
    }
}

#[derive(Serialize)]
struct FilmsResponse<'a> {
    count: usize,
    films: Vec<FilmRow<'a>>,
}

impl FilmsParams {
    /// Translate query-string parameters into a `FilmQuery`
    pub fn to_query(&self, year_bounds: Option<(i32, i32)>) -> Result<FilmQuery, ApiError> {
        let mut query = FilmQuery::new()
            .with_year_ends(self.year_min, self.year_max, year_bounds)
            .with_rating_ends(self.rating_min, self.rating_max)
            .with_runtime_ends(self.runtime_min, self.runtime_max);

        if let Some(quick) = &self.quick {
            query.quick_filters = parse_quick_filters(quick).map_err(|e| bad_request(e.to_string()))?;
        }

        query.genre = self.genre.clone();
        query.search_text = self.search.clone();
        query.director = self.director.clone();
        query.limit = self.limit;

        Ok(query)
    }
}

async fn handle_films(
    State(state): State<AppState>,
    params: Result<Query<FilmsParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params.map_err(|rejection| bad_request(rejection.body_text()))?;
    let query = params.to_query(state.catalog.year_bounds())?;
    let films: Vec<FilmRow<'_>> = query
        .run(state.catalog.films())
        .into_iter()
        .map(FilmRow::from)
        .collect();

    let body = FilmsResponse {
        count: films.len(),
        films,
    };
    Ok(Json(body).into_response())
}

// ============ GET /api/genres ============

#[derive(Serialize)]
struct GenresResponse<'a> {
    genres: &'a [String],
}

async fn handle_genres(State(state): State<AppState>) -> Response {
    Json(GenresResponse {
        genres: state.catalog.genre_tokens(),
    })
    .into_response()
}

// ============ GET /api/directors/{name} ============

#[derive(Serialize)]
struct DirectorResponse<'a> {
    director: &'a str,
    films: Vec<FilmRow<'a>>,
}

async fn handle_director(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let films = state
        .catalog
        .films_by_director(&name)
        .into_iter()
        .map(FilmRow::from)
        .collect();

    Json(DirectorResponse {
        director: &name,
        films,
    })
    .into_response()
}
