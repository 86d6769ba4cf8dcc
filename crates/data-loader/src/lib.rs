//! # Data Loader Crate
//!
//! This crate loads the film dataset and exposes it as an immutable
//! [`FilmCatalog`].
//!
//! ## Main Components
//!
//! - **types**: Core domain types (FilmRecord, FilmCatalog)
//! - **parser**: Parse the delimited dataset file into FilmRecords
//! - **index**: Baseline ordering and the genre index
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::FilmCatalog;
//! use std::path::Path;
//!
//! let catalog = FilmCatalog::load(Path::new("/data/processed/clean.csv"))?;
//!
//! println!("{} films, top genre {}", catalog.len(), catalog.genre_tokens()[0]);
//! for film in catalog.films_by_director("Michael Mann") {
//!     println!("{} ({})", film.title, film.year);
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::genre_tokens;
pub use types::{FilmCatalog, FilmRecord, STANDOUT_MIN_RATING, STANDOUT_MIN_VOTES};
