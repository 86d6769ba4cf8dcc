//! Parser for the film dataset file.
//!
//! The source is a delimited file with a header row. Columns are looked up
//! by name, so their order does not matter and extra columns are ignored:
//!
//! ```text
//! primaryTitle,originalTitle,averageRating,numVotes,startYear,runtimeMinutes,genres,primaryName
//! Heat,Heat,8.3,716000,1995,170,"Action,Crime,Drama",Michael Mann
//! ```
//!
//! Rows whose `primaryTitle` differs from `originalTitle` are alternate-title
//! duplicates and are skipped here.

use crate::error::{DataLoadError, Result};
use crate::types::FilmRecord;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

pub const COL_PRIMARY_TITLE: &str = "primaryTitle";
pub const COL_ORIGINAL_TITLE: &str = "originalTitle";
pub const COL_AVERAGE_RATING: &str = "averageRating";
pub const COL_NUM_VOTES: &str = "numVotes";
pub const COL_START_YEAR: &str = "startYear";
pub const COL_RUNTIME_MINUTES: &str = "runtimeMinutes";
pub const COL_GENRES: &str = "genres";
pub const COL_PRIMARY_NAME: &str = "primaryName";

/// Marker the IMDb exports use for a missing value
const NULL_MARKER: &str = "\\N";

/// Positions of the required columns within a header row
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    primary_title: usize,
    original_title: usize,
    average_rating: usize,
    num_votes: usize,
    start_year: usize,
    runtime_minutes: usize,
    genres: usize,
    primary_name: usize,
}

impl ColumnMap {
    /// Resolve every required column, failing on the first one that is missing
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DataLoadError::MissingColumn {
                    column: name.to_string(),
                })
        };

        Ok(Self {
            primary_title: find(COL_PRIMARY_TITLE)?,
            original_title: find(COL_ORIGINAL_TITLE)?,
            average_rating: find(COL_AVERAGE_RATING)?,
            num_votes: find(COL_NUM_VOTES)?,
            start_year: find(COL_START_YEAR)?,
            runtime_minutes: find(COL_RUNTIME_MINUTES)?,
            genres: find(COL_GENRES)?,
            primary_name: find(COL_PRIMARY_NAME)?,
        })
    }
}

/// Parse the dataset file at `path`.
///
/// Files ending in `.tsv` are read tab-delimited, everything else as CSV.
/// Returns canonical rows in file order; sorting is the catalog's job.
pub fn parse_films(path: &Path) -> Result<Vec<FilmRecord>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    let delimiter = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    };

    parse_films_from_reader(file, delimiter)
}

/// Parse dataset rows from any reader (used directly by tests)
///
/// Tab-delimited input is read with quoting off: in IMDb-style TSV a `"` is
/// part of the value, e.g. `"Weird": The Al Yankovic Story`.
pub fn parse_films_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Vec<FilmRecord>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .quoting(delimiter != b'\t')
        .has_headers(true)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(reader.headers()?)?;

    let mut films = Vec::new();
    let mut skipped = 0usize;
    let mut incomplete = 0usize;

    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let primary_title = field(&row, columns.primary_title);
        let original_title = field(&row, columns.original_title);
        if primary_title != original_title {
            skipped += 1;
            continue;
        }

        // Rows without a rating or a year can never pass a year range
        let rating: Option<f32> = parse_optional(&row, columns.average_rating, COL_AVERAGE_RATING, line)?;
        let year: Option<i32> = parse_optional(&row, columns.start_year, COL_START_YEAR, line)?;
        let (Some(imdb_rating), Some(year)) = (rating, year) else {
            incomplete += 1;
            continue;
        };

        let film = FilmRecord {
            title: primary_title.to_string(),
            imdb_rating,
            num_votes: parse_required(&row, columns.num_votes, COL_NUM_VOTES, line)?,
            year,
            runtime_minutes: parse_optional(
                &row,
                columns.runtime_minutes,
                COL_RUNTIME_MINUTES,
                line,
            )?,
            genres: parse_genres(field(&row, columns.genres)),
            director: field(&row, columns.primary_name).to_string(),
        };

        films.push(film);
    }

    tracing::debug!(
        "Parsed {} canonical films, skipped {} alternate-title rows and {} rows without rating or year",
        films.len(),
        skipped,
        incomplete
    );

    Ok(films)
}

/// Split a comma-separated genre field into tokens.
///
/// Example: "Action,Crime,Drama" -> ["Action", "Crime", "Drama"]
///          "\N" or "" -> []
pub fn parse_genres(s: &str) -> Vec<String> {
    if s == NULL_MARKER {
        return Vec::new();
    }
    s.split(',')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn field(row: &StringRecord, index: usize) -> &str {
    row.get(index).unwrap_or("")
}

fn parse_required<T>(row: &StringRecord, index: usize, name: &str, line: u64) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = field(row, index).trim();
    raw.parse().map_err(|e: T::Err| DataLoadError::ParseError {
        line,
        field: name.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Like `parse_required`, but an empty or `\N` field is `None`
fn parse_optional<T>(row: &StringRecord, index: usize, name: &str, line: u64) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = field(row, index).trim();
    if raw.is_empty() || raw == NULL_MARKER {
        return Ok(None);
    }
    parse_required(row, index, name, line).map(Some)
}
