//! Parser for catalog data files.
//!
//! A catalog directory holds one JSON array per entity kind:
//! - genres.json: `[{"id": 3, "name": "Драма"}, ...]`
//! - movies.json: `[{"id": 1, "title": "...", "genres": [3, 4], ...}, ...]`
//! - cinemas.json: `[{"id": 1, "name": "...", "address": "..."}, ...]`
//! - screenings.json (optional): `[{"id": 1, "cinemaId": 1, "movieId": 1, "datetime": "...", "price": 350}, ...]`

use crate::error::{CatalogError, Result};
use crate::types::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const GENRES_FILE: &str = "genres.json";
pub const MOVIES_FILE: &str = "movies.json";
pub const CINEMAS_FILE: &str = "cinemas.json";
pub const SCREENINGS_FILE: &str = "screenings.json";

/// Read a JSON array file into a Vec.
///
/// A missing file maps to `FileNotFound`; malformed content maps to
/// `ParseError` with the position serde_json reports.
fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(e),
    })?;

    parse_json_array(&content, &file_label(path))
}

/// Parse an in-memory JSON array; `file` only labels errors
pub fn parse_json_array<T: DeserializeOwned>(content: &str, file: &str) -> Result<Vec<T>> {
    serde_json::from_str(content).map_err(|e| CatalogError::ParseError {
        file: file.to_string(),
        line: e.line(),
        column: e.column(),
        reason: e.to_string(),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the genres.json file
pub fn parse_genres(path: &Path) -> Result<Vec<Genre>> {
    read_json_array(path)
}

/// Parse the movies.json file
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    read_json_array(path)
}

/// Parse the cinemas.json file
pub fn parse_cinemas(path: &Path) -> Result<Vec<Cinema>> {
    read_json_array(path)
}

/// Parse the screenings.json file.
///
/// Screenings are optional: a catalog without a schedule is still browsable,
/// so a missing file yields an empty list.
pub fn parse_screenings(path: &Path) -> Result<Vec<Screening>> {
    match read_json_array(path) {
        Err(CatalogError::FileNotFound { .. }) => Ok(Vec::new()),
        other => other,
    }
}
