//! Catalog building and indexing logic.
//!
//! - Parse the catalog files in parallel
//! - Build the screening index
//! - Validate field values and cross-references

use crate::clock::Clock;
use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use crate::validate;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

impl Catalog {
    /// Load a catalog from a directory of JSON files.
    ///
    /// Steps:
    /// 1. Parse all four files in parallel
    /// 2. Reject duplicate ids
    /// 3. Build primary and secondary indices
    /// 4. Validate fields and references
    pub fn load_from_dir(data_dir: &Path, clock: &dyn Clock) -> Result<Self> {
        info!("Loading catalog from {:?}", data_dir);

        let genres_path = data_dir.join(parser::GENRES_FILE);
        let movies_path = data_dir.join(parser::MOVIES_FILE);
        let cinemas_path = data_dir.join(parser::CINEMAS_FILE);
        let screenings_path = data_dir.join(parser::SCREENINGS_FILE);

        // Nested joins give four-way parallelism
        let ((genres, movies), (cinemas, screenings)) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_genres(&genres_path),
                    || parser::parse_movies(&movies_path),
                )
            },
            || {
                rayon::join(
                    || parser::parse_cinemas(&cinemas_path),
                    || parser::parse_screenings(&screenings_path),
                )
            },
        );

        let genres = genres?;
        let movies = movies?;
        let cinemas = cinemas?;
        let screenings = screenings?;

        info!(
            "Parsed {} genres, {} movies, {} cinemas, {} screenings",
            genres.len(),
            movies.len(),
            cinemas.len(),
            screenings.len()
        );

        ensure_unique("Genre", genres.iter().map(|g| g.id))?;
        ensure_unique("Movie", movies.iter().map(|m| m.id))?;
        ensure_unique("Cinema", cinemas.iter().map(|c| c.id))?;
        ensure_unique("Screening", screenings.iter().map(|s| s.id))?;

        let catalog = Catalog::from_parts(genres, movies, cinemas, screenings);
        catalog.validate(clock.current_year())?;

        info!("Catalog successfully built and validated");
        Ok(catalog)
    }

    /// Rebuild the per-movie screening index from the primary stores
    pub fn build_secondary_indices(&mut self) {
        self.movie_screenings.clear();
        for screening in &self.screenings {
            self.movie_screenings
                .entry(screening.movie_id)
                .or_default()
                .push(screening.id);
        }
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - Every movie, cinema and screening passes its field rules
    /// - Genre names are unique
    /// - Every genre reference on a movie exists
    /// - Every screening points at an existing cinema and movie
    pub fn validate(&self, current_year: i32) -> Result<()> {
        let mut names = HashSet::new();
        for genre in &self.genres {
            if genre.name.trim().is_empty() {
                return Err(CatalogError::invalid("genre name", genre.id));
            }
            if !names.insert(genre.name.to_lowercase()) {
                return Err(CatalogError::ValidationError(format!(
                    "genre name '{}' is used more than once",
                    genre.name
                )));
            }
        }

        for movie in &self.movies {
            validate::validate_movie(movie, current_year)?;
            for &genre_id in &movie.genres {
                if self.get_genre(genre_id).is_none() {
                    return Err(CatalogError::MissingReference {
                        entity: "Genre".to_string(),
                        id: genre_id,
                    });
                }
            }
        }

        for cinema in &self.cinemas {
            validate::validate_cinema(cinema)?;
        }

        for screening in &self.screenings {
            validate::validate_screening(screening)?;
            if self.get_cinema(screening.cinema_id).is_none() {
                return Err(CatalogError::MissingReference {
                    entity: "Cinema".to_string(),
                    id: screening.cinema_id,
                });
            }
            if self.get_movie(screening.movie_id).is_none() {
                return Err(CatalogError::MissingReference {
                    entity: "Movie".to_string(),
                    id: screening.movie_id,
                });
            }
        }

        Ok(())
    }
}

fn ensure_unique(entity: &str, ids: impl Iterator<Item = u32>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                entity: entity.to_string(),
                id,
            });
        }
    }
    Ok(())
}
