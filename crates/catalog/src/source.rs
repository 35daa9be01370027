//! Read-only catalog access and the admin façade.
//!
//! The rest of the system reads the catalog through [`CatalogSource`], so a
//! different backing store only has to provide the four listings.
//! [`AdminFacade`] accepts catalog edits, validates them and logs them; it
//! never mutates the catalog.

use crate::clock::Clock;
use crate::error::{CatalogError, Result};
use crate::types::*;
use crate::validate;
use tracing::info;

/// Listing interface over catalog entities
pub trait CatalogSource {
    fn list_movies(&self) -> &[Movie];
    fn list_genres(&self) -> &[Genre];
    fn list_cinemas(&self) -> &[Cinema];
    fn list_screenings(&self) -> &[Screening];
}

impl CatalogSource for Catalog {
    fn list_movies(&self) -> &[Movie] {
        self.movies()
    }

    fn list_genres(&self) -> &[Genre] {
        self.genres()
    }

    fn list_cinemas(&self) -> &[Cinema] {
        self.cinemas()
    }

    fn list_screenings(&self) -> &[Screening] {
        self.screenings()
    }
}

/// What an admin edit would have done
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    Created,
    Updated,
    Deleted,
}

/// Catalog editing without persistence.
///
/// Submissions are validated with the same rules as catalog loading. A valid
/// submission is logged and reported back, and the catalog stays untouched.
pub struct AdminFacade<'a> {
    catalog: &'a Catalog,
    clock: &'a dyn Clock,
}

impl<'a> AdminFacade<'a> {
    pub fn new(catalog: &'a Catalog, clock: &'a dyn Clock) -> Self {
        Self { catalog, clock }
    }

    /// Validate a movie submission. An existing id counts as an update.
    pub fn submit_movie(&self, movie: &Movie) -> Result<AdminAction> {
        validate::validate_movie(movie, self.clock.current_year())?;
        for &genre_id in &movie.genres {
            if self.catalog.get_genre(genre_id).is_none() {
                return Err(CatalogError::MissingReference {
                    entity: "Genre".to_string(),
                    id: genre_id,
                });
            }
        }
        let action = if self.catalog.get_movie(movie.id).is_some() {
            AdminAction::Updated
        } else {
            AdminAction::Created
        };
        info!(movie_id = movie.id, ?action, "Admin movie edit accepted (not persisted)");
        Ok(action)
    }

    pub fn submit_cinema(&self, cinema: &Cinema) -> Result<AdminAction> {
        validate::validate_cinema(cinema)?;
        let action = if self.catalog.get_cinema(cinema.id).is_some() {
            AdminAction::Updated
        } else {
            AdminAction::Created
        };
        info!(cinema_id = cinema.id, ?action, "Admin cinema edit accepted (not persisted)");
        Ok(action)
    }

    pub fn submit_screening(&self, screening: &Screening) -> Result<AdminAction> {
        validate::validate_screening(screening)?;
        if self.catalog.get_cinema(screening.cinema_id).is_none() {
            return Err(CatalogError::MissingReference {
                entity: "Cinema".to_string(),
                id: screening.cinema_id,
            });
        }
        if self.catalog.get_movie(screening.movie_id).is_none() {
            return Err(CatalogError::MissingReference {
                entity: "Movie".to_string(),
                id: screening.movie_id,
            });
        }
        info!(screening_id = screening.id, "Admin screening accepted (not persisted)");
        Ok(AdminAction::Created)
    }

    /// Delete a movie. Unknown ids are a `MissingReference`.
    pub fn delete_movie(&self, id: MovieId) -> Result<AdminAction> {
        if self.catalog.get_movie(id).is_none() {
            return Err(CatalogError::MissingReference {
                entity: "Movie".to_string(),
                id,
            });
        }
        info!(movie_id = id, "Admin movie deletion accepted (not persisted)");
        Ok(AdminAction::Deleted)
    }
}
