//! Core domain types for the movie catalog.
//!
//! This module defines the fundamental data structures used throughout the system:
//! movies, genres, cinemas, screenings and users, plus the in-memory `Catalog`
//! that owns them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up movie IDs with genre IDs

/// Unique identifier for a movie
pub type MovieId = u32;

/// Unique identifier for a genre
pub type GenreId = u32;

/// Unique identifier for a cinema
pub type CinemaId = u32;

/// Unique identifier for a screening
pub type ScreeningId = u32;

/// Unique identifier for a user.
///
/// 64 bits wide because registration derives ids from a millisecond timestamp.
pub type UserId = u64;

// =============================================================================
// Movie-related Types
// =============================================================================

/// A film in the catalog.
///
/// Movies are immutable once loaded; admin edits are simulated, never applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Release year
    pub year: u16,
    /// Running time in minutes, always > 0
    pub duration: u16,
    pub director: String,
    pub country: String,
    pub description: String,
    /// Poster URI
    pub poster: String,
    /// Critic rating on the 0-10 scale
    pub rating: f32,
    /// Genre references. Order carries no meaning.
    pub genres: Vec<GenreId>,
}

impl Movie {
    /// True if the movie carries at least one genre from `genre_ids`
    pub fn has_any_genre(&self, genre_ids: &HashSet<GenreId>) -> bool {
        self.genres.iter().any(|id| genre_ids.contains(id))
    }

    /// Number of this movie's genres that appear in `genre_ids`
    pub fn genre_overlap(&self, genre_ids: &HashSet<GenreId>) -> usize {
        self.genres.iter().filter(|id| genre_ids.contains(id)).count()
    }
}

/// A genre, e.g. "Драма".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    /// Unique display name
    pub name: String,
}

// =============================================================================
// Cinema / Screening Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cinema {
    pub id: CinemaId,
    pub name: String,
    pub address: String,
}

/// A single showtime of a movie in a cinema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screening {
    pub id: ScreeningId,
    pub cinema_id: CinemaId,
    pub movie_id: MovieId,
    pub datetime: DateTime<Utc>,
    /// Ticket price in whole currency units
    pub price: u32,
}

// =============================================================================
// User Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// The session-resident user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// Catalog - The Core In-Memory Store
// =============================================================================

/// Holds every catalog entity plus the indices used for lookups.
///
/// Movies keep their insertion order: the filter pipeline and the
/// recommendation engine both rely on it as the natural, tie-breaking order.
/// Lookups by id go through position maps so they stay O(1).
#[derive(Debug, Default)]
pub struct Catalog {
    // Primary data stores, in insertion order
    pub(crate) movies: Vec<Movie>,
    pub(crate) genres: Vec<Genre>,
    pub(crate) cinemas: Vec<Cinema>,
    pub(crate) screenings: Vec<Screening>,

    // Position of each entity in its Vec
    pub(crate) movie_positions: HashMap<MovieId, usize>,
    pub(crate) genre_positions: HashMap<GenreId, usize>,
    pub(crate) cinema_positions: HashMap<CinemaId, usize>,
    pub(crate) screening_positions: HashMap<ScreeningId, usize>,

    /// Screenings of each movie, in insertion order
    pub(crate) movie_screenings: HashMap<MovieId, Vec<ScreeningId>>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already-parsed parts and index it.
    ///
    /// No validation happens here; see [`Catalog::validate`].
    pub fn from_parts(
        genres: Vec<Genre>,
        movies: Vec<Movie>,
        cinemas: Vec<Cinema>,
        screenings: Vec<Screening>,
    ) -> Self {
        let mut catalog = Self::new();
        for genre in genres {
            catalog.insert_genre(genre);
        }
        for movie in movies {
            catalog.insert_movie(movie);
        }
        for cinema in cinemas {
            catalog.insert_cinema(cinema);
        }
        for screening in screenings {
            catalog.insert_screening(screening);
        }
        catalog.build_secondary_indices();
        catalog
    }

    // Getters return references; the catalog keeps ownership

    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movie_positions.get(&id).map(|&pos| &self.movies[pos])
    }

    pub fn get_genre(&self, id: GenreId) -> Option<&Genre> {
        self.genre_positions.get(&id).map(|&pos| &self.genres[pos])
    }

    pub fn get_cinema(&self, id: CinemaId) -> Option<&Cinema> {
        self.cinema_positions.get(&id).map(|&pos| &self.cinemas[pos])
    }

    pub fn get_screening(&self, id: ScreeningId) -> Option<&Screening> {
        self.screening_positions.get(&id).map(|&pos| &self.screenings[pos])
    }

    /// All movies in insertion order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn cinemas(&self) -> &[Cinema] {
        &self.cinemas
    }

    pub fn screenings(&self) -> &[Screening] {
        &self.screenings
    }

    /// Get all screenings of a movie
    pub fn get_movie_screenings(&self, movie_id: MovieId) -> Vec<&Screening> {
        self.movie_screenings
            .get(&movie_id)
            .map(|ids| ids.iter().filter_map(|id| self.get_screening(*id)).collect())
            .unwrap_or_default()
    }

    /// Display names of a movie's genres; unknown ids are skipped
    pub fn genre_names(&self, movie: &Movie) -> Vec<&str> {
        movie
            .genres
            .iter()
            .filter_map(|id| self.get_genre(*id))
            .map(|g| g.name.as_str())
            .collect()
    }

    /// Look a genre up by its display name, ignoring case
    pub fn find_genre_by_name(&self, name: &str) -> Option<&Genre> {
        let needle = name.trim().to_lowercase();
        self.genres.iter().find(|g| g.name.to_lowercase() == needle)
    }

    // Mutators used while loading. An insert with an existing id replaces the
    // entity in place, keeping its original position.

    pub fn insert_movie(&mut self, movie: Movie) {
        match self.movie_positions.get(&movie.id) {
            Some(&pos) => self.movies[pos] = movie,
            None => {
                self.movie_positions.insert(movie.id, self.movies.len());
                self.movies.push(movie);
            }
        }
    }

    pub fn insert_genre(&mut self, genre: Genre) {
        match self.genre_positions.get(&genre.id) {
            Some(&pos) => self.genres[pos] = genre,
            None => {
                self.genre_positions.insert(genre.id, self.genres.len());
                self.genres.push(genre);
            }
        }
    }

    pub fn insert_cinema(&mut self, cinema: Cinema) {
        match self.cinema_positions.get(&cinema.id) {
            Some(&pos) => self.cinemas[pos] = cinema,
            None => {
                self.cinema_positions.insert(cinema.id, self.cinemas.len());
                self.cinemas.push(cinema);
            }
        }
    }

    pub fn insert_screening(&mut self, screening: Screening) {
        match self.screening_positions.get(&screening.id) {
            Some(&pos) => self.screenings[pos] = screening,
            None => {
                self.screening_positions
                    .insert(screening.id, self.screenings.len());
                self.screenings.push(screening);
            }
        }
    }

    /// Get counts for debugging/validation: (movies, genres, cinemas, screenings)
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        (
            self.movies.len(),
            self.genres.len(),
            self.cinemas.len(),
            self.screenings.len(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
