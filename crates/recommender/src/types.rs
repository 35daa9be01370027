//! Core types for the recommendation engine.

use catalog::{GenreId, MovieId, UserId};
use serde::Serialize;
use std::collections::HashSet;

/// A movie suggested by a source, with the evidence behind its score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub movie_id: MovieId,
    pub score: u32,
    /// How many of the user's favourite genres the movie has
    pub genre_matches: usize,
    /// Whether one of the user's favourite directors made it
    pub director_match: bool,
}

/// What one user has shown they like, built from their interactions.
///
/// Every set here is derived once per request so candidate scoring only does
/// O(1) lookups.
#[derive(Debug, Clone, Default)]
pub struct TasteProfile {
    pub user_id: Option<UserId>,

    /// Every movie with an interaction record, whatever its status
    pub seen_movies: HashSet<MovieId>,

    /// Movies rated at or above the threshold, in interaction order
    pub liked_movies: Vec<MovieId>,

    pub affinity_genres: HashSet<GenreId>,
    pub affinity_directors: HashSet<String>,
}

impl TasteProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// No liked movies means there is nothing to personalise on
    pub fn is_empty(&self) -> bool {
        self.liked_movies.is_empty()
    }
}
