//! Genre OR-filter.

use crate::traits::Filter;
use catalog::{GenreId, Movie};
use std::collections::HashSet;

/// Keeps movies with at least one of the selected genres.
/// An empty selection keeps everything.
pub struct GenreFilter {
    genres: HashSet<GenreId>,
}

impl GenreFilter {
    pub fn new(genres: impl IntoIterator<Item = GenreId>) -> Self {
        Self {
            genres: genres.into_iter().collect(),
        }
    }
}

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        if self.genres.is_empty() {
            return movies;
        }
        movies
            .into_iter()
            .filter(|m| m.has_any_genre(&self.genres))
            .collect()
    }
}
