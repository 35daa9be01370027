//! The one-click "popular" / "new" shortcuts.

use crate::criteria::{NEW_RELEASE_YEARS, POPULAR_RATING, QuickFilter};
use crate::traits::Filter;
use catalog::Movie;

/// Applies a [`QuickFilter`] preset.
///
/// `New` is relative to the year the filter was built with, so the same
/// pipeline gives the same answer for the whole session.
pub struct QuickFilterStage {
    preset: QuickFilter,
    current_year: i32,
}

impl QuickFilterStage {
    pub fn new(preset: QuickFilter, current_year: i32) -> Self {
        Self {
            preset,
            current_year,
        }
    }

    fn accepts(&self, movie: &Movie) -> bool {
        match self.preset {
            QuickFilter::All => true,
            QuickFilter::Popular => movie.rating >= POPULAR_RATING,
            QuickFilter::New => {
                let year = i32::from(movie.year);
                (self.current_year - NEW_RELEASE_YEARS..=self.current_year).contains(&year)
            }
        }
    }
}

impl Filter for QuickFilterStage {
    fn name(&self) -> &str {
        "QuickFilterStage"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        if self.preset == QuickFilter::All {
            return movies;
        }
        movies.into_iter().filter(|m| self.accepts(m)).collect()
    }
}
