//! Inclusive catalog-rating bounds.

use crate::traits::Filter;
use catalog::Movie;

pub struct RatingRangeFilter {
    from: Option<f32>,
    to: Option<f32>,
}

impl RatingRangeFilter {
    pub fn new(from: Option<f32>, to: Option<f32>) -> Self {
        Self { from, to }
    }
}

impl Filter for RatingRangeFilter {
    fn name(&self) -> &str {
        "RatingRangeFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        movies
            .into_iter()
            .filter(|m| self.from.is_none_or(|from| m.rating >= from))
            .filter(|m| self.to.is_none_or(|to| m.rating <= to))
            .collect()
    }
}
