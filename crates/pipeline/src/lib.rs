//! Catalog filtering, sorting and schedule queries.
//!
//! This crate provides:
//! - `FilterCriteria` and its raw string form, `RawCriteria`
//! - Filter trait and one implementation per criteria field
//! - FilterPipeline for composing filters
//! - Locale-aware sorting, curated shelves and search suggestions
//! - Screening schedule queries
//!
//! ## Architecture
//! A query is processed in stages:
//! 1. Filters remove non-matching movies in a fixed order (quick filter,
//!    search, genres, years, ratings)
//! 2. The survivors are sorted by the requested key
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{filter_and_sort, FilterCriteria, SortKey};
//!
//! let criteria = FilterCriteria {
//!     genre_ids: vec![3, 4],
//!     rating_from: Some(8.0),
//!     sort_key: SortKey::Title,
//!     ..Default::default()
//! };
//! let movies = filter_and_sort(&catalog, &criteria, &SystemClock);
//! ```

pub mod criteria;
pub mod filter_pipeline;
pub mod filters;
pub mod schedule;
pub mod shelves;
pub mod sort;
pub mod traits;

// Re-export main types
pub use criteria::{
    CriteriaError, FilterCriteria, NEW_RELEASE_YEARS, POPULAR_RATING, QuickFilter, RawCriteria,
    SearchScope, SortKey,
};
pub use filter_pipeline::FilterPipeline;
pub use schedule::{
    ScheduleEntry, ScheduleQuery, find_screenings, schedule_span, screenings_for_movie,
    upcoming_dates,
};
pub use shelves::{DEFAULT_SUGGESTION_LIMIT, newest, popular, suggest};
pub use sort::{TitleCollator, sort_movies};
pub use traits::Filter;

use catalog::{Catalog, Clock, Movie};
use tracing::{debug, instrument};

/// Filter the catalog by `criteria` and sort the result.
///
/// Absent criteria leave the whole catalog, sorted by rating.
#[instrument(skip(catalog, clock))]
pub fn filter_and_sort<'a>(
    catalog: &'a Catalog,
    criteria: &FilterCriteria,
    clock: &dyn Clock,
) -> Vec<&'a Movie> {
    let pipeline = FilterPipeline::for_criteria(criteria, clock.current_year());
    let mut movies = pipeline.apply(catalog.movies().iter().collect());
    sort_movies(&mut movies, criteria.sort_key);

    debug!("{} of {} movies match", movies.len(), catalog.movies().len());
    movies
}

#[cfg(test)]
pub(crate) mod test_support {
    use catalog::{GenreId, Movie, MovieId};

    pub fn movie(id: MovieId, title: &str, year: u16, rating: f32, genres: &[GenreId]) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            year,
            duration: 120,
            director: "Режиссер".to_string(),
            country: "США".to_string(),
            description: String::new(),
            poster: format!("https://images.example.com/{id}.jpg"),
            rating,
            genres: genres.to_vec(),
        }
    }

    pub fn ids(movies: &[&Movie]) -> Vec<MovieId> {
        movies.iter().map(|m| m.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ids, movie};
    use catalog::FixedClock;
    use chrono::{TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_empty_catalog_gives_empty_result() {
        let catalog = Catalog::new();
        assert!(filter_and_sort(&catalog, &FilterCriteria::default(), &clock()).is_empty());
    }

    #[test]
    fn test_no_criteria_returns_everything_by_rating() {
        let catalog = Catalog::from_parts(
            vec![],
            vec![
                movie(1, "A", 2014, 8.6, &[]),
                movie(2, "B", 1994, 9.3, &[]),
                movie(3, "C", 2000, 8.6, &[]),
            ],
            vec![],
            vec![],
        );
        let result = filter_and_sort(&catalog, &FilterCriteria::default(), &clock());
        assert_eq!(ids(&result), vec![2, 1, 3]);
    }

    #[test]
    fn test_rating_from_with_rating_sort() {
        let catalog = Catalog::from_parts(
            vec![],
            vec![movie(1, "A", 2014, 8.6, &[1, 2]), movie(2, "B", 1994, 9.3, &[1])],
            vec![],
            vec![],
        );
        let criteria = FilterCriteria {
            rating_from: Some(9.0),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&catalog, &criteria, &clock())), vec![2]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let catalog = Catalog::from_parts(vec![], vec![movie(1, "A", 2014, 8.6, &[])], vec![], vec![]);
        let criteria = FilterCriteria {
            search_text: Some("zzz".to_string()),
            ..Default::default()
        };
        assert!(filter_and_sort(&catalog, &criteria, &clock()).is_empty());
    }
}
