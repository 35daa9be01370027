//! Field-level validation rules for catalog entities.
//!
//! The same rules guard both catalog loading and the admin façade, so a record
//! that loads cleanly would also pass an admin submission.

use crate::error::{CatalogError, Result};
use crate::types::{Cinema, Movie, Screening};

/// The first public film screening; nothing in the catalog predates it
pub const EARLIEST_YEAR: i32 = 1895;

/// How far into the future an announced release year may be
pub const MAX_YEARS_AHEAD: i32 = 5;

pub const MIN_RATING: f32 = 0.0;
pub const MAX_RATING: f32 = 10.0;

/// Check one movie's fields. Genre references are checked by
/// [`crate::Catalog::validate`], which can see the genre table.
pub fn validate_movie(movie: &Movie, current_year: i32) -> Result<()> {
    if movie.title.trim().is_empty() {
        return Err(CatalogError::invalid("title", format!("movie {}", movie.id)));
    }

    let year = i32::from(movie.year);
    if year < EARLIEST_YEAR || year > current_year + MAX_YEARS_AHEAD {
        return Err(CatalogError::invalid("year", movie.year));
    }

    if movie.duration == 0 {
        return Err(CatalogError::invalid("duration", movie.duration));
    }

    if movie.director.trim().is_empty() {
        return Err(CatalogError::invalid("director", format!("movie {}", movie.id)));
    }

    if movie.country.trim().is_empty() {
        return Err(CatalogError::invalid("country", format!("movie {}", movie.id)));
    }

    if !is_http_uri(&movie.poster) {
        return Err(CatalogError::invalid("poster", &movie.poster));
    }

    if !(MIN_RATING..=MAX_RATING).contains(&movie.rating) {
        return Err(CatalogError::invalid("rating", movie.rating));
    }

    Ok(())
}

pub fn validate_cinema(cinema: &Cinema) -> Result<()> {
    if cinema.name.trim().is_empty() {
        return Err(CatalogError::invalid("name", format!("cinema {}", cinema.id)));
    }
    if cinema.address.trim().is_empty() {
        return Err(CatalogError::invalid("address", format!("cinema {}", cinema.id)));
    }
    Ok(())
}

/// Screenings only carry references and a price, which `u32` already keeps
/// non-negative. The references are resolved in [`crate::Catalog::validate`].
pub fn validate_screening(screening: &Screening) -> Result<()> {
    if screening.cinema_id == 0 {
        return Err(CatalogError::invalid("cinemaId", screening.cinema_id));
    }
    if screening.movie_id == 0 {
        return Err(CatalogError::invalid("movieId", screening.movie_id));
    }
    Ok(())
}

/// Minimal absolute-URI check: an http(s) scheme followed by a host
fn is_http_uri(s: &str) -> bool {
    let rest = s
        .strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or("");
            !host.is_empty() && !host.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_movie() -> Movie {
        Movie {
            id: 1,
            title: "Интерстеллар".to_string(),
            year: 2014,
            duration: 169,
            director: "Кристофер Нолан".to_string(),
            country: "США, Великобритания".to_string(),
            description: "Путешествие сквозь червоточину.".to_string(),
            poster: "https://images.example.com/interstellar.jpg".to_string(),
            rating: 8.6,
            genres: vec![3, 4],
        }
    }

    #[test]
    fn test_valid_movie_passes() {
        assert!(validate_movie(&valid_movie(), 2026).is_ok());
    }

    #[test]
    fn test_year_bounds() {
        let mut movie = valid_movie();
        movie.year = 1894;
        assert!(validate_movie(&movie, 2026).is_err());

        movie.year = 2031;
        assert!(validate_movie(&movie, 2026).is_ok());

        movie.year = 2032;
        assert!(validate_movie(&movie, 2026).is_err());
    }

    #[test]
    fn test_rating_bounds_are_inclusive() {
        let mut movie = valid_movie();
        movie.rating = 10.0;
        assert!(validate_movie(&movie, 2026).is_ok());

        movie.rating = 0.0;
        assert!(validate_movie(&movie, 2026).is_ok());

        movie.rating = 10.1;
        assert!(validate_movie(&movie, 2026).is_err());

        movie.rating = f32::NAN;
        assert!(validate_movie(&movie, 2026).is_err());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut movie = valid_movie();
        movie.duration = 0;
        assert!(matches!(
            validate_movie(&movie, 2026),
            Err(CatalogError::InvalidValue { ref field, .. }) if field == "duration"
        ));
    }

    #[test]
    fn test_poster_must_be_http_uri() {
        assert!(is_http_uri("https://images.example.com/a.jpg"));
        assert!(is_http_uri("http://localhost/poster.png"));
        assert!(!is_http_uri("ftp://example.com/a.jpg"));
        assert!(!is_http_uri("https://"));
        assert!(!is_http_uri("poster.jpg"));
    }

    #[test]
    fn test_blank_cinema_fields_rejected() {
        let cinema = Cinema {
            id: 1,
            name: "Галактика".to_string(),
            address: "  ".to_string(),
        };
        assert!(validate_cinema(&cinema).is_err());
    }
}
