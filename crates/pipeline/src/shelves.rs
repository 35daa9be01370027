//! Curated shelves and search-as-you-type suggestions.

use crate::criteria::SortKey;
use crate::filters::search::contains_folded;
use crate::sort::sort_movies;
use catalog::{Catalog, Movie};

/// How many suggestions the search box shows
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Up to `limit` movies whose title or director contains `query`, in
/// catalog order. A blank query suggests nothing.
pub fn suggest<'a>(catalog: &'a Catalog, query: &str, limit: usize) -> Vec<&'a Movie> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    catalog
        .movies()
        .iter()
        .filter(|m| contains_folded(&m.title, &needle) || contains_folded(&m.director, &needle))
        .take(limit)
        .collect()
}

/// Top `n` movies by rating
pub fn popular(catalog: &Catalog, n: usize) -> Vec<&Movie> {
    top_by(catalog, SortKey::Rating, n)
}

/// Top `n` movies by release year
pub fn newest(catalog: &Catalog, n: usize) -> Vec<&Movie> {
    top_by(catalog, SortKey::Year, n)
}

fn top_by(catalog: &Catalog, key: SortKey, n: usize) -> Vec<&Movie> {
    let mut movies: Vec<&Movie> = catalog.movies().iter().collect();
    sort_movies(&mut movies, key);
    movies.truncate(n);
    movies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ids, movie};

    fn catalog() -> Catalog {
        let mut nolan = movie(1, "Интерстеллар", 2014, 8.6, &[]);
        nolan.director = "Кристофер Нолан".to_string();
        let mut nolan2 = movie(2, "Начало", 2010, 8.7, &[]);
        nolan2.director = "Кристофер Нолан".to_string();
        Catalog::from_parts(
            vec![],
            vec![
                nolan,
                nolan2,
                movie(3, "Зеленая миля", 1999, 9.1, &[]),
                movie(4, "Побег из Шоушенка", 1994, 9.1, &[]),
                movie(5, "Дюна", 2021, 8.0, &[]),
            ],
            vec![],
            vec![],
        )
    }

    #[test]
    fn test_suggest_matches_title_or_director_in_catalog_order() {
        let catalog = catalog();
        assert_eq!(ids(&suggest(&catalog, "нолан", 5)), vec![1, 2]);
        assert_eq!(ids(&suggest(&catalog, "  ДЮН ", 5)), vec![5]);
        assert_eq!(ids(&suggest(&catalog, "и", 2)), vec![1, 2]);
        assert!(suggest(&catalog, "   ", 5).is_empty());
    }

    #[test]
    fn test_shelves_are_stable() {
        let catalog = catalog();
        assert_eq!(ids(&popular(&catalog, 3)), vec![3, 4, 2]);
        assert_eq!(ids(&newest(&catalog, 2)), vec![5, 1]);
        assert_eq!(popular(&catalog, 100).len(), 5);
    }
}
