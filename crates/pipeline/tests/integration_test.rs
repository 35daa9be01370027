//! Integration tests for the pipeline.
//!
//! These tests run full queries, from raw UI input to a sorted result,
//! against a small catalog of real titles.

use catalog::{Catalog, FixedClock, Genre, Movie};
use chrono::{TimeZone, Utc};
use pipeline::{FilterCriteria, QuickFilter, RawCriteria, SearchScope, SortKey, filter_and_sort};

const DRAMA: u32 = 1;
const SCI_FI: u32 = 2;
const CRIME: u32 = 3;
const COMEDY: u32 = 4;

fn movie(id: u32, title: &str, year: u16, director: &str, rating: f32, genres: &[u32]) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        year,
        duration: 120,
        director: director.to_string(),
        country: "США".to_string(),
        description: String::new(),
        poster: format!("https://images.example.com/{id}.jpg"),
        rating,
        genres: genres.to_vec(),
    }
}

fn create_test_catalog() -> Catalog {
    let genres = [(DRAMA, "Драма"), (SCI_FI, "Фантастика"), (CRIME, "Криминал"), (COMEDY, "Комедия")]
        .into_iter()
        .map(|(id, name)| Genre {
            id,
            name: name.to_string(),
        })
        .collect();

    Catalog::from_parts(
        genres,
        vec![
            movie(1, "Интерстеллар", 2014, "Кристофер Нолан", 8.6, &[DRAMA, SCI_FI]),
            movie(2, "Побег из Шоушенка", 1994, "Фрэнк Дарабонт", 9.3, &[DRAMA]),
            movie(3, "Криминальное чтиво", 1994, "Квентин Тарантино", 8.9, &[CRIME]),
            movie(4, "Ёлки", 2010, "Тимур Бекмамбетов", 6.3, &[COMEDY]),
            movie(5, "Жмурки", 2005, "Алексей Балабанов", 7.4, &[COMEDY, CRIME]),
            movie(6, "Елена", 2011, "Андрей Звягинцев", 7.3, &[DRAMA]),
            movie(7, "Дюна: Часть вторая", 2024, "Дени Вильнёв", 8.5, &[SCI_FI]),
            movie(8, "Начало", 2010, "Кристофер Нолан", 8.7, &[SCI_FI, CRIME]),
        ],
        vec![],
        vec![],
    )
}

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap())
}

fn ids(movies: &[&Movie]) -> Vec<u32> {
    movies.iter().map(|m| m.id).collect()
}

#[test]
fn test_full_query_from_raw_input() {
    let catalog = create_test_catalog();
    let raw = RawCriteria {
        genre_ids: vec![DRAMA.to_string(), SCI_FI.to_string()],
        year_from: Some("2000".to_string()),
        rating_from: Some("any".to_string()),
        sort_key: Some("year".to_string()),
        ..Default::default()
    };

    let criteria = FilterCriteria::from_raw(&raw);
    let result = filter_and_sort(&catalog, &criteria, &clock());
    assert_eq!(ids(&result), vec![7, 1, 6, 8]);
}

#[test]
fn test_malformed_raw_field_is_ignored() {
    let catalog = create_test_catalog();
    let raw = RawCriteria {
        year_from: Some("две тысячи".to_string()),
        quick_filter: Some("popular".to_string()),
        ..Default::default()
    };

    let result = filter_and_sort(&catalog, &FilterCriteria::from_raw(&raw), &clock());
    assert_eq!(ids(&result), vec![2, 3, 8, 1, 7]);
}

#[test]
fn test_quick_filter_runs_before_search() {
    let catalog = create_test_catalog();
    let criteria = FilterCriteria {
        search_text: Some("нолан".to_string()),
        search_scope: SearchScope::TitleAndDirector,
        quick_filter: QuickFilter::New,
        ..Default::default()
    };
    assert!(filter_and_sort(&catalog, &criteria, &clock()).is_empty());

    let criteria = FilterCriteria {
        quick_filter: QuickFilter::All,
        ..criteria
    };
    assert_eq!(ids(&filter_and_sort(&catalog, &criteria, &clock())), vec![8, 1]);
}

#[test]
fn test_new_quick_filter_tracks_clock() {
    let catalog = create_test_catalog();
    let criteria = FilterCriteria {
        quick_filter: QuickFilter::New,
        ..Default::default()
    };
    assert_eq!(ids(&filter_and_sort(&catalog, &criteria, &clock())), vec![7]);

    let later = FixedClock::new(Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap());
    assert!(filter_and_sort(&catalog, &criteria, &later).is_empty());
}

#[test]
fn test_title_sort_with_cyrillic_yo() {
    let catalog = create_test_catalog();
    let criteria = FilterCriteria {
        sort_key: SortKey::Title,
        year_from: Some(2005),
        year_to: Some(2011),
        ..Default::default()
    };
    let result = filter_and_sort(&catalog, &criteria, &clock());
    let titles: Vec<&str> = result.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Елена", "Ёлки", "Жмурки", "Начало"]);
}

#[test]
fn test_search_matches_cyrillic_substring() {
    let catalog = create_test_catalog();
    let criteria = FilterCriteria {
        search_text: Some("интерс".to_string()),
        ..Default::default()
    };
    assert_eq!(ids(&filter_and_sort(&catalog, &criteria, &clock())), vec![1]);
}
