use catalog::{Catalog, FixedClock, Movie};
use chrono::{TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pipeline::{FilterCriteria, QuickFilter, SortKey, filter_and_sort};

fn synthetic_catalog(size: u32) -> Catalog {
    let movies = (1..=size)
        .map(|id| Movie {
            id,
            title: format!("Фильм {}", size - id),
            year: 1950 + (id % 76) as u16,
            duration: 90 + (id % 60) as u16,
            director: format!("Режиссер {}", id % 37),
            country: "Россия".to_string(),
            description: String::new(),
            poster: format!("https://images.example.com/{id}.jpg"),
            rating: (id % 100) as f32 / 10.0,
            genres: vec![id % 10 + 1, (id * 7) % 10 + 1],
        })
        .collect();
    Catalog::from_parts(vec![], movies, vec![], vec![])
}

fn bench_filter_and_sort(c: &mut Criterion) {
    let catalog = synthetic_catalog(5_000);
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());

    let by_rating = FilterCriteria {
        genre_ids: vec![1, 2, 3],
        year_from: Some(1990),
        ..Default::default()
    };
    let by_title = FilterCriteria {
        search_text: Some("фильм 1".to_string()),
        quick_filter: QuickFilter::Popular,
        sort_key: SortKey::Title,
        ..Default::default()
    };

    c.bench_function("filter_and_sort_rating_5k", |b| {
        b.iter(|| filter_and_sort(black_box(&catalog), black_box(&by_rating), &clock))
    });
    c.bench_function("filter_and_sort_title_5k", |b| {
        b.iter(|| filter_and_sort(black_box(&catalog), black_box(&by_title), &clock))
    });
}

criterion_group!(benches, bench_filter_and_sort);
criterion_main!(benches);
