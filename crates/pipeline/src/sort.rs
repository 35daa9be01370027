//! Result ordering.
//!
//! All orderings are stable: movies that compare equal keep the order they
//! arrived in, which for a fresh query is catalog order.

use crate::criteria::SortKey;
use catalog::Movie;
use icu::collator::{Collator, CollatorOptions, Strength};
use icu::locid::locale;
use std::cmp::Ordering;
use tracing::warn;

/// Title comparison with Russian collation rules: `ё` sorts with `е`, and
/// accented Latin letters sort with their base letter.
///
/// Falls back to comparing lowercased titles if collation data can't be
/// loaded.
pub struct TitleCollator {
    collator: Option<Collator>,
}

impl TitleCollator {
    pub fn russian() -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);

        let collator = match Collator::try_new(&locale!("ru").into(), options) {
            Ok(collator) => Some(collator),
            Err(e) => {
                warn!("Collation unavailable, sorting titles by lowercase: {}", e);
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        }
    }
}

/// Sort in place by `key`: rating and year descending, title ascending.
pub fn sort_movies(movies: &mut [&Movie], key: SortKey) {
    match key {
        SortKey::Rating => movies.sort_by(|a, b| rating_key(b).total_cmp(&rating_key(a))),
        SortKey::Year => movies.sort_by(|a, b| b.year.cmp(&a.year)),
        SortKey::Title => {
            let collator = TitleCollator::russian();
            movies.sort_by(|a, b| collator.compare(&a.title, &b.title));
        }
    }
}

/// Unvalidated catalogs may carry NaN; it ranks below every real rating
fn rating_key(movie: &Movie) -> f32 {
    if movie.rating.is_nan() {
        f32::NEG_INFINITY
    } else {
        movie.rating
    }
}
