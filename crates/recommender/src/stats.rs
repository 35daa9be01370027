//! Viewing statistics for the profile page.

use catalog::{Catalog, GenreId};
use interactions::{InteractionStatus, UserInteraction};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// One genre's share of a user's list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreCount {
    pub genre_id: GenreId,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total: usize,
    pub planned: usize,
    pub watching: usize,
    pub completed: usize,
    pub dropped: usize,

    /// Mean rating of completed movies on the 1-10 scale, 0 when none are rated
    pub average_rating: f32,
    /// How many ratings went into `average_rating`
    pub rated_count: usize,

    /// Most frequent first; equal counts keep first-encountered order
    pub genres: Vec<GenreCount>,
}

impl UserStats {
    pub fn count(&self, status: InteractionStatus) -> usize {
        match status {
            InteractionStatus::Planned => self.planned,
            InteractionStatus::Watching => self.watching,
            InteractionStatus::Completed => self.completed,
            InteractionStatus::Dropped => self.dropped,
        }
    }

    /// The average on the 1-5 display scale
    pub fn average_on_five_point(&self) -> f32 {
        self.average_rating / 2.0
    }

    /// The `n` most frequent genres
    pub fn top(&self, n: usize) -> &[GenreCount] {
        &self.genres[..n.min(self.genres.len())]
    }

    /// The `n` least frequent genres, taken from the tail of the histogram
    pub fn bottom(&self, n: usize) -> &[GenreCount] {
        let start = self.genres.len().saturating_sub(n);
        &self.genres[start..]
    }
}

/// Summarize one user's interactions.
///
/// Genre counts cover every status. The average only uses `completed`
/// records that carry a rating; dropped ratings are left out.
pub fn summarize(interactions: &[UserInteraction], catalog: &Catalog) -> UserStats {
    let mut stats = UserStats {
        total: interactions.len(),
        ..Default::default()
    };

    let mut rating_sum = 0u32;
    for record in interactions {
        match record.status {
            InteractionStatus::Planned => stats.planned += 1,
            InteractionStatus::Watching => stats.watching += 1,
            InteractionStatus::Completed => stats.completed += 1,
            InteractionStatus::Dropped => stats.dropped += 1,
        }
        if record.status == InteractionStatus::Completed {
            if let Some(rating) = record.rating {
                rating_sum += u32::from(rating);
                stats.rated_count += 1;
            }
        }
    }
    if stats.rated_count > 0 {
        stats.average_rating = rating_sum as f32 / stats.rated_count as f32;
    }

    stats.genres = genre_histogram(interactions, catalog);
    debug!(
        total = stats.total,
        genres = stats.genres.len(),
        "Summarized interactions"
    );
    stats
}

fn genre_histogram(interactions: &[UserInteraction], catalog: &Catalog) -> Vec<GenreCount> {
    // Position in `histogram` per genre, so first-seen order survives
    let mut slots: HashMap<GenreId, usize> = HashMap::new();
    let mut histogram: Vec<GenreCount> = Vec::new();

    for record in interactions {
        let Some(movie) = catalog.get_movie(record.movie_id) else {
            continue;
        };
        for &genre_id in &movie.genres {
            let Some(genre) = catalog.get_genre(genre_id) else {
                continue;
            };
            let slot = *slots.entry(genre_id).or_insert_with(|| {
                histogram.push(GenreCount {
                    genre_id,
                    name: genre.name.clone(),
                    count: 0,
                });
                histogram.len() - 1
            });
            histogram[slot].count += 1;
        }
    }

    histogram.sort_by(|a, b| b.count.cmp(&a.count));
    histogram
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::movie;
    use catalog::Genre;
    use interactions::InteractionStatus::*;

    fn catalog() -> Catalog {
        let genres = ["Драма", "Фантастика", "Комедия", "Криминал"]
            .iter()
            .enumerate()
            .map(|(i, name)| Genre {
                id: i as u32 + 1,
                name: name.to_string(),
            })
            .collect();
        Catalog::from_parts(
            genres,
            vec![
                movie(1, "X", &[1, 2]),
                movie(2, "Y", &[1]),
                movie(3, "Z", &[3, 4]),
                movie(4, "X", &[4]),
            ],
            vec![],
            vec![],
        )
    }

    #[test]
    fn test_counts_and_average_use_completed_only() {
        let interactions = vec![
            UserInteraction::new(1, 1, Completed).with_rating(10),
            UserInteraction::new(1, 2, Completed).with_rating(7),
            UserInteraction::new(1, 3, Dropped).with_rating(2),
            UserInteraction::new(1, 4, Completed),
            UserInteraction::new(1, 99, Planned),
        ];

        let stats = summarize(&interactions, &catalog());
        assert_eq!(stats.total, 5);
        assert_eq!(stats.count(Completed), 3);
        assert_eq!(stats.count(Dropped), 1);
        assert_eq!(stats.count(Planned), 1);
        assert_eq!(stats.count(Watching), 0);
        assert_eq!(stats.rated_count, 2);
        assert!((stats.average_rating - 8.5).abs() < f32::EPSILON);
        assert!((stats.average_on_five_point() - 4.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_genre_histogram_order() {
        let interactions = vec![
            UserInteraction::new(1, 3, Planned),
            UserInteraction::new(1, 1, Watching),
            UserInteraction::new(1, 2, Dropped),
            UserInteraction::new(1, 4, Planned),
        ];

        let stats = summarize(&interactions, &catalog());
        let names: Vec<(&str, usize)> =
            stats.genres.iter().map(|g| (g.name.as_str(), g.count)).collect();
        // Комедия first seen before Фантастика, both with one movie
        assert_eq!(
            names,
            vec![("Криминал", 2), ("Драма", 2), ("Комедия", 1), ("Фантастика", 1)]
        );

        let top: Vec<&str> = stats.top(1).iter().map(|g| g.name.as_str()).collect();
        assert_eq!(top, vec!["Криминал"]);
        let bottom: Vec<&str> = stats.bottom(2).iter().map(|g| g.name.as_str()).collect();
        assert_eq!(bottom, vec!["Комедия", "Фантастика"]);
        assert_eq!(stats.top(10).len(), 4);
        assert_eq!(stats.bottom(10).len(), 4);
    }

    #[test]
    fn test_no_interactions_is_all_zero() {
        let stats = summarize(&[], &catalog());
        assert_eq!(stats, UserStats::default());
        assert_eq!(stats.average_on_five_point(), 0.0);
        assert!(stats.top(3).is_empty());
    }
}
