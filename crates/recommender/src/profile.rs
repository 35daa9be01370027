//! Build a TasteProfile from a user's interactions.

use crate::types::TasteProfile;
use catalog::Catalog;
use interactions::UserInteraction;

/// Aggregate everything candidate scoring needs in one pass.
///
/// A record counts as "liked" when its rating is at least `high_rating`,
/// whatever its status. Records for movies missing from the catalog still
/// mark the movie as seen but contribute no affinity.
pub fn build_profile(
    catalog: &Catalog,
    interactions: &[UserInteraction],
    high_rating: u8,
) -> TasteProfile {
    let mut profile = TasteProfile::new();
    profile.user_id = interactions.first().map(|r| r.user_id);

    for record in interactions {
        profile.seen_movies.insert(record.movie_id);

        if record.rating.is_some_and(|r| r >= high_rating) {
            profile.liked_movies.push(record.movie_id);
        }
    }

    for &movie_id in &profile.liked_movies {
        if let Some(movie) = catalog.get_movie(movie_id) {
            profile.affinity_genres.extend(movie.genres.iter().copied());
            profile.affinity_directors.insert(movie.director.clone());
        }
    }

    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{catalog_with, movie};
    use interactions::InteractionStatus;

    #[test]
    fn test_profile_keys_on_rating_not_status() {
        let catalog = catalog_with(vec![
            movie(1, "X", &[1, 2]),
            movie(2, "Y", &[3]),
            movie(3, "Z", &[4]),
        ]);
        let interactions = vec![
            UserInteraction::new(7, 1, InteractionStatus::Completed).with_rating(9),
            UserInteraction::new(7, 2, InteractionStatus::Dropped).with_rating(8),
            UserInteraction::new(7, 3, InteractionStatus::Completed).with_rating(7),
        ];

        let profile = build_profile(&catalog, &interactions, 8);
        assert_eq!(profile.user_id, Some(7));
        assert_eq!(profile.liked_movies, vec![1, 2]);
        assert_eq!(profile.seen_movies.len(), 3);
        assert!(profile.affinity_genres.contains(&3));
        assert!(!profile.affinity_genres.contains(&4));
        assert!(profile.affinity_directors.contains("Y"));
    }

    #[test]
    fn test_unknown_movies_add_no_affinity() {
        let catalog = catalog_with(vec![movie(1, "X", &[1])]);
        let interactions =
            vec![UserInteraction::new(7, 42, InteractionStatus::Completed).with_rating(10)];

        let profile = build_profile(&catalog, &interactions, 8);
        assert_eq!(profile.liked_movies, vec![42]);
        assert!(profile.affinity_genres.is_empty());
        assert!(profile.affinity_directors.is_empty());
        assert!(profile.seen_movies.contains(&42));
    }

    #[test]
    fn test_empty_interactions() {
        let profile = build_profile(&catalog_with(vec![]), &[], 8);
        assert!(profile.is_empty());
        assert_eq!(profile.user_id, None);
    }
}
