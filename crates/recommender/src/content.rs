//! Content Source - genre and director affinity
//!
//! Suggests unseen movies that share something with the movies a user rated
//! highly: "You liked X, and this has the same genre / the same director."
//!
//! ## Algorithm
//! 1. Find movies the user rated highly (>= 8 on the 1-10 scale)
//! 2. Collect their genres and directors into affinity sets
//! 3. For every catalog movie the user has no record for:
//!    - count its genres in the affinity set
//!    - check its director against the affinity set
//! 4. Keep movies with at least one genre match or a director match
//! 5. Score = genre matches + director weight, highest first
//! 6. Ties keep catalog order; return the top `limit`

use crate::profile::build_profile;
use crate::types::{Candidate, TasteProfile};
use catalog::{Catalog, Movie};
use interactions::UserInteraction;
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Default "highly rated" cutoff on the 1-10 scale
pub const DEFAULT_HIGH_RATING: u8 = 8;

/// Default bonus for a director match
pub const DEFAULT_DIRECTOR_WEIGHT: u32 = 2;

/// Content-based candidate source
#[derive(Debug, Clone)]
pub struct ContentSource {
    /// Minimum personal rating for a movie to shape the user's taste
    high_rating_threshold: u8,

    /// Score added when the director is one the user liked
    director_weight: u32,
}

impl ContentSource {
    pub fn new() -> Self {
        Self {
            high_rating_threshold: DEFAULT_HIGH_RATING,
            director_weight: DEFAULT_DIRECTOR_WEIGHT,
        }
    }

    /// Configure the high rating threshold (default: 8)
    pub fn with_high_rating_threshold(mut self, threshold: u8) -> Self {
        self.high_rating_threshold = threshold;
        self
    }

    /// Configure the director match bonus (default: 2)
    pub fn with_director_weight(mut self, weight: u32) -> Self {
        self.director_weight = weight;
        self
    }

    pub fn high_rating_threshold(&self) -> u8 {
        self.high_rating_threshold
    }

    /// Build the user's profile and score candidates from it
    pub fn get_candidates(
        &self,
        catalog: &Catalog,
        interactions: &[UserInteraction],
        limit: usize,
    ) -> Vec<Candidate> {
        let profile = build_profile(catalog, interactions, self.high_rating_threshold);
        self.candidates_for_profile(catalog, &profile, limit)
    }

    /// Score every unseen catalog movie against `profile`
    #[instrument(skip(self, catalog, profile), fields(user_id = ?profile.user_id))]
    pub fn candidates_for_profile(
        &self,
        catalog: &Catalog,
        profile: &TasteProfile,
        limit: usize,
    ) -> Vec<Candidate> {
        debug!(
            "Generating content candidates (liked: {}, seen: {})",
            profile.liked_movies.len(),
            profile.seen_movies.len()
        );
        if profile.is_empty() {
            return Vec::new();
        }

        // Indexed parallel collect keeps catalog order
        let mut candidates: Vec<Candidate> = catalog
            .movies()
            .par_iter()
            .filter(|movie| !profile.seen_movies.contains(&movie.id))
            .filter_map(|movie| self.score(movie, profile))
            .collect();

        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates.truncate(limit);

        debug!("Generated {} content candidates", candidates.len());
        candidates
    }

    /// Resolve candidates to catalog movies
    pub fn recommend<'a>(
        &self,
        catalog: &'a Catalog,
        interactions: &[UserInteraction],
        limit: usize,
    ) -> Vec<&'a Movie> {
        self.get_candidates(catalog, interactions, limit)
            .into_iter()
            .filter_map(|c| catalog.get_movie(c.movie_id))
            .collect()
    }

    fn score(&self, movie: &Movie, profile: &TasteProfile) -> Option<Candidate> {
        let genre_matches = movie.genre_overlap(&profile.affinity_genres);
        let director_match = profile.affinity_directors.contains(&movie.director);
        if genre_matches == 0 && !director_match {
            return None;
        }

        let bonus = if director_match { self.director_weight } else { 0 };
        Some(Candidate {
            movie_id: movie.id,
            score: genre_matches as u32 + bonus,
            genre_matches,
            director_match,
        })
    }
}

impl Default for ContentSource {
    fn default() -> Self {
        Self::new()
    }
}
