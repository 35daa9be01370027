//! # Recommender Crate
//!
//! Personal recommendations and viewing statistics, both computed from a
//! user's interaction records and the catalog.
//!
//! ## Components
//!
//! ### Content Source
//! Genre and director affinity:
//! - "You rated X highly; this shares its genre or director"
//! - Movies the user already has on their list are never suggested
//!
//! ### Statistics
//! Status counts, average rating and a genre histogram for the profile page.
//!
//! ## Example Usage
//!
//! ```ignore
//! use recommender::{recommend, summarize};
//!
//! let records = store.list_for_user(user_id);
//! let picks = recommend(&catalog, &records, 8);
//! let stats = summarize(&records, &catalog);
//! ```

// Public modules
pub mod content;
pub mod profile;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use content::{ContentSource, DEFAULT_DIRECTOR_WEIGHT, DEFAULT_HIGH_RATING};
pub use profile::build_profile;
pub use stats::{GenreCount, UserStats, summarize};
pub use types::{Candidate, TasteProfile};

use catalog::{Catalog, Movie};
use interactions::UserInteraction;

/// Up to `limit` unseen movies for the user, best first, using the default
/// [`ContentSource`] settings.
pub fn recommend<'a>(
    catalog: &'a Catalog,
    interactions: &[UserInteraction],
    limit: usize,
) -> Vec<&'a Movie> {
    ContentSource::default().recommend(catalog, interactions, limit)
}
