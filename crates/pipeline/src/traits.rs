//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! single-purpose stages to be applied to a movie list.

use catalog::Movie;

/// One stage of the catalog filter.
///
/// ## Design Note
/// - `Send + Sync` allows a built pipeline to be shared across threads
/// - Stages take ownership of the Vec and return the survivors, in order
/// - Stages never fail: malformed input is rejected earlier, while parsing
///   criteria
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Keep the movies this stage accepts, preserving their relative order
    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie>;
}
