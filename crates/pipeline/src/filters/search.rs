//! Case-insensitive substring search over titles and directors.

use crate::criteria::SearchScope;
use crate::traits::Filter;
use catalog::Movie;

pub struct SearchFilter {
    needle: String,
    scope: SearchScope,
}

impl SearchFilter {
    /// Returns `None` for blank text, which places no constraint
    pub fn new(text: &str, scope: SearchScope) -> Option<Self> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        Some(Self { needle, scope })
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        contains_folded(&movie.title, &self.needle)
            || (self.scope == SearchScope::TitleAndDirector
                && contains_folded(&movie.director, &self.needle))
    }
}

/// `needle` must already be lowercase
pub(crate) fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl Filter for SearchFilter {
    fn name(&self) -> &str {
        "SearchFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        movies.into_iter().filter(|m| self.matches(m)).collect()
    }
}
