//! Search-as-you-type over the catalog.

use crate::debounce::{Debounced, Debouncer};
use catalog::{Catalog, MovieId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Suggestion ids for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestions {
    pub query: String,
    pub movie_ids: Vec<MovieId>,
}

/// Feeds each keystroke's query to a [`Debouncer`] and publishes the
/// suggestions for the last query typed.
pub struct LiveSearch {
    catalog: Arc<Catalog>,
    limit: usize,
    debouncer: Debouncer<Suggestions>,
}

impl LiveSearch {
    pub fn new(catalog: Arc<Catalog>, delay: Duration, limit: usize) -> Self {
        Self {
            catalog,
            limit,
            debouncer: Debouncer::new(delay),
        }
    }

    /// Record the current contents of the search box; returns its ticket
    pub fn input(&self, query: impl Into<String>) -> u64 {
        let query = query.into();
        let catalog = Arc::clone(&self.catalog);
        let limit = self.limit;
        self.debouncer.submit(move || {
            let movie_ids = pipeline::suggest(&catalog, &query, limit)
                .iter()
                .map(|m| m.id)
                .collect();
            Suggestions { query, movie_ids }
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Debounced<Suggestions>>> {
        self.debouncer.subscribe()
    }

    pub fn latest(&self) -> Option<Debounced<Suggestions>> {
        self.debouncer.latest()
    }

    pub fn cancel(&self) {
        self.debouncer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_catalog;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_typing_publishes_final_query_only() {
        let search = LiveSearch::new(Arc::new(sample_catalog()), Duration::from_millis(300), 5);
        let mut rx = search.subscribe();

        for query in ["н", "но", "нол", "нолан"] {
            search.input(query);
            sleep(Duration::from_millis(50)).await;
        }

        rx.changed().await.unwrap();
        let result = rx.borrow_and_update().clone().unwrap();
        assert_eq!(result.ticket, 4);
        assert_eq!(result.value.query, "нолан");
        assert_eq!(result.value.movie_ids, vec![1, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_suggests_nothing() {
        let search = LiveSearch::new(Arc::new(sample_catalog()), Duration::from_millis(300), 5);
        search.input("   ");
        sleep(Duration::from_millis(301)).await;

        let latest = search.latest().unwrap();
        assert!(latest.value.movie_ids.is_empty());
    }
}
