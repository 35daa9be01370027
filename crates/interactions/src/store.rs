//! The user interaction store.
//!
//! Holds every (user, movie) interaction in memory and mirrors the whole set
//! to a [`KeyValueStore`] on each write. Records for all users share one
//! value; every lookup is scoped by user id.

use crate::error::{Result, StoreError};
use crate::kv::KeyValueStore;
use crate::types::{InteractionStatus, MAX_USER_RATING, MIN_USER_RATING, UserInteraction};
use catalog::{MovieId, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Durable key holding the full interaction list
pub const INTERACTIONS_KEY: &str = "interactions";

pub struct InteractionStore {
    backend: Arc<dyn KeyValueStore>,
    /// Insertion order is kept; it is the "first encountered" order stats rely on
    records: Vec<UserInteraction>,
}

impl InteractionStore {
    /// Load every stored interaction. An empty store yields an empty list.
    ///
    /// An unreadable list is discarded with a warning, the same way
    /// [`Session::restore`](crate::Session::restore) treats a bad session.
    /// Loaded records are normalized so that the upsert rules hold
    /// for them too.
    pub fn load(backend: Arc<dyn KeyValueStore>) -> Result<Self> {
        let records = match backend.read(INTERACTIONS_KEY)? {
            Some(json) => match serde_json::from_str::<Vec<UserInteraction>>(&json) {
                Ok(records) => normalize(records),
                Err(e) => {
                    warn!("Discarding unreadable interactions: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        info!("Loaded {} interactions", records.len());
        Ok(Self { backend, records })
    }

    /// Create or update the record for (user_id, movie_id).
    ///
    /// `status` always overwrites. `rating` and `comment` overwrite only when
    /// given; otherwise the previous values are kept. The new set is written
    /// to the durable store before memory changes, so a failed write leaves
    /// both copies at their last persisted state.
    #[instrument(skip(self, comment))]
    pub fn upsert(
        &mut self,
        user_id: UserId,
        movie_id: MovieId,
        status: InteractionStatus,
        rating: Option<u8>,
        comment: Option<String>,
    ) -> Result<UserInteraction> {
        if let Some(r) = rating {
            if !(MIN_USER_RATING..=MAX_USER_RATING).contains(&r) {
                return Err(StoreError::InvalidRating(r));
            }
        }

        let mut next = self.records.clone();
        let position = next.iter().position(|r| r.key() == (user_id, movie_id));

        let index = match position {
            Some(i) => {
                let record = &mut next[i];
                record.status = status;
                if rating.is_some() {
                    record.rating = rating;
                }
                if comment.is_some() {
                    record.comment = comment;
                }
                i
            }
            None => {
                next.push(UserInteraction {
                    user_id,
                    movie_id,
                    status,
                    rating,
                    comment,
                });
                next.len() - 1
            }
        };

        self.persist(&next)?;
        self.records = next;

        let stored = self.records[index].clone();
        debug!(?stored, "Interaction stored");
        Ok(stored)
    }

    pub fn get(&self, user_id: UserId, movie_id: MovieId) -> Option<&UserInteraction> {
        self.records.iter().find(|r| r.key() == (user_id, movie_id))
    }

    /// All records of one user, in the order they were created
    pub fn list_for_user(&self, user_id: UserId) -> Vec<UserInteraction> {
        self.records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Drop every record of one user; returns how many were removed.
    ///
    /// This is the only way records are destroyed, and it happens on logout.
    pub fn clear_user(&mut self, user_id: UserId) -> Result<usize> {
        let next: Vec<UserInteraction> = self
            .records
            .iter()
            .filter(|r| r.user_id != user_id)
            .cloned()
            .collect();
        let removed = self.records.len() - next.len();
        if removed == 0 {
            return Ok(0);
        }

        self.persist(&next)?;
        self.records = next;
        info!(user_id, removed, "Cleared interactions");
        Ok(removed)
    }

    /// Total number of records across all users
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self, records: &[UserInteraction]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.backend.write(INTERACTIONS_KEY, &json)
    }
}

/// Enforce the write-path rules on records read back from storage.
///
/// A rating outside 1..=10 is cleared, keeping the status. Repeated
/// (user, movie) pairs collapse into one record at the first position, with
/// the contents of the last occurrence.
fn normalize(loaded: Vec<UserInteraction>) -> Vec<UserInteraction> {
    let mut positions: HashMap<(UserId, MovieId), usize> = HashMap::new();
    let mut records: Vec<UserInteraction> = Vec::with_capacity(loaded.len());

    for mut record in loaded {
        if let Some(rating) = record.rating {
            if !(MIN_USER_RATING..=MAX_USER_RATING).contains(&rating) {
                warn!(
                    user_id = record.user_id,
                    movie_id = record.movie_id,
                    "Dropping out-of-range rating {}",
                    rating
                );
                record.rating = None;
            }
        }
        match positions.get(&record.key()) {
            Some(&i) => {
                warn!(
                    user_id = record.user_id,
                    movie_id = record.movie_id,
                    "Merging duplicate interaction"
                );
                records[i] = record;
            }
            None => {
                positions.insert(record.key(), records.len());
                records.push(record);
            }
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use InteractionStatus::*;

    fn store() -> InteractionStore {
        InteractionStore::load(Arc::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn test_upsert_creates_then_updates_in_place() {
        let mut store = store();
        store.upsert(1, 10, Planned, None, None).unwrap();
        store.upsert(1, 11, Planned, None, None).unwrap();
        store.upsert(1, 10, Watching, None, None).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1, 10).unwrap().status, Watching);
        let order: Vec<MovieId> = store.list_for_user(1).iter().map(|r| r.movie_id).collect();
        assert_eq!(order, vec![10, 11]);
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let mut store = store();
        let first = store.upsert(1, 10, Completed, Some(7), None).unwrap();
        let second = store.upsert(1, 10, Completed, Some(7), None).unwrap();

        assert_eq!(first, second);
        assert_eq!(store.list_for_user(1), vec![first]);
    }

    #[test]
    fn test_partial_update_keeps_unspecified_fields() {
        let mut store = store();
        store.upsert(1, 10, Watching, None, None).unwrap();
        let record = store.upsert(1, 10, Completed, Some(9), None).unwrap();

        assert_eq!(record.status, Completed);
        assert_eq!(record.rating, Some(9));
        assert_eq!(record.comment, None);

        // Status alone must not erase the rating
        let record = store.upsert(1, 10, Dropped, None, Some("скучно".to_string())).unwrap();
        assert_eq!(record.rating, Some(9));
        assert_eq!(record.comment.as_deref(), Some("скучно"));
    }

    #[test]
    fn test_revert_to_planned_retains_rating() {
        let mut store = store();
        store.upsert(1, 10, Completed, Some(10), None).unwrap();
        let record = store.upsert(1, 10, Planned, None, None).unwrap();
        assert_eq!(record.rating, Some(10));
    }

    #[test]
    fn test_invalid_rating_rejected_without_changes() {
        let mut store = store();
        assert!(matches!(
            store.upsert(1, 10, Completed, Some(11), None),
            Err(StoreError::InvalidRating(11))
        ));
        assert!(matches!(
            store.upsert(1, 10, Completed, Some(0), None),
            Err(StoreError::InvalidRating(0))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_lookups_are_scoped_by_user() {
        let mut store = store();
        store.upsert(1, 10, Planned, None, None).unwrap();
        store.upsert(2, 10, Completed, Some(8), None).unwrap();

        assert_eq!(store.get(1, 10).unwrap().status, Planned);
        assert_eq!(store.get(2, 10).unwrap().status, Completed);
        assert!(store.get(3, 10).is_none());
        assert_eq!(store.list_for_user(2).len(), 1);
    }

    #[test]
    fn test_failed_write_keeps_memory_at_last_persisted_state() {
        let backend = Arc::new(MemoryStore::with_capacity_limit(120));
        let mut store = InteractionStore::load(backend.clone()).unwrap();
        store.upsert(1, 10, Completed, Some(9), None).unwrap();
        let persisted = backend.read(INTERACTIONS_KEY).unwrap();

        let long_comment = "очень длинный комментарий ".repeat(20);
        let err = store
            .upsert(1, 10, Dropped, None, Some(long_comment))
            .unwrap_err();
        assert!(matches!(err, StoreError::Capacity { .. }));

        let record = store.get(1, 10).unwrap();
        assert_eq!(record.status, Completed);
        assert_eq!(record.comment, None);
        assert_eq!(backend.read(INTERACTIONS_KEY).unwrap(), persisted);
    }

    #[test]
    fn test_reload_restores_all_users() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        {
            let mut store = InteractionStore::load(backend.clone()).unwrap();
            store.upsert(1, 10, Completed, Some(9), None).unwrap();
            store.upsert(2, 11, Planned, None, None).unwrap();
        }

        let reloaded = InteractionStore::load(backend).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get(1, 10).unwrap().rating, Some(9));
    }

    #[test]
    fn test_clear_user_removes_only_that_user() {
        let mut store = store();
        store.upsert(1, 10, Planned, None, None).unwrap();
        store.upsert(1, 11, Planned, None, None).unwrap();
        store.upsert(2, 10, Planned, None, None).unwrap();

        assert_eq!(store.clear_user(1).unwrap(), 2);
        assert_eq!(store.clear_user(1).unwrap(), 0);
        assert!(store.list_for_user(1).is_empty());
        assert_eq!(store.list_for_user(2).len(), 1);
    }

    #[test]
    fn test_corrupt_store_starts_empty() {
        let backend = Arc::new(MemoryStore::new());
        backend.write(INTERACTIONS_KEY, "{not json").unwrap();

        let mut store = InteractionStore::load(backend.clone()).unwrap();
        assert!(store.is_empty());

        // The next write replaces the unreadable value
        store.upsert(1, 10, Planned, None, None).unwrap();
        let reloaded = InteractionStore::load(backend).unwrap();
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_load_drops_out_of_range_ratings() {
        let backend = Arc::new(MemoryStore::new());
        backend
            .write(
                INTERACTIONS_KEY,
                r#"[{"userId":1,"movieId":1,"status":"completed","rating":200},
                    {"userId":1,"movieId":2,"status":"dropped","rating":0},
                    {"userId":1,"movieId":3,"status":"completed","rating":7}]"#,
            )
            .unwrap();

        let store = InteractionStore::load(backend).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(1, 1).unwrap().rating, None);
        assert_eq!(store.get(1, 1).unwrap().status, Completed);
        assert_eq!(store.get(1, 2).unwrap().rating, None);
        assert_eq!(store.get(1, 3).unwrap().rating, Some(7));
    }

    #[test]
    fn test_load_merges_duplicate_pairs_last_wins() {
        let backend = Arc::new(MemoryStore::new());
        backend
            .write(
                INTERACTIONS_KEY,
                r#"[{"userId":1,"movieId":1,"status":"completed","rating":9},
                    {"userId":1,"movieId":2,"status":"watching"},
                    {"userId":1,"movieId":1,"status":"planned"},
                    {"userId":2,"movieId":1,"status":"dropped"}]"#,
            )
            .unwrap();

        let store = InteractionStore::load(backend).unwrap();
        assert_eq!(store.len(), 3);
        let first = store.get(1, 1).unwrap();
        assert_eq!(first.status, Planned);
        assert_eq!(first.rating, None);
        // The merged record keeps its original place in the list
        let order: Vec<MovieId> = store.list_for_user(1).iter().map(|r| r.movie_id).collect();
        assert_eq!(order, vec![1, 2]);
        assert_eq!(store.get(2, 1).unwrap().status, Dropped);
    }
}
