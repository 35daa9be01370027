//! Interaction records: one user's status, rating and comment for one movie.

use catalog::{MovieId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest accepted personal rating
pub const MIN_USER_RATING: u8 = 1;

/// Highest accepted personal rating
pub const MAX_USER_RATING: u8 = 10;

/// Where a movie sits on the user's list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionStatus {
    Planned,
    Watching,
    Completed,
    Dropped,
}

impl InteractionStatus {
    pub const ALL: [InteractionStatus; 4] = [
        InteractionStatus::Planned,
        InteractionStatus::Watching,
        InteractionStatus::Completed,
        InteractionStatus::Dropped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionStatus::Planned => "planned",
            InteractionStatus::Watching => "watching",
            InteractionStatus::Completed => "completed",
            InteractionStatus::Dropped => "dropped",
        }
    }
}

impl fmt::Display for InteractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "planned" => Ok(InteractionStatus::Planned),
            "watching" => Ok(InteractionStatus::Watching),
            "completed" => Ok(InteractionStatus::Completed),
            "dropped" => Ok(InteractionStatus::Dropped),
            other => Err(format!(
                "unknown status '{other}' (expected planned, watching, completed or dropped)"
            )),
        }
    }
}

/// A user's record for one movie. At most one exists per (user_id, movie_id).
///
/// A rating survives status changes: moving a completed movie back to
/// `planned` keeps the old rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInteraction {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub status: InteractionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl UserInteraction {
    pub fn new(user_id: UserId, movie_id: MovieId, status: InteractionStatus) -> Self {
        Self {
            user_id,
            movie_id,
            status,
            rating: None,
            comment: None,
        }
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    /// The (user, movie) pair identifying this record
    pub fn key(&self) -> (UserId, MovieId) {
        (self.user_id, self.movie_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in InteractionStatus::ALL {
            assert_eq!(status.as_str().parse::<InteractionStatus>(), Ok(status));
        }
        assert!("finished".parse::<InteractionStatus>().is_err());
    }

    #[test]
    fn test_json_shape_is_camel_case_without_empty_fields() {
        let record = UserInteraction::new(1, 4, InteractionStatus::Planned);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"userId":1,"movieId":4,"status":"planned"}"#);

        let rated: UserInteraction =
            serde_json::from_str(r#"{"userId":1,"movieId":4,"status":"completed","rating":9}"#)
                .unwrap();
        assert_eq!(rated.rating, Some(9));
        assert_eq!(rated.comment, None);
    }
}
