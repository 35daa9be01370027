//! Filter criteria: the typed record the pipeline runs on, and the raw
//! string form it is parsed from.

use catalog::GenreId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Movies rated at least this are "popular"
pub const POPULAR_RATING: f32 = 8.0;

/// The "new" quick filter covers the current year and this many before it
pub const NEW_RELEASE_YEARS: i32 = 2;

/// Which movie fields the search text is matched against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    #[default]
    Title,
    TitleAndDirector,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickFilter {
    #[default]
    All,
    /// Rating >= [`POPULAR_RATING`]
    Popular,
    /// Released within the last [`NEW_RELEASE_YEARS`] years
    New,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Catalog rating, highest first
    #[default]
    Rating,
    /// Release year, newest first
    Year,
    /// Title, collated
    Title,
}

impl FromStr for SearchScope {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SearchScope::Title),
            "title_and_director" | "title-and-director" | "all" => {
                Ok(SearchScope::TitleAndDirector)
            }
            _ => Err(CriteriaError::unknown("search_scope", s, "title, title_and_director")),
        }
    }
}

impl FromStr for QuickFilter {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(QuickFilter::All),
            "popular" => Ok(QuickFilter::Popular),
            "new" => Ok(QuickFilter::New),
            _ => Err(CriteriaError::unknown("quick_filter", s, "all, popular, new")),
        }
    }
}

impl FromStr for SortKey {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rating" => Ok(SortKey::Rating),
            "year" => Ok(SortKey::Year),
            "title" => Ok(SortKey::Title),
            _ => Err(CriteriaError::unknown("sort_key", s, "rating, year, title")),
        }
    }
}

/// A criteria field that could not be parsed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CriteriaError {
    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },

    #[error("Unknown {field} '{value}' (expected one of: {expected})")]
    UnknownOption {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl CriteriaError {
    fn unknown(field: &'static str, value: &str, expected: &'static str) -> Self {
        Self::UnknownOption {
            field,
            value: value.to_string(),
            expected,
        }
    }
}

/// Every option the catalog view can filter and sort by.
///
/// All fields are optional; an absent field places no constraint. Unknown
/// fields in a serialized record are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FilterCriteria {
    pub search_text: Option<String>,
    pub search_scope: SearchScope,
    /// OR semantics: a movie needs at least one of these
    pub genre_ids: Vec<GenreId>,
    pub year_from: Option<u16>,
    pub year_to: Option<u16>,
    pub rating_from: Option<f32>,
    pub rating_to: Option<f32>,
    pub quick_filter: QuickFilter,
    pub sort_key: SortKey,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search text with surrounding whitespace removed; blank means none
    pub fn search_needle(&self) -> Option<&str> {
        self.search_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Parse UI inputs, logging and dropping any malformed field.
    pub fn from_raw(raw: &RawCriteria) -> Self {
        let (criteria, errors) = Self::parse_raw(raw);
        for error in &errors {
            warn!("Ignoring filter field: {}", error);
        }
        criteria
    }

    /// Parse UI inputs, returning the criteria built from the valid fields
    /// alongside the errors for the rest.
    pub fn parse_raw(raw: &RawCriteria) -> (Self, Vec<CriteriaError>) {
        let mut errors = Vec::new();
        let e = &mut errors;

        let search_scope: SearchScope = keep(e, parse_opt(raw.search_scope.as_deref())).unwrap_or_default();
        let quick_filter: QuickFilter = keep(e, parse_opt(raw.quick_filter.as_deref())).unwrap_or_default();
        let sort_key: SortKey = keep(e, parse_opt(raw.sort_key.as_deref())).unwrap_or_default();
        let year_from = keep(e, parse_year("year_from", raw.year_from.as_deref()));
        let year_to = keep(e, parse_year("year_to", raw.year_to.as_deref()));
        let rating_from = keep(e, parse_rating("rating_from", raw.rating_from.as_deref()));
        let rating_to = keep(e, parse_rating("rating_to", raw.rating_to.as_deref()));

        let mut genre_ids = Vec::new();
        for token in &raw.genre_ids {
            if let Some(id) = keep(e, parse_genre_id(token)) {
                if !genre_ids.contains(&id) {
                    genre_ids.push(id);
                }
            }
        }

        let criteria = Self {
            search_text: raw.search_text.clone(),
            search_scope,
            genre_ids,
            year_from,
            year_to,
            rating_from,
            rating_to,
            quick_filter,
            sort_key,
        };
        (criteria, errors)
    }
}

/// Criteria exactly as typed into the UI. Blank strings and `"any"` mean
/// the field is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCriteria {
    pub search_text: Option<String>,
    pub search_scope: Option<String>,
    pub genre_ids: Vec<String>,
    pub year_from: Option<String>,
    pub year_to: Option<String>,
    pub rating_from: Option<String>,
    pub rating_to: Option<String>,
    pub quick_filter: Option<String>,
    pub sort_key: Option<String>,
}

/// Record a field error and treat the field as absent
fn keep<T>(errors: &mut Vec<CriteriaError>, result: Result<Option<T>, CriteriaError>) -> Option<T> {
    result.unwrap_or_else(|e| {
        errors.push(e);
        None
    })
}

fn is_unset(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case("any")
}

fn parse_opt<T: FromStr<Err = CriteriaError>>(value: Option<&str>) -> Result<Option<T>, CriteriaError> {
    match value {
        Some(v) if !is_unset(v) => v.parse().map(Some),
        _ => Ok(None),
    }
}

fn parse_year(field: &'static str, value: Option<&str>) -> Result<Option<u16>, CriteriaError> {
    let Some(v) = value.filter(|v| !is_unset(v)) else {
        return Ok(None);
    };
    v.trim()
        .parse::<u16>()
        .map(Some)
        .map_err(|_| CriteriaError::InvalidNumber {
            field,
            value: v.to_string(),
        })
}

fn parse_rating(field: &'static str, value: Option<&str>) -> Result<Option<f32>, CriteriaError> {
    let Some(v) = value.filter(|v| !is_unset(v)) else {
        return Ok(None);
    };
    let rating: f32 = v.trim().parse().map_err(|_| CriteriaError::InvalidNumber {
        field,
        value: v.to_string(),
    })?;
    if !(0.0..=10.0).contains(&rating) {
        return Err(CriteriaError::OutOfRange {
            field,
            value: v.to_string(),
            min: "0".to_string(),
            max: "10".to_string(),
        });
    }
    Ok(Some(rating))
}

fn parse_genre_id(token: &str) -> Result<Option<GenreId>, CriteriaError> {
    if is_unset(token) {
        return Ok(None);
    }
    token
        .trim()
        .parse::<GenreId>()
        .map(Some)
        .map_err(|_| CriteriaError::InvalidNumber {
            field: "genre_ids",
            value: token.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_criteria_place_no_constraint() {
        let criteria = FilterCriteria::default();
        assert_eq!(criteria.quick_filter, QuickFilter::All);
        assert_eq!(criteria.sort_key, SortKey::Rating);
        assert!(criteria.genre_ids.is_empty());
        assert!(criteria.search_needle().is_none());
    }

    #[test]
    fn test_blank_search_is_no_constraint() {
        let criteria = FilterCriteria {
            search_text: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(criteria.search_needle().is_none());
    }

    #[test]
    fn test_parse_raw_full() {
        let raw = RawCriteria {
            search_text: Some("интерс".to_string()),
            genre_ids: vec!["3".to_string(), "4".to_string(), "3".to_string()],
            year_from: Some("1990".to_string()),
            year_to: Some("2020".to_string()),
            rating_from: Some("8.5".to_string()),
            quick_filter: Some("Popular".to_string()),
            sort_key: Some("title".to_string()),
            ..Default::default()
        };

        let (criteria, errors) = FilterCriteria::parse_raw(&raw);
        assert!(errors.is_empty());
        assert_eq!(criteria.genre_ids, vec![3, 4]);
        assert_eq!(criteria.year_from, Some(1990));
        assert_eq!(criteria.year_to, Some(2020));
        assert_eq!(criteria.rating_from, Some(8.5));
        assert_eq!(criteria.quick_filter, QuickFilter::Popular);
        assert_eq!(criteria.sort_key, SortKey::Title);
    }

    #[test]
    fn test_malformed_fields_are_dropped_individually() {
        let raw = RawCriteria {
            year_from: Some("nineteen".to_string()),
            year_to: Some("2000".to_string()),
            rating_from: Some("11".to_string()),
            sort_key: Some("popularity".to_string()),
            genre_ids: vec!["drama".to_string(), "2".to_string()],
            ..Default::default()
        };

        let (criteria, errors) = FilterCriteria::parse_raw(&raw);
        assert_eq!(errors.len(), 4);
        assert_eq!(criteria.year_from, None);
        assert_eq!(criteria.year_to, Some(2000));
        assert_eq!(criteria.rating_from, None);
        assert_eq!(criteria.sort_key, SortKey::Rating);
        assert_eq!(criteria.genre_ids, vec![2]);
        assert!(matches!(errors[0], CriteriaError::UnknownOption { field: "sort_key", .. }));
    }

    #[test]
    fn test_any_sentinel_means_unset() {
        let raw = RawCriteria {
            rating_from: Some("any".to_string()),
            quick_filter: Some("".to_string()),
            ..Default::default()
        };
        let (criteria, errors) = FilterCriteria::parse_raw(&raw);
        assert!(errors.is_empty());
        assert_eq!(criteria.rating_from, None);
        assert_eq!(criteria.quick_filter, QuickFilter::All);
    }

    #[test]
    fn test_serialized_criteria_reject_unknown_fields() {
        let ok: FilterCriteria =
            serde_json::from_str(r#"{"genreIds":[1],"sortKey":"year","quickFilter":"new"}"#)
                .unwrap();
        assert_eq!(ok.sort_key, SortKey::Year);
        assert_eq!(ok.quick_filter, QuickFilter::New);

        let err = serde_json::from_str::<FilterCriteria>(r#"{"genre":[1]}"#);
        assert!(err.is_err());
    }
}
