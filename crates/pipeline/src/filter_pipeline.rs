//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! filters together using the builder pattern.

use crate::criteria::{FilterCriteria, QuickFilter};
use crate::filters::{GenreFilter, QuickFilterStage, RatingRangeFilter, SearchFilter, YearRangeFilter};
use crate::traits::Filter;
use catalog::Movie;
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(GenreFilter::new([3, 4]))
///     .add_filter(YearRangeFilter::new(Some(1990), None));
///
/// let filtered = pipeline.apply(catalog.movies().iter().collect());
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Build the stages for `criteria` in processing order: quick filter,
    /// search, genres, years, ratings. Fields that place no constraint add
    /// no stage.
    pub fn for_criteria(criteria: &FilterCriteria, current_year: i32) -> Self {
        let mut pipeline = Self::new();

        if criteria.quick_filter != QuickFilter::All {
            pipeline = pipeline.add_filter(QuickFilterStage::new(criteria.quick_filter, current_year));
        }
        if let Some(search) = criteria
            .search_needle()
            .and_then(|text| SearchFilter::new(text, criteria.search_scope))
        {
            pipeline = pipeline.add_filter(search);
        }
        if !criteria.genre_ids.is_empty() {
            pipeline = pipeline.add_filter(GenreFilter::new(criteria.genre_ids.iter().copied()));
        }
        if criteria.year_from.is_some() || criteria.year_to.is_some() {
            pipeline = pipeline.add_filter(YearRangeFilter::new(criteria.year_from, criteria.year_to));
        }
        if criteria.rating_from.is_some() || criteria.rating_to.is_some() {
            pipeline =
                pipeline.add_filter(RatingRangeFilter::new(criteria.rating_from, criteria.rating_to));
        }

        pipeline
    }

    /// Names of the stages, in order
    pub fn stage_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence, logging each stage's input and output size.
    pub fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        let mut current = movies;
        for filter in &self.filters {
            debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
