//! Filter implementations for the catalog pipeline.
//!
//! Each stage handles one criteria field; `FilterPipeline::for_criteria`
//! chains them in the fixed processing order.

pub mod genre;
pub mod quick;
pub mod rating_range;
pub mod search;
pub mod year_range;

// Re-export for convenience
pub use genre::GenreFilter;
pub use quick::QuickFilterStage;
pub use rating_range::RatingRangeFilter;
pub use search::SearchFilter;
pub use year_range::YearRangeFilter;
