//! Application layer for the kino catalog.
//!
//! Wires the catalog, the interaction store, the session, the filter
//! pipeline and the recommender into one [`AppContext`], and provides the
//! configuration and debounced search the front end needs.

pub mod config;
pub mod context;
pub mod debounce;
pub mod live_search;

pub use config::AppConfig;
pub use context::{AppContext, MovieDetail, Recommendation, Shelves};
pub use debounce::{Debounced, Debouncer};
pub use live_search::{LiveSearch, Suggestions};
