//! # Catalog Crate
//!
//! This crate loads and indexes the movie catalog: movies, genres, cinemas
//! and screenings.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Genre, Cinema, Screening, User, Catalog)
//! - **parser**: Parse the JSON catalog files into Rust structs
//! - **index**: Build indices and validate cross-references
//! - **validate**: Field rules shared by loading and the admin façade
//! - **source**: The `CatalogSource` listing trait and the admin façade
//! - **clock**: Injectable "now"
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Catalog, SystemClock};
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_dir(Path::new("data/catalog"), &SystemClock)?;
//!
//! let movie = catalog.get_movie(1).unwrap();
//! println!("{} ({}): {}", movie.title, movie.year, catalog.genre_names(movie).join(", "));
//! ```

// Public modules
pub mod clock;
pub mod error;
pub mod index;
pub mod parser;
pub mod source;
pub mod types;
pub mod validate;

// Re-export commonly used types for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CatalogError, Result};
pub use source::{AdminAction, AdminFacade, CatalogSource};
pub use types::{
    // Type aliases
    CinemaId,
    GenreId,
    MovieId,
    ScreeningId,
    UserId,
    // Core types
    Catalog,
    Cinema,
    Genre,
    Movie,
    Role,
    Screening,
    User,
};
