//! # Interactions Crate
//!
//! Per-user movie records (status, rating, comment), the durable key-value
//! store they are persisted to, and the mock login session.
//!
//! ## Main Components
//!
//! - **types**: `UserInteraction` and `InteractionStatus`
//! - **kv**: The `KeyValueStore` trait with memory and file backends
//! - **store**: `InteractionStore`, copy-on-write upserts over a `KeyValueStore`
//! - **session**: The logged-in user and mock authentication
//! - **auth**: Login and registration form rules
//! - **error**: `StoreError`
//!
//! ## Example Usage
//!
//! ```ignore
//! use interactions::{FileStore, InteractionStatus, InteractionStore, Session};
//! use std::sync::Arc;
//!
//! let backend = Arc::new(FileStore::new(".kino"));
//! let mut session = Session::restore(backend.clone())?;
//! let mut store = InteractionStore::load(backend)?;
//!
//! let user_id = session.login("anna@example.com", "secret1")?.id;
//! store.upsert(user_id, 1, InteractionStatus::Completed, Some(9), None)?;
//! ```

pub mod auth;
pub mod error;
pub mod kv;
pub mod session;
pub mod store;
pub mod types;

pub use error::{Result, StoreError};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use session::{ADMIN_EMAIL, ADMIN_USER_ID, DEMO_USER_ID, SESSION_KEY, Session};
pub use store::{INTERACTIONS_KEY, InteractionStore};
pub use types::{InteractionStatus, MAX_USER_RATING, MIN_USER_RATING, UserInteraction};
