//! # Application Context
//!
//! Owns the session state that the views share: the loaded catalog, the
//! logged-in user, that user's interaction records and the clock. Every
//! view-level operation goes through here, so nothing reads ambient globals.
//!
//! Reads never fail: with nobody logged in, recommendations are empty and
//! statistics are zero. Writes need a user and fail with
//! `StoreError::AuthRequired` otherwise.

use crate::config::AppConfig;
use crate::live_search::LiveSearch;
use anyhow::{Context, Result};
use catalog::{AdminFacade, Catalog, Clock, Genre, Movie, MovieId, Screening, User};
use interactions::{
    FileStore, InteractionStatus, InteractionStore, KeyValueStore, Session, UserInteraction,
};
use pipeline::{FilterCriteria, ScheduleEntry, ScheduleQuery};
use recommender::{Candidate, ContentSource, UserStats};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Everything the movie page shows
#[derive(Debug)]
pub struct MovieDetail<'a> {
    pub movie: &'a Movie,
    pub genres: Vec<&'a Genre>,
    /// The current user's record, if logged in and tracked
    pub interaction: Option<&'a UserInteraction>,
    /// Screenings from now on, earliest first
    pub upcoming: Vec<&'a Screening>,
}

/// A recommended movie with the reasons it was picked
#[derive(Debug, Clone)]
pub struct Recommendation<'a> {
    pub movie: &'a Movie,
    pub candidate: Candidate,
}

/// The movie rows of the home and recommendations views
#[derive(Debug)]
pub struct Shelves<'a> {
    /// Empty when logged out
    pub recommended: Vec<Recommendation<'a>>,
    pub popular: Vec<&'a Movie>,
    pub newest: Vec<&'a Movie>,
}

pub struct AppContext {
    config: AppConfig,
    catalog: Arc<Catalog>,
    clock: Arc<dyn Clock>,
    session: Session,
    store: InteractionStore,
    recommender: ContentSource,
}

impl AppContext {
    /// Load the catalog from `config.data_dir` and restore state from
    /// `config.store_dir`
    pub fn open(config: AppConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let start = Instant::now();
        let catalog = Catalog::load_from_dir(&config.data_dir, clock.as_ref())
            .with_context(|| format!("Failed to load catalog from {:?}", config.data_dir))?;
        info!("Catalog loaded in {:.2?}", start.elapsed());

        let backend: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.store_dir.clone()));
        Self::new(config, Arc::new(catalog), backend, clock)
    }

    /// Assemble a context from already-built parts
    pub fn new(
        config: AppConfig,
        catalog: Arc<Catalog>,
        backend: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let session = Session::restore(backend.clone()).context("Failed to restore session")?;
        let store = InteractionStore::load(backend).context("Failed to load interactions")?;
        let recommender =
            ContentSource::new().with_high_rating_threshold(config.high_rating_threshold);

        Ok(Self {
            config,
            catalog,
            clock,
            session,
            store,
            recommender,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    // =========================================================================
    // Catalog views
    // =========================================================================

    pub fn browse(&self, criteria: &FilterCriteria) -> Vec<&Movie> {
        pipeline::filter_and_sort(&self.catalog, criteria, self.clock())
    }

    pub fn suggest(&self, query: &str) -> Vec<&Movie> {
        pipeline::suggest(&self.catalog, query, pipeline::DEFAULT_SUGGESTION_LIMIT)
    }

    /// A debounced search box over this catalog
    pub fn live_search(&self) -> LiveSearch {
        LiveSearch::new(
            Arc::clone(&self.catalog),
            self.config.debounce(),
            pipeline::DEFAULT_SUGGESTION_LIMIT,
        )
    }

    pub fn movie_detail(&self, movie_id: MovieId) -> Option<MovieDetail<'_>> {
        let movie = self.catalog.get_movie(movie_id)?;
        let genres = movie
            .genres
            .iter()
            .filter_map(|&id| self.catalog.get_genre(id))
            .collect();
        let interaction = self
            .session
            .user_id()
            .and_then(|user_id| self.store.get(user_id, movie_id));
        let upcoming = pipeline::screenings_for_movie(&self.catalog, movie_id, self.clock());

        Some(MovieDetail {
            movie,
            genres,
            interaction,
            upcoming,
        })
    }

    pub fn schedule(&self, query: &ScheduleQuery) -> Vec<ScheduleEntry<'_>> {
        pipeline::find_screenings(&self.catalog, query)
    }

    // =========================================================================
    // Personal views
    // =========================================================================

    /// The current user's records; empty when logged out
    pub fn my_interactions(&self) -> Vec<UserInteraction> {
        match self.session.user_id() {
            Some(user_id) => self.store.list_for_user(user_id),
            None => Vec::new(),
        }
    }

    /// Movies the current user has with `status`, in list order
    pub fn my_movies(&self, status: InteractionStatus) -> Vec<(&Movie, UserInteraction)> {
        self.my_interactions()
            .into_iter()
            .filter(|r| r.status == status)
            .filter_map(|r| self.catalog.get_movie(r.movie_id).map(|m| (m, r)))
            .collect()
    }

    #[instrument(skip(self))]
    pub fn recommendations(&self, limit: usize) -> Vec<Recommendation<'_>> {
        let interactions = self.my_interactions();
        self.recommender
            .get_candidates(&self.catalog, &interactions, limit)
            .into_iter()
            .filter_map(|candidate| {
                let movie = self.catalog.get_movie(candidate.movie_id)?;
                Some(Recommendation { movie, candidate })
            })
            .collect()
    }

    pub fn home_recommendations(&self) -> Vec<Recommendation<'_>> {
        self.recommendations(self.config.home_recommendations)
    }

    pub fn page_recommendations(&self) -> Vec<Recommendation<'_>> {
        self.recommendations(self.config.page_recommendations)
    }

    /// Home view rows, each `home_recommendations` long
    pub fn home_shelves(&self) -> Shelves<'_> {
        self.shelves(self.config.home_recommendations)
    }

    /// Recommendations view rows, each `page_recommendations` long
    pub fn page_shelves(&self) -> Shelves<'_> {
        self.shelves(self.config.page_recommendations)
    }

    fn shelves(&self, size: usize) -> Shelves<'_> {
        Shelves {
            recommended: self.recommendations(size),
            popular: pipeline::popular(&self.catalog, size),
            newest: pipeline::newest(&self.catalog, size),
        }
    }

    pub fn stats(&self) -> UserStats {
        recommender::summarize(&self.my_interactions(), &self.catalog)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Set the current user's status (and optionally rating and comment) for
    /// a movie. Fields left `None` keep their stored values.
    ///
    /// Returns `None` without writing anything when the movie is not in the
    /// catalog.
    pub fn track(
        &mut self,
        movie_id: MovieId,
        status: InteractionStatus,
        rating: Option<u8>,
        comment: Option<String>,
    ) -> Result<Option<UserInteraction>> {
        let user_id = self.session.require_user()?;
        if self.catalog.get_movie(movie_id).is_none() {
            warn!(movie_id, "Not tracking unknown movie");
            return Ok(None);
        }
        let record = self
            .store
            .upsert(user_id, movie_id, status, rating, comment)
            .with_context(|| format!("Failed to save movie {} to your list", movie_id))?;
        info!(user_id, movie_id, status = %record.status, "Tracked movie");
        Ok(Some(record))
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<User> {
        Ok(self.session.login(email, password)?.clone())
    }

    pub fn register(&mut self, username: &str, email: &str, password: &str) -> Result<User> {
        Ok(self
            .session
            .register(username, email, password, self.clock.as_ref())?
            .clone())
    }

    /// Delete the current user's records, then end the session.
    /// Returns the user who was logged in, if any.
    ///
    /// Records go first: if clearing them fails the user stays logged in.
    pub fn logout(&mut self) -> Result<Option<User>> {
        if let Some(user_id) = self.session.user_id() {
            let removed = self
                .store
                .clear_user(user_id)
                .context("Failed to clear interactions")?;
            info!(user_id, removed, "Cleared list on logout");
        }
        Ok(self.session.logout()?)
    }

    /// Catalog editing for administrators
    pub fn admin(&self) -> Result<AdminFacade<'_>> {
        let admin = self.session.require_admin()?;
        info!(user_id = admin.id, "Admin access granted");
        Ok(AdminFacade::new(&self.catalog, self.clock.as_ref()))
    }
}
