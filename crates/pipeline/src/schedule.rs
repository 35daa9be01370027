//! Screening schedule queries.

use crate::filters::search::contains_folded;
use catalog::{Catalog, Cinema, CinemaId, Clock, Movie, MovieId, Screening};
use chrono::{Days, NaiveDate};

/// Which screenings to show: one UTC calendar day, optionally narrowed to
/// a cinema and to movies whose title contains `search_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleQuery {
    pub cinema_id: Option<CinemaId>,
    pub date: NaiveDate,
    pub search_text: Option<String>,
}

impl ScheduleQuery {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            cinema_id: None,
            date,
            search_text: None,
        }
    }

    pub fn at_cinema(mut self, cinema_id: CinemaId) -> Self {
        self.cinema_id = Some(cinema_id);
        self
    }

    pub fn matching(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }
}

/// A screening joined with its movie and cinema
#[derive(Debug, Clone, Copy)]
pub struct ScheduleEntry<'a> {
    pub screening: &'a Screening,
    pub movie: &'a Movie,
    pub cinema: &'a Cinema,
}

/// Screenings matching `query`, earliest first
pub fn find_screenings<'a>(catalog: &'a Catalog, query: &ScheduleQuery) -> Vec<ScheduleEntry<'a>> {
    let needle = query
        .search_text
        .as_deref()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty());

    let mut entries: Vec<ScheduleEntry<'a>> = catalog
        .screenings()
        .iter()
        .filter(|s| s.datetime.date_naive() == query.date)
        .filter(|s| query.cinema_id.is_none_or(|id| s.cinema_id == id))
        .filter_map(|screening| {
            let movie = catalog.get_movie(screening.movie_id)?;
            let cinema = catalog.get_cinema(screening.cinema_id)?;
            Some(ScheduleEntry {
                screening,
                movie,
                cinema,
            })
        })
        .filter(|e| needle.as_deref().is_none_or(|n| contains_folded(&e.movie.title, n)))
        .collect();

    entries.sort_by_key(|e| e.screening.datetime);
    entries
}

/// `days` consecutive dates starting today
pub fn upcoming_dates(clock: &dyn Clock, days: u32) -> Vec<NaiveDate> {
    let today = clock.today();
    (0..days)
        .filter_map(|offset| today.checked_add_days(Days::new(u64::from(offset))))
        .collect()
}

/// First and last calendar dates that have any screening
pub fn schedule_span(catalog: &Catalog) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = catalog.screenings().iter().map(|s| s.datetime.date_naive());
    let first = dates.next()?;
    Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}

/// A movie's screenings from now on, earliest first
pub fn screenings_for_movie<'a>(
    catalog: &'a Catalog,
    movie_id: MovieId,
    clock: &dyn Clock,
) -> Vec<&'a Screening> {
    let now = clock.now();
    let mut screenings: Vec<&Screening> = catalog
        .get_movie_screenings(movie_id)
        .into_iter()
        .filter(|s| s.datetime >= now)
        .collect();
    screenings.sort_by_key(|s| s.datetime);
    screenings
}
