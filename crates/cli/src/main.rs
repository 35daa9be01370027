use anyhow::{Context, Result};
use app::{AppConfig, AppContext, Recommendation, Shelves};
use catalog::{
    AdminAction, Catalog, CatalogSource, Cinema, CinemaId, Movie, MovieId, Screening, SystemClock,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use interactions::{InteractionStatus, StoreError};
use pipeline::{FilterCriteria, RawCriteria, ScheduleQuery};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

/// Kino - movie catalog, personal list and recommendations
#[derive(Parser)]
#[command(name = "kino")]
#[command(about = "Browse the movie catalog, track what you watch and get recommendations", long_about = None)]
struct Cli {
    /// Catalog directory (overrides KINO_DATA_DIR)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Directory for session and list state (overrides KINO_STORE_DIR)
    #[arg(short, long)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and sort the catalog
    Browse {
        /// Text to look for
        #[arg(long)]
        search: Option<String>,

        /// Where to look: title or title_and_director
        #[arg(long)]
        scope: Option<String>,

        /// Genre name or id, repeatable
        #[arg(long)]
        genre: Vec<String>,

        #[arg(long)]
        year_from: Option<String>,

        #[arg(long)]
        year_to: Option<String>,

        #[arg(long)]
        rating_from: Option<String>,

        #[arg(long)]
        rating_to: Option<String>,

        /// Shortcut: all, popular or new
        #[arg(long)]
        quick: Option<String>,

        /// rating, year or title
        #[arg(long)]
        sort: Option<String>,
    },

    /// Quick title/director suggestions
    Search {
        query: String,
    },

    /// Show one movie with its genres, your record and upcoming screenings
    Movie {
        id: MovieId,
    },

    /// Your picks plus the popular and newest shelves
    Home {
        /// Show why each movie was picked
        #[arg(long)]
        explain: bool,
    },

    /// Movies picked for you from what you rated highly
    Recommend {
        /// Only this many picks, without the other shelves
        #[arg(long)]
        limit: Option<usize>,

        /// Show why each movie was picked
        #[arg(long)]
        explain: bool,
    },

    /// Your viewing statistics
    Stats {
        /// How many genres to list at each end
        #[arg(long, default_value = "3")]
        genres: usize,
    },

    /// Your list, optionally only one status
    List {
        #[arg(long)]
        status: Option<InteractionStatus>,
    },

    /// Add a movie to your list or update its record
    Track {
        movie_id: MovieId,

        /// planned, watching, completed or dropped
        status: InteractionStatus,

        /// 1-10
        #[arg(long)]
        rating: Option<u8>,

        #[arg(long)]
        comment: Option<String>,
    },

    /// Screenings for a day
    Schedule {
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        cinema: Option<CinemaId>,

        /// Part of the movie title
        #[arg(long)]
        search: Option<String>,

        /// How many upcoming days to list
        #[arg(long, default_value = "7")]
        days: u32,
    },

    /// List cinemas
    Cinemas,

    /// Read search box contents line by line from stdin and print debounced suggestions
    LiveSearch,

    Login {
        email: String,
        password: String,
    },

    Register {
        username: String,
        email: String,
        password: String,
    },

    /// Log out and clear your list
    Logout,

    /// Show who is logged in
    Whoami,

    /// Catalog administration (admin account only, nothing is saved)
    Admin {
        #[command(subcommand)]
        action: AdminCommand,
    },
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Catalog totals and the first movies
    Overview,

    /// Check a movie from a JSON file
    AddMovie { file: PathBuf },

    /// Check a cinema from a JSON file
    AddCinema { file: PathBuf },

    /// Check a screening from a JSON file
    AddScreening { file: PathBuf },

    DeleteMovie { id: MovieId },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(store_dir) = cli.store_dir {
        config.store_dir = store_dir;
    }

    let start = Instant::now();
    let mut ctx = AppContext::open(config, Arc::new(SystemClock))
        .context("Failed to open the catalog")?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        ctx.catalog().movies().len(),
        start.elapsed()
    );

    let outcome = match cli.command {
        Commands::Browse {
            search,
            scope,
            genre,
            year_from,
            year_to,
            rating_from,
            rating_to,
            quick,
            sort,
        } => {
            let raw = RawCriteria {
                search_text: search,
                search_scope: scope,
                genre_ids: resolve_genres(ctx.catalog(), genre),
                year_from,
                year_to,
                rating_from,
                rating_to,
                quick_filter: quick,
                sort_key: sort,
            };
            handle_browse(&ctx, &raw)
        }
        Commands::Search { query } => handle_search(&ctx, &query),
        Commands::Movie { id } => handle_movie(&ctx, id),
        Commands::Home { explain } => handle_home(&ctx, explain),
        Commands::Recommend { limit, explain } => handle_recommend(&ctx, limit, explain),
        Commands::Stats { genres } => handle_stats(&ctx, genres),
        Commands::List { status } => handle_list(&ctx, status),
        Commands::Track {
            movie_id,
            status,
            rating,
            comment,
        } => handle_track(&mut ctx, movie_id, status, rating, comment),
        Commands::Schedule {
            date,
            cinema,
            search,
            days,
        } => handle_schedule(&ctx, date, cinema, search, days),
        Commands::Cinemas => handle_cinemas(&ctx),
        Commands::LiveSearch => handle_live_search(&ctx).await,
        Commands::Login { email, password } => handle_login(&mut ctx, &email, &password),
        Commands::Register {
            username,
            email,
            password,
        } => handle_register(&mut ctx, &username, &email, &password),
        Commands::Logout => handle_logout(&mut ctx),
        Commands::Whoami => handle_whoami(&ctx),
        Commands::Admin { action } => handle_admin(&ctx, action),
    };
    debug!("Command finished in {:?}", start.elapsed());

    match outcome {
        Err(err) => match store_error(&err) {
            Some(StoreError::AuthRequired) => {
                warn!("Command needs a logged-in user");
                println!(
                    "{} Please log in first: {}",
                    "✗".red(),
                    "kino login <email> <password>".bold()
                );
                Ok(())
            }
            Some(StoreError::AdminRequired) => {
                warn!("Command needs the admin account");
                println!("{} Only the administrator can do that", "✗".red());
                Ok(())
            }
            _ => Err(err),
        },
        Ok(()) => Ok(()),
    }
}

fn store_error(err: &anyhow::Error) -> Option<&StoreError> {
    err.chain().find_map(|cause| cause.downcast_ref::<StoreError>())
}

/// Genre names become ids; anything else is passed through for the criteria parser to reject
fn resolve_genres(catalog: &Catalog, genres: Vec<String>) -> Vec<String> {
    genres
        .into_iter()
        .map(|g| match catalog.find_genre_by_name(&g) {
            Some(genre) => genre.id.to_string(),
            None => g,
        })
        .collect()
}

/// Handle the 'browse' command
fn handle_browse(ctx: &AppContext, raw: &RawCriteria) -> Result<()> {
    let (criteria, errors) = FilterCriteria::parse_raw(raw);
    for error in &errors {
        println!("{} Ignoring {}", "!".yellow(), error);
    }

    let movies = ctx.browse(&criteria);
    println!("{}", format!("Found {} movies:", movies.len()).bold().blue());
    for movie in movies {
        print_movie_line(ctx.catalog(), movie);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(ctx: &AppContext, query: &str) -> Result<()> {
    let movies = ctx.suggest(query);
    if movies.is_empty() {
        println!("Nothing matches '{}'", query);
        return Ok(());
    }
    println!("{}", format!("Suggestions for '{}':", query).bold().blue());
    for movie in movies {
        println!(
            "{}: {} ({}) - {}",
            movie.id,
            movie.title,
            movie.year,
            movie.director.dimmed()
        );
    }
    Ok(())
}

/// Handle the 'movie' command
fn handle_movie(ctx: &AppContext, movie_id: MovieId) -> Result<()> {
    let Some(detail) = ctx.movie_detail(movie_id) else {
        println!("No movie with id {}", movie_id);
        return Ok(());
    };
    let movie = detail.movie;

    println!("{}", format!("{} ({})", movie.title, movie.year).bold().blue());
    println!("{}Director: {}", "• ".green(), movie.director);
    println!("{}Country: {}", "• ".green(), movie.country);
    println!("{}Duration: {} min", "• ".green(), movie.duration);
    println!("{}Rating: {:.1}", "• ".green(), movie.rating);
    let genres: Vec<&str> = detail.genres.iter().map(|g| g.name.as_str()).collect();
    println!("{}Genres: {}", "• ".green(), genres.join(", "));
    println!();
    println!("{}", movie.description);

    if let Some(record) = detail.interaction {
        println!();
        print!("{}In your list: {}", "• ".cyan(), record.status);
        if let Some(rating) = record.rating {
            print!(", rated {}/10", rating);
        }
        println!();
        if let Some(comment) = &record.comment {
            println!("  \"{}\"", comment);
        }
    }

    println!();
    if detail.upcoming.is_empty() {
        println!("No upcoming screenings");
    } else {
        println!("{}", "Upcoming screenings:".bold());
        for screening in detail.upcoming {
            let cinema = ctx
                .catalog()
                .get_cinema(screening.cinema_id)
                .map(|c| c.name.as_str())
                .unwrap_or("?");
            println!(
                "  {} {} - {} ₽",
                screening.datetime.format("%d.%m %H:%M"),
                cinema,
                screening.price
            );
        }
    }
    Ok(())
}

/// Handle the 'home' command
fn handle_home(ctx: &AppContext, explain: bool) -> Result<()> {
    print_shelves(ctx, &ctx.home_shelves(), explain);
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(ctx: &AppContext, limit: Option<usize>, explain: bool) -> Result<()> {
    match limit {
        Some(limit) => {
            let recommendations = ctx.recommendations(limit);
            print_recommendations_or_hint(ctx, &recommendations, explain);
        }
        None => print_shelves(ctx, &ctx.page_shelves(), explain),
    }
    Ok(())
}

fn print_shelves(ctx: &AppContext, shelves: &Shelves<'_>, explain: bool) {
    print_recommendations_or_hint(ctx, &shelves.recommended, explain);

    println!();
    println!("{}", "Popular:".bold().blue());
    for movie in &shelves.popular {
        print_movie_line(ctx.catalog(), movie);
    }

    println!();
    println!("{}", "New releases:".bold().blue());
    for movie in &shelves.newest {
        print_movie_line(ctx.catalog(), movie);
    }
}

fn print_recommendations_or_hint(
    ctx: &AppContext,
    recommendations: &[Recommendation<'_>],
    explain: bool,
) {
    if ctx.current_user().is_none() {
        println!("Log in to get recommendations");
    } else if recommendations.is_empty() {
        println!(
            "Nothing yet. Rate some movies {}+ to get recommendations.",
            ctx.config().high_rating_threshold
        );
    } else {
        print_recommendations(ctx.catalog(), recommendations, explain);
    }
}

/// Handle the 'stats' command
fn handle_stats(ctx: &AppContext, genres: usize) -> Result<()> {
    let stats = ctx.stats();
    let name = ctx
        .current_user()
        .map(|u| u.username.as_str())
        .unwrap_or("guest");

    println!("{}", format!("Statistics for {}", name).bold().blue());
    println!("{}Total: {}", "• ".green(), stats.total);
    for status in InteractionStatus::ALL {
        println!("{}{}: {}", "• ".green(), status, stats.count(status));
    }
    println!(
        "{}Average rating: {:.1}/10 ({:.1}/5, {} rated)",
        "• ".cyan(),
        stats.average_rating,
        stats.average_on_five_point(),
        stats.rated_count
    );

    if !stats.genres.is_empty() {
        println!("Favourite genres:");
        for genre in stats.top(genres) {
            println!("  - {} ({})", genre.name, genre.count);
        }
        println!("Least watched genres:");
        for genre in stats.bottom(genres) {
            println!("  - {} ({})", genre.name, genre.count);
        }
    }
    Ok(())
}

/// Handle the 'list' command
fn handle_list(ctx: &AppContext, status: Option<InteractionStatus>) -> Result<()> {
    if ctx.current_user().is_none() {
        println!("Log in to see your list");
        return Ok(());
    }

    let statuses = match status {
        Some(status) => vec![status],
        None => InteractionStatus::ALL.to_vec(),
    };
    for status in statuses {
        let movies = ctx.my_movies(status);
        println!("{}", format!("{} ({})", status, movies.len()).bold().blue());
        for (movie, record) in movies {
            let rating = record
                .rating
                .map(|r| format!(" - {}/10", r))
                .unwrap_or_default();
            println!("  {}: {} ({}){}", movie.id, movie.title, movie.year, rating);
        }
    }
    Ok(())
}

/// Handle the 'track' command
fn handle_track(
    ctx: &mut AppContext,
    movie_id: MovieId,
    status: InteractionStatus,
    rating: Option<u8>,
    comment: Option<String>,
) -> Result<()> {
    let Some(record) = ctx.track(movie_id, status, rating, comment)? else {
        println!("No movie with id {}", movie_id);
        return Ok(());
    };
    let title = ctx
        .catalog()
        .get_movie(movie_id)
        .map(|m| m.title.as_str())
        .unwrap_or("?");
    println!("{} {} is now {}", "✓".green(), title.bold(), record.status);
    Ok(())
}

/// Handle the 'schedule' command
fn handle_schedule(
    ctx: &AppContext,
    date: Option<NaiveDate>,
    cinema: Option<CinemaId>,
    search: Option<String>,
    days: u32,
) -> Result<()> {
    let dates: Vec<String> = pipeline::upcoming_dates(ctx.clock(), days)
        .iter()
        .map(|d| d.format("%d.%m").to_string())
        .collect();
    println!("{}Days: {}", "• ".dimmed(), dates.join(" "));

    let date = date.unwrap_or_else(|| ctx.clock().today());
    let mut query = ScheduleQuery::on(date);
    if let Some(cinema_id) = cinema {
        if ctx.catalog().get_cinema(cinema_id).is_none() {
            println!("No cinema with id {}", cinema_id);
            return Ok(());
        }
        query = query.at_cinema(cinema_id);
    }
    if let Some(text) = search {
        query = query.matching(text);
    }

    let entries = ctx.schedule(&query);
    println!(
        "{}",
        format!("Screenings on {}:", date.format("%d.%m.%Y")).bold().blue()
    );
    if entries.is_empty() {
        println!("No screenings");
        if let Some((first, last)) = pipeline::schedule_span(ctx.catalog()) {
            println!(
                "{}The schedule covers {} to {}",
                "• ".dimmed(),
                first.format("%d.%m.%Y"),
                last.format("%d.%m.%Y")
            );
        }
    }
    for entry in entries {
        println!(
            "  {} {} - {} - {} ₽",
            entry.screening.datetime.format("%H:%M").to_string().green(),
            entry.movie.title,
            entry.cinema.name,
            entry.screening.price
        );
    }
    Ok(())
}

/// Handle the 'cinemas' command
fn handle_cinemas(ctx: &AppContext) -> Result<()> {
    println!("{}", "Cinemas:".bold().blue());
    for cinema in ctx.catalog().cinemas() {
        println!("{}: {} - {}", cinema.id, cinema.name, cinema.address.dimmed());
    }
    Ok(())
}

/// Handle the 'live-search' command
///
/// Each stdin line is the full box contents after a keystroke. Suggestions
/// are printed whenever the debouncer publishes.
async fn handle_live_search(ctx: &AppContext) -> Result<()> {
    let search = ctx.live_search();
    let mut published = search.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read stdin")? {
                    Some(query) => {
                        search.input(query);
                    }
                    None => break,
                }
            }
            changed = published.changed() => {
                changed.context("Search closed")?;
                let latest = published.borrow_and_update().clone();
                if let Some(result) = latest {
                    print_suggestions(ctx.catalog(), &result.value.query, &result.value.movie_ids);
                }
            }
        }
    }

    // Let the last input settle
    let settle = ctx.config().debounce() * 2;
    if let Ok(Ok(())) = tokio::time::timeout(settle, published.changed()).await {
        let latest = published.borrow_and_update().clone();
        if let Some(result) = latest {
            print_suggestions(ctx.catalog(), &result.value.query, &result.value.movie_ids);
        }
    }
    Ok(())
}

/// Handle the 'login' command
fn handle_login(ctx: &mut AppContext, email: &str, password: &str) -> Result<()> {
    let user = ctx.login(email, password)?;
    let role = if user.is_admin() { " (admin)" } else { "" };
    println!("{} Logged in as {}{}", "✓".green(), user.username.bold(), role);
    Ok(())
}

/// Handle the 'register' command
fn handle_register(
    ctx: &mut AppContext,
    username: &str,
    email: &str,
    password: &str,
) -> Result<()> {
    let user = ctx.register(username, email, password)?;
    println!(
        "{} Registered and logged in as {} (id {})",
        "✓".green(),
        user.username.bold(),
        user.id
    );
    Ok(())
}

/// Handle the 'logout' command
fn handle_logout(ctx: &mut AppContext) -> Result<()> {
    match ctx.logout()? {
        Some(user) => println!("{} Logged out {}", "✓".green(), user.username),
        None => println!("Nobody was logged in"),
    }
    Ok(())
}

/// Handle the 'whoami' command
fn handle_whoami(ctx: &AppContext) -> Result<()> {
    match ctx.current_user() {
        Some(user) => println!(
            "{} <{}> id {}{}",
            user.username.bold(),
            user.email,
            user.id,
            if user.is_admin() { " (admin)" } else { "" }
        ),
        None => println!("Not logged in"),
    }
    Ok(())
}

/// Handle the 'admin' command
fn handle_admin(ctx: &AppContext, action: AdminCommand) -> Result<()> {
    let admin = ctx.admin()?;
    let outcome = match action {
        AdminCommand::Overview => {
            print_catalog_overview(ctx.catalog());
            return Ok(());
        }
        AdminCommand::AddMovie { file } => admin.submit_movie(&read_json::<Movie>(&file)?),
        AdminCommand::AddCinema { file } => admin.submit_cinema(&read_json::<Cinema>(&file)?),
        AdminCommand::AddScreening { file } => {
            admin.submit_screening(&read_json::<Screening>(&file)?)
        }
        AdminCommand::DeleteMovie { id } => admin.delete_movie(id),
    };

    match outcome {
        Ok(action) => {
            let verb = match action {
                AdminAction::Created => "created",
                AdminAction::Updated => "updated",
                AdminAction::Deleted => "deleted",
            };
            println!("{} Would be {} (changes are not saved)", "✓".green(), verb);
        }
        Err(e) => println!("{} Rejected: {}", "✗".red(), e),
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_catalog_overview(source: &dyn CatalogSource) {
    println!("{}", "Catalog:".bold().blue());
    println!("{}Movies: {}", "• ".green(), source.list_movies().len());
    println!("{}Genres: {}", "• ".green(), source.list_genres().len());
    println!("{}Cinemas: {}", "• ".green(), source.list_cinemas().len());
    println!("{}Screenings: {}", "• ".green(), source.list_screenings().len());
    for movie in source.list_movies().iter().take(10) {
        println!("  {}: {} ({})", movie.id, movie.title, movie.year);
    }
}

fn print_movie_line(catalog: &Catalog, movie: &Movie) {
    println!(
        "{}: {} ({}) [{}] - {:.1}",
        movie.id.to_string().green(),
        movie.title,
        movie.year,
        catalog.genre_names(movie).join(", "),
        movie.rating
    );
}

fn print_suggestions(catalog: &Catalog, query: &str, movie_ids: &[MovieId]) {
    let titles: Vec<&str> = movie_ids
        .iter()
        .filter_map(|&id| catalog.get_movie(id))
        .map(|m| m.title.as_str())
        .collect();
    println!("{} {}", format!("'{}' ->", query).bold(), titles.join(", "));
}

/// Helper function to format and print recommendations
fn print_recommendations(catalog: &Catalog, recommendations: &[Recommendation<'_>], explain: bool) {
    println!("{}", "Recommended for you:".bold().blue());
    for (i, rec) in recommendations.iter().enumerate() {
        let movie = rec.movie;
        println!(
            "{}. {} ({}) [{}] - Score: {}",
            (i + 1).to_string().green(),
            movie.title,
            movie.year,
            catalog.genre_names(movie).join(", "),
            rec.candidate.score
        );
        if explain {
            let mut reasons = Vec::new();
            if rec.candidate.genre_matches > 0 {
                reasons.push(format!("{} shared genres", rec.candidate.genre_matches));
            }
            if rec.candidate.director_match {
                reasons.push(format!("directed by {}", movie.director));
            }
            println!("   Why: {}", reasons.join(", "));
        }
    }
}
