use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from `KINO_*` environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding genres.json, movies.json, cinemas.json and screenings.json
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory for the session and interaction files
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,

    /// Quiet period before a live search runs
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Recommendations shown on the home view
    #[serde(default = "default_home_recommendations")]
    pub home_recommendations: usize,

    /// Recommendations shown on the recommendations view
    #[serde(default = "default_page_recommendations")]
    pub page_recommendations: usize,

    /// Personal rating (1-10) at which a movie shapes recommendations
    #[serde(default = "default_high_rating_threshold")]
    pub high_rating_threshold: u8,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data/catalog")
}

fn default_store_dir() -> PathBuf {
    PathBuf::from(".kino")
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_home_recommendations() -> usize {
    5
}

fn default_page_recommendations() -> usize {
    8
}

fn default_high_rating_threshold() -> u8 {
    recommender::DEFAULT_HIGH_RATING
}

const ENV_PREFIX: &str = "KINO_";

impl AppConfig {
    /// Load configuration from environment variables, after reading `.env` if present
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed(ENV_PREFIX)
            .from_env::<AppConfig>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Load configuration from explicit `KINO_*` pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            store_dir: default_store_dir(),
            debounce_ms: default_debounce_ms(),
            home_recommendations: default_home_recommendations(),
            page_recommendations: default_page_recommendations(),
            high_rating_threshold: default_high_rating_threshold(),
        }
    }
}
