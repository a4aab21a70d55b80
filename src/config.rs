use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the movie table artifact (JSON)
    #[serde(default = "default_movie_data_path")]
    pub movie_data_path: String,

    /// Path to the precomputed similarity table artifact (JSON)
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL for poster images; the size segment is appended at render time
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Language requested from TMDB
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Idle sessions older than this are dropped
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_movie_data_path() -> String {
    "data/movie_data.json".to_string()
}

fn default_similarity_path() -> String {
    "data/similarity.json".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_tmdb_language() -> String {
    "en-US".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_session_idle_secs() -> u64 {
    3600
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
