//! Configuration for the stonks bot.
//!
//! Everything comes from environment variables with sensible defaults:
//! 1. STONKS_DB_PATH — SQLite database file (default ./data/stonks.sqlite3)
//! 2. STONKS_PREDICT_URL — prediction site base URL
//! 3. STONKS_RENDER_CMD — external chart renderer program (optional;
//!    when unset, replies carry the prediction link only)
//! 4. STONKS_TICK_SECS — maintenance tick interval (default 60)

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DB_PATH: &str = "./data/stonks.sqlite3";
const DEFAULT_PREDICT_URL: &str = "https://turnipprophet.io/";
const DEFAULT_TICK_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub predict_url: String,
    pub render_cmd: Option<String>,
    pub tick_interval: Duration,
}

impl Config {
    pub fn from_env() -> Config {
        let db_path = std::env::var("STONKS_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH));

        let predict_url = std::env::var("STONKS_PREDICT_URL")
            .unwrap_or_else(|_| DEFAULT_PREDICT_URL.to_string());

        let render_cmd = std::env::var("STONKS_RENDER_CMD")
            .ok()
            .filter(|cmd| !cmd.is_empty());

        let tick_secs = std::env::var("STONKS_TICK_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_TICK_SECS);

        Config {
            db_path,
            predict_url,
            render_cmd,
            tick_interval: Duration::from_secs(tick_secs),
        }
    }
}
