use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub omdb_api_key: String,
    pub omdb_base_url: String,
    /// Directory generated chart images are written to and served from.
    pub static_dir: PathBuf,
    /// Upper bound on catalog pages fetched per year.
    pub max_pages: u32,
    /// Timeout applied to every outbound catalog request.
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn new(omdb_api_key: String) -> Self {
        Self {
            omdb_api_key,
            omdb_base_url: "http://www.omdbapi.com".to_string(),
            static_dir: PathBuf::from("static"),
            max_pages: 10,
            http_timeout_secs: 10,
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
