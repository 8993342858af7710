use std::path::PathBuf;

use hiddenpg_common::env;

use crate::error::AppError;
use crate::search::DEFAULT_SUGGESTION_LIMIT;

pub const MAX_SUGGESTION_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    /// Overrides the catalog compiled into the binary.
    pub gems_data_path: Option<PathBuf>,
    /// Public origin used for sitemap locations.
    pub site_url: String,
    pub suggestion_limit: usize,
}

impl Config {
    /// Optional:
    /// - `DIRECTORY_BIND_ADDR` (default: "0.0.0.0:3001")
    /// - `GEMS_DATA_PATH`: JSON catalog to load instead of the embedded one
    /// - `SITE_URL` (default: "https://hiddenprincegeorge.ca")
    /// - `SUGGESTION_LIMIT`: default suggestion count, 1..=50 (default: 8)
    pub fn from_env() -> Result<Self, AppError> {
        let bind_addr = env::var_or("DIRECTORY_BIND_ADDR", "0.0.0.0:3001");
        bind_addr.parse::<std::net::SocketAddr>().map_err(|_| {
            AppError::Config(format!("DIRECTORY_BIND_ADDR is not a socket address: {bind_addr}"))
        })?;

        let gems_data_path = std::env::var("GEMS_DATA_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        if let Some(path) = &gems_data_path {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "GEMS_DATA_PATH not found: {}",
                    path.display()
                )));
            }
        }

        let suggestion_limit = env::parse_or("SUGGESTION_LIMIT", DEFAULT_SUGGESTION_LIMIT)?;
        if !(1..=MAX_SUGGESTION_LIMIT).contains(&suggestion_limit) {
            return Err(AppError::Config(format!(
                "SUGGESTION_LIMIT must be between 1 and {MAX_SUGGESTION_LIMIT}"
            )));
        }

        Ok(Self {
            bind_addr,
            gems_data_path,
            site_url: env::var_or("SITE_URL", "https://hiddenprincegeorge.ca"),
            suggestion_limit,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3001".to_string(),
            gems_data_path: None,
            site_url: "https://hiddenprincegeorge.ca".to_string(),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}
