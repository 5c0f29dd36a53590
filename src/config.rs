use std::path::PathBuf;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Timeout for transcript-provider calls. The original design left these
    /// unbounded; a limit is imposed here.
    pub provider_timeout_secs: u64,
    /// Timeout for the best-effort watch-page scrape
    pub page_timeout_secs: u64,
    /// When false, metadata keeps its placeholder values and no page is fetched
    pub scrape_metadata: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 10000,
            provider_timeout_secs: 15,
            page_timeout_secs: 10,
            scrape_metadata: true,
        }
    }
}

impl Config {
    /// Load config from ~/.config/ytgw/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytgw")
        .join("config.toml")
}
