//! Runtime configuration
//!
//! Values come from an optional JSON file and are then overridden by
//! command line flags in `main`.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Basic lands are available everywhere and are skipped by default
pub const BASIC_LANDS: [&str; 5] = ["Plains", "Island", "Swamp", "Mountain", "Forest"];

pub const DEFAULT_BASE_URL: &str = "http://www.ligamagic.com.br";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Card names dropped from the deck when `filter_basics` is set
    pub exclude: Vec<String>,
    pub filter_basics: bool,
    /// Largest store budget evaluated by the sweep
    pub max_stores: usize,
    /// Store budgets with more subsets than this are skipped
    pub combination_limit: u64,
    pub base_url: String,
    pub user_agent: String,
    /// Symbol printed in front of prices
    pub currency: String,
    pub cache_dir: Option<PathBuf>,
    pub cache_max_age_hours: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude: BASIC_LANDS.iter().map(|s| s.to_string()).collect(),
            filter_basics: true,
            max_stores: 5,
            combination_limit: 2_000_000,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: "D2D-Automations-DeckBuyer/1.0".to_string(),
            currency: "R$".to_string(),
            cache_dir: None,
            cache_max_age_hours: 24,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading configuration from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the user's config file if one exists, defaults otherwise
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_stores == 0 {
            return Err(Error::Config("max_stores must be at least 1".to_string()));
        }
        if self.base_url.trim().is_empty() {
            return Err(Error::Config("base_url must not be empty".to_string()));
        }
        Ok(())
    }

    /// Names to drop from the deck before pricing
    pub fn excluded_names(&self) -> &[String] {
        if self.filter_basics {
            &self.exclude
        } else {
            &[]
        }
    }

    /// Page cache directory, falling back to the platform cache dir
    pub fn resolved_cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("deck_buyer")
                .join("pages")
        })
    }

    pub fn cache_max_age(&self) -> Duration {
        Duration::from_secs(self.cache_max_age_hours.saturating_mul(3600))
    }
}

/// Returns the default config path: ~/.config/deck_buyer/config.json
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("deck_buyer").join("config.json"))
}
