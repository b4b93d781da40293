//! Dashboard configuration.
//!
//! # Responsibility
//! - Define the tunable surface of the core: data location, tracked
//!   symbols, studied languages, learner profile and cache windows.
//! - Parse TOML config with full defaults, so an empty file is valid.

use crate::provider::LearnerProfile;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Configuration parse failure.
#[derive(Debug)]
pub struct ConfigError(toml::de::Error);

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid dashboard config: {}", self.0)
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

/// Cache freshness windows, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheWindows {
    /// Daily task generation (default six hours).
    pub daily_tasks_secs: u64,
    /// Market quotes; deliberately longer-lived than the log snapshot.
    pub market_quotes_secs: u64,
    /// Log snapshot reads backing view computation.
    pub log_snapshot_secs: u64,
}

impl Default for CacheWindows {
    fn default() -> Self {
        Self {
            daily_tasks_secs: 6 * 60 * 60,
            market_quotes_secs: 10 * 60,
            log_snapshot_secs: 60,
        }
    }
}

/// Tunable settings for one dashboard instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory for the flat-file store fallback.
    pub data_dir: PathBuf,
    /// Languages offered for quizzes and counted toward XP.
    pub languages: Vec<String>,
    /// Market symbols shown in the ticker: a crypto asset and an ETF by
    /// default.
    pub symbols: Vec<String>,
    /// Domain query for the daily paper feed.
    pub paper_query: String,
    pub profile: LearnerProfile,
    pub cache: CacheWindows,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("labtime_data"),
            languages: vec![
                "Japanese".to_string(),
                "English".to_string(),
                "German".to_string(),
            ],
            symbols: vec!["BTC-USD".to_string(), "006208.TW".to_string()],
            paper_query: "cat:physics.chem-ph OR all:chemistry".to_string(),
            profile: LearnerProfile::default(),
            cache: CacheWindows::default(),
        }
    }
}

impl DashboardConfig {
    /// Parses a TOML document; missing keys fall back to defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(ConfigError)
    }
}
