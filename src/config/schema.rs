use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// nflverse schedule feed, one row per game since 1999
pub const DEFAULT_SCHEDULE_URL: &str =
    "https://github.com/nflverse/nfldata/raw/master/data/games.csv";

/// Main configuration.
///
/// Example YAML:
/// ```yaml
/// season: 2025
/// output_dir: data
/// min_completed_weeks: 2
/// top: 10
/// fetch:
///   url: https://github.com/nflverse/nfldata/raw/master/data/games.csv
///   max_attempts: 3
///   base_delay: 2s
/// cache:
///   ttl: 6h
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Season year the rankings are computed for
    #[serde(default = "default_season")]
    pub season: u32,

    /// Directory receiving `week_{N}.json` snapshots
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Rankings are only computed once this many weeks are complete
    #[serde(default = "default_min_completed_weeks")]
    pub min_completed_weeks: u32,

    /// Rows shown in the console summary
    #[serde(default = "default_top")]
    pub top: usize,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            season: default_season(),
            output_dir: default_output_dir(),
            min_completed_weeks: default_min_completed_weeks(),
            top: default_top(),
            fetch: FetchConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

/// Remote schedule fetch settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    #[serde(default = "default_url")]
    pub url: String,

    /// Total attempts including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Delay before the first retry, doubled on every further retry
    /// Format: humantime duration, e.g. "2s", "500ms"
    #[serde(default = "default_base_delay")]
    pub base_delay: String,

    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_attempts: default_max_attempts(),
            base_delay: default_base_delay(),
            timeout: default_timeout(),
        }
    }
}

impl FetchConfig {
    pub fn base_delay(&self) -> Result<Duration> {
        humantime::parse_duration(&self.base_delay)
            .with_context(|| format!("Invalid fetch.base_delay '{}'", self.base_delay))
    }

    pub fn timeout(&self) -> Result<Duration> {
        humantime::parse_duration(&self.timeout)
            .with_context(|| format!("Invalid fetch.timeout '{}'", self.timeout))
    }
}

/// On-disk cache of the raw schedule feed.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// How long a cached feed stays fresh, e.g. "6h"
    #[serde(default = "default_ttl")]
    pub ttl: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: default_ttl(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Result<Duration> {
        humantime::parse_duration(&self.ttl)
            .with_context(|| format!("Invalid cache.ttl '{}'", self.ttl))
    }
}

/// Season a calendar date belongs to. January and February games are part of
/// the season that kicked off the previous September.
pub fn season_for_date(date: NaiveDate) -> u32 {
    let year = date.year() as u32;
    if date.month() >= 3 {
        year
    } else {
        year - 1
    }
}

fn default_season() -> u32 {
    season_for_date(Utc::now().date_naive())
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_min_completed_weeks() -> u32 {
    2
}

fn default_top() -> usize {
    10
}

fn default_url() -> String {
    DEFAULT_SCHEDULE_URL.to_string()
}

fn default_max_attempts() -> usize {
    3
}

fn default_base_delay() -> String {
    "2s".to_string()
}

fn default_timeout() -> String {
    "30s".to_string()
}

fn default_true() -> bool {
    true
}

fn default_ttl() -> String {
    "6h".to_string()
}
