pub mod cache;
pub mod fetch;
pub mod filter;
pub mod parse;
pub mod types;

pub use filter::{completed_games, current_week};
pub use parse::{parse_csv, parse_json, validate_fields, REQUIRED_FIELDS};
pub use types::{Game, Outcome};

use anyhow::Result;
use chrono::Utc;
use std::fs::File;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::RankingError;

/// Where the schedule comes from for one run
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Local CSV or JSON file used instead of the remote feed
    pub input: Option<PathBuf>,
    /// false when --no-cache
    pub use_cache: bool,
}

/// Load the season's games from a local file or the remote feed.
///
/// Files ending in `.json` are parsed as a JSON array of game objects,
/// everything else as CSV. Remote bodies are cached on disk for
/// `cache.ttl` unless caching is disabled.
pub async fn load_games(config: &Config, options: &LoadOptions) -> Result<Vec<Game>> {
    let season = Some(config.season);

    if let Some(path) = &options.input {
        info!("Reading schedule from {}", path.display());
        let file = File::open(path).map_err(|e| RankingError::InvalidInput {
            reason: format!("Failed to open schedule file at {}: {}", path.display(), e),
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        return if is_json {
            parse_json(file, season)
        } else {
            parse_csv(file, season)
        };
    }

    let body = fetch_with_cache(config, options.use_cache && config.cache.enabled).await?;
    parse_csv(body.as_bytes(), season)
}

async fn fetch_with_cache(config: &Config, use_cache: bool) -> Result<String> {
    let cache_path = cache::get_cache_path();
    let url = &config.fetch.url;

    if use_cache {
        let ttl = config.cache.ttl()?;
        if let Some(cached) = cache::read_cached_schedule(&cache_path, url) {
            if cached.is_fresh(ttl, Utc::now()) {
                info!("Using cached schedule fetched at {}", cached.fetched_at);
                return Ok(cached.body);
            }
            debug!("Cached schedule from {} is stale", cached.fetched_at);
        }
    }

    let client = fetch::create_client(&config.fetch)?;
    let body = fetch::fetch_schedule_csv(&client, &config.fetch).await?;

    if use_cache {
        if let Err(e) = cache::write_cached_schedule(&cache_path, url, &body) {
            warn!("Failed to cache schedule: {:#}", e);
        }
    }

    Ok(body)
}
