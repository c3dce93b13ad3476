use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CACHE_KEY_PREFIX: &str = "schedule:";

/// Cached copy of the raw schedule feed
#[derive(Debug, Serialize, Deserialize)]
pub struct CachedSchedule {
    pub url: String,
    pub fetched_at: DateTime<Utc>,
    pub body: String,
}

impl CachedSchedule {
    /// Still usable if it was fetched less than `ttl` before `now`
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => now - self.fetched_at < ttl,
            // A TTL too large for chrono never expires
            Err(_) => true,
        }
    }
}

/// Get the platform-appropriate cache directory for weighted-wins
pub fn get_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("weighted-wins/schedule-cache"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.cache/weighted-wins/schedule-cache",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

fn cache_key(url: &str) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, url)
}

/// Read a cached feed for `url`, whatever its age
pub fn read_cached_schedule(cache_path: &Path, url: &str) -> Option<CachedSchedule> {
    let bytes = cacache::read_sync(cache_path, cache_key(url)).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Store the raw feed body for `url`
pub fn write_cached_schedule(cache_path: &Path, url: &str, body: &str) -> Result<()> {
    let entry = CachedSchedule {
        url: url.to_string(),
        fetched_at: Utc::now(),
        body: body.to_string(),
    };
    let json = serde_json::to_vec(&entry)?;
    cacache::write_sync(cache_path, cache_key(url), &json)
        .context("Failed to write schedule cache")?;
    Ok(())
}

/// Clear the schedule cache directory
pub fn clear_cache(cache_path: &Path) -> Result<()> {
    match std::fs::remove_dir_all(cache_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to remove cache directory"),
    }
}
