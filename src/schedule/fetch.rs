use anyhow::{Context, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_retry::Retry;
use tracing::{info, warn};

use crate::config::FetchConfig;
use crate::error::RankingError;

/// Delay before retry number `attempt` (0-based): `base * 2^attempt`
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

/// Delays between attempts. `max_attempts` counts the first try, so there is
/// one delay fewer than attempts.
pub fn retry_strategy(base: Duration, max_attempts: usize) -> impl Iterator<Item = Duration> {
    let retries = max_attempts.saturating_sub(1) as u32;
    (0..retries).map(move |attempt| backoff_delay(base, attempt))
}

/// Create an HTTP client for the schedule feed
pub fn create_client(config: &FetchConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout()?)
        .user_agent(concat!("weighted-wins/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")
}

async fn fetch_once(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .context("Request failed")?
        .error_for_status()
        .context("Schedule feed returned an error status")?;

    let body = response
        .text()
        .await
        .context("Failed to read schedule body")?;

    if body.trim().is_empty() {
        anyhow::bail!("Schedule feed returned an empty body");
    }

    Ok(body)
}

/// Download the raw schedule CSV, retrying with exponential backoff
pub async fn fetch_schedule_csv(client: &reqwest::Client, config: &FetchConfig) -> Result<String> {
    let base = config.base_delay()?;
    let max_attempts = config.max_attempts.max(1);
    let attempts = AtomicUsize::new(0);

    let result = Retry::spawn(retry_strategy(base, max_attempts), || async {
        let attempt = attempts.fetch_add(1, Ordering::Relaxed) + 1;
        info!(
            "Fetching schedule from {} (attempt {}/{})",
            config.url, attempt, max_attempts
        );
        fetch_once(client, &config.url).await.inspect_err(|e| {
            warn!("Attempt {} failed: {:#}", attempt, e);
        })
    })
    .await;

    match result {
        Ok(body) => {
            info!("Fetched {} bytes of schedule data", body.len());
            Ok(body)
        }
        Err(e) => Err(RankingError::Fetch {
            attempts: attempts.load(Ordering::Relaxed),
            message: format!("{:#}", e),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        let base = Duration::from_secs(2);
        assert_eq!(backoff_delay(base, 0), Duration::from_secs(2));
        assert_eq!(backoff_delay(base, 1), Duration::from_secs(4));
        assert_eq!(backoff_delay(base, 2), Duration::from_secs(8));
    }

    #[test]
    fn test_backoff_saturates() {
        let base = Duration::from_secs(u64::MAX);
        assert_eq!(backoff_delay(base, 1), Duration::MAX);
    }

    #[test]
    fn test_default_strategy_waits_twice() {
        let delays: Vec<_> = retry_strategy(Duration::from_secs(2), 3).collect();
        assert_eq!(delays, vec![Duration::from_secs(2), Duration::from_secs(4)]);
    }

    #[test]
    fn test_single_attempt_never_waits() {
        assert_eq!(retry_strategy(Duration::from_secs(2), 1).count(), 0);
        assert_eq!(retry_strategy(Duration::from_secs(2), 0).count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_unreachable_reports_attempts() {
        let config = FetchConfig {
            // Port 9 (discard) on localhost refuses connections
            url: "http://127.0.0.1:9/games.csv".to_string(),
            max_attempts: 2,
            base_delay: "1ms".to_string(),
            timeout: "2s".to_string(),
        };
        let client = create_client(&config).unwrap();
        let err = fetch_schedule_csv(&client, &config).await.unwrap_err();
        match err.downcast_ref::<RankingError>() {
            Some(RankingError::Fetch { attempts, .. }) => assert_eq!(*attempts, 2),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
