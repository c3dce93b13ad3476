use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.season == 0 {
        errors.push("season: must be a year, e.g. 2025".to_string());
    }

    if config.top == 0 {
        errors.push("top: must be at least 1".to_string());
    }

    if config.fetch.url.trim().is_empty() {
        errors.push("fetch.url: must not be empty".to_string());
    }

    if config.fetch.max_attempts == 0 {
        errors.push("fetch.max_attempts: must be at least 1".to_string());
    }

    if let Err(e) = humantime::parse_duration(&config.fetch.base_delay) {
        errors.push(format!(
            "fetch.base_delay: invalid '{}' - {}",
            config.fetch.base_delay, e
        ));
    }

    if let Err(e) = humantime::parse_duration(&config.fetch.timeout) {
        errors.push(format!(
            "fetch.timeout: invalid '{}' - {}",
            config.fetch.timeout, e
        ));
    }

    if let Err(e) = humantime::parse_duration(&config.cache.ttl) {
        errors.push(format!("cache.ttl: invalid '{}' - {}", config.cache.ttl, e));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
