//! Error types for the ranking pipeline.
//!
//! Library functions return `anyhow::Result` with context attached; the
//! variants below are the typed failures callers can downcast to when they
//! need to pick an exit code.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("Missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    #[error("Malformed game row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("Invalid schedule input: {reason}")]
    InvalidInput { reason: String },

    #[error("Failed to fetch schedule after {attempts} attempts: {message}")]
    Fetch { attempts: usize, message: String },

    #[error("Snapshot persistence failed for {path}: {reason}")]
    Persistence { path: String, reason: String },
}

impl RankingError {
    /// Validation failures abort the run before any ranking is computed.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RankingError::MissingFields { .. }
                | RankingError::MalformedRow { .. }
                | RankingError::InvalidInput { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_lists_every_field() {
        let err = RankingError::MissingFields {
            fields: vec!["result".to_string(), "week".to_string()],
        };
        assert_eq!(err.to_string(), "Missing required fields: result, week");
        assert!(err.is_validation());
    }

    #[test]
    fn test_fetch_is_not_validation() {
        let err = RankingError::Fetch {
            attempts: 3,
            message: "timed out".to_string(),
        };
        assert!(!err.is_validation());
        assert!(err.to_string().contains("3 attempts"));
    }

    #[test]
    fn test_invalid_input_is_validation() {
        let err = RankingError::InvalidInput {
            reason: "Failed to parse JSON schedule".to_string(),
        };
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Invalid schedule input: Failed to parse JSON schedule"
        );
    }
}
