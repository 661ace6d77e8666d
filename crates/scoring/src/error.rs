use thiserror::Error;

use crate::models::ScoringMode;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Unsupported scoring mode: {0}")]
    UnsupportedScoringMode(String),

    #[error("Workout must have a time cap configured for time-based scoring")]
    MissingTimeCap,

    #[error("Performance payload is {found} but the scoring system expects {expected}")]
    PerformanceMismatch {
        expected: ScoringMode,
        found: ScoringMode,
    },

    #[error("Invalid time cap: {0}")]
    InvalidTimeCap(String),

    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid scoring system configuration: {0}")]
    InvalidConfig(#[from] validator::ValidationErrors),

    #[error("Not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, ScoringError>;

impl ScoringError {
    /// Fatal errors point at caller-side data problems and must not be retried.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ScoringError::UnsupportedScoringMode(_)
                | ScoringError::MissingTimeCap
                | ScoringError::PerformanceMismatch { .. }
        )
    }
}
