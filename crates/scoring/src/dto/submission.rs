use serde::{Deserialize, Serialize};

use crate::models::{ScoreKey, ScoreRecord};
use crate::services::submission_validator::ValidationReport;

/// A score submitted for one athlete, workout and category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    #[serde(flatten)]
    pub key: ScoreKey,
    pub raw_data: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "lowercase")]
pub enum SubmissionOutcome {
    Created(ScoreRecord),
    Updated(ScoreRecord),
    Rejected(ValidationReport),
}

impl SubmissionOutcome {
    pub fn record(&self) -> Option<&ScoreRecord> {
        match self {
            Self::Created(record) | Self::Updated(record) => Some(record),
            Self::Rejected(_) => None,
        }
    }
}
