use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Score, ScoreBreakdown, TimeBasedBreakdown};

/// Identity of a stored score: one result per athlete, workout and category
/// within an event. Resubmitting under the same key replaces the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreKey {
    pub event_id: Uuid,
    pub athlete_id: Uuid,
    #[serde(alias = "wodId")]
    pub workout_id: Uuid,
    pub category_id: Uuid,
}

/// A calculated result as persisted by the score store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredScoreRecord")]
pub struct ScoreRecord {
    pub score_id: Uuid,
    #[serde(flatten)]
    pub key: ScoreKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring_system_id: Option<String>,
    pub score: Score,
    #[serde(default)]
    pub breakdown: Option<ScoreBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<serde_json::Value>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Same shape as `ScoreRecord`; decoding goes through here so a rep count
// can be told apart from points using the breakdown.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredScoreRecord {
    score_id: Uuid,
    #[serde(flatten)]
    key: ScoreKey,
    #[serde(default)]
    scoring_system_id: Option<String>,
    score: Score,
    #[serde(default)]
    breakdown: Option<ScoreBreakdown>,
    #[serde(default)]
    raw_data: Option<serde_json::Value>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl From<StoredScoreRecord> for ScoreRecord {
    fn from(stored: StoredScoreRecord) -> Self {
        let score = stored.score.with_breakdown(stored.breakdown.as_ref());
        Self {
            score_id: stored.score_id,
            key: stored.key,
            scoring_system_id: stored.scoring_system_id,
            score,
            breakdown: stored.breakdown,
            raw_data: stored.raw_data,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

impl ScoreRecord {
    pub fn time_breakdown(&self) -> Option<&TimeBasedBreakdown> {
        self.breakdown
            .as_ref()
            .and_then(ScoreBreakdown::as_time_based)
    }

    pub fn is_time_based(&self) -> bool {
        self.time_breakdown().is_some()
    }

    pub fn is_time_completed(&self) -> bool {
        self.time_breakdown()
            .is_some_and(|breakdown| breakdown.all_completed)
    }
}
