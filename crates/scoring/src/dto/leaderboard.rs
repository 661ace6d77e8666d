use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Score, ScoreBreakdown, ScoreRecord};

/// Scope of a single-workout leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLeaderboardFilter {
    #[serde(default)]
    pub event_id: Option<Uuid>,
    pub workout_id: Uuid,
    #[serde(default)]
    pub category_id: Option<Uuid>,
}

impl WorkoutLeaderboardFilter {
    pub fn matches(&self, record: &ScoreRecord) -> bool {
        record.key.workout_id == self.workout_id
            && self.event_id.is_none_or(|id| record.key.event_id == id)
            && self.category_id.is_none_or(|id| record.key.category_id == id)
    }
}

/// Scope of the multi-workout cumulative leaderboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeLeaderboardFilter {
    #[serde(default)]
    pub event_id: Option<Uuid>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
}

impl CumulativeLeaderboardFilter {
    pub fn matches(&self, record: &ScoreRecord) -> bool {
        self.event_id.is_none_or(|id| record.key.event_id == id)
            && self.category_id.is_none_or(|id| record.key.category_id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStanding {
    pub rank: u32,
    pub athlete_id: Uuid,
    pub category_id: Uuid,
    pub workout_id: Uuid,
    pub score_id: Uuid,
    pub score: Score,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeStanding {
    pub rank: u32,
    pub athlete_id: Uuid,
    pub category_id: Uuid,
    pub total_points: Decimal,
    pub workout_count: u32,
    pub workout_results: Vec<WorkoutResult>,
}

/// One workout's contribution to a cumulative standing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutResult {
    pub workout_id: Uuid,
    pub position: u32,
    pub points: Decimal,
    pub score: Score,
}
