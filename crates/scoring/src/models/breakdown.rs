use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ClockTime;

pub const ADVANCED_FORMULA: &str = "Σ(EDS × EQS) + TB";

/// Audit record explaining how a score was reached.
///
/// Serialized without a tag; the variants are told apart by their fields,
/// and `allCompleted` marks a time-based breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreBreakdown {
    TimeBased(TimeBasedBreakdown),
    Advanced(AdvancedBreakdown),
    Classic(ClassicBreakdown),
}

impl ScoreBreakdown {
    pub fn as_time_based(&self) -> Option<&TimeBasedBreakdown> {
        match self {
            Self::TimeBased(breakdown) => Some(breakdown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassicBreakdown {
    pub base_score: Decimal,
    pub rank: u32,
    pub decrement: Decimal,
    pub formula: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedBreakdown {
    #[serde(rename = "totalEDS")]
    pub total_eds: Decimal,
    pub time_bonus: Decimal,
    pub rank: u32,
    pub exercises: Vec<ExerciseBreakdown>,
    pub formula: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseBreakdown {
    pub exercise_id: String,
    pub exercise_name: String,
    pub reps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Decimal>,
    pub eqs: u8,
    pub eds: Decimal,
    #[serde(alias = "score")]
    pub exercise_score: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBasedBreakdown {
    pub all_completed: bool,
    /// The athlete's time when every exercise was finished, otherwise the cap.
    #[serde(default)]
    pub completion_time: ClockTime,
    #[serde(default)]
    pub total_reps: u64,
    #[serde(default)]
    pub completed_exercises: u32,
    #[serde(default)]
    pub total_exercises: u32,
    #[serde(default)]
    pub exercises: Vec<TimeBasedExerciseBreakdown>,
}

impl TimeBasedBreakdown {
    /// Ordering key for athletes who did not finish: exercises first, then reps.
    pub fn progress(&self) -> (u32, u64) {
        (self.completed_exercises, self.total_reps)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBasedExerciseBreakdown {
    pub exercise_id: String,
    #[serde(default)]
    pub exercise_name: String,
    pub completed: bool,
    #[serde(default, alias = "maxReps", skip_serializing_if = "Option::is_none")]
    pub achieved_reps: Option<u32>,
    #[serde(default, alias = "reps")]
    pub target_reps: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_untagged_breakdown_detection() {
        let time_based: ScoreBreakdown = serde_json::from_value(json!({
            "allCompleted": false,
            "completionTime": "10:00",
            "totalReps": 125,
            "completedExercises": 1,
            "totalExercises": 2
        }))
        .unwrap();
        let breakdown = time_based.as_time_based().unwrap();
        assert_eq!(breakdown.progress(), (1, 125));

        let advanced: ScoreBreakdown = serde_json::from_value(json!({
            "totalEDS": 100,
            "timeBonus": 10,
            "rank": 1,
            "exercises": [],
            "formula": ADVANCED_FORMULA
        }))
        .unwrap();
        assert!(matches!(advanced, ScoreBreakdown::Advanced(_)));

        let classic: ScoreBreakdown = serde_json::from_value(json!({
            "baseScore": 100,
            "rank": 3,
            "decrement": 1,
            "formula": "100 - ((3 - 1) × 1)"
        }))
        .unwrap();
        assert!(matches!(classic, ScoreBreakdown::Classic(_)));
        assert!(classic.as_time_based().is_none());
    }
}
