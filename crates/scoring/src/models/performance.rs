use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::ScoringMode;
use crate::error::Result;

pub const DEFAULT_EQS: u8 = 5;

/// An athlete's result as entered, shaped by the scoring mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawPerformance {
    Classic(ClassicPerformance),
    Advanced(AdvancedPerformance),
    TimeBased(TimeBasedPerformance),
}

impl RawPerformance {
    /// Decodes an untagged submission payload for the given mode.
    pub fn from_value(mode: ScoringMode, value: serde_json::Value) -> Result<Self> {
        let performance = match mode {
            ScoringMode::Classic => Self::Classic(serde_json::from_value(value)?),
            ScoringMode::Advanced => Self::Advanced(serde_json::from_value(value)?),
            ScoringMode::TimeBased => Self::TimeBased(serde_json::from_value(value)?),
        };
        Ok(performance)
    }

    pub fn mode(&self) -> ScoringMode {
        match self {
            Self::Classic(_) => ScoringMode::Classic,
            Self::Advanced(_) => ScoringMode::Advanced,
            Self::TimeBased(_) => ScoringMode::TimeBased,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassicPerformance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedPerformance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default)]
    pub completed_in_time: bool,
    #[serde(default)]
    pub exercises: Vec<AdvancedExercise>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedExercise {
    pub exercise_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub deadstop: bool,
    #[serde(default, alias = "timeHeld", skip_serializing_if = "Option::is_none")]
    pub time_held_seconds: Option<Decimal>,
    /// Execution quality, 1 to 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eqs: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBasedPerformance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<String>,
    #[serde(default)]
    pub exercises: Vec<TimeBasedExercise>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBasedExercise {
    pub exercise_id: String,
    #[serde(default)]
    pub exercise_name: String,
    #[serde(default, alias = "reps")]
    pub target_reps: u32,
    /// `None` when the submission omitted the completion flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(
        default,
        alias = "maxReps",
        deserialize_with = "deserialize_lenient_reps",
        skip_serializing_if = "Option::is_none"
    )]
    pub achieved_reps: Option<u32>,
}

impl TimeBasedExercise {
    pub fn is_completed(&self) -> bool {
        self.completed == Some(true)
    }

    /// Reps credited toward the workout total.
    pub fn credited_reps(&self) -> u32 {
        if self.is_completed() {
            self.target_reps
        } else {
            self.achieved_reps.unwrap_or(0)
        }
    }

    pub fn label(&self) -> &str {
        if self.exercise_name.is_empty() {
            &self.exercise_id
        } else {
            &self.exercise_name
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RepsInput {
    Count(u32),
    Text(String),
}

/// Score-entry forms send reps as numbers, numeric strings, or `""` when blank.
fn deserialize_lenient_reps<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RepsInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RepsInput::Count(reps)) => Ok(Some(reps)),
        Some(RepsInput::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RepsInput::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_time_based_payload_decoding() {
        let raw = RawPerformance::from_value(
            ScoringMode::TimeBased,
            json!({
                "completionTime": "08:45",
                "exercises": [
                    { "exerciseId": "ex-1", "exerciseName": "Pull Ups", "reps": 50, "completed": true },
                    { "exerciseId": "ex-2", "targetReps": 100, "completed": false, "maxReps": "75" },
                    { "exerciseId": "ex-3", "targetReps": 20, "completed": false, "achievedReps": "" }
                ]
            }),
        )
        .unwrap();

        let RawPerformance::TimeBased(performance) = raw else {
            panic!("expected time-based performance");
        };
        assert_eq!(performance.completion_time.as_deref(), Some("08:45"));
        assert_eq!(performance.exercises[0].target_reps, 50);
        assert_eq!(performance.exercises[1].achieved_reps, Some(75));
        assert_eq!(performance.exercises[2].achieved_reps, None);
        assert_eq!(performance.exercises[2].label(), "ex-3");
    }

    #[test]
    fn test_missing_completion_flag_is_none() {
        let exercise: TimeBasedExercise =
            serde_json::from_value(json!({ "exerciseId": "ex-1", "targetReps": 10 })).unwrap();
        assert_eq!(exercise.completed, None);
        assert!(!exercise.is_completed());
        assert_eq!(exercise.credited_reps(), 0);
    }

    #[test]
    fn test_non_numeric_reps_rejected() {
        let result: std::result::Result<TimeBasedExercise, _> = serde_json::from_value(
            json!({ "exerciseId": "ex-1", "completed": false, "achievedReps": "lots" }),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_advanced_hold_alias() {
        let raw = RawPerformance::from_value(
            ScoringMode::Advanced,
            json!({ "rank": 2, "exercises": [{ "exerciseId": "lever", "timeHeld": 12 }] }),
        )
        .unwrap();
        let RawPerformance::Advanced(performance) = raw else {
            panic!("expected advanced performance");
        };
        assert_eq!(performance.rank, Some(2));
        assert_eq!(
            performance.exercises[0].time_held_seconds,
            Some(Decimal::from(12))
        );
    }
}
