use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{ClockTime, ScoreBreakdown};

/// A calculated score.
///
/// Classic and Advanced modes produce points. Time-based mode produces the
/// completion time when every exercise was finished, otherwise the number of
/// reps achieved inside the cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Score {
    Points(Decimal),
    Time(ClockTime),
    Count(u64),
}

impl Score {
    /// Numeric value used by points-based ordering and cumulative totals.
    pub fn numeric_value(&self) -> Option<Decimal> {
        match self {
            Self::Points(points) => Some(*points),
            Self::Count(reps) => Some(Decimal::from(*reps)),
            Self::Time(_) => None,
        }
    }

    pub fn is_time(&self) -> bool {
        matches!(self, Self::Time(_))
    }

    /// Restores a rep count that decoded as points.
    ///
    /// On the wire a count is a bare number like points; an unfinished
    /// time-based breakdown marks it as a count.
    pub fn with_breakdown(self, breakdown: Option<&ScoreBreakdown>) -> Self {
        let unfinished = breakdown
            .and_then(ScoreBreakdown::as_time_based)
            .is_some_and(|breakdown| !breakdown.all_completed);

        match self {
            Self::Points(points) if unfinished && points.fract().is_zero() => {
                points.to_u64().map_or(Self::Points(points), Self::Count)
            }
            score => score,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Points(points) => write!(f, "{}", points.normalize()),
            Self::Time(time) => write!(f, "{}", time),
            Self::Count(reps) => write!(f, "{}", reps),
        }
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Points(points) if points.fract().is_zero() => match points.to_i64() {
                Some(whole) => serializer.serialize_i64(whole),
                None => serializer.serialize_f64(points.to_f64().unwrap_or_default()),
            },
            Self::Points(points) => serializer.serialize_f64(points.to_f64().unwrap_or_default()),
            Self::Time(time) => serializer.serialize_str(time.as_str()),
            Self::Count(reps) => serializer.serialize_u64(*reps),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScoreRepr {
    Number(Decimal),
    Text(String),
}

/// Stored scores carry no mode tag: numbers read back as points, strings as
/// times. Use [`Score::with_breakdown`] to recover a rep count.
impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match ScoreRepr::deserialize(deserializer)? {
            ScoreRepr::Number(points) => Self::Points(points),
            ScoreRepr::Text(text) => Self::Time(ClockTime::new(text)),
        })
    }
}

/// Output of the score calculator: the score plus an audit breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ScoreResultRepr")]
pub struct ScoreResult {
    pub calculated_score: Score,
    pub breakdown: ScoreBreakdown,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreResultRepr {
    calculated_score: Score,
    breakdown: ScoreBreakdown,
}

impl From<ScoreResultRepr> for ScoreResult {
    fn from(repr: ScoreResultRepr) -> Self {
        Self {
            calculated_score: repr.calculated_score.with_breakdown(Some(&repr.breakdown)),
            breakdown: repr.breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialization_boundary() {
        assert_eq!(
            serde_json::to_value(Score::Points(Decimal::from(98))).unwrap(),
            json!(98)
        );
        assert_eq!(
            serde_json::to_value(Score::Points(Decimal::new(125, 1))).unwrap(),
            json!(12.5)
        );
        assert_eq!(
            serde_json::to_value(Score::Time(ClockTime::from("08:45"))).unwrap(),
            json!("08:45")
        );
        assert_eq!(serde_json::to_value(Score::Count(125)).unwrap(), json!(125));
    }

    #[test]
    fn test_rep_count_recovered_from_breakdown() {
        let result: ScoreResult = serde_json::from_value(json!({
            "calculatedScore": 125,
            "breakdown": {
                "allCompleted": false,
                "completionTime": "10:00",
                "totalReps": 125,
                "completedExercises": 1,
                "totalExercises": 2,
                "exercises": []
            }
        }))
        .unwrap();
        assert_eq!(result.calculated_score, Score::Count(125));

        let points = Score::Points(Decimal::from(98)).with_breakdown(None);
        assert_eq!(points, Score::Points(Decimal::from(98)));
    }

    #[test]
    fn test_stored_score_decoding() {
        let points: Score = serde_json::from_value(json!(110)).unwrap();
        assert_eq!(points.numeric_value(), Some(Decimal::from(110)));

        let time: Score = serde_json::from_value(json!("09:30")).unwrap();
        assert!(time.is_time());
        assert_eq!(time.numeric_value(), None);
    }
}
