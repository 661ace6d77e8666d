use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{Result, ScoringError};

pub const DEFAULT_SCORING_SYSTEM_ID: &str = "default-advanced";

lazy_static! {
    /// Advanced scoring used for workouts that have no scoring system assigned.
    pub static ref DEFAULT_SCORING_SYSTEM: ScoringSystem = ScoringSystem {
        id: DEFAULT_SCORING_SYSTEM_ID.to_string(),
        name: Some("Default Advanced Scoring".to_string()),
        config: ScoringConfig::Advanced(AdvancedConfig::default()),
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringMode {
    Classic,
    Advanced,
    TimeBased,
}

impl ScoringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Advanced => "advanced",
            Self::TimeBased => "time-based",
        }
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringMode {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "advanced" => Ok(Self::Advanced),
            "time-based" | "time_based" | "timebased" => Ok(Self::TimeBased),
            _ => Err(ScoringError::UnsupportedScoringMode(s.to_string())),
        }
    }
}

/// Scoring system as stored by the event service.
///
/// `type` is kept as a free string so that an unknown mode surfaces as
/// [`ScoringError::UnsupportedScoringMode`] instead of a generic parse failure.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScoringSystemRecord {
    #[serde(alias = "scoringSystemId")]
    #[validate(length(min = 1, message = "Scoring system id is required"))]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub r#type: String,
    #[serde(default)]
    pub config: serde_json::Value,
}

/// A decoded scoring system: the algorithm and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScoringSystemRecord")]
pub struct ScoringSystem {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub config: ScoringConfig,
}

impl ScoringSystem {
    pub fn mode(&self) -> ScoringMode {
        self.config.mode()
    }

    pub fn is_time_based(&self) -> bool {
        self.mode() == ScoringMode::TimeBased
    }
}

impl TryFrom<ScoringSystemRecord> for ScoringSystem {
    type Error = ScoringError;

    fn try_from(record: ScoringSystemRecord) -> Result<Self> {
        record.validate()?;
        let mode: ScoringMode = record.r#type.parse()?;

        let config = match record.config {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            value => value,
        };

        let config = match mode {
            ScoringMode::Classic => ScoringConfig::Classic(serde_json::from_value(config)?),
            ScoringMode::Advanced => {
                let advanced: AdvancedConfig = serde_json::from_value(config)?;
                advanced.validate()?;
                ScoringConfig::Advanced(advanced)
            }
            ScoringMode::TimeBased => ScoringConfig::TimeBased(serde_json::from_value(config)?),
        };

        Ok(Self {
            id: record.id,
            name: record.name,
            config,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "kebab-case")]
pub enum ScoringConfig {
    Classic(ClassicConfig),
    Advanced(AdvancedConfig),
    TimeBased(TimeBasedConfig),
}

impl ScoringConfig {
    pub fn mode(&self) -> ScoringMode {
        match self {
            Self::Classic(_) => ScoringMode::Classic,
            Self::Advanced(_) => ScoringMode::Advanced,
            Self::TimeBased(_) => ScoringMode::TimeBased,
        }
    }
}

/// Rank-decrement scoring: `max(0, baseScore - (rank - 1) * decrement)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassicConfig {
    #[serde(default = "default_base_score")]
    pub base_score: Decimal,
    #[serde(default = "default_decrement")]
    pub decrement: Decimal,
}

impl Default for ClassicConfig {
    fn default() -> Self {
        Self {
            base_score: default_base_score(),
            decrement: default_decrement(),
        }
    }
}

fn default_base_score() -> Decimal {
    Decimal::from(100)
}

fn default_decrement() -> Decimal {
    Decimal::ONE
}

/// EDS × EQS scoring with a rank-derived time bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedConfig {
    #[serde(default)]
    #[validate(nested)]
    pub exercises: Vec<ExerciseDefinition>,
    #[serde(default = "default_time_bonuses")]
    pub time_bonuses: BTreeMap<u32, Decimal>,
}

impl Default for AdvancedConfig {
    fn default() -> Self {
        Self {
            exercises: Vec::new(),
            time_bonuses: default_time_bonuses(),
        }
    }
}

impl AdvancedConfig {
    pub fn exercise(&self, exercise_id: &str) -> Option<&ExerciseDefinition> {
        self.exercises
            .iter()
            .find(|definition| definition.exercise_id == exercise_id)
    }
}

fn default_time_bonuses() -> BTreeMap<u32, Decimal> {
    BTreeMap::from([
        (1, Decimal::from(10)),
        (2, Decimal::from(7)),
        (3, Decimal::from(5)),
    ])
}

/// Time-based scoring takes no parameters; the time cap comes from the workout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeBasedConfig {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDefinition {
    #[serde(alias = "id")]
    #[validate(length(min = 1, message = "Exercise id is required"))]
    pub exercise_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(alias = "baseScore")]
    pub base_score_per_rep: Decimal,
    #[serde(default)]
    #[validate(nested)]
    pub modifiers: Vec<Modifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKind {
    Weight,
    Deadstop,
    Hold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_modifier_increment"))]
pub struct Modifier {
    #[serde(rename = "type", alias = "kind")]
    pub kind: ModifierKind,
    #[serde(default)]
    pub increment: Decimal,
    #[serde(alias = "points")]
    pub points_per_increment: Decimal,
}

fn validate_modifier_increment(modifier: &Modifier) -> std::result::Result<(), ValidationError> {
    match modifier.kind {
        ModifierKind::Weight | ModifierKind::Hold if modifier.increment <= Decimal::ZERO => {
            let mut error = ValidationError::new("non_positive_increment");
            error.message = Some("Weight and hold modifiers need a positive increment".into());
            Err(error)
        }
        _ => Ok(()),
    }
}
