use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{RawPerformance, ScoringConfig, ScoringSystem, TimeBasedPerformance, WorkoutTimeCap};
use crate::services::time_codec;

/// Every problem found in a submission, meant for direct display to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Checks a submission before calculation.
///
/// Only time-based submissions carry semantic rules; classic and advanced
/// payloads are accepted as decoded.
pub fn validate_submission(
    raw: &RawPerformance,
    scoring_system: &ScoringSystem,
    time_cap: Option<&WorkoutTimeCap>,
) -> ValidationReport {
    let report = match (&scoring_system.config, raw) {
        (ScoringConfig::TimeBased(_), RawPerformance::TimeBased(performance)) => {
            validate_time_based(performance, time_cap)
        }
        (ScoringConfig::TimeBased(_), other) => ValidationReport::from_errors(vec![format!(
            "Expected a time-based submission, got {}",
            other.mode()
        )]),
        _ => ValidationReport::valid(),
    };

    if !report.valid {
        debug!(
            scoring_system_id = %scoring_system.id,
            errors = report.errors.len(),
            "Submission rejected"
        );
    }

    report
}

pub fn validate_time_based(
    performance: &TimeBasedPerformance,
    time_cap: Option<&WorkoutTimeCap>,
) -> ValidationReport {
    if performance.exercises.is_empty() {
        return ValidationReport::from_errors(vec![
            "Exercises array is required for time-based scoring".to_string(),
        ]);
    }

    let mut errors = Vec::new();

    if performance
        .exercises
        .iter()
        .any(|exercise| exercise.completed.is_none())
    {
        errors.push("All exercises must have completion status (true/false)".to_string());
    }

    for exercise in &performance.exercises {
        if !exercise.is_completed() && exercise.achieved_reps.is_none() {
            errors.push(format!(
                "Max reps required for incomplete exercise '{}'",
                exercise.label()
            ));
        }

        if let Some(achieved) = exercise.achieved_reps
            && achieved > exercise.target_reps
        {
            errors.push(format!(
                "Achieved reps ({}) for exercise '{}' cannot exceed target reps ({})",
                achieved,
                exercise.label(),
                exercise.target_reps
            ));
        }
    }

    match performance
        .completion_time
        .as_deref()
        .filter(|time| !time.is_empty())
    {
        None => errors.push("Completion time is required".to_string()),
        Some(time) if !time_codec::is_valid_format(time) => errors.push(format!(
            "Completion time '{}' must be in mm:ss format (e.g., 10:00)",
            time
        )),
        Some(time) => {
            if let Some(cap) = time_cap {
                let cap = cap.to_string();
                if time_codec::exceeds_cap(time, &cap) {
                    errors.push(format!(
                        "Completion time ({}) cannot exceed time cap ({})",
                        time, cap
                    ));
                }
            }
        }
    }

    ValidationReport::from_errors(errors)
}
