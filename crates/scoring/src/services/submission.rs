use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::dto::submission::{ScoreSubmission, SubmissionOutcome};
use crate::error::{Result, ScoringError};
use crate::models::{DEFAULT_SCORING_SYSTEM, RawPerformance, ScoreRecord, ScoringSystem, WorkoutTimeCap};
use crate::repository::score::ScoreStore;
use crate::services::score_calculator::calculate;
use crate::services::submission_validator::validate_submission;

/// Validates, calculates and stores a submission.
///
/// Workouts without a scoring system fall back to [`DEFAULT_SCORING_SYSTEM`].
/// A time-based system without a time cap fails before the payload is looked
/// at. Invalid payloads come back as [`SubmissionOutcome::Rejected`].
pub fn submit_score<S>(
    store: &S,
    submission: ScoreSubmission,
    scoring_system: Option<&ScoringSystem>,
    time_cap: Option<&WorkoutTimeCap>,
) -> Result<SubmissionOutcome>
where
    S: ScoreStore + ?Sized,
{
    let scoring_system = scoring_system.unwrap_or(&*DEFAULT_SCORING_SYSTEM);

    if scoring_system.is_time_based() && time_cap.is_none() {
        return Err(ScoringError::MissingTimeCap);
    }

    let raw = RawPerformance::from_value(scoring_system.mode(), submission.raw_data.clone())?;

    let report = validate_submission(&raw, scoring_system, time_cap);
    if !report.valid {
        return Ok(SubmissionOutcome::Rejected(report));
    }

    let result = calculate(&raw, scoring_system, time_cap)?;

    let existing = store.find_by_key(&submission.key)?;
    let now = Utc::now().naive_utc();

    let record = ScoreRecord {
        score_id: existing
            .as_ref()
            .map_or_else(Uuid::new_v4, |record| record.score_id),
        key: submission.key,
        scoring_system_id: Some(scoring_system.id.clone()),
        score: result.calculated_score,
        breakdown: Some(result.breakdown),
        raw_data: Some(submission.raw_data),
        created_at: existing.as_ref().map_or(now, |record| record.created_at),
        updated_at: now,
    };

    let record = store.upsert(record)?;

    info!(
        score_id = %record.score_id,
        athlete_id = %record.key.athlete_id,
        workout_id = %record.key.workout_id,
        score = %record.score,
        replaced = existing.is_some(),
        "Score stored"
    );

    Ok(match existing {
        Some(_) => SubmissionOutcome::Updated(record),
        None => SubmissionOutcome::Created(record),
    })
}
