use std::path::Path;

use anyhow::{Context, Result};
use scoring::dto::leaderboard::{
    CumulativeLeaderboardFilter, CumulativeStanding, WorkoutLeaderboardFilter, WorkoutStanding,
};
use scoring::dto::submission::{ScoreSubmission, SubmissionOutcome};
use scoring::models::{RawPerformance, ScoreRecord, ScoreResult, ScoringSystem, WorkoutTimeCap};
use scoring::repository::score::{InMemoryScoreStore, ScoreStore};
use scoring::{ValidationReport, calculate, rank_cumulative, rank_workout, submit_score, validate_submission};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::Config;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Leaderboard {
    Workout(Vec<WorkoutStanding>),
    Cumulative(Vec<CumulativeStanding>),
}

pub async fn calculate_score(
    system_path: &Path,
    performance_path: &Path,
    time_cap: Option<WorkoutTimeCap>,
) -> Result<ScoreResult> {
    let (system, raw) = load_performance(system_path, performance_path).await?;
    let result = calculate(&raw, &system, time_cap.as_ref())
        .with_context(|| format!("Failed to score {}", performance_path.display()))?;
    Ok(result)
}

pub async fn validate_performance(
    system_path: &Path,
    performance_path: &Path,
    time_cap: Option<WorkoutTimeCap>,
) -> Result<ValidationReport> {
    let (system, raw) = load_performance(system_path, performance_path).await?;
    Ok(validate_submission(&raw, &system, time_cap.as_ref()))
}

pub async fn submit(
    config: &Config,
    system_path: Option<&Path>,
    submission_path: &Path,
    time_cap: Option<WorkoutTimeCap>,
) -> Result<SubmissionOutcome> {
    let system = match system_path {
        Some(path) => Some(load_json::<ScoringSystem>(path).await?),
        None => {
            tracing::info!("No scoring system given, using the default advanced system");
            None
        }
    };
    let submission: ScoreSubmission = load_json(submission_path).await?;

    let store = load_store(&config.scores_file).await?;
    let outcome = submit_score(&store, submission, system.as_ref(), time_cap.as_ref())?;

    if outcome.record().is_some() {
        save_store(&store, &config.scores_file).await?;
    }

    Ok(outcome)
}

pub async fn leaderboard(
    config: &Config,
    event_id: Uuid,
    workout_id: Option<Uuid>,
    category_id: Option<Uuid>,
) -> Result<Leaderboard> {
    let store = load_store(&config.scores_file).await?;
    let records = store.list_for_event(event_id)?;
    tracing::info!("Ranking {} score(s) for event {}", records.len(), event_id);

    let leaderboard = match workout_id {
        Some(workout_id) => Leaderboard::Workout(rank_workout(
            &records,
            &WorkoutLeaderboardFilter {
                event_id: Some(event_id),
                workout_id,
                category_id,
            },
        )),
        None => Leaderboard::Cumulative(rank_cumulative(
            &records,
            &CumulativeLeaderboardFilter {
                event_id: Some(event_id),
                category_id,
            },
        )),
    };

    Ok(leaderboard)
}

async fn load_performance(
    system_path: &Path,
    performance_path: &Path,
) -> Result<(ScoringSystem, RawPerformance)> {
    let system: ScoringSystem = load_json(system_path).await?;
    tracing::debug!("Loaded {} scoring system '{}'", system.mode(), system.id);

    let payload: serde_json::Value = load_json(performance_path).await?;
    let raw = RawPerformance::from_value(system.mode(), payload)
        .with_context(|| format!("Invalid performance in {}", performance_path.display()))?;

    Ok((system, raw))
}

async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

async fn load_store(path: &Path) -> Result<InMemoryScoreStore> {
    if !tokio::fs::try_exists(path).await? {
        tracing::info!("Scores file {} not found, starting empty", path.display());
        return Ok(InMemoryScoreStore::new());
    }

    let records: Vec<ScoreRecord> = load_json(path).await?;
    Ok(InMemoryScoreStore::from_records(records)?)
}

async fn save_store(store: &InMemoryScoreStore, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&store.snapshot()?)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Saved scores to {}", path.display());
    Ok(())
}
