use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{Result, ScoringError};
use crate::models::{
    ADVANCED_FORMULA, AdvancedBreakdown, AdvancedConfig, AdvancedExercise, AdvancedPerformance,
    ClassicBreakdown, ClassicConfig, ClassicPerformance, ClockTime, DEFAULT_EQS,
    ExerciseBreakdown, Modifier, ModifierKind, RawPerformance, Score, ScoreBreakdown, ScoreResult,
    ScoringConfig, ScoringSystem, TimeBasedBreakdown, TimeBasedExerciseBreakdown,
    TimeBasedPerformance, WorkoutTimeCap,
};

/// Bonus for finishing inside the time limit when the rank earns no configured bonus.
const COMPLETED_IN_TIME_BONUS: i64 = 2;

/// Computes the score for one submission.
///
/// Pure: identical inputs always produce an identical [`ScoreResult`].
/// Time-based systems require the workout's time cap.
pub fn calculate(
    raw: &RawPerformance,
    scoring_system: &ScoringSystem,
    time_cap: Option<&WorkoutTimeCap>,
) -> Result<ScoreResult> {
    let result = match (&scoring_system.config, raw) {
        (ScoringConfig::Classic(config), RawPerformance::Classic(performance)) => {
            calculate_classic(performance, config)
        }
        (ScoringConfig::Advanced(config), RawPerformance::Advanced(performance)) => {
            calculate_advanced(performance, config)
        }
        (ScoringConfig::TimeBased(_), RawPerformance::TimeBased(performance)) => {
            let time_cap = time_cap.ok_or(ScoringError::MissingTimeCap)?;
            calculate_time_based(performance, time_cap)
        }
        (config, raw) => {
            return Err(ScoringError::PerformanceMismatch {
                expected: config.mode(),
                found: raw.mode(),
            });
        }
    };

    debug!(
        scoring_system_id = %scoring_system.id,
        mode = %scoring_system.mode(),
        score = %result.calculated_score,
        "Calculated score"
    );

    Ok(result)
}

fn calculate_classic(performance: &ClassicPerformance, config: &ClassicConfig) -> ScoreResult {
    let rank = performance.rank.filter(|rank| *rank > 0).unwrap_or(1);
    let deduction = Decimal::from(rank - 1) * config.decrement;
    let score = (config.base_score - deduction).max(Decimal::ZERO);

    ScoreResult {
        calculated_score: Score::Points(score),
        breakdown: ScoreBreakdown::Classic(ClassicBreakdown {
            base_score: config.base_score,
            rank,
            decrement: config.decrement,
            formula: format!(
                "{} - (({} - 1) × {})",
                config.base_score.normalize(),
                rank,
                config.decrement.normalize()
            ),
        }),
    }
}

fn calculate_advanced(performance: &AdvancedPerformance, config: &AdvancedConfig) -> ScoreResult {
    let mut total_eds = Decimal::ZERO;
    let mut exercises = Vec::with_capacity(performance.exercises.len());

    for exercise in &performance.exercises {
        let Some(definition) = config.exercise(&exercise.exercise_id) else {
            warn!(
                exercise_id = %exercise.exercise_id,
                "Exercise not found in scoring system config, skipping"
            );
            continue;
        };

        let reps = exercise.reps.filter(|reps| *reps > 0).unwrap_or(1);
        let rep_count = Decimal::from(reps);

        let mut eds = definition.base_score_per_rep * rep_count;
        for modifier in &definition.modifiers {
            eds += modifier_bonus(modifier, exercise, rep_count);
        }

        // Zero reps or EQS means the field was left blank.
        let eqs = exercise.eqs.filter(|eqs| *eqs > 0).unwrap_or(DEFAULT_EQS);
        let exercise_score = eds * Decimal::from(eqs);
        total_eds += exercise_score;

        exercises.push(ExerciseBreakdown {
            exercise_id: exercise.exercise_id.clone(),
            exercise_name: definition.name.clone(),
            reps,
            weight: exercise.weight,
            eqs,
            eds,
            exercise_score,
        });
    }

    let rank = performance.rank.unwrap_or(0);
    let time_bonus = match config.time_bonuses.get(&rank) {
        Some(bonus) if !bonus.is_zero() => *bonus,
        _ if performance.completed_in_time => Decimal::from(COMPLETED_IN_TIME_BONUS),
        _ => Decimal::ZERO,
    };

    ScoreResult {
        calculated_score: Score::Points(total_eds + time_bonus),
        breakdown: ScoreBreakdown::Advanced(AdvancedBreakdown {
            total_eds,
            time_bonus,
            rank,
            exercises,
            formula: ADVANCED_FORMULA.to_string(),
        }),
    }
}

fn modifier_bonus(modifier: &Modifier, exercise: &AdvancedExercise, reps: Decimal) -> Decimal {
    match modifier.kind {
        ModifierKind::Weight => match exercise.weight {
            Some(weight) if weight > Decimal::ZERO => {
                increments(weight, modifier) * modifier.points_per_increment * reps
            }
            _ => Decimal::ZERO,
        },
        ModifierKind::Deadstop if exercise.deadstop => modifier.points_per_increment * reps,
        ModifierKind::Deadstop => Decimal::ZERO,
        ModifierKind::Hold => match exercise.time_held_seconds {
            Some(held) if held > Decimal::ZERO => {
                increments(held, modifier) * modifier.points_per_increment
            }
            _ => Decimal::ZERO,
        },
    }
}

fn increments(value: Decimal, modifier: &Modifier) -> Decimal {
    if modifier.increment <= Decimal::ZERO {
        warn!(kind = ?modifier.kind, "Modifier has no positive increment, ignoring");
        return Decimal::ZERO;
    }
    (value / modifier.increment).floor()
}

fn calculate_time_based(
    performance: &TimeBasedPerformance,
    time_cap: &WorkoutTimeCap,
) -> ScoreResult {
    let all_completed = performance
        .exercises
        .iter()
        .all(|exercise| exercise.is_completed());
    let total_reps: u64 = performance
        .exercises
        .iter()
        .map(|exercise| u64::from(exercise.credited_reps()))
        .sum();
    let completed_exercises = performance
        .exercises
        .iter()
        .filter(|exercise| exercise.is_completed())
        .count() as u32;

    // Athletes who did not finish are recorded at the cap, whatever they entered.
    let completion_time = match (&performance.completion_time, all_completed) {
        (Some(time), true) => ClockTime::new(time.as_str()),
        _ => time_cap.to_clock_time(),
    };

    let calculated_score = if all_completed {
        Score::Time(completion_time.clone())
    } else {
        Score::Count(total_reps)
    };

    let exercises = performance
        .exercises
        .iter()
        .map(|exercise| TimeBasedExerciseBreakdown {
            exercise_id: exercise.exercise_id.clone(),
            exercise_name: exercise.exercise_name.clone(),
            completed: exercise.is_completed(),
            achieved_reps: exercise.achieved_reps,
            target_reps: exercise.target_reps,
        })
        .collect();

    ScoreResult {
        calculated_score,
        breakdown: ScoreBreakdown::TimeBased(TimeBasedBreakdown {
            all_completed,
            completion_time,
            total_reps,
            completed_exercises,
            total_exercises: performance.exercises.len() as u32,
            exercises,
        }),
    }
}
