use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dto::leaderboard::{
    CumulativeLeaderboardFilter, CumulativeStanding, WorkoutLeaderboardFilter, WorkoutResult,
    WorkoutStanding,
};
use crate::models::ScoreRecord;

/// Ranks the results of one workout.
///
/// When any result in scope is time-based, finishers come first ordered by
/// completion time, followed by everyone else ordered by exercises completed
/// and then total reps. Otherwise results are ordered by score, highest first.
/// Equal results keep their input order.
pub fn rank_workout(
    records: &[ScoreRecord],
    filter: &WorkoutLeaderboardFilter,
) -> Vec<WorkoutStanding> {
    let scoped = records.iter().filter(|record| filter.matches(record)).collect();

    order_workout_results(scoped)
        .into_iter()
        .zip(1..)
        .map(|(record, rank)| WorkoutStanding {
            rank,
            athlete_id: record.key.athlete_id,
            category_id: record.key.category_id,
            workout_id: record.key.workout_id,
            score_id: record.score_id,
            score: record.score.clone(),
            breakdown: record.breakdown.clone(),
        })
        .collect()
}

/// Sums each athlete's raw workout scores across every workout in scope.
///
/// Points are the score values themselves rather than placement points. A
/// completion-time score has no numeric value and contributes its total reps.
pub fn rank_cumulative(
    records: &[ScoreRecord],
    filter: &CumulativeLeaderboardFilter,
) -> Vec<CumulativeStanding> {
    let mut workouts: Vec<(Uuid, Vec<&ScoreRecord>)> = Vec::new();
    for record in records.iter().filter(|record| filter.matches(record)) {
        match workouts
            .iter_mut()
            .find(|(workout_id, _)| *workout_id == record.key.workout_id)
        {
            Some((_, results)) => results.push(record),
            None => workouts.push((record.key.workout_id, vec![record])),
        }
    }

    let mut standings: Vec<CumulativeStanding> = Vec::new();
    let mut by_athlete: HashMap<Uuid, usize> = HashMap::new();

    for (workout_id, results) in workouts {
        for (record, position) in order_workout_results(results).into_iter().zip(1..) {
            let points = cumulative_points(record);
            let index = *by_athlete.entry(record.key.athlete_id).or_insert_with(|| {
                standings.push(CumulativeStanding {
                    rank: 0,
                    athlete_id: record.key.athlete_id,
                    category_id: record.key.category_id,
                    total_points: Decimal::ZERO,
                    workout_count: 0,
                    workout_results: Vec::new(),
                });
                standings.len() - 1
            });

            let standing = &mut standings[index];
            standing.total_points += points;
            standing.workout_count += 1;
            standing.workout_results.push(WorkoutResult {
                workout_id,
                position,
                points,
                score: record.score.clone(),
            });
        }
    }

    standings.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    for (standing, rank) in standings.iter_mut().zip(1..) {
        standing.rank = rank;
    }

    standings
}

fn order_workout_results(mut results: Vec<&ScoreRecord>) -> Vec<&ScoreRecord> {
    if !results.iter().any(|record| record.is_time_based()) {
        results.sort_by(|a, b| numeric_score(b).cmp(&numeric_score(a)));
        return results;
    }

    let (mut finished, mut unfinished): (Vec<_>, Vec<_>) = results
        .into_iter()
        .partition(|record| record.is_time_completed());

    finished.sort_by_key(|record| {
        record
            .time_breakdown()
            .map_or(0, |breakdown| breakdown.completion_time.seconds())
    });
    unfinished.sort_by(|a, b| progress(b).cmp(&progress(a)));

    finished.extend(unfinished);
    finished
}

fn numeric_score(record: &ScoreRecord) -> Decimal {
    record.score.numeric_value().unwrap_or(Decimal::ZERO)
}

fn progress(record: &ScoreRecord) -> (u32, u64) {
    record
        .time_breakdown()
        .map_or((0, 0), |breakdown| breakdown.progress())
}

fn cumulative_points(record: &ScoreRecord) -> Decimal {
    record.score.numeric_value().unwrap_or_else(|| {
        record
            .time_breakdown()
            .map_or(Decimal::ZERO, |breakdown| Decimal::from(breakdown.total_reps))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ClockTime, Score, ScoreBreakdown, ScoreKey, TimeBasedBreakdown,
    };
    use chrono::NaiveDateTime;

    struct Fixture {
        event_id: Uuid,
        category_id: Uuid,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                event_id: Uuid::new_v4(),
                category_id: Uuid::new_v4(),
            }
        }

        fn record(&self, athlete_id: Uuid, workout_id: Uuid, score: Score) -> ScoreRecord {
            ScoreRecord {
                score_id: Uuid::new_v4(),
                key: ScoreKey {
                    event_id: self.event_id,
                    athlete_id,
                    workout_id,
                    category_id: self.category_id,
                },
                scoring_system_id: None,
                score,
                breakdown: None,
                raw_data: None,
                created_at: NaiveDateTime::default(),
                updated_at: NaiveDateTime::default(),
            }
        }

        fn timed(
            &self,
            athlete_id: Uuid,
            workout_id: Uuid,
            time: &str,
            completed: (u32, u32),
            total_reps: u64,
        ) -> ScoreRecord {
            let all_completed = completed.0 == completed.1;
            let score = if all_completed {
                Score::Time(ClockTime::from(time))
            } else {
                Score::Count(total_reps)
            };
            let mut record = self.record(athlete_id, workout_id, score);
            record.breakdown = Some(ScoreBreakdown::TimeBased(TimeBasedBreakdown {
                all_completed,
                completion_time: ClockTime::from(time),
                total_reps,
                completed_exercises: completed.0,
                total_exercises: completed.1,
                exercises: Vec::new(),
            }));
            record
        }
    }

    fn points(value: i64) -> Score {
        Score::Points(Decimal::from(value))
    }

    #[test]
    fn test_empty_scope() {
        let filter = WorkoutLeaderboardFilter {
            event_id: None,
            workout_id: Uuid::new_v4(),
            category_id: None,
        };
        assert!(rank_workout(&[], &filter).is_empty());
        assert!(rank_cumulative(&[], &CumulativeLeaderboardFilter::default()).is_empty());
    }

    #[test]
    fn test_points_descending_with_stable_ties() {
        let fixture = Fixture::new();
        let workout = Uuid::new_v4();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let records = vec![
            fixture.record(a, workout, points(90)),
            fixture.record(b, workout, points(100)),
            fixture.record(c, workout, points(90)),
        ];
        let filter = WorkoutLeaderboardFilter {
            event_id: Some(fixture.event_id),
            workout_id: workout,
            category_id: Some(fixture.category_id),
        };

        let standings = rank_workout(&records, &filter);
        let order: Vec<Uuid> = standings.iter().map(|s| s.athlete_id).collect();
        assert_eq!(order, vec![b, a, c]);
        assert_eq!(standings[2].rank, 3);
    }

    #[test]
    fn test_time_based_ordering() {
        let fixture = Fixture::new();
        let workout = Uuid::new_v4();
        let (slow, fast, capped) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let records = vec![
            fixture.timed(slow, workout, "09:00", (3, 3), 150),
            fixture.timed(capped, workout, "10:00", (2, 3), 9999),
            fixture.timed(fast, workout, "08:30", (3, 3), 150),
        ];
        let filter = WorkoutLeaderboardFilter {
            event_id: None,
            workout_id: workout,
            category_id: None,
        };

        let standings = rank_workout(&records, &filter);
        let order: Vec<Uuid> = standings.iter().map(|s| s.athlete_id).collect();
        assert_eq!(order, vec![fast, slow, capped]);
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[2].score, Score::Count(9999));
    }

    #[test]
    fn test_out_of_range_stored_time_sorts_as_zero() {
        let fixture = Fixture::new();
        let workout = Uuid::new_v4();
        let (normal, garbled) = (Uuid::new_v4(), Uuid::new_v4());
        let records = vec![
            fixture.timed(normal, workout, "08:30", (2, 2), 60),
            fixture.timed(garbled, workout, "999999999999999999:00", (2, 2), 60),
        ];
        let filter = WorkoutLeaderboardFilter {
            event_id: None,
            workout_id: workout,
            category_id: None,
        };

        let order: Vec<Uuid> = rank_workout(&records, &filter)
            .iter()
            .map(|s| s.athlete_id)
            .collect();
        assert_eq!(order, vec![garbled, normal]);
    }

    #[test]
    fn test_unfinished_by_exercises_then_reps() {
        let fixture = Fixture::new();
        let workout = Uuid::new_v4();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let records = vec![
            fixture.timed(a, workout, "10:00", (2, 3), 150),
            fixture.timed(b, workout, "10:00", (2, 3), 175),
            fixture.timed(c, workout, "10:00", (1, 3), 200),
        ];
        let filter = WorkoutLeaderboardFilter {
            event_id: None,
            workout_id: workout,
            category_id: None,
        };

        let order: Vec<Uuid> = rank_workout(&records, &filter)
            .iter()
            .map(|s| s.athlete_id)
            .collect();
        assert_eq!(order, vec![b, a, c]);
    }

    #[test]
    fn test_scope_filters_other_categories() {
        let fixture = Fixture::new();
        let other = Fixture::new();
        let workout = Uuid::new_v4();
        let records = vec![
            fixture.record(Uuid::new_v4(), workout, points(10)),
            other.record(Uuid::new_v4(), workout, points(50)),
        ];
        let filter = WorkoutLeaderboardFilter {
            event_id: None,
            workout_id: workout,
            category_id: Some(fixture.category_id),
        };

        let standings = rank_workout(&records, &filter);
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].category_id, fixture.category_id);
    }

    #[test]
    fn test_cumulative_sums_raw_scores() {
        let fixture = Fixture::new();
        let (wod1, wod2) = (Uuid::new_v4(), Uuid::new_v4());
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let records = vec![
            fixture.record(a, wod1, points(100)),
            fixture.record(b, wod1, points(99)),
            fixture.record(a, wod2, points(10)),
            fixture.record(b, wod2, points(30)),
        ];

        let standings = rank_cumulative(&records, &CumulativeLeaderboardFilter::default());
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].athlete_id, b);
        assert_eq!(standings[0].total_points, Decimal::from(129));
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[1].total_points, Decimal::from(110));
        assert_eq!(standings[1].workout_count, 2);

        let wod2_result = &standings[1].workout_results[1];
        assert_eq!(wod2_result.workout_id, wod2);
        assert_eq!(wod2_result.position, 2);
        assert_eq!(wod2_result.points, Decimal::from(10));
    }

    #[test]
    fn test_cumulative_time_scores_contribute_reps() {
        let fixture = Fixture::new();
        let workout = Uuid::new_v4();
        let (finisher, capped) = (Uuid::new_v4(), Uuid::new_v4());
        let records = vec![
            fixture.timed(capped, workout, "10:00", (1, 2), 80),
            fixture.timed(finisher, workout, "07:10", (2, 2), 120),
        ];

        let standings = rank_cumulative(&records, &CumulativeLeaderboardFilter::default());
        assert_eq!(standings[0].athlete_id, finisher);
        assert_eq!(standings[0].total_points, Decimal::from(120));
        assert_eq!(standings[0].workout_results[0].position, 1);
        assert_eq!(standings[1].total_points, Decimal::from(80));
    }

    #[test]
    fn test_cumulative_ties_keep_first_seen_order() {
        let fixture = Fixture::new();
        let workout = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let records = vec![
            fixture.record(a, workout, points(50)),
            fixture.record(b, workout, points(50)),
        ];

        let standings = rank_cumulative(&records, &CumulativeLeaderboardFilter::default());
        assert_eq!(standings[0].athlete_id, a);
        assert_eq!(standings[1].athlete_id, b);
        assert_eq!(standings[1].rank, 2);
    }
}
