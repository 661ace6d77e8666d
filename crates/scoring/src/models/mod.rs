pub mod breakdown;
pub mod clock_time;
pub mod performance;
pub mod score;
pub mod score_record;
pub mod scoring_system;
pub mod time_cap;

pub use breakdown::*;
pub use clock_time::ClockTime;
pub use performance::*;
pub use score::{Score, ScoreResult};
pub use score_record::{ScoreKey, ScoreRecord};
pub use scoring_system::*;
pub use time_cap::WorkoutTimeCap;
