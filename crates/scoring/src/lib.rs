//! Scoring and ranking engine for fitness competitions.
//!
//! Turns an athlete's raw workout performance into a score under a
//! classic, advanced or time-based scoring system, validates time-based
//! submissions, and orders scores into workout and cumulative leaderboards.

pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use error::{Result, ScoringError};
pub use services::leaderboard::{rank_cumulative, rank_workout};
pub use services::score_calculator::calculate;
pub use services::submission::submit_score;
pub use services::submission_validator::{ValidationReport, validate_submission};
