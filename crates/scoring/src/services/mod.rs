pub mod leaderboard;
pub mod score_calculator;
pub mod submission;
pub mod submission_validator;
pub mod time_codec;
