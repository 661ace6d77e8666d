pub mod leaderboard;
pub mod submission;
