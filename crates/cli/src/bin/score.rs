use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use cli::{Config, commands};
use scoring::dto::submission::SubmissionOutcome;
use scoring::models::WorkoutTimeCap;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "score")]
#[command(about = "Competition score calculator and leaderboard tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file holding stored score records
    #[arg(long, env = "SCORES_FILE", global = true)]
    scores: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a score without storing it
    Calculate {
        #[command(flatten)]
        input: PerformanceInput,
    },
    /// Check a time-based submission and list every problem found
    Validate {
        #[command(flatten)]
        input: PerformanceInput,
    },
    /// Validate, calculate and store a submission, replacing any earlier result
    Submit {
        /// Scoring system JSON; the default advanced system is used when omitted
        #[arg(long)]
        system: Option<PathBuf>,

        #[arg(long)]
        submission: PathBuf,

        #[arg(long)]
        time_cap: Option<WorkoutTimeCap>,
    },
    /// Rank stored scores for one workout, or across all workouts when no workout is given
    Leaderboard {
        #[arg(long)]
        event: Uuid,

        #[arg(long)]
        workout: Option<Uuid>,

        #[arg(long)]
        category: Option<Uuid>,
    },
}

#[derive(clap::Args)]
struct PerformanceInput {
    #[arg(long)]
    system: PathBuf,

    #[arg(long)]
    performance: PathBuf,

    /// Workout time cap as m:ss, required for time-based systems
    #[arg(long)]
    time_cap: Option<WorkoutTimeCap>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("score={},scoring={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env()?;
    if let Some(scores) = cli.scores {
        config.scores_file = scores;
    }

    match cli.command {
        Commands::Calculate { input } => {
            let result =
                commands::calculate_score(&input.system, &input.performance, input.time_cap)
                    .await?;
            print_json(&result)?;
        }
        Commands::Validate { input } => {
            let report =
                commands::validate_performance(&input.system, &input.performance, input.time_cap)
                    .await?;
            print_json(&report)?;
            if !report.valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Submit {
            system,
            submission,
            time_cap,
        } => {
            let outcome =
                commands::submit(&config, system.as_deref(), &submission, time_cap).await?;
            print_json(&outcome)?;
            if let SubmissionOutcome::Rejected(report) = &outcome {
                tracing::warn!("Submission rejected with {} error(s)", report.errors.len());
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Leaderboard {
            event,
            workout,
            category,
        } => {
            let leaderboard = commands::leaderboard(&config, event, workout, category).await?;
            print_json(&leaderboard)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
