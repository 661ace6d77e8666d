use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_SCORES_FILE: &str = "./scores.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub scores_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let scores_file = match std::env::var("SCORES_FILE") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            Ok(_) | Err(std::env::VarError::NotPresent) => PathBuf::from(DEFAULT_SCORES_FILE),
            Err(e) => return Err(e).context("Cannot load SCORES_FILE env variable"),
        };

        Ok(Self { scores_file })
    }
}
