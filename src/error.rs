use common::{RoundError, RulesError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to read rules file {}: {source}", .path.display())]
    ReadRules {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid rules: {0}")]
    Rules(#[from] RulesError),
    #[error("Failed to install the log subscriber: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
    #[error(transparent)]
    Round(#[from] RoundError<dialoguer::Error>),
    #[error("Failed to read from the terminal: {0}")]
    Prompt(#[from] dialoguer::Error),
}
