use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("Unrecognized action {0:?}. Expected (h) to hit or (s) to stand")]
    Unrecognized(String),
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum Action {
    Hit,
    Stand,
}

impl FromStr for Action {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "hit" => Ok(Action::Hit),
            "s" | "stand" => Ok(Action::Stand),
            other => Err(InputError::Unrecognized(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Hit => write!(f, "h"),
            Action::Stand => write!(f, "s"),
        }
    }
}
