use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("Failed to parse rules: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Dealer limit {dealer_limit} is above the bust limit {bust_limit}")]
    DealerAboveBust { dealer_limit: u32, bust_limit: u32 },
    #[error("Bust limit {0} is too low to deal a hand")]
    BustTooLow(u32),
    #[error("Bust limit {0} is above the maximum of 100")]
    BustTooHigh(u32),
}

// Keeps a single round well inside one deck: neither hand can hold more than
// its limit plus one card, and the deck is worth at least 340 with aces as 1
pub const MAX_BUST_LIMIT: u32 = 100;

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Rules {
    // Scores above this bust
    pub bust_limit: u32,
    // The dealer keeps drawing while below this
    pub dealer_limit: u32,
    // Whether equal scores are a draw rather than a loss for the player
    pub push_on_tie: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            bust_limit: 21,
            dealer_limit: 17,
            push_on_tie: false,
        }
    }
}

impl Rules {
    // Missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        serde_json::from_str::<Rules>(json)?.validate()
    }

    pub fn validate(self) -> Result<Self, RulesError> {
        // Two aces re-valued to 1 each is the lowest two card hand
        if self.bust_limit < 2 {
            return Err(RulesError::BustTooLow(self.bust_limit));
        }
        if self.bust_limit > MAX_BUST_LIMIT {
            return Err(RulesError::BustTooHigh(self.bust_limit));
        }
        if self.dealer_limit > self.bust_limit {
            return Err(RulesError::DealerAboveBust {
                dealer_limit: self.dealer_limit,
                bust_limit: self.bust_limit,
            });
        }
        Ok(self)
    }
}
