use crate::error::AppError;
use clap::Parser;
use common::Rules;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "blackjack", about = "Play blackjack against the dealer")]
pub struct Args {
    /// Seed for the deck shuffle, for repeatable sessions
    #[arg(long)]
    pub seed: Option<u64>,
    /// JSON rules file. Flags below override it.
    #[arg(long)]
    pub rules: Option<PathBuf>,
    #[arg(long)]
    pub bust_limit: Option<u32>,
    #[arg(long)]
    pub dealer_limit: Option<u32>,
    /// Score equal hands as a draw instead of a loss
    #[arg(long)]
    pub push_on_tie: bool,
    #[arg(long, default_value = "./logs")]
    pub log_dir: PathBuf,
}

impl Args {
    pub fn rules(&self) -> Result<Rules, AppError> {
        let mut rules = match &self.rules {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| AppError::ReadRules {
                    path: path.clone(),
                    source,
                })?;
                Rules::from_json(&json)?
            }
            None => Rules::default(),
        };
        if let Some(bust_limit) = self.bust_limit {
            rules.bust_limit = bust_limit;
        }
        if let Some(dealer_limit) = self.dealer_limit {
            rules.dealer_limit = dealer_limit;
        }
        rules.push_on_tie |= self.push_on_tie;
        Ok(rules.validate()?)
    }
}
