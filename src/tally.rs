use common::Outcome;
use std::fmt;

// Results across every round of a session
#[derive(Default, Debug, PartialEq)]
pub struct Tally {
    wins: u32,
    losses: u32,
    draws: u32,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Lose => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn rounds(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rounds: {}. Wins: {}, losses: {}, draws: {}",
            self.rounds(),
            self.wins,
            self.losses,
            self.draws
        )
    }
}
