use crate::blackjack::{Event, Outcome};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub enum Response {
    // Everything that happened as a result of the client's last message
    Round { events: Vec<Event> },
    GameEnd {
        outcome: Outcome,
        player_score: u32,
        dealer_score: u32,
    },
    Error { message: String },
}
