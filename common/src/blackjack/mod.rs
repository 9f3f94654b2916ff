mod card;
mod deck;
mod game_state;
mod hand;
mod input;
mod round;
mod rules;

pub use card::{Card, Rank, Suit};
pub use deck::{Deck, DeckError, DeckRng, ShuffleRng, DECK_SIZE};
pub use game_state::{Event, GameError, GameState, Hands, Outcome, Phase, Seat};
pub use hand::Hand;
pub use input::{Action, InputError};
pub use round::{play_round, Decide, RoundError};
pub use rules::{Rules, RulesError, MAX_BUST_LIMIT};
