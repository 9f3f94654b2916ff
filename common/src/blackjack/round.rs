use crate::blackjack::deck::ShuffleRng;
use crate::blackjack::game_state::{Event, GameError, GameState, Outcome, Phase, Seat};
use crate::blackjack::hand::Hand;
use std::fmt::Debug;
use thiserror::Error;

// Asked once per player decision, only while the player is still under the bust limit
pub trait Decide {
    type Error: std::error::Error + 'static;

    fn wants_hit(&mut self, hand: &Hand) -> Result<bool, Self::Error>;
}

#[derive(Error, Debug)]
pub enum RoundError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Failed to get the player's decision: {0}")]
    Decide(#[source] E),
}

/// Plays one full round: deals, asks `decider` until the player stands, busts or
/// reaches the limit, then lets the dealer draw. Every event is passed to `on_event`
/// in the order it happened.
pub fn play_round<R, D, F>(
    game: &mut GameState<R>,
    decider: &mut D,
    mut on_event: F,
) -> Result<Outcome, RoundError<D::Error>>
where
    R: ShuffleRng + Debug,
    D: Decide,
    F: FnMut(&Event),
{
    game.start_round()?.iter().for_each(&mut on_event);
    loop {
        if let Phase::Finished(outcome) = game.phase() {
            return Ok(outcome);
        }
        let hit = decider
            .wants_hit(game.hand(Seat::Player))
            .map_err(RoundError::Decide)?;
        let events = if hit { game.hit()? } else { game.stand()? };
        events.iter().for_each(&mut on_event);
    }
}
