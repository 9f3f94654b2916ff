mod blackjack;
pub mod messages;

pub use blackjack::*;
