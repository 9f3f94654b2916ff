use crate::blackjack::card::{Card, Rank, Suit};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

pub const DECK_SIZE: usize = 52;

#[derive(Error, Debug, PartialEq)]
pub enum DeckError {
    #[error("Deck has gone through all 52 cards")]
    Exhausted,
}

pub trait ShuffleRng {
    fn shuffle(&mut self, cards: &mut [Card]);
}

#[derive(Debug)]
pub struct DeckRng {
    rng: StdRng,
}

impl DeckRng {
    pub fn seeded(seed: u64) -> Self {
        DeckRng {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for DeckRng {
    fn default() -> Self {
        DeckRng {
            rng: StdRng::from_entropy(),
        }
    }
}

impl ShuffleRng for DeckRng {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut self.rng);
    }
}

#[derive(Clone, Debug)]
pub struct Deck {
    cards: [Card; DECK_SIZE],
    // Index of the next card to deal. Only moves forward until the next shuffle.
    next: usize,
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}

impl Deck {
    // Suit-major order: every rank of clubs, then diamonds, hearts and spades
    pub fn new() -> Self {
        let cards = std::array::from_fn(|i| {
            Card::new(Rank::ALL[i % Rank::ALL.len()], Suit::ALL[i / Rank::ALL.len()])
        });
        Deck { cards, next: 0 }
    }

    pub fn shuffle<R: ShuffleRng>(&mut self, rng: &mut R) {
        rng.shuffle(&mut self.cards);
        self.next = 0;
    }

    pub fn deal_card(&mut self) -> Result<Card, DeckError> {
        let card = *self.cards.get(self.next).ok_or(DeckError::Exhausted)?;
        self.next += 1;
        Ok(card)
    }

    pub fn remaining(&self) -> usize {
        DECK_SIZE - self.next
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct MockRng;

    impl ShuffleRng for MockRng {
        fn shuffle(&mut self, cards: &mut [Card]) {
            cards.reverse();
        }
    }

    #[test]
    fn test_construct_deck() {
        let deck = Deck::new();
        let unique: HashSet<Card> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
        assert_eq!(deck.cards()[0], Card::new(Rank::Ace, Suit::Clubs));
        assert_eq!(deck.cards()[12], Card::new(Rank::King, Suit::Clubs));
        assert_eq!(deck.cards()[13], Card::new(Rank::Ace, Suit::Diamonds));
        assert_eq!(deck.cards()[51], Card::new(Rank::King, Suit::Spades));
        assert_eq!(deck.remaining(), DECK_SIZE);
    }

    #[test]
    fn test_deal_card() {
        let mut deck = Deck::new();
        assert_eq!(deck.deal_card(), Ok(Card::new(Rank::Ace, Suit::Clubs)));
        assert_eq!(deck.deal_card(), Ok(Card::new(Rank::Two, Suit::Clubs)));
        assert_eq!(deck.remaining(), 50);

        for _ in 0..50 {
            assert!(deck.deal_card().is_ok());
        }
        assert_eq!(deck.remaining(), 0);
        assert_eq!(deck.deal_card(), Err(DeckError::Exhausted));
    }

    #[test]
    fn test_shuffle_resets_cursor() {
        let mut deck = Deck::new();
        for _ in 0..10 {
            deck.deal_card().unwrap();
        }
        deck.shuffle(&mut MockRng);
        assert_eq!(deck.remaining(), DECK_SIZE);
        assert_eq!(deck.deal_card(), Ok(Card::new(Rank::King, Suit::Spades)));
    }

    #[test]
    fn test_shuffle_keeps_every_card() {
        let mut deck = Deck::new();
        deck.shuffle(&mut DeckRng::seeded(7));
        let unique: HashSet<Card> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn test_seeded_shuffle_is_repeatable() {
        let mut deck1 = Deck::new();
        let mut deck2 = Deck::new();
        deck1.shuffle(&mut DeckRng::seeded(42));
        deck2.shuffle(&mut DeckRng::seeded(42));
        assert_eq!(deck1.cards(), deck2.cards());
    }
}
