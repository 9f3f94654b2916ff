use crate::blackjack::card::Card;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Hand {
    cards: Vec<Card>,
    score: u32,
    // Aces still counted as 11
    soft_aces: u32,
}

impl Hand {
    pub fn new() -> Self {
        Hand::default()
    }

    // Adds the card and re-values aces from 11 to 1, one at a time, for as long
    // as the hand would otherwise bust
    pub fn add(&mut self, card: Card, bust_limit: u32) -> u32 {
        self.cards.push(card);
        self.score += card.value();
        if card.is_ace() {
            self.soft_aces += 1;
        }
        while self.score > bust_limit && self.soft_aces > 0 {
            self.score -= 10;
            self.soft_aces -= 1;
        }
        self.score
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_soft(&self) -> bool {
        self.soft_aces > 0
    }

    pub fn is_bust(&self, bust_limit: u32) -> bool {
        self.score > bust_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blackjack::card::{Rank, Suit};

    fn card(rank: Rank) -> Card {
        Card::new(rank, Suit::Spades)
    }

    fn hand_of(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new();
        for rank in ranks {
            hand.add(card(*rank), 21);
        }
        hand
    }

    #[test]
    fn test_add_cards() {
        let hand = hand_of(&[Rank::Five, Rank::King]);
        assert_eq!(hand.score(), 15);
        assert_eq!(hand.cards().len(), 2);
        assert!(!hand.is_soft());
        assert!(!hand.is_bust(21));
    }

    #[test]
    fn test_ace_renormalization() {
        assert_eq!(hand_of(&[Rank::Ace, Rank::Ace]).score(), 12);
        assert_eq!(hand_of(&[Rank::Ace, Rank::King]).score(), 21);
        assert_eq!(hand_of(&[Rank::Ace, Rank::Nine, Rank::Five]).score(), 15);
        assert_eq!(
            hand_of(&[Rank::Ace, Rank::Ace, Rank::Ace, Rank::Eight]).score(),
            21
        );

        let soft = hand_of(&[Rank::Ace, Rank::Six]);
        assert_eq!(soft.score(), 17);
        assert!(soft.is_soft());

        let hard = hand_of(&[Rank::Ace, Rank::Six, Rank::Ten]);
        assert_eq!(hard.score(), 17);
        assert!(!hard.is_soft());
    }

    #[test]
    fn test_bust() {
        let hand = hand_of(&[Rank::King, Rank::Queen, Rank::Two]);
        assert_eq!(hand.score(), 22);
        assert!(hand.is_bust(21));

        // An ace that is already counted as 1 cannot save the hand
        let hand = hand_of(&[Rank::Ace, Rank::King, Rank::Queen, Rank::Five]);
        assert_eq!(hand.score(), 26);
        assert!(hand.is_bust(21));
    }

    #[test]
    fn test_custom_bust_limit() {
        let mut hand = Hand::new();
        hand.add(card(Rank::Ace), 15);
        assert_eq!(hand.add(card(Rank::Five), 15), 6);
    }
}
