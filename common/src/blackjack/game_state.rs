use crate::blackjack::card::Card;
use crate::blackjack::deck::{Deck, DeckError, ShuffleRng};
use crate::blackjack::hand::Hand;
use crate::blackjack::rules::Rules;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::{Index, IndexMut};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum GameError {
    #[error("A round is already in progress")]
    RoundInProgress,
    #[error("It is not the player's turn")]
    NotPlayerTurn,
    #[error(transparent)]
    Deck(#[from] DeckError),
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum Seat {
    Dealer,
    Player,
}

#[derive(Clone, Debug, Default)]
pub struct Hands([Hand; 2]);

impl Index<Seat> for Hands {
    type Output = Hand;
    fn index(&self, index: Seat) -> &Self::Output {
        match index {
            Seat::Dealer => &self.0[0],
            Seat::Player => &self.0[1],
        }
    }
}

impl IndexMut<Seat> for Hands {
    fn index_mut(&mut self, index: Seat) -> &mut Self::Output {
        match index {
            Seat::Dealer => &mut self.0[0],
            Seat::Player => &mut self.0[1],
        }
    }
}

// Always from the player's point of view
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Phase {
    Idle,
    PlayerTurn,
    Finished(Outcome),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    DealerShows {
        card: Card,
        score: u32,
    },
    PlayerShows {
        cards: Vec<Card>,
        score: u32,
    },
    PlayerDealt {
        card: Card,
        score: u32,
    },
    PlayerBust {
        score: u32,
    },
    DealerFlips {
        card: Card,
        score: u32,
    },
    DealerBust {
        score: u32,
    },
    RoundOver {
        outcome: Outcome,
        player_score: u32,
        dealer_score: u32,
    },
}

#[derive(Debug)]
pub struct GameState<R: Debug> {
    deck: Deck,
    hands: Hands,
    rules: Rules,
    rng: R,
    phase: Phase,
}

impl<R: ShuffleRng + Debug> GameState<R> {
    pub fn new(rules: Rules, rng: R) -> Self {
        GameState {
            deck: Deck::new(),
            hands: Hands::default(),
            rules,
            rng,
            phase: Phase::Idle,
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat]
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    // Shuffles the deck, shows one dealer card and deals the player two
    pub fn start_round(&mut self) -> Result<Vec<Event>, GameError> {
        if self.phase == Phase::PlayerTurn {
            return Err(GameError::RoundInProgress);
        }
        self.deck.shuffle(&mut self.rng);
        self.hands = Hands::default();
        let bust_limit = self.rules.bust_limit;

        let mut events = Vec::new();
        let card = self.deck.deal_card()?;
        let score = self.hands[Seat::Dealer].add(card, bust_limit);
        events.push(Event::DealerShows { card, score });

        let first = self.deck.deal_card()?;
        let second = self.deck.deal_card()?;
        let player = &mut self.hands[Seat::Player];
        player.add(first, bust_limit);
        let score = player.add(second, bust_limit);
        events.push(Event::PlayerShows {
            cards: vec![first, second],
            score,
        });

        self.phase = Phase::PlayerTurn;
        // A player already at or over the limit has nothing to decide
        match score.cmp(&bust_limit) {
            Ordering::Greater => {
                events.push(Event::PlayerBust { score });
                self.finish(Outcome::Lose, &mut events);
            }
            Ordering::Equal => self.dealer_turn(&mut events)?,
            Ordering::Less => {}
        }
        Ok(events)
    }

    pub fn hit(&mut self) -> Result<Vec<Event>, GameError> {
        self.expect_player_turn()?;
        let bust_limit = self.rules.bust_limit;
        let card = self.deck.deal_card()?;
        let score = self.hands[Seat::Player].add(card, bust_limit);

        let mut events = vec![Event::PlayerDealt { card, score }];
        match score.cmp(&bust_limit) {
            Ordering::Greater => {
                events.push(Event::PlayerBust { score });
                self.finish(Outcome::Lose, &mut events);
            }
            Ordering::Equal => self.dealer_turn(&mut events)?,
            Ordering::Less => {}
        }
        Ok(events)
    }

    pub fn stand(&mut self) -> Result<Vec<Event>, GameError> {
        self.expect_player_turn()?;
        let mut events = Vec::new();
        self.dealer_turn(&mut events)?;
        Ok(events)
    }

    fn expect_player_turn(&self) -> Result<(), GameError> {
        match self.phase {
            Phase::PlayerTurn => Ok(()),
            _ => Err(GameError::NotPlayerTurn),
        }
    }

    fn dealer_turn(&mut self, events: &mut Vec<Event>) -> Result<(), GameError> {
        let bust_limit = self.rules.bust_limit;
        while self.hands[Seat::Dealer].score() < self.rules.dealer_limit {
            let card = self.deck.deal_card()?;
            let score = self.hands[Seat::Dealer].add(card, bust_limit);
            events.push(Event::DealerFlips { card, score });
        }

        let dealer = &self.hands[Seat::Dealer];
        let outcome = if dealer.is_bust(bust_limit) {
            events.push(Event::DealerBust {
                score: dealer.score(),
            });
            Outcome::Win
        } else {
            self.compare_scores()
        };
        self.finish(outcome, events);
        Ok(())
    }

    fn compare_scores(&self) -> Outcome {
        let player_score = self.hands[Seat::Player].score();
        let dealer_score = self.hands[Seat::Dealer].score();
        match player_score.cmp(&dealer_score) {
            Ordering::Greater => Outcome::Win,
            Ordering::Equal if self.rules.push_on_tie => Outcome::Draw,
            _ => Outcome::Lose,
        }
    }

    fn finish(&mut self, outcome: Outcome, events: &mut Vec<Event>) {
        self.phase = Phase::Finished(outcome);
        events.push(Event::RoundOver {
            outcome,
            player_score: self.hands[Seat::Player].score(),
            dealer_score: self.hands[Seat::Dealer].score(),
        });
    }
}
