use common::{Card, Event, Outcome};

pub fn describe(event: &Event) -> String {
    match event {
        Event::DealerShows { card, score } => {
            format!("The dealer is showing {}.\tThey have: {}", card, score)
        }
        Event::PlayerShows { cards, score } => {
            format!("You are holding {}.\tYou have: {}", join(cards), score)
        }
        Event::PlayerDealt { card, score } => {
            format!("You were dealt {}.\tYou now have: {}", card, score)
        }
        Event::PlayerBust { .. } => "You went bust.".to_string(),
        Event::DealerFlips { card, score } => {
            format!("The dealer flips a {}.\tThey now have: {}", card, score)
        }
        Event::DealerBust { .. } => "The dealer went bust!".to_string(),
        Event::RoundOver {
            outcome,
            player_score,
            dealer_score,
        } => {
            let verdict = match outcome {
                Outcome::Win => "You win!",
                Outcome::Lose => "You lose!",
                Outcome::Draw => "Push.",
            };
            format!("{} ({} to {})", verdict, player_score, dealer_score)
        }
    }
}

fn join(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<String>>()
        .join(" ")
}
