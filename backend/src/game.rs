use crate::client::{Client, Clients, SendMsg, Status};
use crate::util;
use common::{
    messages::Response, Action, DeckRng, Event, GameError, GameState, Rules, Seat, ShuffleRng,
};
use hashbrown::HashMap;
use serde::Serialize;
use serde_json::from_str;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

pub type Games = Arc<RwLock<HashMap<String, Game<DeckRng>>>>;

// Drops the client and closes any table it was sitting at
pub async fn remove_client(id: &str, clients: &Clients, games: &Games) {
    let removed = clients.write().await.remove(id);
    if let Some(Client {
        status: Status::InGame { uuid },
        ..
    }) = removed
    {
        games.write().await.remove(&uuid);
        info!("closed table {} for departing client {}", uuid, id);
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ProtocolState {
    // Waiting for "Hit" or "Stand"
    InRound,
    // true means that the player wants another round, false means they are leaving
    Rematch,
    End,
}

#[derive(Debug)]
pub struct Game<R: ShuffleRng + Debug> {
    game_state: GameState<R>,
    player_id: String,
    protocol_state: ProtocolState,
}

impl<R: ShuffleRng + Debug> Game<R> {
    pub fn new(game_state: GameState<R>, player_id: String) -> Self {
        Game {
            game_state,
            player_id,
            protocol_state: ProtocolState::Rematch,
        }
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn rules(&self) -> &Rules {
        self.game_state.rules()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.protocol_state, ProtocolState::End)
    }

    // Deals the first round of a freshly opened table
    pub fn open(&mut self, client: &impl SendMsg) {
        self.protocol_state = self.deal(client);
    }

    pub fn handle_message(&mut self, msg: &str, client: &impl SendMsg) {
        use ProtocolState::*;
        self.protocol_state = match self.protocol_state {
            InRound => {
                let action: Action = match from_str(msg) {
                    Ok(action) => action,
                    Err(err) => {
                        warn!("Failed to deserialize input into an action: {}", err);
                        send_error(client, format!("Expected \"Hit\" or \"Stand\": {}", err));
                        return;
                    }
                };
                match self.process_action(client, action) {
                    Ok(state) => state,
                    Err(err) => {
                        warn!("Invalid action {:?}: {}", action, err);
                        send_error(client, err.to_string());
                        return;
                    }
                }
            }
            Rematch => {
                let choice: bool = match from_str(msg) {
                    Ok(choice) => choice,
                    Err(err) => {
                        warn!("Failed to deserialize input into rematch choice: {}", err);
                        return;
                    }
                };
                if choice {
                    self.deal(client)
                } else {
                    info!("player {} left the table", self.player_id);
                    End
                }
            }
            End => End,
        }
    }

    fn process_action(
        &mut self,
        client: &impl SendMsg,
        action: Action,
    ) -> Result<ProtocolState, GameError> {
        let events = match action {
            Action::Hit => self.game_state.hit()?,
            Action::Stand => self.game_state.stand()?,
        };
        Ok(self.send_round(client, events))
    }

    fn deal(&mut self, client: &impl SendMsg) -> ProtocolState {
        match self.game_state.start_round() {
            Ok(events) => self.send_round(client, events),
            Err(err) => {
                error!("Failed to deal a round for {}: {}", self.player_id, err);
                send_error(client, err.to_string());
                ProtocolState::End
            }
        }
    }

    fn send_round(&self, client: &impl SendMsg, events: Vec<Event>) -> ProtocolState {
        send_message(client, Response::Round { events });
        match self.game_state.outcome() {
            Some(outcome) => {
                info!("round for {} ended: {:?}", self.player_id, outcome);
                send_message(
                    client,
                    Response::GameEnd {
                        outcome,
                        player_score: self.game_state.hand(Seat::Player).score(),
                        dealer_score: self.game_state.hand(Seat::Dealer).score(),
                    },
                );
                ProtocolState::Rematch
            }
            None => ProtocolState::InRound,
        }
    }
}

fn send_error(client: &impl SendMsg, message: String) {
    send_message(client, Response::Error { message });
}

fn send_message<M: Serialize>(client: &impl SendMsg, message: M) {
    let text = match serde_json::to_string(&message) {
        Ok(text) => text,
        Err(err) => {
            error!("Failed to serialize response: {}", err);
            return;
        }
    };
    // If the message fails to send even after retries, there's not much we can do but proceed
    let _ = util::retry(1, || client.send(&text));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SendError;
    use common::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MockSender(RefCell<Vec<String>>);

    impl SendMsg for MockSender {
        fn send(&self, msg: &str) -> Result<(), SendError> {
            self.0.borrow_mut().push(msg.to_string());
            Ok(())
        }
    }

    impl MockSender {
        fn responses(&self) -> Vec<Response> {
            self.0
                .borrow()
                .iter()
                .map(|msg| serde_json::from_str(msg).unwrap())
                .collect()
        }
    }

    #[derive(Debug)]
    struct StackedRng(Vec<Card>);

    impl ShuffleRng for StackedRng {
        fn shuffle(&mut self, cards: &mut [Card]) {
            for (i, card) in self.0.iter().enumerate() {
                let pos = cards.iter().position(|c| c == card).unwrap();
                cards.swap(i, pos);
            }
        }
    }

    fn c(rank: Rank) -> Card {
        Card::new(rank, Suit::Clubs)
    }

    // Dealer shows a king, player holds 15 and busts on the first hit
    fn game() -> Game<StackedRng> {
        let rng = StackedRng(vec![
            c(Rank::King),
            c(Rank::Ten),
            c(Rank::Five),
            c(Rank::Queen),
        ]);
        Game::new(GameState::new(Rules::default(), rng), "id1".to_string())
    }

    #[test]
    fn test_open_table() {
        let sender = MockSender::default();
        let mut game = game();
        game.open(&sender);
        assert_eq!(game.protocol_state, ProtocolState::InRound);
        let responses = sender.responses();
        assert_eq!(responses.len(), 1);
        assert!(matches!(&responses[0], Response::Round { events } if events.len() == 2));
    }

    #[test]
    fn test_handle_invalid_action_message() {
        let sender = MockSender::default();
        let mut game = game();
        game.open(&sender);
        game.handle_message("foo", &sender);
        assert_eq!(game.protocol_state, ProtocolState::InRound);
        assert!(matches!(
            sender.responses().last(),
            Some(Response::Error { .. })
        ));
    }

    #[test]
    fn test_handle_bust() {
        let sender = MockSender::default();
        let mut game = game();
        game.open(&sender);
        game.handle_message("\"Hit\"", &sender);
        assert_eq!(game.protocol_state, ProtocolState::Rematch);
        assert_eq!(
            sender.responses().last(),
            Some(&Response::GameEnd {
                outcome: Outcome::Lose,
                player_score: 25,
                dealer_score: 10,
            })
        );
    }

    #[test]
    fn test_handle_stand() {
        let sender = MockSender::default();
        let mut game = game();
        game.open(&sender);
        game.handle_message("\"Stand\"", &sender);
        assert_eq!(game.protocol_state, ProtocolState::Rematch);
        assert!(matches!(
            sender.responses().last(),
            Some(Response::GameEnd { .. })
        ));
    }

    #[test]
    fn test_handle_rematch_messages() {
        let sender = MockSender::default();
        let mut game = game();
        game.open(&sender);
        game.handle_message("\"Hit\"", &sender);
        assert_eq!(game.protocol_state, ProtocolState::Rematch);

        game.handle_message("\"Hit\"", &sender);
        assert_eq!(game.protocol_state, ProtocolState::Rematch);

        game.handle_message("true", &sender);
        assert_eq!(game.protocol_state, ProtocolState::InRound);
        assert!(!game.is_over());

        game.handle_message("\"Hit\"", &sender);
        game.handle_message("false", &sender);
        assert!(game.is_over());

        // Messages after the table closes are ignored
        let sent = sender.responses().len();
        game.handle_message("true", &sender);
        assert!(game.is_over());
        assert_eq!(sender.responses().len(), sent);
    }

    #[test]
    fn test_natural_ends_round_on_open() {
        let sender = MockSender::default();
        let rng = StackedRng(vec![
            c(Rank::Ten),
            c(Rank::Ace),
            c(Rank::King),
            c(Rank::Seven),
        ]);
        let mut game = Game::new(GameState::new(Rules::default(), rng), "id1".to_string());
        game.open(&sender);
        assert_eq!(game.protocol_state, ProtocolState::Rematch);
        assert_eq!(
            sender.responses().last(),
            Some(&Response::GameEnd {
                outcome: Outcome::Win,
                player_score: 21,
                dealer_score: 17,
            })
        );
        assert_eq!(game.player_id(), "id1");
    }

    #[tokio::test]
    async fn test_remove_client_closes_table() {
        let clients: Clients = Arc::new(RwLock::new(HashMap::new()));
        let games: Games = Arc::new(RwLock::new(HashMap::new()));
        let game_state = GameState::new(Rules::default(), DeckRng::seeded(7));
        games
            .write()
            .await
            .insert("table1".to_string(), Game::new(game_state, "id1".to_string()));
        clients.write().await.insert(
            "id1".to_string(),
            Client {
                user_id: 1,
                status: Status::InGame {
                    uuid: "table1".to_string(),
                },
                sender: None,
            },
        );

        remove_client("id1", &clients, &games).await;
        assert!(clients.read().await.is_empty());
        assert!(games.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_remove_idle_client_keeps_other_tables() {
        let clients: Clients = Arc::new(RwLock::new(HashMap::new()));
        let games: Games = Arc::new(RwLock::new(HashMap::new()));
        let game_state = GameState::new(Rules::default(), DeckRng::seeded(7));
        games
            .write()
            .await
            .insert("table1".to_string(), Game::new(game_state, "id2".to_string()));
        clients.write().await.insert(
            "id1".to_string(),
            Client {
                user_id: 1,
                status: Status::Idle,
                sender: None,
            },
        );

        remove_client("id1", &clients, &games).await;
        assert!(clients.read().await.is_empty());
        assert_eq!(games.read().await.len(), 1);
    }
}
