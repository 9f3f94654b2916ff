use crate::client::{Client, Clients, SendMsg, Sender, Status};
use crate::game::{self, Game, Games};
use crate::util;
use common::{DeckRng, GameState, Rules};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{error, info};
use uuid::Uuid;
use warp::ws::{Message, WebSocket};

pub async fn client_connection(
    ws: WebSocket,
    id: String,
    clients: Clients,
    mut client: Client,
    games: Games,
    rules: Rules,
) {
    let (client_ws_sender, mut client_ws_rcv) = ws.split();
    let (client_sender, client_rcv) = mpsc::unbounded_channel();

    let client_rcv = UnboundedReceiverStream::new(client_rcv);
    tokio::task::spawn(client_rcv.forward(client_ws_sender).map(|result| {
        if let Err(e) = result {
            error!("error sending websocket msg: {}", e);
        }
    }));

    client.sender = Some(Sender(client_sender));
    let user_id = client.user_id;
    clients.write().await.insert(id.clone(), client);

    info!("{} connected as user {}", id, user_id);

    while let Some(result) = client_ws_rcv.next().await {
        let msg = match result {
            Ok(msg) => msg,
            Err(e) => {
                error!("error receiving ws message for id {}: {}", id, e);
                break;
            }
        };
        client_msg(&id, msg, &clients, &games, rules).await;
    }

    game::remove_client(&id, &clients, &games).await;
    info!("{} disconnected", id);
}

#[tracing::instrument(skip(clients, games))]
async fn client_msg(id: &str, msg: Message, clients: &Clients, games: &Games, rules: Rules) {
    info!("received message from {}: {:?}", id, msg);
    let message = match msg.to_str() {
        Ok(v) => v.trim(),
        Err(_) => return,
    };

    if message == "ping" {
        return;
    }

    let mut clients_map = clients.write().await;
    let client = match clients_map.get_mut(id) {
        Some(v) => v,
        None => {
            error!(
                "Message from client {} did not match any connected clients",
                id
            );
            return;
        }
    };
    match &client.status {
        Status::InGame { uuid } => {
            let uuid = uuid.clone();
            let mut games_map = games.write().await;
            let game = match games_map.get_mut(&uuid) {
                Some(v) => v,
                None => {
                    error!("Game with ID {} did not match any existing games", uuid);
                    client.status = Status::Idle;
                    return;
                }
            };
            game.handle_message(message, &*client);
            if game.is_over() {
                client.status = Status::Idle;
                let _ = util::retry(1, || client.send("leave"));
                info!("closed table {} for {}", uuid, game.player_id());
                games_map.remove(&uuid);
            }
        }
        Status::Idle => {
            if message == "deal" {
                info!("client {} opening a table", id);
                client_deal(id, client, games, rules).await;
            }
        }
    }
}

async fn client_deal(id: &str, client: &mut Client, games: &Games, rules: Rules) {
    let game_state = GameState::new(rules, DeckRng::default());
    let mut game = Game::new(game_state, id.to_string());
    info!(rules = ?game.rules(), "dealing a table for {}", id);
    game.open(&*client);
    if game.is_over() {
        error!("Table for {} closed before the first round", id);
        return;
    }

    let game_uuid = Uuid::new_v4().as_simple().to_string();
    games.write().await.insert(game_uuid.clone(), game);
    client.status = Status::InGame { uuid: game_uuid };
}
