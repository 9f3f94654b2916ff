use hashbrown::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use warp::ws::Message;

#[derive(Error, Debug)]
pub enum SendError {
    #[error("Client has no open websocket")]
    NotConnected,
    #[error("Error sending message")]
    Closed,
}

pub type Clients = Arc<RwLock<HashMap<String, Client>>>;

#[derive(Debug, Clone)]
pub enum Status {
    // uuid of the table the client is sitting at
    InGame { uuid: String },
    Idle,
}

#[derive(Debug, Clone)]
pub struct Sender(pub mpsc::UnboundedSender<Result<Message, warp::Error>>);

#[derive(Debug, Clone)]
pub struct Client {
    pub user_id: usize,
    pub status: Status,
    pub sender: Option<Sender>,
}

pub trait SendMsg {
    fn send(&self, msg: &str) -> Result<(), SendError>;
}

impl SendMsg for Sender {
    fn send(&self, msg: &str) -> Result<(), SendError> {
        self.0.send(Ok(Message::text(msg))).map_err(|_| SendError::Closed)
    }
}

impl SendMsg for Client {
    fn send(&self, msg: &str) -> Result<(), SendError> {
        self.sender
            .as_ref()
            .ok_or(SendError::NotConnected)?
            .send(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(sender: Option<Sender>) -> Client {
        Client {
            user_id: 1,
            status: Status::Idle,
            sender,
        }
    }

    #[test]
    fn test_send_without_websocket() {
        assert!(matches!(
            client(None).send("deal"),
            Err(SendError::NotConnected)
        ));
    }

    #[test]
    fn test_send_to_open_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let client = client(Some(Sender(tx)));
        assert!(client.send("leave").is_ok());
        let msg = rx.try_recv().unwrap().unwrap();
        assert_eq!(msg.to_str(), Ok("leave"));
    }

    #[test]
    fn test_send_to_closed_channel() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let client = client(Some(Sender(tx)));
        assert!(matches!(client.send("leave"), Err(SendError::Closed)));
    }
}
