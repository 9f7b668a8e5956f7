use interfacing::Envelope;

pub use interfacing::{domain, LobbyId, PlayerId};

type ServerMsg = Envelope;

/// Outbound queue of one connection, drained by its writer task
pub type Ch = tokio::sync::mpsc::UnboundedSender<ServerMsg>;

pub mod dispatch;
pub mod handlers;
pub mod lobby;

pub use lobby::{
    lobbies::{JoinLobbyError, Joined, Lobbies},
    lobby::Lobby,
};
