use domain::{Board, Position};
use serde::{Deserialize, Serialize};

use crate::{LobbyId, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerJoin {
    pub player_id: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMove {
    pub player_id: PlayerId,
    pub position: Position,
    pub steps: u32,
}

/// Board load broadcast to the whole lobby after a join
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStart {
    pub board: Board,
    pub lobby_id: LobbyId,
    pub player_turn: PlayerId,
    pub waiting_for_player: bool,
    pub player_id: PlayerId,
}

/// Sent only to a freshly registered connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Welcome {
    pub lobby_id: LobbyId,
    pub player_id: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMsg {
    pub reason: ErrorReason,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorReason {
    LobbyNotFound,
    MalformedEnvelope,
    MalformedPayload,
    PositionOutOfBoard,
}
