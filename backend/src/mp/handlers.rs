use crate::error::DispatchError;
use crate::mp::{domain, Lobby, PlayerId};
use interfacing::{Envelope, GameStart, MsgType, PlayerJoin, PlayerMove};
use serde::Serialize;

/// Whose turn it is when a board is loaded
pub const INITIAL_PLAYER_TURN: PlayerId = 1;

pub fn game_start(join: &PlayerJoin, lobby: &Lobby) -> GameStart {
    GameStart {
        board: lobby.board().clone(),
        lobby_id: lobby.id,
        player_turn: INITIAL_PLAYER_TURN,
        // evaluated against the current membership, so only a lone player waits
        waiting_for_player: lobby.player_count() == 1,
        player_id: join.player_id,
    }
}

/// Broadcast the board to every member of the lobby
pub fn player_joined(join: &PlayerJoin, lobby: &Lobby) -> Result<(), DispatchError> {
    let game_start = game_start(join, lobby);

    tracing::info!(
        player_id = join.player_id,
        waiting_for_player = game_start.waiting_for_player,
        "player joined"
    );

    lobby.broadcast(encode(MsgType::LoadBoard, &game_start)?);
    Ok(())
}

/// Walk the spiral and broadcast the updated move to every member
pub fn player_moved(mut player_move: PlayerMove, lobby: &Lobby) -> Result<(), DispatchError> {
    let board_size = lobby.board().size();
    let from = player_move.position;

    if !lobby.board().contains(from) {
        return Err(DispatchError::PositionOutOfBoard(from));
    }

    player_move.position = domain::advance(from, player_move.steps, board_size);

    tracing::info!(
        player_id = player_move.player_id,
        steps = player_move.steps,
        "moved {from} -> {}",
        player_move.position
    );

    lobby.broadcast(encode(MsgType::PlayerMove, &player_move)?);
    Ok(())
}

fn encode<T: Serialize>(kind: MsgType, payload: &T) -> Result<Envelope, DispatchError> {
    Envelope::wrap(kind, payload).map_err(|source| DispatchError::Encode { kind, source })
}
