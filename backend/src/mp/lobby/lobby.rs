use super::client::Client;
use crate::mp::{domain, Ch, LobbyId, PlayerId, ServerMsg};
use interfacing::{Envelope, MsgType, Welcome};
use std::collections::HashMap;

pub struct Lobby {
    pub id: LobbyId,
    players: HashMap<PlayerId, Client>,
    // generated once, every join broadcast hands out the same board
    board: domain::Board,
    next_player_id: PlayerId,

    eviction: Option<tokio::task::AbortHandle>,
}

impl Lobby {
    pub fn new(id: LobbyId) -> Self {
        let board = domain::Board::random(domain::BOARD_SIZE, &mut rand::thread_rng());
        Self::with_board(id, board)
    }

    pub fn with_board(id: LobbyId, board: domain::Board) -> Self {
        Self {
            id,
            players: Default::default(),
            board,
            next_player_id: 1,

            eviction: None,
        }
    }

    /// Register a connection, returns the player id assigned to it.
    /// Ids count up from 1 and are never reused within a lobby.
    ///
    /// The `connected` welcome is queued on `ch` before the player becomes a
    /// broadcast target, so it is always the first message the player gets.
    pub fn join_con(&mut self, ch: Ch) -> PlayerId {
        self.cancel_eviction();

        let player_id = self.next_player_id;
        self.next_player_id += 1;

        let welcome = Welcome {
            lobby_id: self.id,
            player_id,
        };
        match Envelope::wrap(MsgType::Connected, &welcome) {
            Ok(welcome) => ch.send(welcome).unwrap_or(()),
            Err(e) => tracing::error!("cannot encode welcome: {e}"),
        }

        self.players.insert(player_id, Client::new(player_id, ch));
        player_id
    }

    pub fn disjoin_con(&mut self, player_id: PlayerId) -> bool {
        self.players.remove(&player_id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        let mut ids = self.players.keys().copied().collect::<Vec<_>>();
        ids.sort_unstable();
        ids
    }

    pub fn board(&self) -> &domain::Board {
        &self.board
    }

    pub fn summary(&self) -> interfacing::api::LobbySummary {
        interfacing::api::LobbySummary {
            lobby_id: self.id,
            players: self.player_ids(),
            board: self.board.clone(),
        }
    }
}

// eviction impl
impl Lobby {
    /// Replaces a previously armed timer
    pub fn arm_eviction(&mut self, handle: tokio::task::AbortHandle) {
        if let Some(previous) = self.eviction.replace(handle) {
            previous.abort();
        }
    }

    pub fn cancel_eviction(&mut self) {
        if let Some(handle) = self.eviction.take() {
            handle.abort();
        }
    }

    pub fn eviction_armed(&self) -> bool {
        self.eviction.is_some()
    }
}

// broadcast impl
impl Lobby {
    /// Broadcast message to all lobby participants
    pub fn broadcast(&self, msg: ServerMsg) {
        self.players
            .values()
            .for_each(|Client { ch, .. }| ch.send(msg.clone()).unwrap_or(()));
    }
}
