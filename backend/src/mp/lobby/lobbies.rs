use super::lobby::Lobby;
use crate::mp::{Ch, LobbyId, PlayerId};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub type ThreadSafeLobby = Arc<RwLock<Lobby>>;

/// Lobby registry.
///
/// Lock order is always registry first, then lobby. Membership changes hold
/// the registry lock (read or write) while writing the lobby, so eviction can
/// never remove a lobby someone is joining.
#[derive(Clone)]
pub struct Lobbies {
    lobbies: Arc<RwLock<HashMap<LobbyId, ThreadSafeLobby>>>,
    eviction_grace: Duration,
}

/// Outcome of a successful join
pub struct Joined {
    pub lobby_id: LobbyId,
    pub player_id: PlayerId,
    pub lobby: ThreadSafeLobby,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum JoinLobbyError {
    #[error("lobby {0} not found")]
    NotFound(LobbyId),
}

impl Lobbies {
    pub fn new(eviction_grace: Duration) -> Self {
        Self {
            lobbies: Default::default(),
            eviction_grace,
        }
    }

    pub async fn lobby_ids(&self) -> Vec<LobbyId> {
        self.lobbies.read().await.keys().copied().collect()
    }

    /// Get lobby by id
    pub async fn get(&self, id: &LobbyId) -> Option<ThreadSafeLobby> {
        self.lobbies.read().await.get(id).cloned()
    }

    /// Create an empty lobby. It is evicted unless someone joins within the
    /// grace period.
    pub async fn create(&self) -> LobbyId {
        let mut w_lock = self.lobbies.write().await;

        let id = LobbyId::generate();
        let mut lobby = Lobby::new(id);
        self.arm_eviction(&mut lobby);
        w_lock.insert(id, Arc::new(RwLock::new(lobby)));

        tracing::info!(lobby_id = %id, "created lobby");
        id
    }

    /// Create a lobby with `ch` as its first player
    pub async fn join_new(&self, ch: Ch) -> Joined {
        let mut w_lock = self.lobbies.write().await;

        let lobby_id = LobbyId::generate();
        let mut lobby = Lobby::new(lobby_id);
        let player_id = lobby.join_con(ch);
        let lobby = Arc::new(RwLock::new(lobby));
        w_lock.insert(lobby_id, lobby.clone());

        tracing::info!(%lobby_id, "created lobby");
        Joined {
            lobby_id,
            player_id,
            lobby,
        }
    }

    /// Try join con to specified lobby
    pub async fn join_con(&self, lobby_id: LobbyId, ch: Ch) -> Result<Joined, JoinLobbyError> {
        // while you hold this lock, no eviction touches the lobby
        let r_lock = self.lobbies.read().await;

        let lobby = r_lock
            .get(&lobby_id)
            .cloned()
            .ok_or(JoinLobbyError::NotFound(lobby_id))?;

        let player_id = lobby.write().await.join_con(ch);

        Ok(Joined {
            lobby_id,
            player_id,
            lobby,
        })
    }

    pub async fn disjoin_con(&self, lobby_id: LobbyId, player_id: PlayerId) {
        let r_lock = self.lobbies.read().await;

        let Some(lobby) = r_lock.get(&lobby_id) else {
            return;
        };

        let mut lock = lobby.write().await;
        lock.disjoin_con(player_id);

        if lock.is_empty() {
            tracing::debug!(%lobby_id, "lobby is empty, arming eviction");
            self.arm_eviction(&mut lock);
        }
    }

    async fn remove_if_empty(&self, lobby_id: LobbyId) -> bool {
        let mut w_lock = self.lobbies.write().await;

        let empty = match w_lock.get(&lobby_id) {
            None => return false,
            Some(lobby) => lobby.read().await.is_empty(),
        };

        if empty {
            w_lock.remove(&lobby_id);
        }
        empty
    }

    fn arm_eviction(&self, lobby: &mut Lobby) {
        let lobbies = self.clone();
        let lobby_id = lobby.id;
        let grace = self.eviction_grace;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            if lobbies.remove_if_empty(lobby_id).await {
                tracing::info!(%lobby_id, "evicted empty lobby");
            }
        })
        .abort_handle();

        lobby.arm_eviction(handle);
    }
}
