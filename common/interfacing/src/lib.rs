//! Everything that crosses the wire between the lobby server and its clients.

pub use domain;

pub mod api;
pub mod envelope;
pub mod payload;
pub mod quiz;

pub use envelope::{Envelope, MsgType};
pub use payload::{ErrorMsg, ErrorReason, GameStart, PlayerJoin, PlayerMove, Welcome};

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Server assigned, unique within one lobby
pub type PlayerId = u32;

/// Opaque lobby token, a v4 UUID on the wire
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
#[serde(transparent)]
pub struct LobbyId(uuid::Uuid);

impl LobbyId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl std::str::FromStr for LobbyId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s.trim()).map(Self)
    }
}
