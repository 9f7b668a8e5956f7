use crate::mp::{Ch, PlayerId};

/// A connected player as seen by its lobby
pub struct Client {
    pub player_id: PlayerId,
    pub ch: Ch,
}

impl Client {
    pub fn new(player_id: PlayerId, ch: Ch) -> Self {
        Self { player_id, ch }
    }
}
