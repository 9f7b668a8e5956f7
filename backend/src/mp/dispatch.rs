// Message type routing table
//

use crate::error::DispatchError;
use crate::mp::{handlers, Lobby};
use interfacing::{Envelope, MsgType};
use serde::de::DeserializeOwned;

/// Route one inbound envelope to its handler.
///
/// Tags other than `joinLobby` and `move` are dropped without a reply.
pub fn dispatch(envelope: &Envelope, lobby: &Lobby) -> Result<(), DispatchError> {
    match envelope.msg_type() {
        Some(kind @ MsgType::JoinLobby) => handlers::player_joined(&decode(envelope, kind)?, lobby),
        Some(kind @ MsgType::Move) => handlers::player_moved(decode(envelope, kind)?, lobby),
        _ => {
            tracing::debug!("dropping envelope of type {:?}", envelope.kind);
            Ok(())
        }
    }
}

fn decode<T: DeserializeOwned>(envelope: &Envelope, kind: MsgType) -> Result<T, DispatchError> {
    envelope
        .payload()
        .map_err(|source| DispatchError::Payload { kind, source })
}
