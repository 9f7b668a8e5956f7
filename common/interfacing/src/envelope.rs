use serde::{de::DeserializeOwned, Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::payload::{ErrorMsg, ErrorReason};

/// Outer wire message: `{"type": "...", "data": "..."}`.
///
/// `data` holds the payload already encoded as JSON text. The tag is kept as
/// a plain string so envelopes with tags this build does not know still
/// decode and can be dropped by the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum MsgType {
    // client -> server
    JoinLobby,
    Move,

    // server -> client
    Connected,
    LoadBoard,
    PlayerMove,
    Error,
}

impl Envelope {
    pub fn wrap<T: Serialize>(kind: MsgType, payload: &T) -> serde_json::Result<Self> {
        Ok(Self {
            kind: kind.to_string(),
            data: serde_json::to_string(payload)?,
        })
    }

    pub fn error(reason: ErrorReason, message: impl Into<String>) -> Self {
        let msg = ErrorMsg {
            reason,
            message: message.into(),
        };

        Self {
            kind: MsgType::Error.to_string(),
            data: serde_json::to_string(&msg).unwrap_or_default(),
        }
    }

    /// `None` for tags outside [`MsgType`]
    pub fn msg_type(&self) -> Option<MsgType> {
        self.kind.parse().ok()
    }

    pub fn payload<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.data)
    }

    pub fn from_text(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    pub fn to_text(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
