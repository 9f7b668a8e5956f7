use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use interfacing::{domain::Position, ErrorReason, MsgType};

use crate::questions::RepositoryError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failures of the plain HTTP routes
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Repository(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        tracing::debug!("{status}: {self}");

        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

/// Why a single inbound envelope could not be handled.
///
/// Never fatal for the connection, the offender gets an error envelope.
#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    #[error("malformed {kind} payload: {source}")]
    Payload {
        kind: MsgType,
        #[source]
        source: serde_json::Error,
    },
    #[error("position {0} is outside the board")]
    PositionOutOfBoard(Position),
    #[error("cannot encode {kind} envelope: {source}")]
    Encode {
        kind: MsgType,
        #[source]
        source: serde_json::Error,
    },
}

impl DispatchError {
    /// `None` when the fault lies with the server, not the sender
    pub fn reason(&self) -> Option<ErrorReason> {
        match self {
            Self::Payload { .. } => Some(ErrorReason::MalformedPayload),
            Self::PositionOutOfBoard(_) => Some(ErrorReason::PositionOutOfBoard),
            Self::Encode { .. } => None,
        }
    }
}
