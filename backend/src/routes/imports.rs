#[allow(unused)]
pub use crate::{
    error::{ApiError, ApiResult},
    mp::{Lobbies, LobbyId},
    questions::Questions,
};
#[allow(unused)]
pub use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
