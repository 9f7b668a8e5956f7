use crate::routes::imports::*;
use interfacing::api::{LobbyCreated, LobbySummary};

/// Pre-create an empty lobby whose id can be handed to players
pub async fn create_lobby(
    Extension(lobbies): Extension<Lobbies>,
) -> (StatusCode, Json<LobbyCreated>) {
    let lobby_id = lobbies.create().await;
    (StatusCode::CREATED, Json(LobbyCreated { lobby_id }))
}

pub async fn list_lobbies(Extension(lobbies): Extension<Lobbies>) -> Json<Vec<LobbyId>> {
    Json(lobbies.lobby_ids().await)
}

pub async fn get_lobby(
    Path(lobby_id): Path<LobbyId>,
    Extension(lobbies): Extension<Lobbies>,
) -> ApiResult<Json<LobbySummary>> {
    let lobby = lobbies
        .get(&lobby_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("lobby {lobby_id}")))?;

    let summary = lobby.read().await.summary();
    Ok(Json(summary))
}
