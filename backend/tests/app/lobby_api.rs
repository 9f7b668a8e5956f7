use crate::helpers::spawn_app;
use hyper::StatusCode;
use interfacing::api::{LobbyCreated, LobbySummary};
use interfacing::domain::BOARD_SIZE;
use interfacing::LobbyId;

#[tokio::test]
async fn create_then_inspect_lobby() {
    let app = spawn_app().await;

    let r = app.post("/api/lobby").send().await.unwrap();
    assert_eq!(r.status(), StatusCode::CREATED);
    let LobbyCreated { lobby_id } = r.json().await.unwrap();

    let ids: Vec<LobbyId> = app.get("/api/lobby").send().await.unwrap().json().await.unwrap();
    assert!(ids.contains(&lobby_id));

    let r = app.get(&format!("/api/lobby/{lobby_id}")).send().await.unwrap();
    assert_eq!(r.status(), StatusCode::OK);
    let summary: LobbySummary = r.json().await.unwrap();
    assert_eq!(summary.lobby_id, lobby_id);
    assert!(summary.players.is_empty());
    assert_eq!(summary.board.size(), BOARD_SIZE);
}

#[tokio::test]
async fn unknown_lobby_is_404() {
    let app = spawn_app().await;

    let r = app
        .get(&format!("/api/lobby/{}", LobbyId::generate()))
        .send()
        .await
        .unwrap();

    assert_eq!(r.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_lobby_id_is_400() {
    let app = spawn_app().await;

    let r = app.get("/api/lobby/not-a-uuid").send().await.unwrap();

    assert_eq!(r.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn players_join_a_precreated_lobby() {
    let app = spawn_app().await;
    let LobbyCreated { lobby_id } = app
        .post("/api/lobby")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let mut client = app.connect(Some(lobby_id)).await;
    let welcome = client.welcome().await;
    assert_eq!(welcome.lobby_id, lobby_id);
    assert_eq!(welcome.player_id, 1);

    let summary: LobbySummary = app
        .get(&format!("/api/lobby/{lobby_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(summary.players, vec![1]);
}

#[tokio::test]
async fn unjoined_lobby_is_evicted() {
    let app = spawn_app().await;
    let LobbyCreated { lobby_id } = app
        .post("/api/lobby")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    app.eventually_lobby_status(lobby_id, |status| status == 404)
        .await;
}
