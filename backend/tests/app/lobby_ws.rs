use crate::helpers::spawn_app;
use interfacing::api::LobbySummary;
use interfacing::domain::Position;
use interfacing::{
    Envelope, ErrorMsg, ErrorReason, GameStart, LobbyId, MsgType, PlayerJoin, PlayerMove,
};

#[tokio::test]
async fn two_players_join_and_move() {
    let app = spawn_app().await;

    let mut a = app.connect(None).await;
    let welcome_a = a.welcome().await;
    assert_eq!(welcome_a.player_id, 1);

    a.join(welcome_a.player_id).await;
    let first: GameStart = a.recv_payload(MsgType::LoadBoard).await;
    assert!(first.waiting_for_player);
    assert_eq!(first.lobby_id, welcome_a.lobby_id);
    assert_eq!(first.player_id, 1);

    let mut b = app.connect(Some(welcome_a.lobby_id)).await;
    let welcome_b = b.welcome().await;
    assert_eq!(welcome_b.lobby_id, welcome_a.lobby_id);
    assert_eq!(welcome_b.player_id, 2);

    b.join(welcome_b.player_id).await;
    let to_a: GameStart = a.recv_payload(MsgType::LoadBoard).await;
    let to_b: GameStart = b.recv_payload(MsgType::LoadBoard).await;
    assert_eq!(to_a, to_b);
    assert!(!to_a.waiting_for_player);
    assert_eq!(to_a.player_id, 2);
    // one board per lobby
    assert_eq!(to_a.board, first.board);

    a.send_payload(
        MsgType::Move,
        &PlayerMove {
            player_id: 1,
            position: Position::new(2, 2),
            steps: 2,
        },
    )
    .await;

    let moved_a: PlayerMove = a.recv_payload(MsgType::PlayerMove).await;
    let moved_b: PlayerMove = b.recv_payload(MsgType::PlayerMove).await;
    assert_eq!(moved_a, moved_b);
    assert_eq!(moved_a.position, Position::new(2, 4));
    assert_eq!(moved_a.player_id, 1);
}

#[tokio::test]
async fn unknown_lobby_is_rejected() {
    let app = spawn_app().await;

    let mut client = app.connect(Some(LobbyId::generate())).await;

    let err: ErrorMsg = client.recv_payload(MsgType::Error).await;
    assert_eq!(err.reason, ErrorReason::LobbyNotFound);
    client.expect_closed().await;
}

#[tokio::test]
async fn garbage_lobby_id_is_rejected() {
    let app = spawn_app().await;

    let mut client = app.connect_raw(Some("lobby-one")).await;

    let err: ErrorMsg = client.recv_payload(MsgType::Error).await;
    assert_eq!(err.reason, ErrorReason::LobbyNotFound);
    assert!(err.message.contains("lobby-one"));
    client.expect_closed().await;
}

#[tokio::test]
async fn malformed_envelope_keeps_connection() {
    let app = spawn_app().await;
    let mut client = app.connect(None).await;
    let welcome = client.welcome().await;

    client.send_text("hello").await;
    let err: ErrorMsg = client.recv_payload(MsgType::Error).await;
    assert_eq!(err.reason, ErrorReason::MalformedEnvelope);

    client.join(welcome.player_id).await;
    let gs: GameStart = client.recv_payload(MsgType::LoadBoard).await;
    assert!(gs.waiting_for_player);
}

#[tokio::test]
async fn binary_frames_are_accepted() {
    let app = spawn_app().await;
    let mut client = app.connect(None).await;
    let welcome = client.welcome().await;

    let join = Envelope::wrap(
        MsgType::JoinLobby,
        &PlayerJoin {
            player_id: welcome.player_id,
        },
    )
    .unwrap();
    client.send_binary(&join).await;

    let gs: GameStart = client.recv_payload(MsgType::LoadBoard).await;
    assert_eq!(gs.player_id, welcome.player_id);
    assert_eq!(gs.lobby_id, welcome.lobby_id);
}

#[tokio::test]
async fn joiner_is_welcomed_before_broadcasts() {
    let app = spawn_app().await;
    let mut a = app.connect(None).await;
    let welcome = a.welcome().await;

    // a keeps the lobby busy while b connects
    for _ in 0..20 {
        a.join(welcome.player_id).await;
    }
    let mut b = app.connect(Some(welcome.lobby_id)).await;

    let first = b.recv().await;
    assert_eq!(first.msg_type(), Some(MsgType::Connected), "{first:?}");
}

#[tokio::test]
async fn malformed_payload_is_reported() {
    let app = spawn_app().await;
    let mut client = app.connect(None).await;
    client.welcome().await;

    client
        .send_text(r#"{"type":"move","data":"{\"playerId\":1}"}"#)
        .await;

    let err: ErrorMsg = client.recv_payload(MsgType::Error).await;
    assert_eq!(err.reason, ErrorReason::MalformedPayload);
}

#[tokio::test]
async fn unknown_tag_is_dropped() {
    let app = spawn_app().await;
    let mut client = app.connect(None).await;
    let welcome = client.welcome().await;

    client.send_text(r#"{"type":"startGame","data":""}"#).await;
    client.send_text(r#"{"type":"loadBoard","data":"{}"}"#).await;
    client.join(welcome.player_id).await;

    // nothing was produced for the first two, the connection is still served
    let next = client.recv().await;
    assert_eq!(next.msg_type(), Some(MsgType::LoadBoard));
}

#[tokio::test]
async fn out_of_board_move_only_bothers_the_mover() {
    let app = spawn_app().await;
    let mut a = app.connect(None).await;
    let welcome = a.welcome().await;
    let mut b = app.connect(Some(welcome.lobby_id)).await;
    b.welcome().await;

    a.send_payload(
        MsgType::Move,
        &PlayerMove {
            player_id: 1,
            position: Position::new(7, 0),
            steps: 1,
        },
    )
    .await;

    let err: ErrorMsg = a.recv_payload(MsgType::Error).await;
    assert_eq!(err.reason, ErrorReason::PositionOutOfBoard);

    a.join(welcome.player_id).await;
    // b saw no error, its next message is the board
    let next = b.recv().await;
    assert_eq!(next.msg_type(), Some(MsgType::LoadBoard));
}

#[tokio::test]
async fn disconnect_removes_player() {
    let app = spawn_app().await;
    let mut a = app.connect(None).await;
    let welcome = a.welcome().await;
    let mut b = app.connect(Some(welcome.lobby_id)).await;
    b.welcome().await;

    b.close().await;

    for _ in 0..100 {
        let summary: LobbySummary = app
            .get(&format!("/api/lobby/{}", welcome.lobby_id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        if summary.players == vec![1] {
            // the remaining player is alone again
            a.join(1).await;
            let gs: GameStart = a.recv_payload(MsgType::LoadBoard).await;
            assert!(gs.waiting_for_player);
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    panic!("player 2 was never removed");
}

#[tokio::test]
async fn abandoned_lobby_is_evicted() {
    let app = spawn_app().await;
    let mut client = app.connect(None).await;
    let welcome = client.welcome().await;

    client.close().await;

    app.eventually_lobby_status(welcome.lobby_id, |status| status == 404)
        .await;
}
