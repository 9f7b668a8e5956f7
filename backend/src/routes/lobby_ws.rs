use crate::mp::{dispatch::dispatch, lobby::lobbies::ThreadSafeLobby, Ch, Joined};
use crate::routes::imports::*;
use axum::extract::{
    connect_info::ConnectInfo,
    ws::{rejection::WebSocketUpgradeRejection, Message, WebSocket, WebSocketUpgrade},
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use interfacing::{Envelope, ErrorReason};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::Instrument;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct WsParams {
    lobby_id: Option<String>,
}

#[derive(Debug, PartialEq)]
enum Target {
    New,
    Existing(LobbyId),
    // not even a lobby id
    Unknown(String),
}

impl WsParams {
    fn target(&self) -> Target {
        match self.lobby_id.as_deref().map(str::trim) {
            None | Some("") => Target::New,
            Some(raw) => raw
                .parse()
                .map(Target::Existing)
                .unwrap_or_else(|_| Target::Unknown(raw.to_owned())),
        }
    }
}

pub async fn ws(
    maybe_ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    ConnectInfo(addr): ConnectInfo<std::net::SocketAddr>,
    Query(params): Query<WsParams>,
    Extension(lobbies): Extension<Lobbies>,
) -> Response {
    let ws = match maybe_ws {
        Ok(ws) => ws,
        Err(e) => {
            tracing::error!("{e}");
            return e.into_response();
        }
    };

    tracing::info!("Client connected to lobby ws: {addr}");

    let target = params.target();
    ws.on_upgrade(move |socket| handle_socket(socket, target, lobbies))
}

type ServerMsg = Envelope;

async fn handle_socket(socket: WebSocket, target: Target, lobbies: Lobbies) {
    let (server_msg_sender, server_msg_receiver) = mpsc::unbounded_channel::<ServerMsg>();
    let (sender, receiver) = socket.split();

    let joined = match target {
        Target::New => Ok(lobbies.join_new(server_msg_sender.clone()).await),
        Target::Existing(lobby_id) => lobbies
            .join_con(lobby_id, server_msg_sender.clone())
            .await
            .map_err(|e| e.to_string()),
        Target::Unknown(raw) => Err(format!("lobby {raw} not found")),
    };

    let Joined {
        lobby_id,
        player_id,
        lobby,
    } = match joined {
        Ok(joined) => joined,
        Err(message) => {
            tracing::info!("Rejecting connection: {message}");
            reject(sender, message).await;
            return;
        }
    };

    let span = tracing::info_span!("con", %lobby_id, player_id);

    // the welcome is already queued by the lobby
    async move {
        let mut rh = tokio::spawn(read(receiver, lobby, server_msg_sender).in_current_span());
        let mut wh = tokio::spawn(write(sender, server_msg_receiver).in_current_span());

        // as soon as either side is done, the connection is over
        tokio::select! {
            _ = &mut rh => wh.abort(),
            _ = &mut wh => rh.abort(),
        };

        lobbies.disjoin_con(lobby_id, player_id).await;
        tracing::info!("Client left the lobby");
    }
    .instrument(span)
    .await
}

async fn read(mut receiver: SplitStream<WebSocket>, lobby: ThreadSafeLobby, own: Ch) {
    loop {
        let decoded = match receiver.next().await {
            Some(Ok(Message::Text(text))) => Envelope::from_text(&text),
            Some(Ok(Message::Binary(bytes))) => Envelope::from_slice(&bytes),
            Some(Ok(Message::Close(_))) | None => {
                tracing::info!("Client closed the connection");
                return;
            }
            Some(Ok(msg)) => {
                tracing::trace!("Received unhandled message: {msg:?}");
                continue;
            }
            Some(Err(e)) => {
                tracing::info!("Client disconnected: {e}");
                return;
            }
        };

        match decoded {
            Ok(envelope) => {
                tracing::debug!("Received {:?}", envelope.kind);
                handle_envelope(&envelope, &lobby, &own).await;
            }
            Err(e) => {
                tracing::warn!("Received malformed envelope: {e}");
                own.send(Envelope::error(ErrorReason::MalformedEnvelope, e.to_string()))
                    .unwrap_or(());
            }
        }
    }
}

async fn handle_envelope(envelope: &Envelope, lobby: &ThreadSafeLobby, own: &Ch) {
    // read side, membership changes wait until the broadcast is queued
    let result = dispatch(envelope, &*lobby.read().await);

    if let Err(e) = result {
        tracing::warn!("Cannot handle {:?}: {e}", envelope.kind);
        if let Some(reason) = e.reason() {
            own.send(Envelope::error(reason, e.to_string())).unwrap_or(());
        }
    }
}

async fn write(
    mut sender: SplitSink<WebSocket, Message>,
    mut server_msg_receiver: mpsc::UnboundedReceiver<ServerMsg>,
) {
    while let Some(msg) = server_msg_receiver.recv().await {
        let text = match msg.to_text() {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Cannot encode {:?}: {e}", msg.kind);
                continue;
            }
        };

        match sender.send(Message::Text(text)).await {
            Ok(()) => tracing::trace!("Sent {:?}", msg.kind),
            Err(e) => {
                tracing::info!("Client disconnected: {e}");
                return;
            }
        }
    }
}

/// Tell the peer why, then close
async fn reject(mut sender: SplitSink<WebSocket, Message>, message: String) {
    if let Ok(text) = Envelope::error(ErrorReason::LobbyNotFound, message).to_text() {
        sender.send(Message::Text(text)).await.unwrap_or(());
    }
    sender.send(Message::Close(None)).await.unwrap_or(());
}
