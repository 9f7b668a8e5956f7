//! Two scripted players against a running lobby server.
//!
//! The first player opens a fresh lobby, the second one joins it by id, then
//! they take turns rolling 1..=6 and walking the spiral.

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use futures_util::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use interfacing::domain::Position;
use interfacing::{
    Envelope, ErrorMsg, GameStart, LobbyId, MsgType, PlayerId, PlayerJoin, PlayerMove, Welcome,
};
use rand::Rng;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

type Stream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Parser, Debug)]
#[command(name = "demo_client")]
#[command(about = "Plays a short two player game on a spiral lobby server")]
struct Args {
    /// Lobby websocket endpoint
    #[arg(short, long, default_value = "ws://127.0.0.1:8000/ws")]
    url: String,

    /// Moves per player
    #[arg(short, long, default_value = "5")]
    rounds: u32,
}

struct Player {
    name: &'static str,
    id: PlayerId,
    lobby_id: LobbyId,
    position: Position,
    sink: SplitSink<Stream, Message>,
    // own moves echoed back by the server
    moves: mpsc::UnboundedReceiver<PlayerMove>,
}

impl Player {
    async fn connect(name: &'static str, url: &str, lobby_id: Option<LobbyId>) -> anyhow::Result<Self> {
        let url = match lobby_id {
            Some(id) => format!("{url}?lobbyId={id}"),
            None => url.to_owned(),
        };

        let (stream, _) = connect_async(url.as_str())
            .await
            .with_context(|| format!("cannot connect to {url}"))?;
        let (sink, mut stream) = stream.split();

        let welcome = next_envelope(&mut stream)
            .await?
            .ok_or_else(|| anyhow!("{name}: server closed before welcome"))?;

        let Welcome { lobby_id, player_id } = match welcome.msg_type() {
            Some(MsgType::Connected) => welcome.payload()?,
            Some(MsgType::Error) => {
                let err: ErrorMsg = welcome.payload()?;
                bail!("{name}: rejected with {:?}: {}", err.reason, err.message);
            }
            _ => bail!("{name}: expected welcome, got {:?}", welcome.kind),
        };
        tracing::info!(%lobby_id, player_id, "{name} connected");

        let (moves_tx, moves) = mpsc::unbounded_channel();
        tokio::spawn(listen(name, player_id, stream, moves_tx));

        Ok(Self {
            name,
            id: player_id,
            lobby_id,
            position: Position::new(0, 0),
            sink,
            moves,
        })
    }

    async fn send<T: serde::Serialize>(&mut self, kind: MsgType, payload: &T) -> anyhow::Result<()> {
        let text = Envelope::wrap(kind, payload)?.to_text()?;
        self.sink.send(Message::Text(text)).await?;
        Ok(())
    }

    async fn join(&mut self) -> anyhow::Result<()> {
        self.send(MsgType::JoinLobby, &PlayerJoin { player_id: self.id })
            .await
    }

    async fn roll(&mut self, rng: &mut impl Rng) -> anyhow::Result<()> {
        let steps = rng.gen_range(1..=6);
        let request = PlayerMove {
            player_id: self.id,
            position: self.position,
            steps,
        };
        tracing::info!("{} rolls {steps} from {}", self.name, self.position);
        self.send(MsgType::Move, &request).await?;

        let moved = tokio::time::timeout(REPLY_TIMEOUT, self.moves.recv())
            .await
            .with_context(|| format!("{}: no reply to move", self.name))?
            .ok_or_else(|| anyhow!("{}: connection closed", self.name))?;

        self.position = moved.position;
        Ok(())
    }

    async fn leave(mut self) {
        self.sink.close().await.unwrap_or(());
    }
}

async fn next_envelope(stream: &mut SplitStream<Stream>) -> anyhow::Result<Option<Envelope>> {
    while let Some(frame) = stream.next().await {
        match frame? {
            Message::Text(text) => return Ok(Some(Envelope::from_text(&text)?)),
            Message::Binary(bytes) => return Ok(Some(Envelope::from_slice(&bytes)?)),
            Message::Close(_) => return Ok(None),
            _ => continue,
        }
    }
    Ok(None)
}

/// Log everything the server pushes, forward own moves
async fn listen(
    name: &'static str,
    own_id: PlayerId,
    mut stream: SplitStream<Stream>,
    moves: mpsc::UnboundedSender<PlayerMove>,
) {
    loop {
        let envelope = match next_envelope(&mut stream).await {
            Ok(Some(envelope)) => envelope,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("{name}: {e}");
                break;
            }
        };

        match envelope.msg_type() {
            Some(MsgType::LoadBoard) => match envelope.payload::<GameStart>() {
                Ok(gs) => tracing::info!(
                    "{name} got board, turn {}, waiting {}",
                    gs.player_turn,
                    gs.waiting_for_player
                ),
                Err(e) => tracing::warn!("{name}: bad loadBoard: {e}"),
            },
            Some(MsgType::PlayerMove) => match envelope.payload::<PlayerMove>() {
                Ok(m) => {
                    tracing::info!("{name} saw player {} land on {}", m.player_id, m.position);
                    if m.player_id == own_id {
                        moves.send(m).unwrap_or(());
                    }
                }
                Err(e) => tracing::warn!("{name}: bad playerMove: {e}"),
            },
            Some(MsgType::Error) => match envelope.payload::<ErrorMsg>() {
                Ok(err) => tracing::warn!("{name} error {:?}: {}", err.reason, err.message),
                Err(e) => tracing::warn!("{name}: bad error: {e}"),
            },
            _ => tracing::debug!("{name} ignores {:?}", envelope.kind),
        }
    }
    tracing::info!("{name} disconnected");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let mut rng = rand::thread_rng();

    let mut first = Player::connect("alice", &args.url, None).await?;
    first.join().await?;
    let mut second = Player::connect("bob", &args.url, Some(first.lobby_id)).await?;
    second.join().await?;

    for round in 1..=args.rounds {
        tracing::info!("round {round}");
        first.roll(&mut rng).await?;
        second.roll(&mut rng).await?;
    }

    tracing::info!(
        "{} ends on {}, {} ends on {}",
        first.name,
        first.position,
        second.name,
        second.position
    );

    first.leave().await;
    second.leave().await;
    Ok(())
}
