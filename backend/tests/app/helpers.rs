use futures_util::{SinkExt, StreamExt};
use interfacing::{Envelope, LobbyId, MsgType, PlayerId, PlayerJoin, Welcome};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use spiral_server::questions::{InMemoryQuestions, Questions};
use spiral_server::{conf, startup::Application, telemetry};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};

const RECV_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

static TRACING: Lazy<()> = Lazy::new(|| {
    let subscriber = telemetry::TracingSubscriber::new().filter("debug");

    if std::env::var("TEST_LOG").is_ok() {
        telemetry::init_global_default(subscriber.build(std::io::stdout))
    } else {
        telemetry::init_global_default(subscriber.build(std::io::sink))
    }
    .expect("tracing initialised once");
});

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Arc::new(InMemoryQuestions::seeded())).await
}

/// Spawn with a custom question source
pub async fn spawn_app_with(questions: Questions) -> TestApp {
    Lazy::force(&TRACING);

    let env_conf = conf::EnvConf::test_default();
    let env = conf::Env::Local;
    let conf = conf::Conf { env, env_conf };

    let application = Application::build_with(&conf, questions)
        .await
        .expect("bound test app");

    let host = application.host().to_owned();
    let port = application.port();

    let address = format!("http://{}:{}", host, port);
    let ws_address = format!("ws://{}:{}/ws", host, port);

    let _ = tokio::spawn(application.server());

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp {
        address,
        ws_address,
        port,
        api_client,
    }
}

pub struct TestApp {
    pub address: String,
    pub ws_address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub async fn connect(&self, lobby_id: Option<LobbyId>) -> WsClient {
        self.connect_raw(lobby_id.map(|id| id.to_string()).as_deref())
            .await
    }

    pub async fn connect_raw(&self, lobby_id: Option<&str>) -> WsClient {
        let url = match lobby_id {
            Some(id) => format!("{}?lobbyId={}", self.ws_address, id),
            None => self.ws_address.clone(),
        };

        let (stream, _) = tokio_tungstenite::connect_async(url)
            .await
            .expect("websocket upgrade");

        WsClient { stream }
    }

    /// Poll `GET /api/lobby/:id` until `done` holds for the status code
    pub async fn eventually_lobby_status(&self, lobby_id: LobbyId, done: impl Fn(u16) -> bool) {
        for _ in 0..100 {
            let status = self
                .get(&format!("/api/lobby/{lobby_id}"))
                .send()
                .await
                .unwrap()
                .status()
                .as_u16();

            if done(status) {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        panic!("lobby {lobby_id} never reached the expected state");
    }
}

pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    pub async fn send(&mut self, envelope: &Envelope) {
        self.send_text(envelope.to_text().unwrap()).await
    }

    pub async fn send_text(&mut self, text: impl Into<String>) {
        self.stream.send(Message::Text(text.into())).await.unwrap();
    }

    pub async fn send_binary(&mut self, envelope: &Envelope) {
        let bytes = envelope.to_text().unwrap().into_bytes();
        self.stream.send(Message::Binary(bytes)).await.unwrap();
    }

    pub async fn send_payload<T: serde::Serialize>(&mut self, kind: MsgType, payload: &T) {
        self.send(&Envelope::wrap(kind, payload).unwrap()).await
    }

    pub async fn join(&mut self, player_id: PlayerId) {
        self.send_payload(MsgType::JoinLobby, &PlayerJoin { player_id })
            .await
    }

    pub async fn recv(&mut self) -> Envelope {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("frame within timeout")
                .expect("stream open")
                .expect("valid frame");

            match frame {
                Message::Text(text) => return Envelope::from_text(&text).unwrap(),
                Message::Ping(_) | Message::Pong(_) => continue,
                other => panic!("unexpected frame {other:?}"),
            }
        }
    }

    pub async fn recv_payload<T: DeserializeOwned>(&mut self, kind: MsgType) -> T {
        let envelope = self.recv().await;
        assert_eq!(envelope.msg_type(), Some(kind), "{envelope:?}");
        envelope.payload().unwrap()
    }

    pub async fn welcome(&mut self) -> Welcome {
        self.recv_payload(MsgType::Connected).await
    }

    pub async fn expect_closed(&mut self) {
        loop {
            match tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("close within timeout")
            {
                None | Some(Ok(Message::Close(_))) | Some(Err(_)) => return,
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
                Some(Ok(other)) => panic!("expected close, got {other:?}"),
            }
        }
    }

    pub async fn close(mut self) {
        self.stream.close(None).await.unwrap_or(());
    }
}
