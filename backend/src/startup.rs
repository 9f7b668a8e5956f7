// Server and router definition
//

use crate::conf::Conf;
use crate::mp::Lobbies;
use crate::questions::{InMemoryQuestions, Questions};

use axum::{
    routing::{get, post},
    Router,
};

use std::sync::Arc;
use tower_http::{
    add_extension::AddExtensionLayer,
    compression::CompressionLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit, ServiceBuilderExt,
};

type ServerOutput = hyper::Result<()>;
type Server = std::pin::Pin<Box<dyn std::future::Future<Output = ServerOutput> + Send>>;

#[derive(Clone, Default)]
pub struct RequestIdProducer {
    counter: Arc<std::sync::atomic::AtomicU64>,
}

impl tower_http::request_id::MakeRequestId for RequestIdProducer {
    fn make_request_id<B>(
        &mut self,
        _request: &hyper::http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let request_id = self
            .counter
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        Some(tower_http::request_id::RequestId::new(request_id.into()))
    }
}

pub fn router(conf: &Conf, questions: Questions) -> Router {
    use crate::routes::*;

    let api_router = Router::new()
        .route("/health_check", get(health_check))
        .route(
            "/lobby",
            get(lobby::list_lobbies).post(lobby::create_lobby),
        )
        .route("/lobby/:id", get(lobby::get_lobby))
        .route("/question", get(questions::get_question))
        .route("/question/:id/answer", post(questions::answer_question));

    let request_tracing_layer = tower::ServiceBuilder::new()
        .set_x_request_id(RequestIdProducer::default())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &hyper::http::Request<hyper::Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default();

                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                        request_id = %request_id,
                    )
                })
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(tracing::Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .propagate_x_request_id();

    let lobbies = Lobbies::new(conf.env_conf.lobby.eviction_grace());

    Router::new()
        .nest("/api", api_router)
        .route("/ws", get(lobby_ws::ws))
        .layer(CompressionLayer::new())
        .layer(AddExtensionLayer::new(lobbies))
        .layer(AddExtensionLayer::new(questions))
        .layer(request_tracing_layer)
}

pub struct Application {
    port: u16,
    server: Server,
    host: String,
}

impl Application {
    pub async fn build(conf: &Conf) -> anyhow::Result<Self> {
        let questions: Questions = Arc::new(InMemoryQuestions::seeded());
        Self::build_with(conf, questions).await
    }

    /// Same as [`Application::build`] with a custom question source
    pub async fn build_with(conf: &Conf, questions: Questions) -> anyhow::Result<Self> {
        let address = format!("{}:{}", conf.env_conf.host, conf.env_conf.port);
        tracing::debug!("Binding to {}", address);
        let listener = std::net::TcpListener::bind(&address)?;
        let host = conf.env_conf.host.clone();
        let port = listener.local_addr()?.port();
        tracing::info!("Listening on http://{}:{}", host, port);

        let server = axum::Server::from_tcp(listener)?.serve(
            router(conf, questions)
                .into_make_service_with_connect_info::<std::net::SocketAddr>(),
        );

        Ok(Self {
            server: Box::pin(server),
            port,
            host,
        })
    }

    // needs to consume to produce 1 server max
    pub fn server(self) -> Server {
        self.server
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}
