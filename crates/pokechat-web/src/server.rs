use std::future::ready;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use axum::routing::get;
use futures_util::{SinkExt as _, StreamExt as _};
use pokechat_agent::Agent;
use pokechat_config::WebConfig;
use tokio_util::sync::CancellationToken;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::relay::relay;

/// Build the front end router
///
/// `GET /` serves the index page, `/static` the asset directory, and `/ws`
/// upgrades to the chat socket.
pub fn web_router(config: &WebConfig, agent: Arc<Agent>) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(&config.index_file))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .route("/ws", get(chat_socket))
        .layer(TraceLayer::new_for_http())
        .with_state(agent)
}

async fn chat_socket(ws: WebSocketUpgrade, State(agent): State<Arc<Agent>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, agent))
}

async fn handle_socket(socket: WebSocket, agent: Arc<Agent>) {
    tracing::info!("chat client connected");

    let (sender, receiver) = socket.split();

    let inbound = receiver
        .take_while(|frame| ready(matches!(frame, Ok(message) if !matches!(message, Message::Close(_)))))
        .filter_map(|frame| {
            ready(match frame {
                Ok(Message::Text(text)) => Some(text.as_str().to_owned()),
                _ => None,
            })
        });

    let outbound = sender.with(|reply: String| ready(Ok::<_, axum::Error>(Message::Text(reply.into()))));

    relay(&agent, inbound, outbound).await;

    tracing::info!("chat client disconnected");
}

/// Front end process
pub struct WebServer {
    router: Router,
    listen_address: SocketAddr,
}

impl WebServer {
    pub fn new(config: &WebConfig, agent: Arc<Agent>) -> Self {
        Self {
            router: web_router(config, agent),
            listen_address: config.listen_address,
        }
    }

    /// Override the configured listen address
    #[must_use]
    pub const fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve until `shutdown` is cancelled
    pub async fn serve(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "front end listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
