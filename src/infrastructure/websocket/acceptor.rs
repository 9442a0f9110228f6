//! Websocket listener: accepts upgrades on any path, registers each client
//! and drives its lifetime until it closes.

use crate::core::connection::{ClientSink, QueuedClient};
use crate::core::registry::ConnectionRegistry;
use crate::domain::error::{EchoError, EchoResult};
use crate::domain::message::SerialMessage;
use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, Message, WebSocket, WebSocketUpgrade},
        ConnectInfo, State,
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

pub type ClientRegistry = ConnectionRegistry<QueuedClient>;

/// Bound websocket listener feeding a [`ClientRegistry`].
pub struct ConnectionAcceptor {
    listener: TcpListener,
    local_addr: SocketAddr,
    registry: Arc<ClientRegistry>,
}

impl ConnectionAcceptor {
    pub async fn bind(addr: SocketAddr, registry: Arc<ClientRegistry>) -> EchoResult<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| EchoError::Bind { addr, source })?;

        let local_addr = listener.local_addr()?;
        info!("Websocket server listening on {}", local_addr);

        Ok(Self {
            listener,
            local_addr,
            registry,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn registry(&self) -> &Arc<ClientRegistry> {
        &self.registry
    }

    /// HTTP routes: every path upgrades to a websocket or answers 404.
    pub fn router(registry: Arc<ClientRegistry>) -> Router {
        Router::new()
            .fallback(upgrade_or_not_found)
            .with_state(registry)
            .layer(TraceLayer::new_for_http())
    }

    /// Accept connections until the listener fails.
    pub async fn serve(self) -> EchoResult<()> {
        let app = Self::router(self.registry);
        axum::serve(
            self.listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;
        Ok(())
    }
}

async fn upgrade_or_not_found(
    State(registry): State<Arc<ClientRegistry>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    uri: Uri,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let ws = match upgrade {
        Ok(ws) => ws,
        Err(rejection) => {
            debug!("Not a websocket request from {} for {}: {}", peer, uri, rejection);
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    // Registered before the 101 response leaves the handler.
    let (client, outbound) = QueuedClient::new(Some(peer));
    let id = client.id();
    registry.add(client.clone()).await;
    info!("Client {} connected from {}", id, peer);

    let failed_registry = Arc::clone(&registry);
    ws.on_failed_upgrade(move |e| {
        warn!("Websocket upgrade for {} failed: {}", id, e);
        tokio::spawn(async move {
            failed_registry.remove(&id).await;
        });
    })
    .on_upgrade(move |socket| serve_client(socket, client, outbound, registry))
}

/// Pump queued lines to the socket and watch for close or error.
async fn serve_client(
    socket: WebSocket,
    client: QueuedClient,
    mut outbound: mpsc::UnboundedReceiver<SerialMessage>,
    registry: Arc<ClientRegistry>,
) {
    let id = client.id();
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            queued = outbound.recv() => {
                let Some(message) = queued else { break };
                if let Err(e) = sender.send(to_frame(message)).await {
                    debug!("Write to {} failed: {}", id, e);
                    break;
                }
            }

            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(e)) => {
                    debug!("Websocket error on {}: {}", id, e);
                    break;
                }
                // Inbound client frames carry nothing for the relay.
                Some(Ok(_)) => {}
            }
        }
    }

    registry.remove(&id).await;
    match client.peer() {
        Some(peer) => info!("Client {} from {} disconnected", id, peer),
        None => info!("Client {} disconnected", id),
    }
}

/// Text frame for UTF-8 lines, binary frame otherwise. The payload is unchanged.
fn to_frame(message: SerialMessage) -> Message {
    match String::from_utf8(message.data) {
        Ok(text) => Message::Text(text.into()),
        Err(e) => Message::Binary(e.into_bytes().into()),
    }
}
