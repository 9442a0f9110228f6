use crate::domain::error::{EchoError, EchoResult};
use crate::domain::message::SerialMessage;
use async_trait::async_trait;
use std::fmt;
use std::net::SocketAddr;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Identity of one accepted client connection. Two connections from the same
/// peer address still get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client_{}", self.0.simple())
    }
}

/// A downstream consumer that serial lines can be delivered to.
#[async_trait]
pub trait ClientSink: Clone + Send + Sync + 'static {
    /// Registry identity of this connection
    fn id(&self) -> ConnectionId;

    /// Deliver one message. An error means the connection is gone.
    async fn deliver(&self, message: &SerialMessage) -> EchoResult<()>;
}

/// Client handle backed by an unbounded outbound queue.
///
/// Delivery only enqueues; a per-connection writer task drains the queue onto
/// the transport. The queue has no bound, so a client that stops reading keeps
/// growing its queue until it disconnects.
#[derive(Debug, Clone)]
pub struct QueuedClient {
    id: ConnectionId,
    peer: Option<SocketAddr>,
    outbound: mpsc::UnboundedSender<SerialMessage>,
}

impl QueuedClient {
    /// Create a client handle and the receiving end of its outbound queue.
    pub fn new(peer: Option<SocketAddr>) -> (Self, mpsc::UnboundedReceiver<SerialMessage>) {
        let (outbound, receiver) = mpsc::unbounded_channel();
        let client = Self {
            id: ConnectionId::new(),
            peer,
            outbound,
        };
        (client, receiver)
    }

    pub fn peer(&self) -> Option<SocketAddr> {
        self.peer
    }

    pub fn is_closed(&self) -> bool {
        self.outbound.is_closed()
    }
}

#[async_trait]
impl ClientSink for QueuedClient {
    fn id(&self) -> ConnectionId {
        self.id
    }

    async fn deliver(&self, message: &SerialMessage) -> EchoResult<()> {
        self.outbound
            .send(message.clone())
            .map_err(|_| EchoError::ClientGone(self.id))
    }
}
