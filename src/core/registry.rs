use crate::core::connection::{ClientSink, ConnectionId};
use tokio::sync::RwLock;
use tracing::debug;

/// The set of currently open client connections.
///
/// All mutations and snapshots go through one lock, so a snapshot always
/// reflects a single point in time. Insertion order is kept.
pub struct ConnectionRegistry<C: ClientSink> {
    connections: RwLock<Vec<C>>,
}

impl<C: ClientSink> ConnectionRegistry<C> {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(Vec::new()),
        }
    }

    /// Register a connection. Returns `false` if a connection with the same
    /// identity is already present, in which case nothing changes.
    pub async fn add(&self, connection: C) -> bool {
        let mut connections = self.connections.write().await;
        let id = connection.id();

        if connections.iter().any(|c| c.id() == id) {
            return false;
        }

        connections.push(connection);
        debug!("Registered {} ({} connected)", id, connections.len());
        true
    }

    /// Deregister a connection. Removing an unknown id is a no-op.
    pub async fn remove(&self, id: &ConnectionId) -> Option<C> {
        let mut connections = self.connections.write().await;
        let position = connections.iter().position(|c| c.id() == *id)?;
        let removed = connections.remove(position);
        debug!("Deregistered {} ({} connected)", id, connections.len());
        Some(removed)
    }

    /// Copy of the current membership, in insertion order.
    pub async fn snapshot(&self) -> Vec<C> {
        self.connections.read().await.clone()
    }

    pub async fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.read().await.iter().any(|c| c.id() == *id)
    }

    pub async fn len(&self) -> usize {
        self.connections.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.connections.read().await.is_empty()
    }
}

impl<C: ClientSink> Default for ConnectionRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
