// Core module - Connection registry and broadcast relay
pub mod connection;
pub mod registry;
pub mod relay;
pub mod service;

pub use connection::{ClientSink, ConnectionId, QueuedClient};
pub use registry::ConnectionRegistry;
pub use relay::{BroadcastRelay, BroadcastReport, LineStream};
