//! serial-ws-echo Library
//!
//! Relays newline-delimited lines read from a serial device to every
//! connected websocket client.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use crate::core::{
    BroadcastRelay, BroadcastReport, ClientSink, ConnectionId, ConnectionRegistry, QueuedClient,
};
pub use crate::domain::config::{EchoConfig, RelayConfig, RelaySettings};
pub use crate::domain::error::{EchoError, EchoResult};
pub use crate::domain::message::SerialMessage;
pub use crate::infrastructure::serial::SerialLineReader;
pub use crate::infrastructure::websocket::{ClientRegistry, ConnectionAcceptor};
