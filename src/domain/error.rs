use crate::core::connection::ConnectionId;
use std::net::SocketAddr;
use thiserror::Error;

/// serial-ws-echo unified error type
#[derive(Error, Debug)]
pub enum EchoError {
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Error connecting to serial port {device}: {source}")]
    DeviceOpen {
        device: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Serial device {device} failed: {source}")]
    DeviceStream {
        device: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serial device {device} closed")]
    DeviceClosed { device: String },

    #[error("Failed to bind websocket listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Client {0} is gone")]
    ClientGone(ConnectionId),
}

pub type EchoResult<T> = Result<T, EchoError>;

impl EchoError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

}
