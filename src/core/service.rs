use crate::core::relay::{BroadcastRelay, LineStream};
use crate::domain::config::RelayConfig;
use crate::domain::error::EchoResult;
use crate::infrastructure::serial::SerialLineReader;
use crate::infrastructure::websocket::{ClientRegistry, ConnectionAcceptor};
use std::sync::Arc;
use tracing::info;

/// Open the device, bind the listener and relay until either side fails.
///
/// The device is opened before anything is bound, so a bad device never
/// leaves a listener behind.
pub async fn run(config: RelayConfig) -> EchoResult<()> {
    let reader = SerialLineReader::open(&config.device, config.baudrate)?;

    let registry = Arc::new(ClientRegistry::new());
    let acceptor = ConnectionAcceptor::bind(config.bind_addr(), registry).await?;

    info!(
        "Relaying {} ({} baud) to websocket clients on {}",
        reader.device(),
        config.baudrate,
        acceptor.local_addr()
    );

    relay(reader.into_lines(), acceptor).await
}

/// Run the broadcast relay and the acceptor side by side over one registry.
pub async fn relay(lines: LineStream, acceptor: ConnectionAcceptor) -> EchoResult<()> {
    let relay = BroadcastRelay::new(Arc::clone(acceptor.registry()));

    tokio::select! {
        result = acceptor.serve() => result,
        result = relay.run(lines) => result,
    }
}
