// Websocket module - Client acceptance and delivery
pub mod acceptor;

pub use acceptor::{ClientRegistry, ConnectionAcceptor};
