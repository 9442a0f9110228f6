// Domain module - Configuration, messages and errors
pub mod config;
pub mod error;
pub mod message;
