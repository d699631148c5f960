pub mod client;
pub mod config;
pub mod core;
pub mod render;
pub mod runtime;
pub mod session;

use std::fmt;

/// Top-level context for failures surfaced by the client.
#[derive(Debug)]
pub struct ClientError;

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClientError")
    }
}

impl std::error::Error for ClientError {}

/// Failure talking to the match server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The server could not be reached or the connection broke.
    Network,
    /// The server answered with a non-2xx status.
    Status(u16),
    /// The body was not a valid match state.
    Malformed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network => write!(f, "match server unreachable"),
            TransportError::Status(code) => write!(f, "match server answered with status {code}"),
            TransportError::Malformed => write!(f, "match server sent a malformed match state"),
        }
    }
}

impl std::error::Error for TransportError {}

pub type Result<T> = std::result::Result<T, error_stack::Report<ClientError>>;

/// Result of a call to the match server.
pub type TransportResult<T> = std::result::Result<T, error_stack::Report<TransportError>>;

pub mod prelude {
    pub use crate::client::*;
    pub use crate::config::*;
    pub use crate::core::*;
    pub use crate::render::*;
    pub use crate::runtime::*;
    pub use crate::session::*;
}
