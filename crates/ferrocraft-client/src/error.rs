use std::io;
use std::time::Duration;

use thiserror::Error;

use ferrocraft_protocol::PacketError;

/// Failures surfaced to the application. Everything that happens before
/// the play phase is returned synchronously from `ping`/`login`; after
/// that, fatal errors arrive through the disconnect listener instead.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("connection failed: {0}")]
    Connect(#[source] io::Error),

    #[error("connection attempt timed out after {0:?}")]
    ConnectTimeout(Duration),

    #[error(transparent)]
    Packet(#[from] PacketError),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("disconnected by server: {reason}")]
    Disconnected { reason: String },

    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl ClientError {
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        ClientError::InvalidState(msg.into())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
