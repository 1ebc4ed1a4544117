use std::io;
use thiserror::Error;

use crate::phase::ProtocolPhase;

/// Every way packet handling can fail.
///
/// Two variants are recoverable mid-stream: [`PacketError::Decode`] and
/// [`PacketError::UnknownPacket`]. Both occur after a frame has been fully
/// consumed, so the stream stays aligned and the connection keeps reading.
/// Everything else poisons the framing or the transport and is fatal to the
/// connection.
#[derive(Error, Debug)]
pub enum PacketError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed VarInt in frame header (no terminator within 5 bytes)")]
    MalformedVarInt,

    #[error("failed to decode packet 0x{id:02x} in {phase} phase: {source}")]
    Decode {
        phase: ProtocolPhase,
        id: i32,
        #[source]
        source: io::Error,
    },

    #[error("unknown packet id 0x{id:02x} in {phase} phase")]
    UnknownPacket { phase: ProtocolPhase, id: i32 },

    #[error("decompressed to {actual} bytes but frame declared {declared}")]
    DecompressionSizeMismatch { declared: usize, actual: usize },

    #[error("invalid packet length: {length} (max: {max})")]
    InvalidLength { length: usize, max: usize },

    #[error("compression error: {0}")]
    Compression(String),

    #[error("encryption error: {0}")]
    Encryption(String),

    #[error("protocol violation: {0}")]
    ProtocolViolation(String),
}

impl PacketError {
    pub fn compression(msg: impl Into<String>) -> Self {
        PacketError::Compression(msg.into())
    }

    pub fn encryption(msg: impl Into<String>) -> Self {
        PacketError::Encryption(msg.into())
    }

    pub fn violation(msg: impl Into<String>) -> Self {
        PacketError::ProtocolViolation(msg.into())
    }

    /// Whether this error poisons the connection. Content-level failures on
    /// a fully consumed frame are skippable; framing-level corruption and
    /// transport errors are not.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            PacketError::Decode { .. } | PacketError::UnknownPacket { .. }
        )
    }
}

pub type PacketResult<T> = Result<T, PacketError>;
