//! The raw frame value and the protocol error taxonomy.

mod error;

pub use error::{PacketError, PacketResult};

use bytes::BytesMut;
use std::io;

use crate::types::{ProtocolWrite, VarInt};

/// Largest frame the codec will accept: 2^21 - 1, the most a 3-byte VarInt
/// length prefix can express and the vanilla server's own cap.
pub const MAX_PACKET_LENGTH: usize = 2097151;
/// Largest declared size accepted for a compressed frame's plaintext.
pub const MAX_UNCOMPRESSED_LENGTH: usize = 8388608;

/// One wire frame after framing, decryption and decompression: the packet
/// id plus its undecoded body. Which type the id denotes depends on the
/// connection's current [`ProtocolPhase`](crate::ProtocolPhase).
#[derive(Clone, PartialEq, Eq)]
pub struct Packet {
    pub id: i32,
    pub body: BytesMut,
}

impl Packet {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            body: BytesMut::new(),
        }
    }

    pub fn with_capacity(id: i32, capacity: usize) -> Self {
        Self {
            id,
            body: BytesMut::with_capacity(capacity),
        }
    }

    /// Appends a wire-encoded value to the body.
    pub fn encode<T: ProtocolWrite>(&mut self, value: &T) -> io::Result<usize> {
        let mut buf = Vec::new();
        let written = value.write_to(&mut buf)?;
        self.body.extend_from_slice(&buf);
        Ok(written)
    }

    /// Total wire size of `id + body`, before compression and framing.
    pub fn wire_len(&self) -> usize {
        VarInt(self.id).len() + self.body.len()
    }
}

impl std::fmt::Debug for Packet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Packet")
            .field("id", &format_args!("0x{:02x}", self.id))
            .field("body_len", &self.body.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProtocolString;

    #[test]
    fn test_encode_appends_to_body() {
        let mut packet = Packet::new(0x01);
        packet.encode(&VarInt(300)).unwrap();
        packet.encode(&ProtocolString("hi".to_string())).unwrap();

        assert_eq!(&packet.body[..], &[0xac, 0x02, 0x02, b'h', b'i']);
        assert_eq!(packet.wire_len(), 1 + 5);
    }
}
