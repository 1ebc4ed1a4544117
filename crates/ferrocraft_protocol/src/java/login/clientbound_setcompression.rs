use std::io;

use crate::types::{ProtocolRead, ProtocolWrite, VarInt};

pub const CLIENTBOUND_SET_COMPRESSION_ID: i32 = 0x03;

/// Negotiates the compression threshold. May be sent at most once per
/// connection; packets whose decoded size reaches the threshold travel
/// deflate-compressed from the next frame on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientBoundSetCompression {
    pub threshold: VarInt,
}

impl ProtocolWrite for ClientBoundSetCompression {
    fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<usize> {
        self.threshold.write_to(writer)
    }
}

impl ProtocolRead for ClientBoundSetCompression {
    fn read_from<R: io::Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let (threshold, n) = VarInt::read_from(reader)?;
        Ok((Self { threshold }, n))
    }
}
