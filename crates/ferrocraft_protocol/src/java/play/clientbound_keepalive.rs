use std::io;

use crate::types::{ProtocolRead, ProtocolWrite, VarInt};

pub const CLIENTBOUND_KEEP_ALIVE_ID: i32 = 0x00;

/// Liveness probe; the client must echo the id back promptly or the server
/// drops the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientBoundKeepAlive {
    pub keep_alive_id: VarInt,
}

impl ProtocolWrite for ClientBoundKeepAlive {
    fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<usize> {
        self.keep_alive_id.write_to(writer)
    }
}

impl ProtocolRead for ClientBoundKeepAlive {
    fn read_from<R: io::Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let (keep_alive_id, n) = VarInt::read_from(reader)?;
        Ok((Self { keep_alive_id }, n))
    }
}
