use std::io;

use crate::types::{Long, ProtocolRead, ProtocolWrite};

pub const CLIENTBOUND_STATUS_PONG_ID: i32 = 0x01;

/// Echo of the ping payload; closes the latency round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientBoundStatusPong {
    pub payload: Long,
}

impl ProtocolWrite for ClientBoundStatusPong {
    fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<usize> {
        self.payload.write_to(writer)
    }
}

impl ProtocolRead for ClientBoundStatusPong {
    fn read_from<R: io::Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let (payload, n) = Long::read_from(reader)?;
        Ok((Self { payload }, n))
    }
}
