use std::io;

use crate::packet::Packet;
use crate::types::{Long, ProtocolRead};

pub const SERVERBOUND_STATUS_PING_ID: i32 = 0x01;

/// Opaque payload the server echoes back in the pong, used for latency
/// measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerBoundStatusPing {
    pub payload: Long,
}

impl ServerBoundStatusPing {
    pub fn new(payload: i64) -> Self {
        Self {
            payload: Long(payload),
        }
    }
}

impl ProtocolRead for ServerBoundStatusPing {
    fn read_from<R: io::Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let (payload, n) = Long::read_from(reader)?;
        Ok((Self { payload }, n))
    }
}

impl TryFrom<&ServerBoundStatusPing> for Packet {
    type Error = io::Error;

    fn try_from(ping: &ServerBoundStatusPing) -> Result<Self, Self::Error> {
        let mut packet = Packet::new(SERVERBOUND_STATUS_PING_ID);
        packet.encode(&ping.payload)?;
        Ok(packet)
    }
}
