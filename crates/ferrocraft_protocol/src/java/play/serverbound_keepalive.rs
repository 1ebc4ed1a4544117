use std::io;

use crate::packet::Packet;
use crate::types::VarInt;

pub const SERVERBOUND_KEEP_ALIVE_ID: i32 = 0x00;

/// Echo of a clientbound keep-alive id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerBoundKeepAlive {
    pub keep_alive_id: VarInt,
}

impl ServerBoundKeepAlive {
    pub fn new(keep_alive_id: VarInt) -> Self {
        Self { keep_alive_id }
    }
}

impl TryFrom<&ServerBoundKeepAlive> for Packet {
    type Error = io::Error;

    fn try_from(keep_alive: &ServerBoundKeepAlive) -> Result<Self, Self::Error> {
        let mut packet = Packet::new(SERVERBOUND_KEEP_ALIVE_ID);
        packet.encode(&keep_alive.keep_alive_id)?;
        Ok(packet)
    }
}
