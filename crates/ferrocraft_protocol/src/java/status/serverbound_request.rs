use std::io;

use crate::packet::Packet;

pub const SERVERBOUND_STATUS_REQUEST_ID: i32 = 0x00;

/// Empty-bodied request for the server's status JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerBoundStatusRequest;

impl TryFrom<&ServerBoundStatusRequest> for Packet {
    type Error = io::Error;

    fn try_from(_: &ServerBoundStatusRequest) -> Result<Self, Self::Error> {
        Ok(Packet::new(SERVERBOUND_STATUS_REQUEST_ID))
    }
}
