use std::io;

use crate::packet::Packet;
use crate::types::{ProtocolRead, ProtocolString};

pub const SERVERBOUND_LOGIN_START_ID: i32 = 0x00;

/// Opens the login exchange by declaring the player name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerBoundLoginStart {
    pub username: ProtocolString,
}

impl ServerBoundLoginStart {
    pub fn new(username: &str) -> Self {
        Self {
            username: ProtocolString(username.to_string()),
        }
    }
}

impl ProtocolRead for ServerBoundLoginStart {
    fn read_from<R: io::Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let (username, n) = ProtocolString::read_from(reader)?;
        Ok((Self { username }, n))
    }
}

impl TryFrom<&ServerBoundLoginStart> for Packet {
    type Error = io::Error;

    fn try_from(login_start: &ServerBoundLoginStart) -> Result<Self, Self::Error> {
        let mut packet = Packet::new(SERVERBOUND_LOGIN_START_ID);
        packet.encode(&login_start.username)?;
        Ok(packet)
    }
}
