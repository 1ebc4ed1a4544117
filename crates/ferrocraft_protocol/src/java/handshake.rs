use std::io;

use crate::packet::Packet;
use crate::types::{ProtocolRead, ProtocolString, UnsignedShort, VarInt};
use crate::version::Version;

pub const SERVERBOUND_HANDSHAKE_ID: i32 = 0x00;

/// First packet of every connection; its `next_state` field selects the
/// status or login branch of the phase machine.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerBoundHandshake {
    pub protocol_version: VarInt,
    pub server_address: ProtocolString,
    pub server_port: UnsignedShort,
    pub next_state: VarInt,
}

impl ServerBoundHandshake {
    pub const STATE_STATUS: i32 = 1;
    pub const STATE_LOGIN: i32 = 2;

    pub fn status(version: Version, server_address: &str, server_port: u16) -> Self {
        Self::new(version, server_address, server_port, Self::STATE_STATUS)
    }

    pub fn login(version: Version, server_address: &str, server_port: u16) -> Self {
        Self::new(version, server_address, server_port, Self::STATE_LOGIN)
    }

    fn new(version: Version, server_address: &str, server_port: u16, next_state: i32) -> Self {
        Self {
            protocol_version: version.to_varint(),
            server_address: ProtocolString(server_address.to_string()),
            server_port: UnsignedShort(server_port),
            next_state: VarInt(next_state),
        }
    }

    pub fn is_status_request(&self) -> bool {
        self.next_state.0 == Self::STATE_STATUS
    }

    pub fn is_login_request(&self) -> bool {
        self.next_state.0 == Self::STATE_LOGIN
    }
}

impl ProtocolRead for ServerBoundHandshake {
    fn read_from<R: io::Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let (protocol_version, mut n) = VarInt::read_from(reader)?;
        let (server_address, m) = ProtocolString::read_from(reader)?;
        n += m;
        let (server_port, m) = UnsignedShort::read_from(reader)?;
        n += m;
        let (next_state, m) = VarInt::read_from(reader)?;
        n += m;

        Ok((
            Self {
                protocol_version,
                server_address,
                server_port,
                next_state,
            },
            n,
        ))
    }
}

impl TryFrom<&ServerBoundHandshake> for Packet {
    type Error = io::Error;

    fn try_from(handshake: &ServerBoundHandshake) -> Result<Self, Self::Error> {
        let mut packet = Packet::new(SERVERBOUND_HANDSHAKE_ID);
        packet.encode(&handshake.protocol_version)?;
        packet.encode(&handshake.server_address)?;
        packet.encode(&handshake.server_port)?;
        packet.encode(&handshake.next_state)?;
        Ok(packet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_handshake_round_trip() {
        let handshake = ServerBoundHandshake::login(Version::V1_8_9, "mc.example.net", 25565);
        assert!(handshake.is_login_request());

        let packet = Packet::try_from(&handshake).unwrap();
        assert_eq!(packet.id, SERVERBOUND_HANDSHAKE_ID);

        let mut cursor = Cursor::new(&packet.body[..]);
        let (decoded, n) = ServerBoundHandshake::read_from(&mut cursor).unwrap();
        assert_eq!(n, packet.body.len());
        assert_eq!(decoded, handshake);
    }
}
