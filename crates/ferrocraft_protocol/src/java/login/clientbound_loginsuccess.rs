use std::io;

use uuid::Uuid;

use crate::types::{ProtocolRead, ProtocolString, ProtocolWrite};

pub const CLIENTBOUND_LOGIN_SUCCESS_ID: i32 = 0x02;

/// Completes the login exchange and moves the connection to the play
/// phase. The uuid travels as a hyphenated string at this protocol
/// version, not as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientBoundLoginSuccess {
    pub uuid: Uuid,
    pub username: ProtocolString,
}

impl ProtocolWrite for ClientBoundLoginSuccess {
    fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<usize> {
        let uuid = ProtocolString(self.uuid.hyphenated().to_string());
        let mut written = uuid.write_to(writer)?;
        written += self.username.write_to(writer)?;
        Ok(written)
    }
}

impl ProtocolRead for ClientBoundLoginSuccess {
    fn read_from<R: io::Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let (ProtocolString(uuid_str), mut n) = ProtocolString::read_from(reader)?;
        let uuid = Uuid::parse_str(&uuid_str)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let (username, m) = ProtocolString::read_from(reader)?;
        n += m;

        Ok((Self { uuid, username }, n))
    }
}
