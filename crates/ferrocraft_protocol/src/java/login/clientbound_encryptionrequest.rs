use std::io;

use crate::types::{ByteArray, ProtocolRead, ProtocolString, ProtocolWrite};

pub const CLIENTBOUND_ENCRYPTION_REQUEST_ID: i32 = 0x01;

/// Server's half of the key exchange: a DER-encoded RSA public key and a
/// verify token the client must echo back sealed with that key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientBoundEncryptionRequest {
    pub server_id: ProtocolString,
    pub public_key: ByteArray,
    pub verify_token: ByteArray,
}

impl ClientBoundEncryptionRequest {
    pub fn new(server_id: &str, public_key: Vec<u8>, verify_token: Vec<u8>) -> Self {
        Self {
            server_id: ProtocolString(server_id.to_string()),
            public_key: ByteArray(public_key),
            verify_token: ByteArray(verify_token),
        }
    }
}

impl ProtocolWrite for ClientBoundEncryptionRequest {
    fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<usize> {
        let mut written = self.server_id.write_to(writer)?;
        written += self.public_key.write_to(writer)?;
        written += self.verify_token.write_to(writer)?;
        Ok(written)
    }
}

impl ProtocolRead for ClientBoundEncryptionRequest {
    fn read_from<R: io::Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let (server_id, mut n) = ProtocolString::read_from(reader)?;
        let (public_key, m) = ByteArray::read_from(reader)?;
        n += m;
        let (verify_token, m) = ByteArray::read_from(reader)?;
        n += m;

        Ok((
            Self {
                server_id,
                public_key,
                verify_token,
            },
            n,
        ))
    }
}
