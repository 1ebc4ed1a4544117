use std::io;

use crate::packet::Packet;
use crate::types::{ByteArray, ProtocolRead, ProtocolWrite};

pub const SERVERBOUND_ENCRYPTION_RESPONSE_ID: i32 = 0x01;

/// Client's half of the key exchange: the shared secret and the server's
/// verify token, both sealed with the server's RSA public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerBoundEncryptionResponse {
    pub shared_secret: ByteArray,
    pub verify_token: ByteArray,
}

impl ServerBoundEncryptionResponse {
    pub fn new(shared_secret: Vec<u8>, verify_token: Vec<u8>) -> Self {
        Self {
            shared_secret: ByteArray(shared_secret),
            verify_token: ByteArray(verify_token),
        }
    }
}

impl ProtocolWrite for ServerBoundEncryptionResponse {
    fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<usize> {
        let mut written = self.shared_secret.write_to(writer)?;
        written += self.verify_token.write_to(writer)?;
        Ok(written)
    }
}

impl ProtocolRead for ServerBoundEncryptionResponse {
    fn read_from<R: io::Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let (shared_secret, mut n) = ByteArray::read_from(reader)?;
        let (verify_token, m) = ByteArray::read_from(reader)?;
        n += m;
        Ok((
            Self {
                shared_secret,
                verify_token,
            },
            n,
        ))
    }
}

impl TryFrom<&ServerBoundEncryptionResponse> for Packet {
    type Error = io::Error;

    fn try_from(response: &ServerBoundEncryptionResponse) -> Result<Self, Self::Error> {
        let mut packet = Packet::new(SERVERBOUND_ENCRYPTION_RESPONSE_ID);
        packet.encode(&response.shared_secret)?;
        packet.encode(&response.verify_token)?;
        Ok(packet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_encryption_response_round_trip() {
        let response = ServerBoundEncryptionResponse::new(vec![1, 2, 3, 4], vec![5, 6, 7, 8]);

        let mut buffer = Vec::new();
        let written = response.write_to(&mut buffer).unwrap();

        let mut cursor = Cursor::new(buffer);
        let (read_response, read) = ServerBoundEncryptionResponse::read_from(&mut cursor).unwrap();

        assert_eq!(written, read);
        assert_eq!(response, read_response);
    }
}
