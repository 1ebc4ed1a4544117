use crate::types::traits::{ProtocolRead, ProtocolWrite};
use std::io::{self, Read, Write};
use uuid::Uuid;

/// 16 raw big-endian bytes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolUuid(pub Uuid);

impl ProtocolWrite for ProtocolUuid {
    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<usize> {
        writer.write_all(self.0.as_bytes())?;
        Ok(16)
    }
}

impl ProtocolRead for ProtocolUuid {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let mut buffer = [0u8; 16];
        reader.read_exact(&mut buffer)?;
        Ok((ProtocolUuid(Uuid::from_bytes(buffer)), 16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_uuid_round_trip() {
        let uuid = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let protocol_uuid = ProtocolUuid(uuid);

        let mut buffer = Vec::new();
        let written = protocol_uuid.write_to(&mut buffer).unwrap();
        assert_eq!(written, 16);

        let mut cursor = Cursor::new(buffer);
        let (read_uuid, read) = ProtocolUuid::read_from(&mut cursor).unwrap();

        assert_eq!(written, read);
        assert_eq!(protocol_uuid, read_uuid);
    }
}
