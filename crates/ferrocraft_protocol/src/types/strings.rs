use crate::types::traits::{ProtocolRead, ProtocolWrite};
use crate::types::var_numbers::VarInt;
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

// Vanilla caps strings at 32767 UTF-16 units; this is the worst-case byte
// count of that limit.
const MAX_STRING_BYTES: i32 = 32767 * 4;

/// VarInt-length-prefixed UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolString(pub String);

impl ProtocolWrite for ProtocolString {
    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<usize> {
        let bytes = self.0.as_bytes();
        let mut bytes_written = VarInt(bytes.len() as i32).write_to(writer)?;
        writer.write_all(bytes)?;
        bytes_written += bytes.len();
        Ok(bytes_written)
    }
}

impl ProtocolRead for ProtocolString {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let (VarInt(length), mut bytes_read) = VarInt::read_from(reader)?;
        if length < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "string length cannot be negative",
            ));
        }
        if length > MAX_STRING_BYTES {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "string length exceeds protocol maximum",
            ));
        }
        let mut buffer = vec![0u8; length as usize];
        reader.read_exact(&mut buffer)?;
        bytes_read += length as usize;

        let string =
            String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok((ProtocolString(string), bytes_read))
    }
}

impl From<&str> for ProtocolString {
    fn from(value: &str) -> Self {
        ProtocolString(value.to_string())
    }
}

/// JSON chat payloads travel as plain protocol strings.
pub type Chat = ProtocolString;
