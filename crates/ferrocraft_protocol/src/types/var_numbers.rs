use crate::types::traits::{ProtocolRead, ProtocolWrite};
use bytes::{BufMut, BytesMut};
use std::io::{self, Read, Write};

/// Maximum encoded size of a [`VarInt`].
pub const MAX_VARINT_LEN: usize = 5;
/// Maximum encoded size of a [`VarLong`].
pub const MAX_VARLONG_LEN: usize = 10;

const SEGMENT_BITS: u32 = 0x7F;
const CONTINUE_BIT: u8 = 0x80;

/// Variable-length 32-bit integer: 7 data bits per byte, least significant
/// group first, continuation bit set on every byte except the last.
/// Negative values always occupy the full 5 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarInt(pub i32);

impl VarInt {
    /// Number of bytes the value occupies on the wire.
    pub fn len(&self) -> usize {
        let mut value = self.0 as u32;
        let mut size = 1;
        while value > SEGMENT_BITS {
            value >>= 7;
            size += 1;
        }
        size
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Wire encoding as a standalone buffer, for callers assembling frames.
    pub fn to_bytes(&self) -> BytesMut {
        let mut buffer = BytesMut::with_capacity(MAX_VARINT_LEN);
        let mut value = self.0 as u32;

        loop {
            let mut byte = (value & SEGMENT_BITS) as u8;
            value >>= 7;
            if value != 0 {
                byte |= CONTINUE_BIT;
            }
            buffer.put_u8(byte);
            if value == 0 {
                break;
            }
        }

        buffer
    }
}

impl ProtocolWrite for VarInt {
    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<usize> {
        let mut value = self.0 as u32;
        let mut bytes_written = 0;

        loop {
            let mut byte = (value & SEGMENT_BITS) as u8;
            value >>= 7;
            if value != 0 {
                byte |= CONTINUE_BIT;
            }
            writer.write_all(&[byte])?;
            bytes_written += 1;
            if value == 0 {
                break;
            }
        }

        Ok(bytes_written)
    }
}

impl ProtocolRead for VarInt {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let mut value: i32 = 0;
        let mut position = 0;
        let mut bytes_read = 0;

        loop {
            if bytes_read >= MAX_VARINT_LEN {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "VarInt too long (>5 bytes)",
                ));
            }

            let mut buf = [0u8; 1];
            reader.read_exact(&mut buf)?;
            bytes_read += 1;

            let byte = buf[0];
            value |= ((byte & SEGMENT_BITS as u8) as i32) << position;

            if byte & CONTINUE_BIT == 0 {
                break;
            }
            position += 7;
        }

        Ok((VarInt(value), bytes_read))
    }
}

/// Variable-length 64-bit integer, same scheme as [`VarInt`] over 10 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarLong(pub i64);

impl VarLong {
    pub fn len(&self) -> usize {
        let mut value = self.0 as u64;
        let mut size = 1;
        while value > SEGMENT_BITS as u64 {
            value >>= 7;
            size += 1;
        }
        size
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl ProtocolWrite for VarLong {
    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<usize> {
        let mut value = self.0 as u64;
        let mut bytes_written = 0;

        loop {
            let mut byte = (value & SEGMENT_BITS as u64) as u8;
            value >>= 7;
            if value != 0 {
                byte |= CONTINUE_BIT;
            }
            writer.write_all(&[byte])?;
            bytes_written += 1;
            if value == 0 {
                break;
            }
        }

        Ok(bytes_written)
    }
}

impl ProtocolRead for VarLong {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let mut value: i64 = 0;
        let mut position = 0;
        let mut bytes_read = 0;

        loop {
            if bytes_read >= MAX_VARLONG_LEN {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "VarLong too long (>10 bytes)",
                ));
            }

            let mut buf = [0u8; 1];
            reader.read_exact(&mut buf)?;
            bytes_read += 1;

            let byte = buf[0];
            value |= ((byte & SEGMENT_BITS as u8) as i64) << position;

            if byte & CONTINUE_BIT == 0 {
                break;
            }
            position += 7;
        }

        Ok((VarLong(value), bytes_read))
    }
}
