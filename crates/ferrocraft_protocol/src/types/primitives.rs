use crate::types::traits::{ProtocolRead, ProtocolWrite};
use std::io::{self, Read, Write};

macro_rules! fixed_width {
    ($name:ident, $inner:ty, $size:expr) => {
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name(pub $inner);

        impl ProtocolWrite for $name {
            fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<usize> {
                writer.write_all(&self.0.to_be_bytes())?;
                Ok($size)
            }
        }

        impl ProtocolRead for $name {
            fn read_from<R: Read>(reader: &mut R) -> io::Result<(Self, usize)> {
                let mut buf = [0u8; $size];
                reader.read_exact(&mut buf)?;
                Ok(($name(<$inner>::from_be_bytes(buf)), $size))
            }
        }
    };
}

fixed_width!(Byte, i8, 1);
fixed_width!(UnsignedByte, u8, 1);
fixed_width!(Short, i16, 2);
fixed_width!(UnsignedShort, u16, 2);
fixed_width!(Int, i32, 4);
fixed_width!(Long, i64, 8);
fixed_width!(Float, f32, 4);
fixed_width!(Double, f64, 8);

impl Eq for Byte {}
impl Eq for UnsignedByte {}
impl Eq for Short {}
impl Eq for UnsignedShort {}
impl Eq for Int {}
impl Eq for Long {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boolean(pub bool);

impl ProtocolWrite for Boolean {
    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<usize> {
        writer.write_all(&[u8::from(self.0)])?;
        Ok(1)
    }
}

impl ProtocolRead for Boolean {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let mut buf = [0u8; 1];
        reader.read_exact(&mut buf)?;
        Ok((Boolean(buf[0] != 0), 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_boolean() {
        for value in [true, false] {
            let boolean = Boolean(value);
            let mut buffer = Vec::new();
            let written = boolean.write_to(&mut buffer).unwrap();

            let mut cursor = Cursor::new(buffer);
            let (read_value, read) = Boolean::read_from(&mut cursor).unwrap();

            assert_eq!(written, read);
            assert_eq!(boolean.0, read_value.0);
        }
    }

    #[test]
    fn test_numeric_types_big_endian() {
        let int = Int(0x01020304);
        let mut buffer = Vec::new();
        int.write_to(&mut buffer).unwrap();
        assert_eq!(buffer, [0x01, 0x02, 0x03, 0x04]);

        let short = Short(-2);
        let mut buffer = Vec::new();
        short.write_to(&mut buffer).unwrap();
        assert_eq!(buffer, [0xff, 0xfe]);
    }

    #[test]
    fn test_numeric_round_trip() {
        let long = Long(-1234567890123);
        let mut buffer = Vec::new();
        long.write_to(&mut buffer).unwrap();
        let (read_long, _) = Long::read_from(&mut Cursor::new(buffer)).unwrap();
        assert_eq!(long.0, read_long.0);

        let double = Double(64.0625);
        let mut buffer = Vec::new();
        double.write_to(&mut buffer).unwrap();
        let (read_double, _) = Double::read_from(&mut Cursor::new(buffer)).unwrap();
        assert_eq!(double.0, read_double.0);
    }
}
