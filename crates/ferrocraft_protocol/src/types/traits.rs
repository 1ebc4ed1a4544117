use std::io::{self, Read, Write};

/// A value that can be serialized into the protocol's wire encoding.
pub trait ProtocolWrite {
    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<usize>;
}

/// A value that can be parsed from the protocol's wire encoding.
///
/// Returns the decoded value together with the number of bytes consumed so
/// that frame decoders can enforce exact-consumption of a packet body.
pub trait ProtocolRead: Sized {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<(Self, usize)>;
}
