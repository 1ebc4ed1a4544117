use std::io;

use crate::types::{Byte, ProtocolRead, ProtocolWrite};

pub const CLIENTBOUND_HELD_ITEM_CHANGE_ID: i32 = 0x09;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientBoundHeldItemChange {
    pub slot: Byte,
}

impl ProtocolWrite for ClientBoundHeldItemChange {
    fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<usize> {
        self.slot.write_to(writer)
    }
}

impl ProtocolRead for ClientBoundHeldItemChange {
    fn read_from<R: io::Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let (slot, n) = Byte::read_from(reader)?;
        Ok((Self { slot }, n))
    }
}
