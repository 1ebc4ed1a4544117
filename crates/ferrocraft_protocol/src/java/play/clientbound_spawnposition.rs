use std::io;

use crate::types::{Position, ProtocolRead, ProtocolWrite};

pub const CLIENTBOUND_SPAWN_POSITION_ID: i32 = 0x05;

/// World spawn point, used for the compass target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientBoundSpawnPosition {
    pub location: Position,
}

impl ProtocolWrite for ClientBoundSpawnPosition {
    fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<usize> {
        self.location.write_to(writer)
    }
}

impl ProtocolRead for ClientBoundSpawnPosition {
    fn read_from<R: io::Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let (location, n) = Position::read_from(reader)?;
        Ok((Self { location }, n))
    }
}
