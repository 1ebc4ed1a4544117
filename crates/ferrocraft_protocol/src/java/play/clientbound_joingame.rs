use std::io;

use crate::types::{
    Boolean, Byte, Int, ProtocolRead, ProtocolString, ProtocolWrite, UnsignedByte,
};

pub const CLIENTBOUND_JOIN_GAME_ID: i32 = 0x01;

/// First play-phase packet; carries the client's own entity id and the
/// dimension being spawned into.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientBoundJoinGame {
    pub entity_id: Int,
    pub gamemode: UnsignedByte,
    pub dimension: Byte,
    pub difficulty: UnsignedByte,
    pub max_players: UnsignedByte,
    pub level_type: ProtocolString,
    pub reduced_debug_info: Boolean,
}

impl ProtocolWrite for ClientBoundJoinGame {
    fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<usize> {
        let mut written = self.entity_id.write_to(writer)?;
        written += self.gamemode.write_to(writer)?;
        written += self.dimension.write_to(writer)?;
        written += self.difficulty.write_to(writer)?;
        written += self.max_players.write_to(writer)?;
        written += self.level_type.write_to(writer)?;
        written += self.reduced_debug_info.write_to(writer)?;
        Ok(written)
    }
}

impl ProtocolRead for ClientBoundJoinGame {
    fn read_from<R: io::Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let (entity_id, mut n) = Int::read_from(reader)?;
        let (gamemode, m) = UnsignedByte::read_from(reader)?;
        n += m;
        let (dimension, m) = Byte::read_from(reader)?;
        n += m;
        let (difficulty, m) = UnsignedByte::read_from(reader)?;
        n += m;
        let (max_players, m) = UnsignedByte::read_from(reader)?;
        n += m;
        let (level_type, m) = ProtocolString::read_from(reader)?;
        n += m;
        let (reduced_debug_info, m) = Boolean::read_from(reader)?;
        n += m;

        Ok((
            Self {
                entity_id,
                gamemode,
                dimension,
                difficulty,
                max_players,
                level_type,
                reduced_debug_info,
            },
            n,
        ))
    }
}
