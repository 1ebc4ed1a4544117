use std::io;

use crate::types::{Float, ProtocolRead, ProtocolWrite, VarInt};

pub const CLIENTBOUND_UPDATE_HEALTH_ID: i32 = 0x06;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientBoundUpdateHealth {
    pub health: Float,
    pub food: VarInt,
    pub food_saturation: Float,
}

impl ProtocolWrite for ClientBoundUpdateHealth {
    fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<usize> {
        let mut written = self.health.write_to(writer)?;
        written += self.food.write_to(writer)?;
        written += self.food_saturation.write_to(writer)?;
        Ok(written)
    }
}

impl ProtocolRead for ClientBoundUpdateHealth {
    fn read_from<R: io::Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let (health, mut n) = Float::read_from(reader)?;
        let (food, m) = VarInt::read_from(reader)?;
        n += m;
        let (food_saturation, m) = Float::read_from(reader)?;
        n += m;

        Ok((
            Self {
                health,
                food,
                food_saturation,
            },
            n,
        ))
    }
}
