use std::io;

use crate::types::{Byte, Double, Float, ProtocolRead, ProtocolWrite};

pub const CLIENTBOUND_POSITION_AND_LOOK_ID: i32 = 0x08;

/// Server-authoritative teleport. Bits in `flags` mark which fields are
/// relative offsets rather than absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientBoundPositionAndLook {
    pub x: Double,
    pub y: Double,
    pub z: Double,
    pub yaw: Float,
    pub pitch: Float,
    pub flags: Byte,
}

impl ClientBoundPositionAndLook {
    pub const FLAG_REL_X: i8 = 0x01;
    pub const FLAG_REL_Y: i8 = 0x02;
    pub const FLAG_REL_Z: i8 = 0x04;
    pub const FLAG_REL_YAW: i8 = 0x08;
    pub const FLAG_REL_PITCH: i8 = 0x10;
}

impl ProtocolWrite for ClientBoundPositionAndLook {
    fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<usize> {
        let mut written = self.x.write_to(writer)?;
        written += self.y.write_to(writer)?;
        written += self.z.write_to(writer)?;
        written += self.yaw.write_to(writer)?;
        written += self.pitch.write_to(writer)?;
        written += self.flags.write_to(writer)?;
        Ok(written)
    }
}

impl ProtocolRead for ClientBoundPositionAndLook {
    fn read_from<R: io::Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let (x, mut n) = Double::read_from(reader)?;
        let (y, m) = Double::read_from(reader)?;
        n += m;
        let (z, m) = Double::read_from(reader)?;
        n += m;
        let (yaw, m) = Float::read_from(reader)?;
        n += m;
        let (pitch, m) = Float::read_from(reader)?;
        n += m;
        let (flags, m) = Byte::read_from(reader)?;
        n += m;

        Ok((
            Self {
                x,
                y,
                z,
                yaw,
                pitch,
                flags,
            },
            n,
        ))
    }
}
