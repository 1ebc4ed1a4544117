use std::io;

use crate::packet::Packet;
use crate::types::{Boolean, Double, Float};

pub const SERVERBOUND_POSITION_AND_LOOK_ID: i32 = 0x06;

/// Combined position and orientation update, typically sent after a
/// server-authoritative teleport is accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServerBoundPositionAndLook {
    pub x: Double,
    pub feet_y: Double,
    pub z: Double,
    pub yaw: Float,
    pub pitch: Float,
    pub on_ground: Boolean,
}

impl TryFrom<&ServerBoundPositionAndLook> for Packet {
    type Error = io::Error;

    fn try_from(position: &ServerBoundPositionAndLook) -> Result<Self, Self::Error> {
        let mut packet = Packet::new(SERVERBOUND_POSITION_AND_LOOK_ID);
        packet.encode(&position.x)?;
        packet.encode(&position.feet_y)?;
        packet.encode(&position.z)?;
        packet.encode(&position.yaw)?;
        packet.encode(&position.pitch)?;
        packet.encode(&position.on_ground)?;
        Ok(packet)
    }
}
