use std::io;

use crate::packet::Packet;
use crate::types::{Boolean, Double};

pub const SERVERBOUND_PLAYER_POSITION_ID: i32 = 0x04;

/// Player feet position update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServerBoundPlayerPosition {
    pub x: Double,
    pub feet_y: Double,
    pub z: Double,
    pub on_ground: Boolean,
}

impl TryFrom<&ServerBoundPlayerPosition> for Packet {
    type Error = io::Error;

    fn try_from(position: &ServerBoundPlayerPosition) -> Result<Self, Self::Error> {
        let mut packet = Packet::new(SERVERBOUND_PLAYER_POSITION_ID);
        packet.encode(&position.x)?;
        packet.encode(&position.feet_y)?;
        packet.encode(&position.z)?;
        packet.encode(&position.on_ground)?;
        Ok(packet)
    }
}
