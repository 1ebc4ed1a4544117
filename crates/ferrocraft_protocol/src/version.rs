use std::fmt;

use crate::types::VarInt;

/// Protocol version number advertised in the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version(i32);

impl Version {
    /// Protocol version for Minecraft 1.8–1.8.9, the id layout this crate's
    /// packet set targets.
    pub const V1_8_9: Version = Version(47);

    pub const fn new(protocol: i32) -> Self {
        Version(protocol)
    }

    pub const fn protocol_number(&self) -> i32 {
        self.0
    }

    pub fn name(&self) -> &'static str {
        match self.0 {
            47 => "1.8.9",
            _ => "unknown",
        }
    }

    pub fn to_varint(&self) -> VarInt {
        VarInt(self.0)
    }
}

impl From<i32> for Version {
    fn from(protocol: i32) -> Self {
        Version(protocol)
    }
}

impl From<Version> for i32 {
    fn from(version: Version) -> Self {
        version.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (protocol {})", self.name(), self.0)
    }
}
