use std::time::Duration;

use serde::{Deserialize, Serialize};

use ferrocraft_protocol::Version;

/// Mojang session-server endpoint used for the join handshake when
/// credentials are supplied.
pub const DEFAULT_SESSION_SERVER: &str =
    "https://sessionserver.mojang.com/session/minecraft/join";

/// Tunables for a [`Client`](crate::Client). `Default` matches vanilla
/// behavior; the struct derives serde so applications can load it from
/// whatever configuration format they already use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Protocol version advertised in the handshake.
    #[serde(with = "version_number")]
    pub protocol_version: Version,

    /// Timeout for the initial TCP connect. This is the only timeout in
    /// the packet layer; connectivity loss after that is detected as a
    /// read or write error.
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,

    /// Interval of the tick loop that drives time-based listeners.
    #[serde(with = "humantime_serde")]
    pub tick_interval: Duration,

    /// Session-join endpoint; overridable for tests and third-party
    /// authentication services.
    pub session_server: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            protocol_version: Version::V1_8_9,
            connect_timeout: Duration::from_secs(30),
            tick_interval: Duration::from_millis(50),
            session_server: DEFAULT_SESSION_SERVER.to_string(),
        }
    }
}

mod version_number {
    use ferrocraft_protocol::Version;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(version: &Version, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(version.protocol_number())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Version, D::Error> {
        i32::deserialize(deserializer).map(Version::new)
    }
}
