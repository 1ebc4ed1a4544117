use std::io;

use serde::{Deserialize, Serialize};

use crate::types::{ProtocolRead, ProtocolString, ProtocolWrite};

pub const CLIENTBOUND_STATUS_RESPONSE_ID: i32 = 0x00;

/// Status JSON as sent on the wire; [`ClientBoundStatusResponse::status`]
/// parses it into [`StatusJson`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientBoundStatusResponse {
    pub json_response: ProtocolString,
}

impl ClientBoundStatusResponse {
    pub fn status(&self) -> serde_json::Result<StatusJson> {
        serde_json::from_str(&self.json_response.0)
    }
}

impl ProtocolWrite for ClientBoundStatusResponse {
    fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<usize> {
        self.json_response.write_to(writer)
    }
}

impl ProtocolRead for ClientBoundStatusResponse {
    fn read_from<R: io::Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let (json_response, n) = ProtocolString::read_from(reader)?;
        Ok((Self { json_response }, n))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusJson {
    pub version: VersionJson,
    pub players: PlayersJson,
    // Servers send either a bare string or a chat object here.
    pub description: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionJson {
    pub name: String,
    pub protocol: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayersJson {
    pub max: i32,
    pub online: i32,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sample: Vec<PlayerSampleJson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSampleJson {
    pub name: String,
    pub id: String,
}
