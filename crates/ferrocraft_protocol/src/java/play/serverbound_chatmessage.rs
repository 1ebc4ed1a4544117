use std::io;

use crate::packet::Packet;
use crate::types::ProtocolString;

pub const SERVERBOUND_CHAT_MESSAGE_ID: i32 = 0x01;

/// Raw chat text as typed by the player; the server handles formatting and
/// command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerBoundChatMessage {
    pub message: ProtocolString,
}

impl ServerBoundChatMessage {
    pub fn new(message: &str) -> Self {
        Self {
            message: ProtocolString(message.to_string()),
        }
    }
}

impl TryFrom<&ServerBoundChatMessage> for Packet {
    type Error = io::Error;

    fn try_from(chat: &ServerBoundChatMessage) -> Result<Self, Self::Error> {
        let mut packet = Packet::new(SERVERBOUND_CHAT_MESSAGE_ID);
        packet.encode(&chat.message)?;
        Ok(packet)
    }
}
