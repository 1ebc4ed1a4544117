use std::io;

use crate::types::{Byte, Chat, ProtocolRead, ProtocolWrite};

pub const CLIENTBOUND_CHAT_ID: i32 = 0x02;

/// Where the client renders a chat payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPosition {
    Chat,
    System,
    ActionBar,
}

impl ChatPosition {
    fn from_byte(value: i8) -> Self {
        match value {
            1 => ChatPosition::System,
            2 => ChatPosition::ActionBar,
            _ => ChatPosition::Chat,
        }
    }

    fn as_byte(self) -> i8 {
        match self {
            ChatPosition::Chat => 0,
            ChatPosition::System => 1,
            ChatPosition::ActionBar => 2,
        }
    }
}

/// A chat-JSON document plus its rendering position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientBoundChat {
    pub data: Chat,
    pub position: ChatPosition,
}

impl ProtocolWrite for ClientBoundChat {
    fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<usize> {
        let mut written = self.data.write_to(writer)?;
        written += Byte(self.position.as_byte()).write_to(writer)?;
        Ok(written)
    }
}

impl ProtocolRead for ClientBoundChat {
    fn read_from<R: io::Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let (data, mut n) = Chat::read_from(reader)?;
        let (Byte(position), m) = Byte::read_from(reader)?;
        n += m;

        Ok((
            Self {
                data,
                position: ChatPosition::from_byte(position),
            },
            n,
        ))
    }
}
