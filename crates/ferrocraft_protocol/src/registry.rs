//! Inbound packet lookup: `(phase, id)` to decoder.
//!
//! Built once at startup and immutable afterwards; constructed explicitly
//! and handed to whatever drives the connection, so there is no global
//! table. The outbound direction needs no runtime table: each serverbound
//! type carries its id in its `TryFrom<&T> for Packet` conversion.

use std::collections::HashMap;
use std::io::{self, Cursor};

use crate::java::login::{
    ClientBoundEncryptionRequest, ClientBoundLoginDisconnect, ClientBoundLoginSuccess,
    ClientBoundSetCompression, CLIENTBOUND_ENCRYPTION_REQUEST_ID, CLIENTBOUND_LOGIN_DISCONNECT_ID,
    CLIENTBOUND_LOGIN_SUCCESS_ID, CLIENTBOUND_SET_COMPRESSION_ID,
};
use crate::java::play::{
    ClientBoundChat, ClientBoundHeldItemChange, ClientBoundJoinGame, ClientBoundKeepAlive,
    ClientBoundPlayDisconnect, ClientBoundPositionAndLook, ClientBoundSpawnPosition,
    ClientBoundUpdateHealth, CLIENTBOUND_CHAT_ID, CLIENTBOUND_HELD_ITEM_CHANGE_ID,
    CLIENTBOUND_JOIN_GAME_ID, CLIENTBOUND_KEEP_ALIVE_ID, CLIENTBOUND_PLAY_DISCONNECT_ID,
    CLIENTBOUND_POSITION_AND_LOOK_ID, CLIENTBOUND_SPAWN_POSITION_ID,
    CLIENTBOUND_UPDATE_HEALTH_ID,
};
use crate::java::status::{
    ClientBoundStatusPong, ClientBoundStatusResponse, CLIENTBOUND_STATUS_PONG_ID,
    CLIENTBOUND_STATUS_RESPONSE_ID,
};
use crate::java::ClientBoundPacket;
use crate::packet::{Packet, PacketError, PacketResult};
use crate::phase::ProtocolPhase;
use crate::types::ProtocolRead;

type DecodeFn = fn(&Packet) -> io::Result<ClientBoundPacket>;

fn decode_body<T>(packet: &Packet) -> io::Result<ClientBoundPacket>
where
    T: ProtocolRead + Into<ClientBoundPacket>,
{
    let mut cursor = Cursor::new(&packet.body[..]);
    let (value, consumed) = T::read_from(&mut cursor)?;

    // The declared frame length is authoritative: a decoder that leaves
    // bytes behind or ran past the body decoded the wrong shape.
    if consumed != packet.body.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("consumed {consumed} of {} body bytes", packet.body.len()),
        ));
    }

    Ok(value.into())
}

/// Immutable `(phase, id) -> decoder` table for clientbound packets.
pub struct PacketRegistry {
    decoders: HashMap<(ProtocolPhase, i32), DecodeFn>,
}

impl PacketRegistry {
    pub fn new() -> Self {
        use ProtocolPhase::{Login, Play, Status};

        let mut decoders: HashMap<(ProtocolPhase, i32), DecodeFn> = HashMap::new();

        decoders.insert(
            (Status, CLIENTBOUND_STATUS_RESPONSE_ID),
            decode_body::<ClientBoundStatusResponse>,
        );
        decoders.insert(
            (Status, CLIENTBOUND_STATUS_PONG_ID),
            decode_body::<ClientBoundStatusPong>,
        );

        decoders.insert(
            (Login, CLIENTBOUND_LOGIN_DISCONNECT_ID),
            decode_body::<ClientBoundLoginDisconnect>,
        );
        decoders.insert(
            (Login, CLIENTBOUND_ENCRYPTION_REQUEST_ID),
            decode_body::<ClientBoundEncryptionRequest>,
        );
        decoders.insert(
            (Login, CLIENTBOUND_LOGIN_SUCCESS_ID),
            decode_body::<ClientBoundLoginSuccess>,
        );
        decoders.insert(
            (Login, CLIENTBOUND_SET_COMPRESSION_ID),
            decode_body::<ClientBoundSetCompression>,
        );

        decoders.insert(
            (Play, CLIENTBOUND_KEEP_ALIVE_ID),
            decode_body::<ClientBoundKeepAlive>,
        );
        decoders.insert(
            (Play, CLIENTBOUND_JOIN_GAME_ID),
            decode_body::<ClientBoundJoinGame>,
        );
        decoders.insert((Play, CLIENTBOUND_CHAT_ID), decode_body::<ClientBoundChat>);
        decoders.insert(
            (Play, CLIENTBOUND_SPAWN_POSITION_ID),
            decode_body::<ClientBoundSpawnPosition>,
        );
        decoders.insert(
            (Play, CLIENTBOUND_UPDATE_HEALTH_ID),
            decode_body::<ClientBoundUpdateHealth>,
        );
        decoders.insert(
            (Play, CLIENTBOUND_POSITION_AND_LOOK_ID),
            decode_body::<ClientBoundPositionAndLook>,
        );
        decoders.insert(
            (Play, CLIENTBOUND_HELD_ITEM_CHANGE_ID),
            decode_body::<ClientBoundHeldItemChange>,
        );
        decoders.insert(
            (Play, CLIENTBOUND_PLAY_DISCONNECT_ID),
            decode_body::<ClientBoundPlayDisconnect>,
        );

        Self { decoders }
    }

    /// Decodes a frame under the given phase. `UnknownPacket` and `Decode`
    /// failures are non-fatal: the frame was already consumed in full, so
    /// the caller can log and keep reading.
    pub fn decode(&self, phase: ProtocolPhase, packet: &Packet) -> PacketResult<ClientBoundPacket> {
        let decode = self
            .decoders
            .get(&(phase, packet.id))
            .ok_or(PacketError::UnknownPacket {
                phase,
                id: packet.id,
            })?;

        decode(packet).map_err(|source| PacketError::Decode {
            phase,
            id: packet.id,
            source,
        })
    }

    pub fn is_registered(&self, phase: ProtocolPhase, id: i32) -> bool {
        self.decoders.contains_key(&(phase, id))
    }
}

impl Default for PacketRegistry {
    fn default() -> Self {
        Self::new()
    }
}
