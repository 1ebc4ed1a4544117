//! Typed packet definitions for the Java Edition protocol, grouped by
//! phase, plus the sum type the registry decodes into.

pub mod handshake;
pub mod login;
pub mod play;
pub mod status;

pub use handshake::ServerBoundHandshake;

use crate::packet::Packet;

use login::{
    ClientBoundEncryptionRequest, ClientBoundLoginDisconnect, ClientBoundLoginSuccess,
    ClientBoundSetCompression,
};
use play::{
    ClientBoundChat, ClientBoundHeldItemChange, ClientBoundJoinGame, ClientBoundKeepAlive,
    ClientBoundPlayDisconnect, ClientBoundPositionAndLook, ClientBoundSpawnPosition,
    ClientBoundUpdateHealth,
};
use status::{ClientBoundStatusPong, ClientBoundStatusResponse};

macro_rules! client_bound_packets {
    ($( $kind:ident => $packet:ty ),+ $(,)?) => {
        /// Discriminant of a clientbound packet, used as the dispatch key
        /// together with the protocol phase.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum PacketKind {
            $( $kind, )+
        }

        /// Every clientbound packet this crate can decode, as one tagged
        /// union. A decoded value is immutable and carries no connection
        /// state.
        #[derive(Debug, Clone)]
        pub enum ClientBoundPacket {
            $( $kind($packet), )+
        }

        impl ClientBoundPacket {
            pub fn kind(&self) -> PacketKind {
                match self {
                    $( ClientBoundPacket::$kind(_) => PacketKind::$kind, )+
                }
            }
        }

        $(
            impl From<$packet> for ClientBoundPacket {
                fn from(packet: $packet) -> Self {
                    ClientBoundPacket::$kind(packet)
                }
            }

            impl FromClientBound for $packet {
                const KIND: PacketKind = PacketKind::$kind;

                fn from_client_bound(packet: &ClientBoundPacket) -> Option<&Self> {
                    match packet {
                        ClientBoundPacket::$kind(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )+
    };
}

/// Projects a typed packet reference back out of [`ClientBoundPacket`].
/// Implemented by every clientbound packet type so that handlers can
/// register for exactly the kinds they care about.
pub trait FromClientBound: Sized {
    const KIND: PacketKind;

    fn from_client_bound(packet: &ClientBoundPacket) -> Option<&Self>;
}

client_bound_packets! {
    StatusResponse => ClientBoundStatusResponse,
    StatusPong => ClientBoundStatusPong,
    LoginDisconnect => ClientBoundLoginDisconnect,
    EncryptionRequest => ClientBoundEncryptionRequest,
    LoginSuccess => ClientBoundLoginSuccess,
    SetCompression => ClientBoundSetCompression,
    KeepAlive => ClientBoundKeepAlive,
    JoinGame => ClientBoundJoinGame,
    Chat => ClientBoundChat,
    SpawnPosition => ClientBoundSpawnPosition,
    UpdateHealth => ClientBoundUpdateHealth,
    PlayerPositionAndLook => ClientBoundPositionAndLook,
    HeldItemChange => ClientBoundHeldItemChange,
    PlayDisconnect => ClientBoundPlayDisconnect,
}

/// Serverbound packets serialize through `TryFrom<&T> for Packet`; this
/// helper keeps call sites terse.
pub fn to_packet<'a, T>(value: &'a T) -> std::io::Result<Packet>
where
    Packet: TryFrom<&'a T, Error = std::io::Error>,
{
    Packet::try_from(value)
}
