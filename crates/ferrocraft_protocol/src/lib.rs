//! Wire-level building blocks for the Minecraft Java Edition protocol
//! (1.8.x, protocol 47): primitive field codecs, the raw frame value,
//! typed packet definitions per phase, and the phase-aware packet
//! registry.
//!
//! This crate is deliberately transport-free. Framing, compression and
//! encryption live in `ferrocraft-client`, which feeds decoded frames
//! through [`PacketRegistry`] to obtain [`java::ClientBoundPacket`]
//! values.

pub mod java;
pub mod packet;
pub mod phase;
pub mod registry;
pub mod types;
pub mod version;

pub use packet::{Packet, PacketError, PacketResult, MAX_PACKET_LENGTH, MAX_UNCOMPRESSED_LENGTH};
pub use phase::ProtocolPhase;
pub use registry::PacketRegistry;
pub use types::{ProtocolRead, ProtocolWrite};
pub use version::Version;
