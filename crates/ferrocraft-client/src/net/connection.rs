use std::sync::Arc;

use tokio::io::{BufReader, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, warn};

use ferrocraft_protocol::java::ClientBoundPacket;
use ferrocraft_protocol::{Packet, PacketRegistry, PacketResult, ProtocolPhase};

use crate::error::{ClientError, ClientResult};
use crate::security::KeyExchange;
use crate::ClientConfig;

use super::io::{PacketReader, PacketWriter};

pub type ConnectionReader = PacketReader<BufReader<OwnedReadHalf>>;
pub type ConnectionWriter = PacketWriter<BufWriter<OwnedWriteHalf>>;

/// One TCP connection plus everything whose lifetime matches it: the
/// current protocol phase, the transform state held by the reader and
/// writer, and the registry used to decode under the current phase.
///
/// The phase is advanced synchronously with the packet that triggers the
/// transition, before the next frame is pulled off the wire, so a frame
/// is never decoded under a stale phase.
pub struct Connection {
    reader: ConnectionReader,
    writer: ConnectionWriter,
    phase: ProtocolPhase,
    registry: Arc<PacketRegistry>,
}

impl Connection {
    /// Opens a TCP connection. The connect attempt is the only operation
    /// in the packet layer with a timeout.
    pub async fn connect(
        addr: &str,
        port: u16,
        config: &ClientConfig,
        registry: Arc<PacketRegistry>,
    ) -> ClientResult<Self> {
        let stream = timeout(config.connect_timeout, TcpStream::connect((addr, port)))
            .await
            .map_err(|_| ClientError::ConnectTimeout(config.connect_timeout))?
            .map_err(ClientError::Connect)?;

        if let Err(e) = stream.set_nodelay(true) {
            warn!("failed to set nodelay: {e}");
        }

        let (read_half, write_half) = stream.into_split();

        Ok(Self {
            reader: PacketReader::new(BufReader::new(read_half)),
            writer: PacketWriter::new(BufWriter::new(write_half)),
            phase: ProtocolPhase::Handshake,
            registry,
        })
    }

    pub fn phase(&self) -> ProtocolPhase {
        self.phase
    }

    pub fn registry(&self) -> &Arc<PacketRegistry> {
        &self.registry
    }

    /// Moves to the next phase, enforcing the one-directional transition
    /// graph.
    pub fn advance_phase(&mut self, next: ProtocolPhase) -> PacketResult<()> {
        if !self.phase.can_advance_to(next) {
            return Err(ferrocraft_protocol::PacketError::violation(format!(
                "illegal phase transition {} -> {}",
                self.phase, next
            )));
        }
        debug!(from = %self.phase, to = %next, "phase transition");
        self.phase = next;
        Ok(())
    }

    pub async fn read_packet(&mut self) -> PacketResult<Packet> {
        self.reader.read_packet().await
    }

    /// Decodes a frame under the connection's current phase.
    pub fn decode(&self, packet: &Packet) -> PacketResult<ClientBoundPacket> {
        self.registry.decode(self.phase, packet)
    }

    pub async fn write_packet(&mut self, packet: &Packet) -> PacketResult<()> {
        self.writer.write_packet(packet).await
    }

    /// Switches both directions to the negotiated cipher, starting with
    /// the next frame each way.
    pub fn enable_encryption(&mut self, exchange: &KeyExchange) -> PacketResult<()> {
        let (encrypt, decrypt) = exchange.create_cipher();
        self.writer.enable_encryption(encrypt)?;
        self.reader.enable_encryption(decrypt)?;
        Ok(())
    }

    /// Applies the negotiated threshold to both directions.
    pub fn enable_compression(&mut self, threshold: i32) -> PacketResult<()> {
        self.reader.enable_compression(threshold)?;
        self.writer.enable_compression(threshold)?;
        Ok(())
    }

    pub fn is_encrypted(&self) -> bool {
        self.reader.is_encrypted()
    }

    pub fn is_compressing(&self) -> bool {
        self.reader.is_compressing()
    }

    pub async fn close(&mut self) -> PacketResult<()> {
        self.writer.close().await
    }

    /// Hands the two halves to the session tasks once login completes.
    pub fn into_split(self) -> (ConnectionReader, ConnectionWriter) {
        (self.reader, self.writer)
    }
}
