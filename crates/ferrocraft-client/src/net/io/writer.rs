use aes::cipher::BlockEncryptMut;
use bytes::BytesMut;
use libdeflater::{CompressionLvl, Compressor};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use ferrocraft_protocol::types::VarInt;
use ferrocraft_protocol::{Packet, PacketError, PacketResult, MAX_PACKET_LENGTH};

use crate::security::{Aes128Cfb8Enc, Cfb8Closure};

use super::CompressionState;

/// Outbound half of the frame codec: serializes `id + body`, compresses
/// when the threshold applies, prefixes the frame length, and encrypts
/// the whole thing once a cipher is installed.
pub struct PacketWriter<W> {
    writer: W,
    cipher: Option<Aes128Cfb8Enc>,
    compression: CompressionState,
}

impl<W: AsyncWrite + Unpin> PacketWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            cipher: None,
            compression: CompressionState::Disabled,
        }
    }

    /// Installs the outbound cipher. Applies from the next frame on and
    /// can never be undone; a second call is a protocol violation.
    pub fn enable_encryption(&mut self, cipher: Aes128Cfb8Enc) -> PacketResult<()> {
        if self.cipher.is_some() {
            return Err(PacketError::violation(
                "encryption re-negotiated on an already encrypted stream",
            ));
        }
        self.cipher = Some(cipher);
        Ok(())
    }

    /// Sets the compression threshold. Applies from the next frame on; a
    /// second threshold is a protocol violation.
    pub fn enable_compression(&mut self, threshold: i32) -> PacketResult<()> {
        if self.compression.is_enabled() {
            return Err(PacketError::violation(
                "compression threshold re-negotiated",
            ));
        }
        self.compression = CompressionState::Enabled { threshold };
        Ok(())
    }

    pub fn is_encrypted(&self) -> bool {
        self.cipher.is_some()
    }

    pub fn is_compressing(&self) -> bool {
        self.compression.is_enabled()
    }

    pub async fn write_packet(&mut self, packet: &Packet) -> PacketResult<()> {
        let mut plaintext = VarInt(packet.id).to_bytes();
        plaintext.extend_from_slice(&packet.body);

        let frame_body = match self.compression {
            CompressionState::Enabled { threshold } if plaintext.len() >= threshold as usize => {
                self.deflate(&plaintext)?
            }
            CompressionState::Enabled { .. } => {
                // Below the threshold the body still carries the marker,
                // a zero meaning "not compressed".
                let mut body = VarInt(0).to_bytes();
                body.extend_from_slice(&plaintext);
                body
            }
            CompressionState::Disabled => plaintext,
        };

        if frame_body.len() > MAX_PACKET_LENGTH {
            return Err(PacketError::InvalidLength {
                length: frame_body.len(),
                max: MAX_PACKET_LENGTH,
            });
        }

        let mut output = VarInt(frame_body.len() as i32).to_bytes();
        output.extend_from_slice(&frame_body);

        if let Some(cipher) = &mut self.cipher {
            cipher.encrypt_with_backend_mut(Cfb8Closure { data: &mut output });
        }

        self.writer.write_all(&output).await?;
        self.writer.flush().await?;

        Ok(())
    }

    fn deflate(&self, plaintext: &[u8]) -> PacketResult<BytesMut> {
        let mut compressor = Compressor::new(CompressionLvl::default());
        let bound = compressor.zlib_compress_bound(plaintext.len());
        let mut compressed = vec![0u8; bound];
        let actual = compressor
            .zlib_compress(plaintext, &mut compressed)
            .map_err(|e| PacketError::compression(e.to_string()))?;
        compressed.truncate(actual);

        let mut body = VarInt(plaintext.len() as i32).to_bytes();
        body.extend_from_slice(&compressed);
        Ok(body)
    }

    pub async fn close(&mut self) -> PacketResult<()> {
        self.writer.shutdown().await?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
