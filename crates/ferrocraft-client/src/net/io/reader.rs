use std::io::Cursor;

use aes::cipher::BlockDecryptMut;
use bytes::BytesMut;
use libdeflater::Decompressor;
use tokio::io::{AsyncRead, AsyncReadExt};

use ferrocraft_protocol::types::{ProtocolRead, VarInt, MAX_VARINT_LEN};
use ferrocraft_protocol::{
    Packet, PacketError, PacketResult, MAX_PACKET_LENGTH, MAX_UNCOMPRESSED_LENGTH,
};

use crate::security::{Aes128Cfb8Dec, Cfb8Closure};

use super::CompressionState;

/// Inbound half of the frame codec: reassembles length-prefixed frames
/// from a byte stream, running decryption and decompression as
/// negotiated. The underlying reader delivers bytes in arbitrary chunks;
/// `read_exact` accumulates until a full prefix and body are available.
pub struct PacketReader<R> {
    reader: R,
    cipher: Option<Aes128Cfb8Dec>,
    compression: CompressionState,
}

impl<R: AsyncRead + Unpin> PacketReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            cipher: None,
            compression: CompressionState::Disabled,
        }
    }

    /// Installs the inbound cipher. Takes effect with the next frame and
    /// can never be undone; a second call is a protocol violation.
    pub fn enable_encryption(&mut self, cipher: Aes128Cfb8Dec) -> PacketResult<()> {
        if self.cipher.is_some() {
            return Err(PacketError::violation(
                "encryption re-negotiated on an already encrypted stream",
            ));
        }
        self.cipher = Some(cipher);
        Ok(())
    }

    /// Sets the compression threshold. Takes effect with the next frame;
    /// a second threshold is a protocol violation.
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

    /// Reads one frame, blocking until it is complete. The length prefix
    /// is read byte-by-byte through the cipher, since the prefix itself
    /// is encrypted once the cipher is live.
    pub async fn read_packet(&mut self) -> PacketResult<Packet> {
        let frame_length = self.read_frame_length().await?;
        if frame_length > MAX_PACKET_LENGTH {
            return Err(PacketError::InvalidLength {
                length: frame_length,
                max: MAX_PACKET_LENGTH,
            });
        }

        let mut frame = vec![0u8; frame_length];
        self.reader.read_exact(&mut frame).await?;
        if let Some(cipher) = &mut self.cipher {
            cipher.decrypt_with_backend_mut(Cfb8Closure { data: &mut frame });
        }

        let body = if self.compression.is_enabled() {
            self.decompress(&frame)?
        } else {
            BytesMut::from(&frame[..])
        };

        // Split the packet id off the plaintext body.
        let mut cursor = Cursor::new(&body[..]);
        let (VarInt(id), id_size) = VarInt::read_from(&mut cursor)
            .map_err(|_| PacketError::MalformedVarInt)?;

        Ok(Packet {
            id,
            body: BytesMut::from(&body[id_size..]),
        })
    }

    async fn read_frame_length(&mut self) -> PacketResult<usize> {
        let mut length_bytes = [0u8; MAX_VARINT_LEN];
        let mut count = 0;

        loop {
            if count >= MAX_VARINT_LEN {
                return Err(PacketError::MalformedVarInt);
            }

            let mut byte = [0u8; 1];
            self.reader.read_exact(&mut byte).await?;
            if let Some(cipher) = &mut self.cipher {
                cipher.decrypt_with_backend_mut(Cfb8Closure { data: &mut byte });
            }

            length_bytes[count] = byte[0];
            count += 1;
            if byte[0] & 0x80 == 0 {
                break;
            }
        }

        let mut cursor = Cursor::new(&length_bytes[..count]);
        let (VarInt(length), _) =
            VarInt::read_from(&mut cursor).map_err(|_| PacketError::MalformedVarInt)?;
        usize::try_from(length).map_err(|_| PacketError::InvalidLength {
            length: 0,
            max: MAX_PACKET_LENGTH,
        })
    }

    /// Inflates a frame body per the inner size marker: `0` means the body
    /// travelled uncompressed, anything else declares the plaintext size,
    /// which the inflated data must match exactly. Disagreement means the
    /// framing can no longer be trusted and is fatal.
    fn decompress(&self, frame: &[u8]) -> PacketResult<BytesMut> {
        let mut cursor = Cursor::new(frame);
        let (VarInt(declared), marker_size) =
            VarInt::read_from(&mut cursor).map_err(|_| PacketError::MalformedVarInt)?;
        let compressed = &frame[marker_size..];

        if declared == 0 {
            return Ok(BytesMut::from(compressed));
        }
        if declared < 0 || declared as usize > MAX_UNCOMPRESSED_LENGTH {
            return Err(PacketError::InvalidLength {
                length: declared.max(0) as usize,
                max: MAX_UNCOMPRESSED_LENGTH,
            });
        }
        let declared = declared as usize;

        // One spare byte so an oversized stream shows up as a size
        // mismatch instead of a silent truncation.
        let mut plaintext = vec![0u8; declared + 1];
        let mut decompressor = Decompressor::new();
        let actual = match decompressor.zlib_decompress(compressed, &mut plaintext) {
            Ok(n) => n,
            Err(libdeflater::DecompressionError::InsufficientSpace) => declared + 1,
            Err(e) => return Err(PacketError::compression(e.to_string())),
        };

        if actual != declared {
            return Err(PacketError::DecompressionSizeMismatch { declared, actual });
        }

        plaintext.truncate(declared);
        Ok(BytesMut::from(&plaintext[..]))
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}
