//! Frame-level I/O: length-prefixed framing with the optional compression
//! and encryption transforms.
//!
//! The cipher is the outermost layer and covers every byte in both
//! directions, length prefixes included; zlib applies to the plaintext
//! frame body only. Both transforms begin at a frame boundary: enabling
//! one affects the next frame, never bytes already in flight.

mod reader;
mod writer;

pub use reader::PacketReader;
pub use writer::PacketWriter;

/// Connection-scoped compression state. `Enabled` is a one-way door: the
/// reader and writer reject a second threshold as a protocol violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionState {
    Disabled,
    Enabled { threshold: i32 },
}

impl CompressionState {
    pub fn is_enabled(&self) -> bool {
        matches!(self, CompressionState::Enabled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::{Aes128Cfb8Dec, Aes128Cfb8Enc};
    use aes::cipher::KeyIvInit;
    use bytes::BytesMut;
    use ferrocraft_protocol::types::{ProtocolRead, VarInt};
    use ferrocraft_protocol::{Packet, PacketError};
    use std::io::Cursor;

    fn cipher_pair() -> (Aes128Cfb8Enc, Aes128Cfb8Dec) {
        let secret = [0x42u8; 16];
        (
            Aes128Cfb8Enc::new(&secret.into(), &secret.into()),
            Aes128Cfb8Dec::new(&secret.into(), &secret.into()),
        )
    }

    fn packet_with_body(id: i32, body: &[u8]) -> Packet {
        Packet {
            id,
            body: BytesMut::from(body),
        }
    }

    async fn write_frames(
        packets: &[Packet],
        threshold: Option<i32>,
        encrypted: bool,
    ) -> Vec<u8> {
        let mut writer = PacketWriter::new(Vec::new());
        if let Some(threshold) = threshold {
            writer.enable_compression(threshold).unwrap();
        }
        if encrypted {
            writer.enable_encryption(cipher_pair().0).unwrap();
        }
        for packet in packets {
            writer.write_packet(packet).await.unwrap();
        }
        writer.into_inner()
    }

    async fn read_frames(
        bytes: Vec<u8>,
        count: usize,
        threshold: Option<i32>,
        encrypted: bool,
    ) -> Vec<Packet> {
        let mut reader = PacketReader::new(Cursor::new(bytes));
        if let Some(threshold) = threshold {
            reader.enable_compression(threshold).unwrap();
        }
        if encrypted {
            reader.enable_encryption(cipher_pair().1).unwrap();
        }
        let mut packets = Vec::new();
        for _ in 0..count {
            packets.push(reader.read_packet().await.unwrap());
        }
        packets
    }

    #[tokio::test]
    async fn test_frame_round_trip_all_transform_combinations() {
        let payloads: Vec<Vec<u8>> = vec![
            Vec::new(),
            vec![7],
            (0..=255u8).collect(),
            vec![0x55; 4096],
        ];

        for (threshold, encrypted) in
            [(None, false), (Some(64), false), (None, true), (Some(64), true)]
        {
            for payload in &payloads {
                let packet = packet_with_body(0x02, payload);
                let bytes = write_frames(std::slice::from_ref(&packet), threshold, encrypted).await;
                let decoded = read_frames(bytes, 1, threshold, encrypted).await;
                assert_eq!(decoded[0], packet, "threshold={threshold:?} encrypted={encrypted}");
            }
        }
    }

    #[tokio::test]
    async fn test_consecutive_frames_stay_separated() {
        let first = packet_with_body(0x7a, &[0u8; 10]);
        let second = packet_with_body(0x02, b"hello");

        let bytes = write_frames(&[first.clone(), second.clone()], None, false).await;
        let decoded = read_frames(bytes, 2, None, false).await;

        assert_eq!(decoded[0], first);
        assert_eq!(decoded[1], second);
    }

    /// The inner marker distinguishes compressed from bare frames: a body
    /// of exactly `threshold` bytes compresses, one byte less does not.
    #[tokio::test]
    async fn test_compression_threshold_boundary() {
        let threshold = 128usize;

        // wire_len = 1 (id) + body, so body of threshold - 1 hits it.
        let at = packet_with_body(0x00, &vec![9u8; threshold - 1]);
        let below = packet_with_body(0x00, &vec![9u8; threshold - 2]);
        assert_eq!(at.wire_len(), threshold);
        assert_eq!(below.wire_len(), threshold - 1);

        for (packet, expect_compressed) in [(&at, true), (&below, false)] {
            let bytes = write_frames(std::slice::from_ref(packet), Some(threshold as i32), false)
                .await;

            let mut cursor = Cursor::new(&bytes[..]);
            let (VarInt(frame_len), _) = VarInt::read_from(&mut cursor).unwrap();
            let (VarInt(marker), _) = VarInt::read_from(&mut cursor).unwrap();
            assert!(frame_len > 0);
            assert_eq!(
                marker != 0,
                expect_compressed,
                "marker for wire_len {}",
                packet.wire_len()
            );

            let decoded =
                read_frames(bytes, 1, Some(threshold as i32), false).await;
            assert_eq!(&decoded[0], packet);
        }
    }

    #[tokio::test]
    async fn test_compression_shrinks_repetitive_payload() {
        let packet = packet_with_body(0x02, &vec![0xaa; 4096]);
        let plain = write_frames(std::slice::from_ref(&packet), None, false).await;
        let compressed = write_frames(std::slice::from_ref(&packet), Some(256), false).await;
        assert!(compressed.len() < plain.len() / 4);
    }

    #[tokio::test]
    async fn test_transform_lock_in() {
        let mut writer = PacketWriter::new(Vec::new());
        writer.enable_compression(256).unwrap();
        let err = writer.enable_compression(512).unwrap_err();
        assert!(matches!(err, PacketError::ProtocolViolation(_)));

        let mut reader = PacketReader::new(Cursor::new(Vec::new()));
        reader.enable_encryption(cipher_pair().1).unwrap();
        let err = reader.enable_encryption(cipher_pair().1).unwrap_err();
        assert!(matches!(err, PacketError::ProtocolViolation(_)));
    }

    #[tokio::test]
    async fn test_decompression_size_mismatch_is_fatal() {
        // A frame declaring 10 plaintext bytes whose stream inflates to 4.
        let mut compressor = libdeflater::Compressor::new(libdeflater::CompressionLvl::default());
        let plaintext = [0x01u8, 0x02, 0x03, 0x04];
        let mut stream = vec![0u8; compressor.zlib_compress_bound(plaintext.len())];
        let n = compressor.zlib_compress(&plaintext, &mut stream).unwrap();
        stream.truncate(n);

        let mut frame_body = VarInt(10).to_bytes().to_vec();
        frame_body.extend_from_slice(&stream);

        let mut bytes = VarInt(frame_body.len() as i32).to_bytes().to_vec();
        bytes.extend_from_slice(&frame_body);

        let mut reader = PacketReader::new(Cursor::new(bytes));
        reader.enable_compression(256).unwrap();

        let err = reader.read_packet().await.unwrap_err();
        assert!(err.is_fatal());
        match err {
            PacketError::DecompressionSizeMismatch { declared, actual } => {
                assert_eq!(declared, 10);
                assert_eq!(actual, 4);
            }
            other => panic!("expected size mismatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unterminated_length_prefix_rejected() {
        let bytes = vec![0x80u8; 6];
        let mut reader = PacketReader::new(Cursor::new(bytes));
        let err = reader.read_packet().await.unwrap_err();
        assert!(matches!(err, PacketError::MalformedVarInt));
    }

    #[tokio::test]
    async fn test_encrypted_stream_differs_from_plaintext() {
        let packet = packet_with_body(0x02, b"attack at dawn");
        let plain = write_frames(std::slice::from_ref(&packet), None, false).await;
        let sealed = write_frames(std::slice::from_ref(&packet), None, true).await;
        assert_eq!(plain.len(), sealed.len());
        assert_ne!(plain, sealed);
    }
}
