use aes::cipher::generic_array::typenum::U1;
use aes::cipher::{
    generic_array::GenericArray, inout::InOut, BlockBackend, BlockClosure, BlockSizeUser,
    KeyIvInit,
};
use rand::RngCore;
use rsa::{pkcs1::DecodeRsaPublicKey, pkcs8::DecodePublicKey, Pkcs1v15Encrypt, RsaPublicKey};
use tracing::debug;

use ferrocraft_protocol::java::login::{ClientBoundEncryptionRequest, ServerBoundEncryptionResponse};
use ferrocraft_protocol::{PacketError, PacketResult};

use super::hash::generate_server_hash;

pub type Aes128Cfb8Enc = cfb8::Encryptor<aes::Aes128>;
pub type Aes128Cfb8Dec = cfb8::Decryptor<aes::Aes128>;

/// Applies a CFB8 cipher to a byte run in place. CFB8 works one byte at a
/// time, which is what lets the stream toggle encryption between frames
/// without any block padding concerns.
pub struct Cfb8Closure<'a> {
    pub data: &'a mut [u8],
}

impl BlockSizeUser for Cfb8Closure<'_> {
    type BlockSize = U1;
}

impl BlockClosure for Cfb8Closure<'_> {
    fn call<B: BlockBackend<BlockSize = Self::BlockSize>>(self, backend: &mut B) {
        for byte in self.data.iter_mut() {
            let input = GenericArray::<u8, U1>::from([*byte]);
            let mut output = GenericArray::<u8, U1>::default();
            let block = InOut::from((&input, &mut output));
            backend.proc_block(block);
            *byte = output[0];
        }
    }
}

/// Client half of the login key exchange: holds the freshly generated
/// shared secret together with the server's public key and verify token,
/// and produces the sealed response plus the session ciphers.
pub struct KeyExchange {
    shared_secret: [u8; 16],
    server_id: String,
    server_public_key: RsaPublicKey,
    public_key_der: Vec<u8>,
    verify_token: Vec<u8>,
}

impl KeyExchange {
    /// Generates a random 16-byte shared secret for the server's request.
    /// The server key may arrive as X.509/SubjectPublicKeyInfo or PKCS#1
    /// DER depending on the implementation; both are accepted.
    pub fn from_request(request: &ClientBoundEncryptionRequest) -> PacketResult<Self> {
        let key_bytes = &request.public_key.0;
        let server_public_key = RsaPublicKey::from_public_key_der(key_bytes)
            .or_else(|_| RsaPublicKey::from_pkcs1_der(key_bytes))
            .map_err(|e| PacketError::encryption(format!("invalid server public key: {e}")))?;

        let mut shared_secret = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut shared_secret);

        debug!(
            server_id = %request.server_id.0,
            key_len = key_bytes.len(),
            token_len = request.verify_token.0.len(),
            "prepared key exchange"
        );

        Ok(Self {
            shared_secret,
            server_id: request.server_id.0.clone(),
            server_public_key,
            public_key_der: key_bytes.clone(),
            verify_token: request.verify_token.0.clone(),
        })
    }

    /// SHA-1 server hash for the session-join request.
    pub fn server_hash(&self) -> String {
        generate_server_hash(&self.server_id, &self.shared_secret, &self.public_key_der)
    }

    /// Seals the shared secret and verify token with the server's RSA key.
    pub fn seal(&self) -> PacketResult<ServerBoundEncryptionResponse> {
        let mut rng = rand::thread_rng();

        let shared_secret = self
            .server_public_key
            .encrypt(&mut rng, Pkcs1v15Encrypt, &self.shared_secret)
            .map_err(|e| PacketError::encryption(format!("failed to seal shared secret: {e}")))?;

        let verify_token = self
            .server_public_key
            .encrypt(&mut rng, Pkcs1v15Encrypt, &self.verify_token)
            .map_err(|e| PacketError::encryption(format!("failed to seal verify token: {e}")))?;

        Ok(ServerBoundEncryptionResponse::new(shared_secret, verify_token))
    }

    /// AES-128-CFB8 cipher pair keyed by the shared secret, which doubles
    /// as the initialization vector.
    pub fn create_cipher(&self) -> (Aes128Cfb8Enc, Aes128Cfb8Dec) {
        let key = &self.shared_secret;
        let encrypt = Aes128Cfb8Enc::new(key.into(), key.into());
        let decrypt = Aes128Cfb8Dec::new(key.into(), key.into());
        (encrypt, decrypt)
    }

    pub fn shared_secret(&self) -> &[u8; 16] {
        &self.shared_secret
    }
}
