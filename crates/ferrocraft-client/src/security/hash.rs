use num_bigint::{BigInt, Sign};
use sha1::{Digest, Sha1};

/// Java-style signed-magnitude hex digest over server id, shared secret
/// and public key. This is the `serverId` value the session server
/// expects for the join request.
pub fn generate_server_hash(server_id: &str, shared_secret: &[u8], public_key: &[u8]) -> String {
    let hash = Sha1::new()
        .chain_update(server_id.as_bytes())
        .chain_update(shared_secret)
        .chain_update(public_key)
        .finalize();

    let big_int = BigInt::from_signed_bytes_be(&hash);
    let hex = big_int.to_str_radix(16);

    if big_int.sign() == Sign::Minus {
        format!("-{}", hex.trim_start_matches('-'))
    } else {
        hex
    }
}
