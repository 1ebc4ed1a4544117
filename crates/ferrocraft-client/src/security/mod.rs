mod encryption;
mod hash;

pub use encryption::{Aes128Cfb8Dec, Aes128Cfb8Enc, Cfb8Closure, KeyExchange};
pub use hash::generate_server_hash;
