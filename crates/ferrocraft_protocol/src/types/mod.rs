mod arrays;
mod position;
mod primitives;
mod strings;
mod traits;
mod uuid;
mod var_numbers;

pub use arrays::{ByteArray, PrefixedArray};
pub use position::Position;
pub use primitives::{
    Boolean, Byte, Double, Float, Int, Long, Short, UnsignedByte, UnsignedShort,
};
pub use strings::{Chat, ProtocolString};
pub use traits::{ProtocolRead, ProtocolWrite};
pub use uuid::ProtocolUuid;
pub use var_numbers::{VarInt, VarLong, MAX_VARINT_LEN, MAX_VARLONG_LEN};
