pub mod connection;
pub mod io;

pub use connection::Connection;
pub use io::{CompressionState, PacketReader, PacketWriter};
