//! Async client core for the Minecraft Java Edition protocol: connection
//! establishment, encryption and compression negotiation, frame decoding
//! and typed packet dispatch.
//!
//! The shape of a consumer looks like this: build a
//! [`PacketDispatcher`], register handlers for the packet types you care
//! about, hand the dispatcher to a [`Client`], then `ping` or `login`.
//! After login the returned [`Session`] runs the read, write and tick
//! loops; handlers receive decoded packets on the read loop and can send
//! through a [`PacketSender`] from anywhere.
//!
//! ```no_run
//! use std::sync::Arc;
//! use ferrocraft_client::{Client, PacketDispatcher};
//! use ferrocraft_protocol::java::play::ClientBoundChat;
//! use ferrocraft_protocol::ProtocolPhase;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let dispatcher = PacketDispatcher::new();
//! let _chat = dispatcher.register::<ClientBoundChat, _>(
//!     ProtocolPhase::Play,
//!     Arc::new(|chat: &ClientBoundChat| println!("{}", chat.data.0)),
//! );
//!
//! let client = Client::new(dispatcher);
//! let session = client.login("localhost", 25565, "alice", None).await?;
//! session.wait().await;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod net;
pub mod security;

pub use auth::Credentials;
pub use client::{
    chat_to_text, Client, ClientListener, GameProfile, ListenerRegistration, PacketSender,
    ServerPing, Session,
};
pub use config::ClientConfig;
pub use dispatch::{HandlePacket, HandlerRegistration, PacketDispatcher};
pub use error::{ClientError, ClientResult};
pub use net::Connection;
