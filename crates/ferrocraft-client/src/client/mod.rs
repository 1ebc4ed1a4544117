//! The session bootstrap: server ping and login, plus the live session
//! handle and client listeners.

pub mod chat;
mod listener;
mod session;

pub use chat::chat_to_text;
pub use listener::{ClientListener, ListenerRegistration, ListenerSet};
pub use session::{GameProfile, PacketSender, Session};

use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};

use ferrocraft_protocol::java::status::{
    ServerBoundStatusPing, ServerBoundStatusRequest, StatusJson,
};
use ferrocraft_protocol::java::{
    handshake::ServerBoundHandshake, login::ServerBoundLoginStart, to_packet, ClientBoundPacket,
};
use ferrocraft_protocol::{PacketError, PacketRegistry, ProtocolPhase};

use crate::auth::{Credentials, SessionService};
use crate::config::ClientConfig;
use crate::dispatch::PacketDispatcher;
use crate::error::{ClientError, ClientResult};
use crate::net::Connection;
use crate::security::KeyExchange;

/// Result of a status ping: the parsed status document and the pong
/// round-trip time.
#[derive(Debug, Clone)]
pub struct ServerPing {
    pub status: StatusJson,
    pub latency: Duration,
}

/// Entry point for consumers. A client owns the packet registry, the
/// dispatcher and the listener set; each `ping` or `login` call opens its
/// own connection, so one client can serve a status probe followed by
/// the actual game session.
pub struct Client {
    config: ClientConfig,
    registry: Arc<PacketRegistry>,
    dispatcher: PacketDispatcher,
    listeners: ListenerSet,
}

impl Client {
    pub fn new(dispatcher: PacketDispatcher) -> Self {
        Self::with_config(ClientConfig::default(), dispatcher)
    }

    pub fn with_config(config: ClientConfig, dispatcher: PacketDispatcher) -> Self {
        Self {
            config,
            registry: Arc::new(PacketRegistry::new()),
            dispatcher,
            listeners: ListenerSet::default(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &PacketDispatcher {
        &self.dispatcher
    }

    /// Registers a tick/disconnect listener; drop the guard to remove it.
    pub fn add_listener(
        &self,
        listener: Arc<dyn ClientListener>,
    ) -> ListenerRegistration {
        self.listeners.add(listener)
    }

    /// Queries the server's status: handshake with status intent, request
    /// and response, then a ping/pong pair for latency. The connection is
    /// closed before returning; errors surface synchronously.
    pub async fn ping(&self, addr: &str, port: u16) -> ClientResult<ServerPing> {
        let mut connection =
            Connection::connect(addr, port, &self.config, Arc::clone(&self.registry)).await?;

        let handshake = ServerBoundHandshake::status(self.config.protocol_version, addr, port);
        connection
            .write_packet(&to_packet(&handshake).map_err(PacketError::Io)?)
            .await?;
        connection.advance_phase(ProtocolPhase::Status)?;

        connection
            .write_packet(&to_packet(&ServerBoundStatusRequest).map_err(PacketError::Io)?)
            .await?;

        let response = loop {
            let raw = connection.read_packet().await?;
            match connection.decode(&raw) {
                Ok(packet) => {
                    self.dispatcher.dispatch(ProtocolPhase::Status, &packet);
                    if let ClientBoundPacket::StatusResponse(response) = packet {
                        break response;
                    }
                }
                Err(e) if !e.is_fatal() => debug!("skipping packet: {e}"),
                Err(e) => return Err(e.into()),
            }
        };

        let status = response.status().map_err(|e| {
            ClientError::Packet(PacketError::Decode {
                phase: ProtocolPhase::Status,
                id: ferrocraft_protocol::java::status::CLIENTBOUND_STATUS_RESPONSE_ID,
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            })
        })?;

        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64;
        let started = Instant::now();
        connection
            .write_packet(&to_packet(&ServerBoundStatusPing::new(nonce)).map_err(PacketError::Io)?)
            .await?;

        let latency = loop {
            let raw = connection.read_packet().await?;
            match connection.decode(&raw) {
                Ok(packet) => {
                    self.dispatcher.dispatch(ProtocolPhase::Status, &packet);
                    if let ClientBoundPacket::StatusPong(_) = packet {
                        break started.elapsed();
                    }
                }
                Err(e) if !e.is_fatal() => debug!("skipping packet: {e}"),
                Err(e) => return Err(e.into()),
            }
        };

        let _ = connection.close().await;
        info!(addr, port, ?latency, "status ping complete");

        Ok(ServerPing { status, latency })
    }

    /// Runs the full login sequence and hands back the live session. For
    /// online-mode servers pass [`Credentials`]; offline servers skip the
    /// encryption request, so `None` works there.
    ///
    /// Every login-phase packet is also dispatched to registered
    /// handlers, after the connection has applied its own state change
    /// for it.
    pub async fn login(
        &self,
        addr: &str,
        port: u16,
        username: &str,
        credentials: Option<&Credentials>,
    ) -> ClientResult<Session> {
        let mut connection =
            Connection::connect(addr, port, &self.config, Arc::clone(&self.registry)).await?;

        let handshake = ServerBoundHandshake::login(self.config.protocol_version, addr, port);
        connection
            .write_packet(&to_packet(&handshake).map_err(PacketError::Io)?)
            .await?;
        connection.advance_phase(ProtocolPhase::Login)?;

        connection
            .write_packet(
                &to_packet(&ServerBoundLoginStart::new(username)).map_err(PacketError::Io)?,
            )
            .await?;

        loop {
            let raw = connection.read_packet().await?;
            let packet = match connection.decode(&raw) {
                Ok(packet) => packet,
                Err(e) if !e.is_fatal() => {
                    debug!("skipping packet: {e}");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            match &packet {
                ClientBoundPacket::EncryptionRequest(request) => {
                    let exchange = KeyExchange::from_request(request)?;

                    if let Some(credentials) = credentials {
                        SessionService::new(&self.config.session_server)
                            .join_server(credentials, &exchange.server_hash())
                            .await?;
                    } else {
                        debug!("no credentials; skipping session join");
                    }

                    // The response still travels in the clear; the cipher
                    // starts with the next frame in each direction.
                    let response = exchange.seal()?;
                    connection
                        .write_packet(&to_packet(&response).map_err(PacketError::Io)?)
                        .await?;
                    connection.enable_encryption(&exchange)?;
                    self.dispatcher.dispatch(ProtocolPhase::Login, &packet);
                }
                ClientBoundPacket::SetCompression(set_compression) => {
                    connection.enable_compression(set_compression.threshold.0)?;
                    self.dispatcher.dispatch(ProtocolPhase::Login, &packet);
                }
                ClientBoundPacket::LoginDisconnect(disconnect) => {
                    self.dispatcher.dispatch(ProtocolPhase::Login, &packet);
                    return Err(ClientError::Disconnected {
                        reason: chat_to_text(&disconnect.reason.0),
                    });
                }
                ClientBoundPacket::LoginSuccess(success) => {
                    let profile = GameProfile {
                        uuid: success.uuid,
                        username: success.username.0.clone(),
                    };
                    connection.advance_phase(ProtocolPhase::Play)?;
                    self.dispatcher.dispatch(ProtocolPhase::Login, &packet);
                    info!(username = %profile.username, uuid = %profile.uuid, "login complete");

                    return Ok(Session::spawn(
                        connection,
                        Arc::clone(&self.registry),
                        self.dispatcher.clone(),
                        self.listeners.clone(),
                        profile,
                        self.config.tick_interval,
                    ));
                }
                other => {
                    warn!(kind = ?other.kind(), "unexpected packet during login");
                    self.dispatcher.dispatch(ProtocolPhase::Login, &packet);
                }
            }
        }
    }
}
