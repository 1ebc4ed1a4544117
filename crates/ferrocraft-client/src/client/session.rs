use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use ferrocraft_protocol::java::play::ServerBoundKeepAlive;
use ferrocraft_protocol::java::ClientBoundPacket;
use ferrocraft_protocol::{Packet, PacketRegistry, ProtocolPhase};

use crate::client::chat::chat_to_text;
use crate::client::listener::ListenerSet;
use crate::dispatch::PacketDispatcher;
use crate::error::{ClientError, ClientResult};
use crate::net::connection::{Connection, ConnectionReader, ConnectionWriter};

/// Identity the server confirmed in the login success packet.
#[derive(Debug, Clone)]
pub struct GameProfile {
    pub uuid: Uuid,
    pub username: String,
}

/// Cloneable outbound handle. Sends go through a channel to a dedicated
/// writer task, so it is safe to use from packet handlers mid-dispatch
/// and from tick listeners alike.
#[derive(Clone, Debug)]
pub struct PacketSender {
    tx: mpsc::UnboundedSender<Packet>,
}

impl PacketSender {
    pub fn send_packet(&self, packet: Packet) -> ClientResult<()> {
        self.tx
            .send(packet)
            .map_err(|_| ClientError::invalid_state("connection is closed"))
    }

    /// Serializes and queues a typed serverbound packet.
    pub fn send<'a, T>(&self, value: &'a T) -> ClientResult<()>
    where
        Packet: TryFrom<&'a T, Error = io::Error>,
    {
        let packet = Packet::try_from(value)
            .map_err(ferrocraft_protocol::PacketError::Io)?;
        self.send_packet(packet)
    }
}

/// A live play-phase session: the read loop, the writer task and the
/// tick loop, plus the handle used to close them.
///
/// The read loop is the single sequential decode-and-dispatch path;
/// handlers run synchronously on it and must not block. Closing the
/// session (or any fatal read/write error) cancels all three tasks and
/// fires `on_disconnect` on the registered listeners exactly once.
#[derive(Debug)]
pub struct Session {
    profile: GameProfile,
    sender: PacketSender,
    token: CancellationToken,
    read_task: JoinHandle<()>,
}

impl Session {
    pub(crate) fn spawn(
        connection: Connection,
        registry: Arc<PacketRegistry>,
        dispatcher: PacketDispatcher,
        listeners: ListenerSet,
        profile: GameProfile,
        tick_interval: Duration,
    ) -> Self {
        let (reader, writer) = connection.into_split();
        let (tx, rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();

        let sender = PacketSender { tx };

        tokio::spawn(write_loop(writer, rx, token.clone()));
        tokio::spawn(tick_loop(listeners.clone(), tick_interval, token.clone()));

        let read_task = tokio::spawn(read_task(
            reader,
            registry,
            dispatcher,
            listeners,
            sender.clone(),
            token.clone(),
        ));

        Self {
            profile,
            sender,
            token,
            read_task,
        }
    }

    pub fn profile(&self) -> &GameProfile {
        &self.profile
    }

    /// Outbound handle, cheap to clone into handlers and listeners.
    pub fn sender(&self) -> PacketSender {
        self.sender.clone()
    }

    pub fn send_packet(&self, packet: Packet) -> ClientResult<()> {
        self.sender.send_packet(packet)
    }

    pub fn send<'a, T>(&self, value: &'a T) -> ClientResult<()>
    where
        Packet: TryFrom<&'a T, Error = io::Error>,
    {
        self.sender.send(value)
    }

    /// Closes the session locally: unblocks the in-progress frame read,
    /// stops all three tasks and notifies disconnect listeners.
    pub fn disconnect(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Runs until the session ends, for whatever reason.
    pub async fn wait(mut self) {
        let _ = (&mut self.read_task).await;
    }
}

async fn write_loop(
    mut writer: ConnectionWriter,
    mut rx: mpsc::UnboundedReceiver<Packet>,
    token: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            message = rx.recv() => match message {
                Some(packet) => {
                    if let Err(e) = writer.write_packet(&packet).await {
                        warn!("write failed: {e}");
                        token.cancel();
                        break;
                    }
                }
                None => break,
            }
        }
    }
    let _ = writer.close().await;
}

async fn tick_loop(listeners: ListenerSet, tick_interval: Duration, token: CancellationToken) {
    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = interval.tick() => listeners.notify_tick(),
        }
    }
}

async fn read_task(
    reader: ConnectionReader,
    registry: Arc<PacketRegistry>,
    dispatcher: PacketDispatcher,
    listeners: ListenerSet,
    sender: PacketSender,
    token: CancellationToken,
) {
    let reason = read_loop(reader, registry, dispatcher, sender, &token).await;
    info!(reason = %reason, "session ended");

    // Stop the writer and tick tasks, then notify. The notification
    // happens only here, so listeners see exactly one disconnect.
    token.cancel();
    listeners.notify_disconnect(&reason);
}

async fn read_loop(
    mut reader: ConnectionReader,
    registry: Arc<PacketRegistry>,
    dispatcher: PacketDispatcher,
    sender: PacketSender,
    token: &CancellationToken,
) -> String {
    loop {
        let result = tokio::select! {
            _ = token.cancelled() => return "connection closed".to_string(),
            result = reader.read_packet() => result,
        };

        let raw = match result {
            Ok(raw) => raw,
            Err(e) => return e.to_string(),
        };

        match registry.decode(ProtocolPhase::Play, &raw) {
            Ok(packet) => {
                // The connection answers liveness probes itself so a
                // consumer that registers no handlers still stays online.
                if let ClientBoundPacket::KeepAlive(keep_alive) = &packet {
                    let response = ServerBoundKeepAlive::new(keep_alive.keep_alive_id);
                    if sender.send(&response).is_err() {
                        return "connection closed".to_string();
                    }
                }

                dispatcher.dispatch(ProtocolPhase::Play, &packet);

                if let ClientBoundPacket::PlayDisconnect(disconnect) = &packet {
                    return chat_to_text(&disconnect.reason.0);
                }
            }
            // A skippable failure: the frame was consumed in full, the
            // stream is still aligned.
            Err(e) if !e.is_fatal() => debug!("skipping packet: {e}"),
            Err(e) => return e.to_string(),
        }
    }
}
