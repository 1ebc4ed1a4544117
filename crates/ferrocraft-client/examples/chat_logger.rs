//! Minimal bot: pings a server, logs in offline-mode, prints chat and
//! greets the room once connected.
//!
//! ```sh
//! cargo run --example chat_logger -- 127.0.0.1 25565 testplayer
//! ```

use std::sync::Arc;

use ferrocraft_client::{chat_to_text, Client, PacketDispatcher};
use ferrocraft_protocol::java::play::{
    ClientBoundChat, ClientBoundJoinGame, ServerBoundChatMessage,
};
use ferrocraft_protocol::ProtocolPhase;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "127.0.0.1".to_string());
    let port: u16 = args.next().as_deref().unwrap_or("25565").parse()?;
    let username = args.next().unwrap_or_else(|| "testplayer".to_string());

    let dispatcher = PacketDispatcher::new();

    let _chat = dispatcher.register::<ClientBoundChat, _>(
        ProtocolPhase::Play,
        Arc::new(|chat: &ClientBoundChat| {
            println!("[chat] {}", chat_to_text(&chat.data.0));
        }),
    );

    let _join = dispatcher.register::<ClientBoundJoinGame, _>(
        ProtocolPhase::Play,
        Arc::new(|join: &ClientBoundJoinGame| {
            println!(
                "[join] entity id {} in dimension {}",
                join.entity_id.0, join.dimension.0
            );
        }),
    );

    let client = Client::new(dispatcher);

    let ping = client.ping(&host, port).await?;
    println!(
        "{} ({} / {} players, {:?})",
        ping.status.version.name, ping.status.players.online, ping.status.players.max,
        ping.latency
    );

    let session = client.login(&host, port, &username, None).await?;
    println!("logged in as {}", session.profile().username);

    session.send(&ServerBoundChatMessage::new("hello from ferrocraft"))?;
    session.wait().await;

    Ok(())
}
