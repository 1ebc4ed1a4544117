//! End-to-end exercises against an in-process server speaking the real
//! wire format: handshake, login with encryption and compression, play
//! dispatch, keep-alive echo and disconnect notification.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rsa::pkcs8::EncodePublicKey;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpListener;
use tokio::time::timeout;
use uuid::Uuid;

use ferrocraft_client::net::{PacketReader, PacketWriter};
use ferrocraft_client::{
    Client, ClientError, ClientListener, HandlePacket, PacketDispatcher,
};
use ferrocraft_protocol::java::handshake::ServerBoundHandshake;
use ferrocraft_protocol::java::login::{
    ClientBoundEncryptionRequest, ClientBoundLoginSuccess, ClientBoundSetCompression,
    ServerBoundEncryptionResponse, ServerBoundLoginStart, CLIENTBOUND_ENCRYPTION_REQUEST_ID,
    CLIENTBOUND_LOGIN_SUCCESS_ID, CLIENTBOUND_SET_COMPRESSION_ID,
};
use ferrocraft_protocol::java::play::{
    ChatPosition, ClientBoundChat, ClientBoundKeepAlive, ClientBoundPlayDisconnect,
    ClientBoundSpawnPosition, CLIENTBOUND_CHAT_ID, CLIENTBOUND_KEEP_ALIVE_ID,
    CLIENTBOUND_PLAY_DISCONNECT_ID,
};
use ferrocraft_protocol::java::status::{
    ClientBoundStatusPong, ServerBoundStatusPing, CLIENTBOUND_STATUS_PONG_ID,
    CLIENTBOUND_STATUS_RESPONSE_ID,
};
use ferrocraft_protocol::types::{
    ProtocolRead, ProtocolString, ProtocolWrite, VarInt,
};
use ferrocraft_protocol::Packet;

type ServerReader = PacketReader<OwnedReadHalf>;
type ServerWriter = PacketWriter<OwnedWriteHalf>;

const TEST_TIMEOUT: Duration = Duration::from_secs(30);

fn encode<T: ProtocolWrite>(id: i32, value: &T) -> Packet {
    let mut packet = Packet::new(id);
    packet.encode(value).unwrap();
    packet
}

fn decode<T: ProtocolRead>(packet: &Packet) -> T {
    let mut cursor = std::io::Cursor::new(&packet.body[..]);
    let (value, consumed) = T::read_from(&mut cursor).unwrap();
    assert_eq!(consumed, packet.body.len(), "under-consumed packet body");
    value
}

/// Accepts one connection and drives the server side of the login
/// sequence: encryption request/response, compression at 256, then login
/// success. Returns the transformed reader/writer ready for play.
async fn accept_and_login(listener: TcpListener) -> (ServerReader, ServerWriter) {
    let (stream, _) = listener.accept().await.unwrap();
    stream.set_nodelay(true).unwrap();
    let (read_half, write_half) = stream.into_split();
    let mut reader = PacketReader::new(read_half);
    let mut writer = PacketWriter::new(write_half);

    let handshake: ServerBoundHandshake = decode(&reader.read_packet().await.unwrap());
    assert!(handshake.is_login_request());
    assert_eq!(handshake.protocol_version, VarInt(47));

    let login_start: ServerBoundLoginStart = decode(&reader.read_packet().await.unwrap());
    assert_eq!(login_start.username.0, "alice");

    // Key exchange.
    let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap();
    let public_key_der = RsaPublicKey::from(&private_key)
        .to_public_key_der()
        .unwrap()
        .as_ref()
        .to_vec();
    let request = ClientBoundEncryptionRequest::new("", public_key_der, vec![11, 22, 33, 44]);
    writer
        .write_packet(&encode(CLIENTBOUND_ENCRYPTION_REQUEST_ID, &request))
        .await
        .unwrap();

    let response: ServerBoundEncryptionResponse = decode(&reader.read_packet().await.unwrap());
    let secret = private_key
        .decrypt(Pkcs1v15Encrypt, &response.shared_secret.0)
        .unwrap();
    let token = private_key
        .decrypt(Pkcs1v15Encrypt, &response.verify_token.0)
        .unwrap();
    assert_eq!(token, vec![11, 22, 33, 44]);
    assert_eq!(secret.len(), 16);

    let key: &[u8; 16] = secret.as_slice().try_into().unwrap();
    use aes::cipher::KeyIvInit;
    writer
        .enable_encryption(cfb8::Encryptor::<aes::Aes128>::new(key.into(), key.into()))
        .unwrap();
    reader
        .enable_encryption(cfb8::Decryptor::<aes::Aes128>::new(key.into(), key.into()))
        .unwrap();

    // Compression, then the success packet (compressed + encrypted).
    writer
        .write_packet(&encode(
            CLIENTBOUND_SET_COMPRESSION_ID,
            &ClientBoundSetCompression {
                threshold: VarInt(256),
            },
        ))
        .await
        .unwrap();
    writer.enable_compression(256).unwrap();
    reader.enable_compression(256).unwrap();

    let success = ClientBoundLoginSuccess {
        uuid: Uuid::parse_str("af74a02d-19cb-445b-b07f-6866a861f783").unwrap(),
        username: ProtocolString("alice".to_string()),
    };
    writer
        .write_packet(&encode(CLIENTBOUND_LOGIN_SUCCESS_ID, &success))
        .await
        .unwrap();

    (reader, writer)
}

struct ChatRecorder {
    label: &'static str,
    log: Arc<Mutex<Vec<(&'static str, String)>>>,
}

impl HandlePacket<ClientBoundChat> for ChatRecorder {
    fn handle_packet(&self, packet: &ClientBoundChat) {
        self.log
            .lock()
            .unwrap()
            .push((self.label, packet.data.0.clone()));
    }
}

struct DisconnectProbe {
    reasons: Arc<Mutex<Vec<String>>>,
    ticks: Arc<AtomicUsize>,
}

impl ClientListener for DisconnectProbe {
    fn on_tick(&self) {
        self.ticks.fetch_add(1, Ordering::SeqCst);
    }

    fn on_disconnect(&self, reason: &str) {
        self.reasons.lock().unwrap().push(reason.to_string());
    }
}

#[tokio::test]
async fn test_full_login_and_play_session() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut reader, mut writer) = accept_and_login(listener).await;

        // A 300-byte chat payload: above the threshold, so it travels
        // compressed.
        let long_line = "x".repeat(300 - 11);
        let chat = ClientBoundChat {
            data: ProtocolString(format!(r#"{{"text":"{long_line}"}}"#)),
            position: ChatPosition::Chat,
        };
        writer
            .write_packet(&encode(CLIENTBOUND_CHAT_ID, &chat))
            .await
            .unwrap();

        // An id this client has no decoder for, with a second chat right
        // behind it; the client must skip the first and keep framing.
        let mut unknown = Packet::new(0x7f);
        unknown.body.extend_from_slice(&[0xaa; 10]);
        writer.write_packet(&unknown).await.unwrap();

        let chat2 = ClientBoundChat {
            data: ProtocolString(r#"{"text":"still here"}"#.to_string()),
            position: ChatPosition::Chat,
        };
        writer
            .write_packet(&encode(CLIENTBOUND_CHAT_ID, &chat2))
            .await
            .unwrap();

        // Liveness probe: the client must echo the id unprompted.
        writer
            .write_packet(&encode(
                CLIENTBOUND_KEEP_ALIVE_ID,
                &ClientBoundKeepAlive {
                    keep_alive_id: VarInt(0x1234),
                },
            ))
            .await
            .unwrap();
        let echoed = reader.read_packet().await.unwrap();
        let echo: VarInt = decode(&echoed);
        assert_eq!(echo, VarInt(0x1234));

        // Leave the tick loop a little room to run before tearing down.
        tokio::time::sleep(Duration::from_millis(150)).await;

        writer
            .write_packet(&encode(
                CLIENTBOUND_PLAY_DISCONNECT_ID,
                &ClientBoundPlayDisconnect {
                    reason: ProtocolString(r#"{"text":"server closing"}"#.to_string()),
                },
            ))
            .await
            .unwrap();
    });

    let dispatcher = PacketDispatcher::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    let registrations: Vec<_> = ["first", "second", "third"]
        .into_iter()
        .map(|label| {
            dispatcher.register::<ClientBoundChat, _>(
                ferrocraft_protocol::ProtocolPhase::Play,
                Arc::new(ChatRecorder {
                    label,
                    log: Arc::clone(&log),
                }),
            )
        })
        .collect();

    // Registered for a packet type the server never sends.
    let spawn_positions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&spawn_positions);
    let _unused = dispatcher.register::<ClientBoundSpawnPosition, _>(
        ferrocraft_protocol::ProtocolPhase::Play,
        Arc::new(move |_: &ClientBoundSpawnPosition| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );

    let client = Client::new(dispatcher);
    let reasons = Arc::new(Mutex::new(Vec::new()));
    let ticks = Arc::new(AtomicUsize::new(0));
    let _listener_guard = client.add_listener(Arc::new(DisconnectProbe {
        reasons: Arc::clone(&reasons),
        ticks: Arc::clone(&ticks),
    }));

    let session = timeout(
        TEST_TIMEOUT,
        client.login(&addr.ip().to_string(), addr.port(), "alice", None),
    )
    .await
    .expect("login timed out")
    .expect("login failed");

    assert_eq!(session.profile().username, "alice");

    timeout(TEST_TIMEOUT, session.wait())
        .await
        .expect("session did not end");
    timeout(TEST_TIMEOUT, server)
        .await
        .expect("server timed out")
        .unwrap();

    // Fan-out: every chat handler saw both chats, in registration order,
    // exactly once each; the spawn-position handler never fired.
    let log = log.lock().unwrap();
    let first_chat: Vec<_> = log.iter().take(3).collect();
    assert_eq!(
        first_chat.iter().map(|(label, _)| *label).collect::<Vec<_>>(),
        vec!["first", "second", "third"]
    );
    assert!(first_chat.iter().all(|(_, data)| data.len() == 300));
    let second_chat: Vec<_> = log.iter().skip(3).collect();
    assert_eq!(
        second_chat.iter().map(|(label, _)| *label).collect::<Vec<_>>(),
        vec!["first", "second", "third"]
    );
    assert!(second_chat
        .iter()
        .all(|(_, data)| data.contains("still here")));

    assert_eq!(spawn_positions.load(Ordering::SeqCst), 0);

    // Exactly one disconnect, with the server-supplied reason flattened
    // to text.
    assert_eq!(&*reasons.lock().unwrap(), &["server closing".to_string()]);
    assert!(ticks.load(Ordering::SeqCst) > 0, "tick loop never ran");

    drop(registrations);
}

#[tokio::test]
async fn test_status_ping_round_trip() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let (read_half, write_half) = stream.into_split();
        let mut reader = PacketReader::new(read_half);
        let mut writer = PacketWriter::new(write_half);

        let handshake: ServerBoundHandshake = decode(&reader.read_packet().await.unwrap());
        assert!(handshake.is_status_request());

        let request = reader.read_packet().await.unwrap();
        assert_eq!(request.id, 0x00);
        assert!(request.body.is_empty());

        let status = r#"{
            "version": {"name": "1.8.9", "protocol": 47},
            "players": {"max": 20, "online": 3},
            "description": {"text": "integration"}
        }"#;
        writer
            .write_packet(&encode(
                CLIENTBOUND_STATUS_RESPONSE_ID,
                &ProtocolString(status.to_string()),
            ))
            .await
            .unwrap();

        let ping: ServerBoundStatusPing = decode(&reader.read_packet().await.unwrap());
        writer
            .write_packet(&encode(
                CLIENTBOUND_STATUS_PONG_ID,
                &ClientBoundStatusPong {
                    payload: ping.payload,
                },
            ))
            .await
            .unwrap();
    });

    let client = Client::new(PacketDispatcher::new());
    let ping = timeout(
        TEST_TIMEOUT,
        client.ping(&addr.ip().to_string(), addr.port()),
    )
    .await
    .expect("ping timed out")
    .expect("ping failed");

    assert_eq!(ping.status.version.protocol, 47);
    assert_eq!(ping.status.players.online, 3);
    timeout(TEST_TIMEOUT, server).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_second_compression_threshold_fails_login() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let (read_half, write_half) = stream.into_split();
        let mut reader = PacketReader::new(read_half);
        let mut writer = PacketWriter::new(write_half);

        let _handshake = reader.read_packet().await.unwrap();
        let _login_start = reader.read_packet().await.unwrap();

        writer
            .write_packet(&encode(
                CLIENTBOUND_SET_COMPRESSION_ID,
                &ClientBoundSetCompression {
                    threshold: VarInt(256),
                },
            ))
            .await
            .unwrap();
        writer.enable_compression(256).unwrap();

        // Re-negotiating the threshold is a protocol violation on the
        // client side.
        writer
            .write_packet(&encode(
                CLIENTBOUND_SET_COMPRESSION_ID,
                &ClientBoundSetCompression {
                    threshold: VarInt(512),
                },
            ))
            .await
            .unwrap();
    });

    let client = Client::new(PacketDispatcher::new());
    let error = timeout(
        TEST_TIMEOUT,
        client.login(&addr.ip().to_string(), addr.port(), "alice", None),
    )
    .await
    .expect("login timed out")
    .expect_err("login should fail");

    match error {
        ClientError::Packet(e) => {
            assert!(e.is_fatal());
            assert!(e.to_string().contains("protocol violation"));
        }
        other => panic!("expected protocol violation, got {other:?}"),
    }

    timeout(TEST_TIMEOUT, server).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_login_disconnect_surfaces_reason() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let (read_half, write_half) = stream.into_split();
        let mut reader = PacketReader::new(read_half);
        let mut writer = PacketWriter::new(write_half);

        let _handshake = reader.read_packet().await.unwrap();
        let _login_start = reader.read_packet().await.unwrap();

        writer
            .write_packet(&encode(
                ferrocraft_protocol::java::login::CLIENTBOUND_LOGIN_DISCONNECT_ID,
                &ProtocolString(r#"{"text":"You are banned"}"#.to_string()),
            ))
            .await
            .unwrap();
    });

    let client = Client::new(PacketDispatcher::new());
    let error = timeout(
        TEST_TIMEOUT,
        client.login(&addr.ip().to_string(), addr.port(), "alice", None),
    )
    .await
    .expect("login timed out")
    .expect_err("login should fail");

    match error {
        ClientError::Disconnected { reason } => assert_eq!(reason, "You are banned"),
        other => panic!("expected disconnect, got {other:?}"),
    }

    timeout(TEST_TIMEOUT, server).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_local_disconnect_unblocks_read_loop() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut reader, _writer) = accept_and_login(listener).await;
        // Hold the connection open without sending anything further.
        let _ = reader.read_packet().await;
    });

    let client = Client::new(PacketDispatcher::new());
    let reasons = Arc::new(Mutex::new(Vec::new()));
    let _guard = client.add_listener(Arc::new(DisconnectProbe {
        reasons: Arc::clone(&reasons),
        ticks: Arc::new(AtomicUsize::new(0)),
    }));

    let session = timeout(
        TEST_TIMEOUT,
        client.login(&addr.ip().to_string(), addr.port(), "alice", None),
    )
    .await
    .unwrap()
    .unwrap();

    // No packets are in flight; the read loop is parked in a frame read.
    session.disconnect();
    timeout(TEST_TIMEOUT, session.wait())
        .await
        .expect("disconnect did not unblock the read loop");

    assert_eq!(reasons.lock().unwrap().len(), 1);
    timeout(TEST_TIMEOUT, server).await.unwrap().unwrap();
}
