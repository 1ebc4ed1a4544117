//! Typed packet routing.
//!
//! The dispatcher keys callbacks by `(phase, packet kind)` and fans a
//! decoded packet out to every handler registered for that pair, in
//! registration order. Handlers opt into exactly the packet types they
//! implement [`HandlePacket`] for; everything else never reaches them.
//!
//! Registration returns a [`HandlerRegistration`] guard; releasing or
//! dropping it removes the entry, so a handler's subscriptions cannot
//! outlive it. Registration and removal may happen on any thread: only
//! the table itself is behind a lock, and dispatch snapshots the callback
//! list before invoking it, so handlers run without the lock held.
//! Registering or unregistering from inside a handler during a dispatch
//! of the same dispatcher takes effect for subsequent dispatches only;
//! the ordering within the in-progress dispatch is unspecified.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use tracing::trace;

use ferrocraft_protocol::java::{ClientBoundPacket, FromClientBound, PacketKind};
use ferrocraft_protocol::ProtocolPhase;

/// Capability to receive packets of one concrete type. Implement it once
/// per packet type a consumer cares about; there are no default-no-op
/// methods to wade through.
pub trait HandlePacket<P>: Send + Sync {
    fn handle_packet(&self, packet: &P);
}

/// Blanket impl so plain closures can subscribe.
impl<P, F> HandlePacket<P> for F
where
    F: Fn(&P) + Send + Sync,
{
    fn handle_packet(&self, packet: &P) {
        self(packet)
    }
}

type Callback = Arc<dyn Fn(&ClientBoundPacket) + Send + Sync>;

#[derive(Default)]
struct DispatchTable {
    next_id: u64,
    entries: HashMap<(ProtocolPhase, PacketKind), Vec<(u64, Callback)>>,
}

impl DispatchTable {
    fn remove(&mut self, key: (ProtocolPhase, PacketKind), id: u64) {
        if let Some(list) = self.entries.get_mut(&key) {
            list.retain(|(entry_id, _)| *entry_id != id);
            if list.is_empty() {
                self.entries.remove(&key);
            }
        }
    }
}

/// Routes decoded packets to registered handlers. Cheap to share; one
/// dispatcher typically outlives several connections (a status ping and
/// the game session reuse the same one).
#[derive(Clone, Default)]
pub struct PacketDispatcher {
    table: Arc<Mutex<DispatchTable>>,
}

impl PacketDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `handler` to packets of type `P` in `phase`. The
    /// subscription lives until the returned guard is released or
    /// dropped.
    pub fn register<P, H>(&self, phase: ProtocolPhase, handler: Arc<H>) -> HandlerRegistration
    where
        P: FromClientBound + 'static,
        H: HandlePacket<P> + 'static,
    {
        let callback: Callback = Arc::new(move |packet: &ClientBoundPacket| {
            if let Some(typed) = P::from_client_bound(packet) {
                handler.handle_packet(typed);
            }
        });

        let key = (phase, P::KIND);
        let mut table = self.table.lock().expect("dispatch table poisoned");
        let id = table.next_id;
        table.next_id += 1;
        table.entries.entry(key).or_default().push((id, callback));

        HandlerRegistration {
            key,
            id,
            table: Arc::downgrade(&self.table),
        }
    }

    /// Fans `packet` out to every handler registered for its kind under
    /// `phase`, in registration order. Synchronous: handlers run on the
    /// caller's task and must not block.
    pub fn dispatch(&self, phase: ProtocolPhase, packet: &ClientBoundPacket) {
        let callbacks: Vec<Callback> = {
            let table = self.table.lock().expect("dispatch table poisoned");
            match table.entries.get(&(phase, packet.kind())) {
                Some(list) => list.iter().map(|(_, cb)| Arc::clone(cb)).collect(),
                None => return,
            }
        };

        trace!(phase = %phase, kind = ?packet.kind(), handlers = callbacks.len(), "dispatch");
        for callback in callbacks {
            callback(packet);
        }
    }

    /// Number of live subscriptions for a key, mostly for diagnostics.
    pub fn handler_count(&self, phase: ProtocolPhase, kind: PacketKind) -> usize {
        let table = self.table.lock().expect("dispatch table poisoned");
        table
            .entries
            .get(&(phase, kind))
            .map_or(0, |list| list.len())
    }
}

/// Scoped subscription guard. Dropping it (or calling
/// [`HandlerRegistration::release`]) removes the registration; after
/// that the handler is never invoked again even if it is still alive.
#[must_use = "dropping the registration immediately unsubscribes the handler"]
pub struct HandlerRegistration {
    key: (ProtocolPhase, PacketKind),
    id: u64,
    table: Weak<Mutex<DispatchTable>>,
}

impl HandlerRegistration {
    pub fn release(self) {}
}

impl Drop for HandlerRegistration {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            if let Ok(mut table) = table.lock() {
                table.remove(self.key, self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrocraft_protocol::java::play::{ClientBoundChat, ClientBoundKeepAlive};
    use ferrocraft_protocol::types::{ProtocolString, VarInt};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use ferrocraft_protocol::java::play::ChatPosition;

    struct Recorder {
        label: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl HandlePacket<ClientBoundChat> for Recorder {
        fn handle_packet(&self, _packet: &ClientBoundChat) {
            self.log.lock().unwrap().push(self.label);
        }
    }

    fn chat_packet() -> ClientBoundPacket {
        ClientBoundChat {
            data: ProtocolString(r#"{"text":"hi"}"#.to_string()),
            position: ChatPosition::Chat,
        }
        .into()
    }

    #[test]
    fn test_fan_out_in_registration_order() {
        let dispatcher = PacketDispatcher::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let _first = dispatcher.register::<ClientBoundChat, _>(
            ProtocolPhase::Play,
            Arc::new(Recorder {
                label: "first",
                log: Arc::clone(&log),
            }),
        );
        let _second = dispatcher.register::<ClientBoundChat, _>(
            ProtocolPhase::Play,
            Arc::new(Recorder {
                label: "second",
                log: Arc::clone(&log),
            }),
        );
        let _third = dispatcher.register::<ClientBoundChat, _>(
            ProtocolPhase::Play,
            Arc::new(Recorder {
                label: "third",
                log: Arc::clone(&log),
            }),
        );

        // A handler for a different packet type must stay silent.
        let keep_alives = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&keep_alives);
        let _fourth = dispatcher.register::<ClientBoundKeepAlive, _>(
            ProtocolPhase::Play,
            Arc::new(move |_: &ClientBoundKeepAlive| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        dispatcher.dispatch(ProtocolPhase::Play, &chat_packet());

        assert_eq!(&*log.lock().unwrap(), &["first", "second", "third"]);
        assert_eq!(keep_alives.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_release_unsubscribes() {
        let dispatcher = PacketDispatcher::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let handler = Arc::new(move |_: &ClientBoundChat| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let registration =
            dispatcher.register::<ClientBoundChat, _>(ProtocolPhase::Play, Arc::clone(&handler));
        dispatcher.dispatch(ProtocolPhase::Play, &chat_packet());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        registration.release();
        // The handler itself is still reachable through `handler`, but its
        // registration is gone.
        dispatcher.dispatch(ProtocolPhase::Play, &chat_packet());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            dispatcher.handler_count(ProtocolPhase::Play, PacketKind::Chat),
            0
        );
    }

    #[test]
    fn test_phase_scopes_registration() {
        let dispatcher = PacketDispatcher::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let _registration = dispatcher.register::<ClientBoundKeepAlive, _>(
            ProtocolPhase::Play,
            Arc::new(move |_: &ClientBoundKeepAlive| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        let keep_alive: ClientBoundPacket = ClientBoundKeepAlive {
            keep_alive_id: VarInt(1),
        }
        .into();

        dispatcher.dispatch(ProtocolPhase::Login, &keep_alive);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        dispatcher.dispatch(ProtocolPhase::Play, &keep_alive);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_one_handler_many_subscriptions() {
        let dispatcher = PacketDispatcher::new();
        let calls = Arc::new(AtomicUsize::new(0));

        struct Everything(Arc<AtomicUsize>);
        impl HandlePacket<ClientBoundChat> for Everything {
            fn handle_packet(&self, _: &ClientBoundChat) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
        impl HandlePacket<ClientBoundKeepAlive> for Everything {
            fn handle_packet(&self, _: &ClientBoundKeepAlive) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let handler = Arc::new(Everything(Arc::clone(&calls)));
        let registrations = vec![
            dispatcher.register::<ClientBoundChat, _>(ProtocolPhase::Play, Arc::clone(&handler)),
            dispatcher
                .register::<ClientBoundKeepAlive, _>(ProtocolPhase::Play, Arc::clone(&handler)),
        ];

        dispatcher.dispatch(ProtocolPhase::Play, &chat_packet());
        dispatcher.dispatch(
            ProtocolPhase::Play,
            &ClientBoundKeepAlive {
                keep_alive_id: VarInt(3),
            }
            .into(),
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        drop(registrations);
        dispatcher.dispatch(ProtocolPhase::Play, &chat_packet());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
