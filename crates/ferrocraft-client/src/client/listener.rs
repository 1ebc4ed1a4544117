use std::sync::{Arc, Mutex, Weak};

/// Time- and lifecycle-based callbacks, orthogonal to packet handling.
/// `on_tick` runs on the tick loop's schedule, independent of packet
/// arrival; `on_disconnect` fires exactly once when the session ends.
/// Both run off the packet path, so state shared with packet handlers
/// needs its own synchronization.
pub trait ClientListener: Send + Sync {
    fn on_tick(&self) {}
    fn on_disconnect(&self, _reason: &str) {}
}

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    listeners: Vec<(u64, Arc<dyn ClientListener>)>,
}

/// Registration-order set of client listeners, shared between the client,
/// the tick loop and the read loop.
#[derive(Clone, Default)]
pub struct ListenerSet {
    table: Arc<Mutex<ListenerTable>>,
}

impl ListenerSet {
    pub fn add(&self, listener: Arc<dyn ClientListener>) -> ListenerRegistration {
        let mut table = self.table.lock().expect("listener table poisoned");
        let id = table.next_id;
        table.next_id += 1;
        table.listeners.push((id, listener));

        ListenerRegistration {
            id,
            table: Arc::downgrade(&self.table),
        }
    }

    fn snapshot(&self) -> Vec<Arc<dyn ClientListener>> {
        let table = self.table.lock().expect("listener table poisoned");
        table
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }

    pub(crate) fn notify_tick(&self) {
        for listener in self.snapshot() {
            listener.on_tick();
        }
    }

    pub(crate) fn notify_disconnect(&self, reason: &str) {
        for listener in self.snapshot() {
            listener.on_disconnect(reason);
        }
    }
}

/// Scoped guard mirroring
/// [`HandlerRegistration`](crate::dispatch::HandlerRegistration): release
/// or drop to stop receiving callbacks.
#[must_use = "dropping the registration immediately removes the listener"]
pub struct ListenerRegistration {
    id: u64,
    table: Weak<Mutex<ListenerTable>>,
}

impl ListenerRegistration {
    pub fn release(self) {}
}

impl Drop for ListenerRegistration {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            if let Ok(mut table) = table.lock() {
                table.listeners.retain(|(id, _)| *id != self.id);
            }
        }
    }
}
