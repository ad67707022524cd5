//! In-process fan-out of data-access failures to interested listeners.
//!
//! Handlers run synchronously inside [`ErrorChannel::emit`]. Nothing is
//! queued: an event emitted while nobody listens is dropped.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, RwLock,
};

use crate::store::PermissionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Permission,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorEvent {
    Permission(PermissionError),
}

impl ErrorEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ErrorEvent::Permission(_) => EventKind::Permission,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Arc<dyn Fn(&ErrorEvent) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: AtomicU64,
    entries: RwLock<Vec<(SubscriptionId, EventKind, Handler)>>,
}

/// Cloneable handle; clones share the same set of listeners.
#[derive(Clone, Default)]
pub struct ErrorChannel {
    listeners: Arc<Listeners>,
}

impl ErrorChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: Fn(&ErrorEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.listeners.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((id, kind, Arc::new(handler)));
        id
    }

    /// Returns `false` when `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut entries = self
            .listeners
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = entries.len();
        entries.retain(|(entry, _, _)| *entry != id);
        entries.len() != before
    }

    pub fn emit(&self, event: ErrorEvent) {
        // ハンドラ内から subscribe/unsubscribe できるようロックを外してから呼ぶ
        let handlers: Vec<Handler> = self
            .listeners
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|(_, kind, _)| *kind == event.kind())
            .map(|(_, _, handler)| handler.clone())
            .collect();
        if handlers.is_empty() {
            tracing::debug!(kind = ?event.kind(), "error event dropped: no subscriber");
        }
        for handler in handlers {
            handler(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Operation;
    use std::sync::Mutex;

    fn denied(path: &str) -> ErrorEvent {
        ErrorEvent::Permission(PermissionError::new(path, Operation::Get, None))
    }

    #[test]
    fn every_subscriber_receives_the_event() {
        let channel = ErrorChannel::new();
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));

        let sink = first.clone();
        channel.subscribe(EventKind::Permission, move |e| sink.lock().unwrap().push(e.clone()));
        let sink = second.clone();
        channel.subscribe(EventKind::Permission, move |e| sink.lock().unwrap().push(e.clone()));

        channel.emit(denied("rooms/r1"));

        assert_eq!(*first.lock().unwrap(), vec![denied("rooms/r1")]);
        assert_eq!(*second.lock().unwrap(), vec![denied("rooms/r1")]);
    }

    #[test]
    fn unsubscribed_handlers_stop_receiving() {
        let channel = ErrorChannel::new();
        let seen = Arc::new(Mutex::new(0));
        let sink = seen.clone();
        let id = channel.subscribe(EventKind::Permission, move |_| *sink.lock().unwrap() += 1);

        channel.emit(denied("users/u1"));
        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id));
        channel.emit(denied("users/u1"));

        assert_eq!(*seen.lock().unwrap(), 1);
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn events_without_listeners_are_dropped() {
        let channel = ErrorChannel::new();
        channel.emit(denied("reservations"));

        // 後から購読しても過去のイベントは届かない
        let seen = Arc::new(Mutex::new(0));
        let sink = seen.clone();
        channel.subscribe(EventKind::Permission, move |_| *sink.lock().unwrap() += 1);
        assert_eq!(*seen.lock().unwrap(), 0);
    }

    #[test]
    fn clones_share_listeners() {
        let channel = ErrorChannel::new();
        let clone = channel.clone();
        let seen = Arc::new(Mutex::new(0));
        let sink = seen.clone();
        channel.subscribe(EventKind::Permission, move |_| *sink.lock().unwrap() += 1);
        clone.emit(denied("rooms/r2"));
        assert_eq!(*seen.lock().unwrap(), 1);
    }
}
