use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use ma_engine::state::GameState;
use tokio::sync::mpsc;

// Bounded per-subscriber buffer. A mirror that stops draining its channel
// loses snapshots rather than stalling the authority; any later snapshot
// fully supersedes the missed ones.
const SNAPSHOT_CHANNEL_BUFFER: usize = 64;

pub type RoomId = String;
pub type SnapshotSender = mpsc::Sender<GameState>;
pub type SnapshotReceiver = mpsc::Receiver<GameState>;

/// Live feed of full-state snapshots for one room. Dropping the
/// subscription unsubscribes it from the bus.
pub struct StateSubscription {
    bus: StateBus,
    room_id: RoomId,
    pub(crate) subscriber_id: usize,
    pub receiver: SnapshotReceiver,
}

impl StateSubscription {
    pub fn receiver(&mut self) -> &mut SnapshotReceiver {
        &mut self.receiver
    }
}

impl Drop for StateSubscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(&self.room_id, self.subscriber_id);
    }
}

/// Fan-out of authoritative snapshots to participant mirrors.
///
/// Each published value is a complete [`GameState`]; mirrors replace their
/// entire local copy with it, there is never a field-level merge.
#[derive(Debug, Clone, Default)]
pub struct StateBus {
    inner: Arc<StateBusInner>,
}

#[derive(Debug, Default)]
struct StateBusInner {
    subscribers: RwLock<HashMap<RoomId, Vec<(usize, SnapshotSender)>>>,
    next_id: AtomicUsize,
}

impl StateBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, room_id: RoomId) -> StateSubscription {
        let (subscriber_id, receiver) = self.subscribe_raw(room_id.clone());
        StateSubscription {
            bus: self.clone(),
            room_id,
            subscriber_id,
            receiver,
        }
    }

    fn subscribe_raw(&self, room_id: RoomId) -> (usize, SnapshotReceiver) {
        let (tx, rx) = mpsc::channel(SNAPSHOT_CHANNEL_BUFFER);
        let id = self.inner.next_id.fetch_add(1, Ordering::AcqRel);
        {
            let mut guard = self
                .inner
                .subscribers
                .write()
                .expect("subscriber lock poisoned");
            guard.entry(room_id.clone()).or_default().push((id, tx));
        }

        tracing::info!(
            room_id = %room_id,
            subscriber_id = id,
            "mirror subscribed to snapshots"
        );

        (id, rx)
    }

    /// Publishes a snapshot to every mirror of the room.
    ///
    /// Uses `try_send` so a slow subscriber never blocks the authority;
    /// subscribers whose channel is gone or full are pruned.
    pub fn publish(&self, room_id: &str, snapshot: &GameState) {
        let subscribers = {
            let guard = self
                .inner
                .subscribers
                .read()
                .expect("subscriber lock poisoned");
            guard.get(room_id).cloned()
        };

        let Some(list) = subscribers else {
            tracing::debug!(room_id = %room_id, "no mirrors for room");
            return;
        };

        tracing::trace!(
            room_id = %room_id,
            subscriber_count = list.len(),
            "publishing snapshot"
        );

        let mut failed = Vec::new();
        for (id, sender) in list {
            if let Err(e) = sender.try_send(snapshot.clone()) {
                tracing::warn!(
                    room_id = %room_id,
                    subscriber_id = id,
                    error = ?e,
                    "failed to deliver snapshot to mirror"
                );
                failed.push(id);
            }
        }
        if !failed.is_empty() {
            self.remove_subscribers(room_id, &failed);
        }
    }

    /// Sends the current snapshot to one just-connected subscriber so it can
    /// synchronize before any further transition.
    pub(crate) fn prime(&self, room_id: &str, subscriber_id: usize, snapshot: &GameState) {
        let sender = {
            let guard = self
                .inner
                .subscribers
                .read()
                .expect("subscriber lock poisoned");
            guard.get(room_id).and_then(|list| {
                list.iter()
                    .find(|(id, _)| *id == subscriber_id)
                    .map(|(_, tx)| tx.clone())
            })
        };
        if let Some(sender) = sender {
            let _ = sender.try_send(snapshot.clone());
        }
    }

    pub fn unsubscribe(&self, room_id: &str, subscriber_id: usize) {
        self.remove_subscribers(room_id, &[subscriber_id]);
    }

    pub fn drop_room(&self, room_id: &str) {
        let mut guard = self
            .inner
            .subscribers
            .write()
            .expect("subscriber lock poisoned");
        guard.remove(room_id);
    }

    pub fn subscriber_count(&self) -> usize {
        let guard = self
            .inner
            .subscribers
            .read()
            .expect("subscriber lock poisoned");
        guard.values().map(|list| list.len()).sum()
    }

    fn remove_subscribers(&self, room_id: &str, ids: &[usize]) {
        let mut guard = self
            .inner
            .subscribers
            .write()
            .expect("subscriber lock poisoned");
        if let Some(list) = guard.get_mut(room_id) {
            list.retain(|(id, _)| !ids.contains(id));
            if list.is_empty() {
                guard.remove(room_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ma_engine::state::RoomConfig;

    fn snapshot() -> GameState {
        GameState::new(RoomConfig {
            room_name: "bus test".to_string(),
            max_teams: 5,
        })
    }

    #[test]
    fn subscription_drop_unsubscribes() {
        let bus = StateBus::new();
        {
            let _sub = bus.subscribe("r".to_string());
            assert_eq!(bus.subscriber_count(), 1);
        }
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn publish_reaches_all_mirrors_of_the_room() {
        let bus = StateBus::new();
        let mut sub1 = bus.subscribe("r".to_string());
        let mut sub2 = bus.subscribe("r".to_string());
        let mut other = bus.subscribe("other".to_string());

        bus.publish("r", &snapshot());

        assert!(sub1.receiver.try_recv().is_ok());
        assert!(sub2.receiver.try_recv().is_ok());
        assert!(other.receiver.try_recv().is_err(), "rooms are isolated");
    }

    #[test]
    fn stale_receiver_is_pruned() {
        let bus = StateBus::new();
        let (id, rx) = bus.subscribe_raw("r".to_string());
        drop(rx);

        bus.publish("r", &snapshot());
        assert_eq!(bus.subscriber_count(), 0);
        // Unsubscribing after the prune must not panic.
        bus.unsubscribe("r", id);
    }

    #[test]
    fn prime_targets_a_single_subscriber() {
        let bus = StateBus::new();
        let mut first = bus.subscribe("r".to_string());
        let mut second = bus.subscribe("r".to_string());

        bus.prime("r", second.subscriber_id, &snapshot());
        assert!(second.receiver.try_recv().is_ok());
        assert!(first.receiver.try_recv().is_err());
    }
}
