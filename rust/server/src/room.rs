use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use ma_engine::action::Action;
use ma_engine::resolver::{apply as resolve, Outcome, RejectReason};
use ma_engine::state::{GameState, RoomConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::bus::{RoomId, StateBus, StateSubscription};

// Rooms host single short-lived sessions; an idle room is reclaimed after
// half an hour without any accepted message.
const DEFAULT_ROOM_TTL: Duration = Duration::from_secs(30 * 60);

/// Organizer-supplied settings for a new room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSetup {
    pub room_name: String,
    pub max_teams: usize,
    /// Fixed RNG seed for reproducible games; OS entropy when absent
    pub seed: Option<u64>,
}

/// What happened to a submitted action.
///
/// Participants never see rejections; the previous snapshot simply stays
/// current. The hosting layer still gets the reason for telemetry and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStatus {
    Applied,
    Rejected(RejectReason),
}

#[derive(Debug, Error)]
pub enum RoomError {
    #[error("room not found: {0}")]
    NotFound(RoomId),
    #[error("room expired: {0}")]
    Expired(RoomId),
    #[error("room storage poisoned")]
    StoragePoisoned,
    #[error("engine fault: {0}")]
    Engine(#[from] ma_engine::errors::GameError),
}

/// Registry of live rooms.
///
/// Exactly one manager instance per authority process owns all room state;
/// every mutation goes through [`RoomManager::apply`], which publishes the
/// complete replacement snapshot after each accepted action.
#[derive(Debug)]
pub struct RoomManager {
    rooms: RwLock<HashMap<RoomId, Arc<Room>>>,
    bus: StateBus,
    room_ttl: Duration,
}

impl RoomManager {
    pub fn new(bus: StateBus) -> Self {
        Self::with_ttl(bus, DEFAULT_ROOM_TTL)
    }

    pub fn with_ttl(bus: StateBus, ttl: Duration) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            bus,
            room_ttl: ttl,
        }
    }

    pub fn create_room(&self, setup: RoomSetup) -> Result<RoomId, RoomError> {
        let id = Uuid::new_v4().to_string();

        tracing::info!(
            room_id = %id,
            room_name = %setup.room_name,
            max_teams = setup.max_teams,
            seed = ?setup.seed,
            "creating room"
        );

        let room = Arc::new(Room::new(setup));
        let snapshot = room.snapshot()?;
        {
            let mut guard = self.rooms.write().map_err(|_| RoomError::StoragePoisoned)?;
            guard.insert(id.clone(), Arc::clone(&room));
        }
        self.bus.publish(&id, &snapshot);
        Ok(id)
    }

    /// Validates and applies `action` as the single writer for the room.
    ///
    /// On success the stored state is wholly replaced and the new snapshot
    /// goes out to every mirror. Rejections publish nothing, which is what
    /// makes duplicate and stale messages harmless.
    pub fn apply(&self, room_id: &RoomId, action: &Action) -> Result<ApplyStatus, RoomError> {
        let room = self.get_room(room_id)?;
        if room.is_expired(self.room_ttl) {
            self.expire_room(room_id)?;
            return Err(RoomError::Expired(room_id.clone()));
        }
        room.touch();

        let status = match room.apply(action) {
            Ok(status) => status,
            Err(err) => {
                tracing::error!(
                    room_id = %room_id,
                    action = ?action,
                    error = %err,
                    "engine fault while applying action"
                );
                return Err(err);
            }
        };

        match &status {
            ApplyStatus::Applied => {
                let snapshot = room.snapshot()?;
                tracing::info!(room_id = %room_id, action = ?action, "action applied");
                self.bus.publish(room_id, &snapshot);
            }
            ApplyStatus::Rejected(reason) => {
                tracing::debug!(
                    room_id = %room_id,
                    action = ?action,
                    reason = %reason,
                    "action rejected"
                );
            }
        }
        Ok(status)
    }

    /// Current snapshot of a room.
    pub fn state(&self, room_id: &RoomId) -> Result<GameState, RoomError> {
        let room = self.get_room(room_id)?;
        if room.is_expired(self.room_ttl) {
            self.expire_room(room_id)?;
            return Err(RoomError::Expired(room_id.clone()));
        }
        room.touch();
        room.snapshot()
    }

    /// Attaches a new mirror to the room.
    ///
    /// The subscription's channel immediately receives the current snapshot
    /// so a connecting or reconnecting participant synchronizes without
    /// waiting for the next transition.
    pub fn subscribe(&self, room_id: &RoomId) -> Result<StateSubscription, RoomError> {
        let room = self.get_room(room_id)?;
        let snapshot = room.snapshot()?;
        let subscription = self.bus.subscribe(room_id.clone());
        self.bus
            .prime(room_id, subscription.subscriber_id, &snapshot);
        Ok(subscription)
    }

    pub fn delete_room(&self, room_id: &RoomId) -> Result<(), RoomError> {
        match self.remove_room(room_id)? {
            Some(_) => {
                tracing::info!(room_id = %room_id, "room deleted");
                Ok(())
            }
            None => Err(RoomError::NotFound(room_id.clone())),
        }
    }

    pub fn cleanup_expired_rooms(&self) {
        let mut expired = Vec::new();
        {
            let mut guard = match self.rooms.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.retain(|id, room| {
                if room.is_expired(self.room_ttl) {
                    expired.push(id.clone());
                    false
                } else {
                    true
                }
            });
        }

        for id in expired {
            tracing::info!(room_id = %id, "room expired due to inactivity");
            self.bus.drop_room(&id);
        }
    }

    pub fn active_rooms(&self) -> Vec<RoomId> {
        match self.rooms.read() {
            Ok(guard) => guard.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn bus(&self) -> StateBus {
        self.bus.clone()
    }

    fn get_room(&self, room_id: &RoomId) -> Result<Arc<Room>, RoomError> {
        let guard = self.rooms.read().map_err(|_| RoomError::StoragePoisoned)?;
        guard
            .get(room_id)
            .cloned()
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))
    }

    fn expire_room(&self, room_id: &RoomId) -> Result<(), RoomError> {
        if self.remove_room(room_id)?.is_some() {
            tracing::info!(room_id = %room_id, "room expired due to inactivity");
        }
        Ok(())
    }

    fn remove_room(&self, room_id: &RoomId) -> Result<Option<Arc<Room>>, RoomError> {
        let removed = match self.rooms.write() {
            Ok(mut guard) => guard.remove(room_id),
            Err(_) => return Err(RoomError::StoragePoisoned),
        };
        if removed.is_some() {
            self.bus.drop_room(room_id);
        }
        Ok(removed)
    }
}

/// One room's authoritative state plus its private randomness.
///
/// Actions are applied one at a time under the state lock; the transition is
/// computed synchronously and atomically replaces the previous value, which
/// is all the synchronization the single-writer model needs.
pub struct Room {
    state: Mutex<GameState>,
    rng: Mutex<ChaCha20Rng>,
    created_at: Instant,
    last_active: Mutex<Instant>,
}

impl std::fmt::Debug for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Room")
            .field("state", &self.state)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl Room {
    fn new(setup: RoomSetup) -> Self {
        let rng = match setup.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_os_rng(),
        };
        let state = GameState::new(RoomConfig {
            room_name: setup.room_name,
            max_teams: setup.max_teams,
        });
        let now = Instant::now();
        Self {
            state: Mutex::new(state),
            rng: Mutex::new(rng),
            created_at: now,
            last_active: Mutex::new(now),
        }
    }

    fn apply(&self, action: &Action) -> Result<ApplyStatus, RoomError> {
        let mut state = self.state.lock().map_err(|_| RoomError::StoragePoisoned)?;
        let mut rng = self.rng.lock().map_err(|_| RoomError::StoragePoisoned)?;
        match resolve(&state, action, &mut *rng)? {
            Outcome::Applied(next) => {
                *state = next;
                Ok(ApplyStatus::Applied)
            }
            Outcome::Rejected(reason) => Ok(ApplyStatus::Rejected(reason)),
        }
    }

    pub fn snapshot(&self) -> Result<GameState, RoomError> {
        Ok(self
            .state
            .lock()
            .map_err(|_| RoomError::StoragePoisoned)?
            .clone())
    }

    fn touch(&self) {
        if let Ok(mut guard) = self.last_active.lock() {
            *guard = Instant::now();
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        match self.last_active.lock() {
            Ok(last) => last.elapsed() >= ttl,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
impl Room {
    fn force_last_active(&self, instant: Instant) {
        if let Ok(mut guard) = self.last_active.lock() {
            *guard = instant;
        }
    }
}
