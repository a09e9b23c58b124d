//! # minus-auction-server: Authoritative State Replicator
//!
//! Holds the single live [`GameState`](ma_engine::state::GameState) per room,
//! applies engine transitions as the one writer, and republishes the full
//! state to every participant mirror after each accepted action. Transport
//! towards participants is a collaborator's concern; this crate ends at the
//! snapshot channel.
//!
//! - [`room`] - Room registry and the per-room authority
//! - [`bus`] - Snapshot fan-out to participant mirrors
//! - [`logging`] - Process-wide tracing setup

pub mod bus;
pub mod logging;
pub mod room;

pub use bus::{RoomId, SnapshotReceiver, StateBus, StateSubscription};
pub use logging::init_logging;
pub use room::{ApplyStatus, Room, RoomError, RoomManager, RoomSetup};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_manager_holds_no_rooms_or_mirrors() {
        let bus = StateBus::new();
        let manager = RoomManager::new(bus.clone());

        assert!(manager.active_rooms().is_empty());
        assert_eq!(bus.subscriber_count(), 0);
    }
}
