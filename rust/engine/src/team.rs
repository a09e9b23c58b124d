use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::score::net_score;

/// Chip count every team starts a session with.
pub const STARTING_CHIPS: i32 = 9;

/// Identifier of a team, assigned at creation and stable for the room's
/// lifetime. Minted by the resolver from the injected RNG so that seeded
/// games are fully reproducible.
pub type TeamId = String;

/// A connected participant. Owned by exactly one team; removed again when
/// the device disconnects.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    /// Opaque identity supplied by the participant's device
    pub client_id: String,
    pub name: String,
}

/// The last bidding action a team took. Display data only; cleared when a
/// new session starts.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LastAction {
    Pass,
    Take,
}

/// The unit of competition.
///
/// A team is created the first time a join request names an unused group
/// number and persists for the room's lifetime. It survives member
/// disconnects; only a reset returns its chips and cards to their starting
/// state.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Unique within the room; join requests target teams by this number
    pub group_number: u32,
    pub chips: i32,
    /// Face values of taken projects, append-only during a session
    pub cards: Vec<Card>,
    /// Always equals `net_score(&cards, chips)`; the resolver recomputes it
    /// after every mutation, it is never set independently
    pub score: i32,
    pub last_action: Option<LastAction>,
    /// Insertion-ordered; may be empty while everyone is disconnected
    pub members: Vec<TeamMember>,
}

impl Team {
    pub fn new(id: TeamId, name: String, group_number: u32) -> Self {
        Self {
            id,
            name,
            group_number,
            chips: STARTING_CHIPS,
            cards: Vec::new(),
            score: STARTING_CHIPS,
            last_action: None,
            members: Vec::new(),
        }
    }

    pub fn has_member(&self, client_id: &str) -> bool {
        self.members.iter().any(|m| m.client_id == client_id)
    }

    /// Returns the team to its starting chip/card state, keeping the roster.
    pub fn reset(&mut self) {
        self.chips = STARTING_CHIPS;
        self.cards.clear();
        self.score = STARTING_CHIPS;
        self.last_action = None;
    }

    pub(crate) fn recompute_score(&mut self) {
        self.score = net_score(&self.cards, self.chips);
    }
}
