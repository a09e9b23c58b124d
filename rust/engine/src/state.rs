use serde::{Deserialize, Serialize};

use crate::cards::{Card, DECK_SIZE};
use crate::errors::GameError;
use crate::team::{Team, TeamId};

/// Minimum number of registered teams required to start a session.
pub const MIN_TEAMS: usize = 3;

/// Lifecycle phase of a room. Actions are phase-gated: pass/take are valid
/// only while `Playing`, join is valid in any phase.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    Lobby,
    Playing,
    GameOver,
}

/// Room settings chosen by the organizer at creation time. Immutable for
/// the room's lifetime; a reset carries them over unchanged.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomConfig {
    pub room_name: String,
    pub max_teams: usize,
}

/// The single source of truth for one room.
///
/// Every authoritative transition replaces the whole value; nothing is ever
/// patched in place. Participant mirrors likewise replace their entire local
/// copy with each published snapshot.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub phase: GamePhase,
    pub room_config: RoomConfig,
    /// Remaining cards; the next card to reveal is the last element
    pub deck: Vec<Card>,
    /// Card currently open for bidding, `None` outside a session
    pub current_card: Option<Card>,
    /// Chips accumulated for the open card; resets whenever a card is revealed
    pub pot: i32,
    /// Card withheld at session start, never revealed or scored
    pub hidden_card: Option<Card>,
    /// Kept sorted ascending by group number
    pub teams: Vec<Team>,
    /// Index into `teams` of the team to act
    pub current_turn_index: usize,
    /// Human-readable event feed, append-only; display data, not diagnostics
    pub logs: Vec<String>,
    /// Highest-scoring team once the deck is exhausted
    pub winner_id: Option<TeamId>,
}

impl GameState {
    /// Fresh lobby state for a newly created room.
    pub fn new(room_config: RoomConfig) -> Self {
        let logs = vec![format!(
            "[SYSTEM] Room open: {} (up to {} teams)",
            room_config.room_name, room_config.max_teams
        )];
        Self {
            phase: GamePhase::Lobby,
            room_config,
            deck: Vec::new(),
            current_card: None,
            pot: 0,
            hidden_card: None,
            teams: Vec::new(),
            current_turn_index: 0,
            logs,
            winner_id: None,
        }
    }

    /// Team whose turn it is, if any.
    pub fn current_team(&self) -> Option<&Team> {
        self.teams.get(self.current_turn_index)
    }

    pub fn team_by_group(&self, group_number: u32) -> Option<&Team> {
        self.teams.iter().find(|t| t.group_number == group_number)
    }

    /// Verifies that no card has been duplicated or lost.
    ///
    /// From session start onward the remaining deck, the open card, the
    /// hidden card and every card held by a team must add up to exactly the
    /// full deck. A mismatch is not a rule rejection but a fatal
    /// implementation fault the caller should alert on.
    pub fn check_card_conservation(&self) -> Result<(), GameError> {
        if !matches!(self.phase, GamePhase::Playing | GamePhase::GameOver) {
            return Ok(());
        }
        let held: usize = self.teams.iter().map(|t| t.cards.len()).sum();
        let open = usize::from(self.current_card.is_some());
        let hidden = usize::from(self.hidden_card.is_some());
        let counted = self.deck.len() + held + open + hidden;
        if counted == DECK_SIZE {
            Ok(())
        } else {
            Err(GameError::CardConservation {
                expected: DECK_SIZE,
                counted,
            })
        }
    }
}
