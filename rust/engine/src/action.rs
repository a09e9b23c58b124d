use serde::{Deserialize, Serialize};

use crate::team::TeamId;

/// Messages consumed by the authority.
///
/// The wire representation matches the room transport: a `type` discriminant
/// plus a `payload` object. The engine validates and applies these as-is; it
/// never gates who may send `Start`/`Reset`; admin authorization belongs to
/// the hosting layer.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Action {
    /// Join an existing team by group number, or found a new one
    #[serde(rename = "JOIN_REQUEST", rename_all = "camelCase")]
    Join {
        name: String,
        #[serde(rename = "group")]
        group_number: u32,
        client_id: String,
    },
    /// Device disconnected; drop its member entry wherever it sits
    #[serde(rename = "LEAVE_NOTIFY", rename_all = "camelCase")]
    Leave { client_id: String },
    /// Decline the open card, paying one chip into the pot
    #[serde(rename = "ACTION_PASS", rename_all = "camelCase")]
    Pass { team_id: TeamId },
    /// Take the open card together with the accumulated pot
    #[serde(rename = "ACTION_TAKE", rename_all = "camelCase")]
    Take { team_id: TeamId },
    /// Begin a playing session
    #[serde(rename = "ADMIN_START_GAME")]
    Start {},
    /// Return the room to the lobby with fresh team resources
    #[serde(rename = "ADMIN_RESET")]
    Reset {},
}
