use rand::Rng;
use thiserror::Error;

use crate::action::Action;
use crate::deck::shuffled_deck;
use crate::errors::GameError;
use crate::state::{GamePhase, GameState, MIN_TEAMS};
use crate::team::{LastAction, Team, TeamId, TeamMember};

/// Result of applying an action.
///
/// `Rejected` keeps the silent no-op contract towards participants (the
/// caller publishes nothing and the previous state stays authoritative)
/// while naming the reason for tests and telemetry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied(GameState),
    Rejected(RejectReason),
}

/// Why an action was dropped. Never surfaced to participants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("action is not valid in the current phase")]
    WrongPhase,
    #[error("client is already a member of that team")]
    AlreadyMember,
    #[error("room already holds its maximum number of teams")]
    RoomFull,
    #[error("client is not a member of any team")]
    UnknownClient,
    #[error("it is another team's turn")]
    OutOfTurn,
    #[error("too few teams registered to start")]
    NotEnoughTeams,
    #[error("every team needs at least one connected member")]
    EmptyTeam,
}

/// Applies `action` to `state`, producing the complete replacement state.
///
/// Pure with respect to its inputs: `state` is never mutated, and the same
/// (state, action, rng state) triple always yields the same outcome. `rng`
/// drives the shuffle, the starting-turn pick and new team ids.
///
/// Card conservation is checked on entry and on every produced state; a
/// violation is the one condition reported as a hard error instead of a
/// rejection.
///
/// # Errors
///
/// Returns [`GameError::CardConservation`] when `state` (or the state this
/// transition would produce) has lost or duplicated a card.
pub fn apply<R: Rng>(
    state: &GameState,
    action: &Action,
    rng: &mut R,
) -> Result<Outcome, GameError> {
    state.check_card_conservation()?;

    let outcome = match action {
        Action::Join {
            name,
            group_number,
            client_id,
        } => join(state, name, *group_number, client_id, rng),
        Action::Leave { client_id } => leave(state, client_id),
        Action::Pass { team_id } => pass(state, team_id),
        Action::Take { team_id } => take(state, team_id),
        Action::Start {} => start(state, rng),
        Action::Reset {} => reset(state),
    };

    if let Outcome::Applied(next) = &outcome {
        next.check_card_conservation()?;
    }
    Ok(outcome)
}

fn join<R: Rng>(
    state: &GameState,
    name: &str,
    group_number: u32,
    client_id: &str,
    rng: &mut R,
) -> Outcome {
    let mut next = state.clone();

    if let Some(team) = next
        .teams
        .iter_mut()
        .find(|t| t.group_number == group_number)
    {
        if team.has_member(client_id) {
            return Outcome::Rejected(RejectReason::AlreadyMember);
        }
        team.members.push(TeamMember {
            client_id: client_id.to_string(),
            name: name.to_string(),
        });
        next.logs
            .push(format!("[SYSTEM] '{name}' joined group {group_number}."));
    } else {
        if next.teams.len() >= next.room_config.max_teams {
            return Outcome::Rejected(RejectReason::RoomFull);
        }
        let mut team = Team::new(mint_team_id(rng), format!("{name} (lead)"), group_number);
        team.members.push(TeamMember {
            client_id: client_id.to_string(),
            name: name.to_string(),
        });
        next.logs.push(format!(
            "[SYSTEM] Group {group_number} ('{}') registered.",
            team.name
        ));
        next.teams.push(team);
    }

    next.teams.sort_by_key(|t| t.group_number);
    Outcome::Applied(next)
}

fn leave(state: &GameState, client_id: &str) -> Outcome {
    if !state.teams.iter().any(|t| t.has_member(client_id)) {
        return Outcome::Rejected(RejectReason::UnknownClient);
    }
    let mut next = state.clone();
    for team in &mut next.teams {
        team.members.retain(|m| m.client_id != client_id);
    }
    Outcome::Applied(next)
}

fn pass(state: &GameState, team_id: &str) -> Outcome {
    if state.phase != GamePhase::Playing {
        return Outcome::Rejected(RejectReason::WrongPhase);
    }
    match state.current_team() {
        Some(current) if current.id == team_id => {}
        _ => return Outcome::Rejected(RejectReason::OutOfTurn),
    }

    let mut next = state.clone();
    let idx = next.current_turn_index;
    let team = &mut next.teams[idx];
    // No floor on chips: a team may pass itself into the negative.
    team.chips -= 1;
    team.recompute_score();
    team.last_action = Some(LastAction::Pass);
    let group = team.group_number;

    next.pot += 1;
    next.current_turn_index = (idx + 1) % next.teams.len();
    next.logs
        .push(format!("[BID] Group {group}: passed (paid 1 chip)"));
    Outcome::Applied(next)
}

fn take(state: &GameState, team_id: &str) -> Outcome {
    if state.phase != GamePhase::Playing {
        return Outcome::Rejected(RejectReason::WrongPhase);
    }
    match state.current_team() {
        Some(current) if current.id == team_id => {}
        _ => return Outcome::Rejected(RejectReason::OutOfTurn),
    }
    let Some(card) = state.current_card else {
        return Outcome::Rejected(RejectReason::WrongPhase);
    };

    let mut next = state.clone();
    let pot = next.pot;
    let idx = next.current_turn_index;
    let team = &mut next.teams[idx];
    team.cards.push(card);
    team.chips += pot;
    team.recompute_score();
    team.last_action = Some(LastAction::Take);
    let group = team.group_number;

    next.logs.push(format!(
        "[SUCCESS] Group {group}: took project {card} (gained {pot} chips)"
    ));

    match next.deck.pop() {
        Some(revealed) => {
            next.current_card = Some(revealed);
            next.pot = 0;
            // Taking never advances the turn; only passing does. The taking
            // team keeps facing new cards until it chooses to pass.
            next.logs.push(format!("[NEW] Next project up: {revealed}"));
        }
        None => {
            next.phase = GamePhase::GameOver;
            next.current_card = None;
            next.pot = 0;
            next.winner_id = winner(&next.teams);
            next.logs
                .push("[SYSTEM] All projects have been auctioned.".to_string());
        }
    }
    Outcome::Applied(next)
}

fn start<R: Rng>(state: &GameState, rng: &mut R) -> Outcome {
    if state.phase != GamePhase::Lobby {
        return Outcome::Rejected(RejectReason::WrongPhase);
    }
    if state.teams.len() < MIN_TEAMS {
        return Outcome::Rejected(RejectReason::NotEnoughTeams);
    }
    if state.teams.iter().any(|t| t.members.is_empty()) {
        return Outcome::Rejected(RejectReason::EmptyTeam);
    }

    let mut next = state.clone();
    let mut deck = shuffled_deck(rng);
    next.hidden_card = deck.pop();
    let first = deck.pop();
    next.current_card = first;
    next.deck = deck;
    next.pot = 0;
    next.winner_id = None;
    for team in &mut next.teams {
        team.last_action = None;
    }
    next.current_turn_index = rng.random_range(0..next.teams.len());
    next.phase = GamePhase::Playing;

    next.logs
        .push("[SYSTEM] Bidding session started.".to_string());
    next.logs
        .push("[SYSTEM] One sealed project was removed from the deck.".to_string());
    if let Some(card) = first {
        next.logs.push(format!("[NEW] First project up: {card}"));
    }
    Outcome::Applied(next)
}

fn reset(state: &GameState) -> Outcome {
    if state.phase == GamePhase::Lobby {
        return Outcome::Rejected(RejectReason::WrongPhase);
    }

    let mut next = state.clone();
    next.phase = GamePhase::Lobby;
    next.deck.clear();
    next.current_card = None;
    next.pot = 0;
    next.hidden_card = None;
    next.current_turn_index = 0;
    next.winner_id = None;
    for team in &mut next.teams {
        team.reset();
    }
    next.logs
        .push("[SYSTEM] Room reset. Waiting in the lobby.".to_string());
    Outcome::Applied(next)
}

/// First team holding the strictly greatest score. Teams stay sorted by
/// group number, so ties resolve to the lowest group.
fn winner(teams: &[Team]) -> Option<TeamId> {
    let mut best: Option<&Team> = None;
    for team in teams {
        if best.map_or(true, |b| team.score > b.score) {
            best = Some(team);
        }
    }
    best.map(|t| t.id.clone())
}

fn mint_team_id<R: Rng>(rng: &mut R) -> TeamId {
    format!("team-{:08x}", rng.random::<u32>())
}
