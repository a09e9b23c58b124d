use std::io::Write;

use ma_engine::action::Action;
use ma_engine::resolver::{apply, Outcome};
use ma_engine::state::{GamePhase, GameState, RoomConfig, MIN_TEAMS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::error::CliError;

// A game ends after at most 24 takes; the pass budget on top of that is
// bounded by how long the policy keeps chips positive. Anything near this
// cap means the policy stopped terminating.
const MAX_STEPS: usize = 10_000;

/// Handle the sim command: play one complete seeded game.
///
/// Registers `teams` single-member teams, starts the session and lets a
/// scripted policy act for whoever is on turn (pass while chips remain and
/// the coin flip says so, otherwise take) until the deck runs out. The same
/// seed replays the exact same game.
pub fn handle_sim_command(
    seed: u64,
    teams: usize,
    max_teams: usize,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if teams < MIN_TEAMS {
        return Err(CliError::InvalidInput(format!(
            "at least {MIN_TEAMS} teams are required"
        )));
    }
    if teams > max_teams {
        return Err(CliError::InvalidInput(format!(
            "{teams} teams do not fit a room capped at {max_teams}"
        )));
    }

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut state = GameState::new(RoomConfig {
        room_name: format!("sim-{seed}"),
        max_teams,
    });

    for group in 1..=teams as u32 {
        let join = Action::Join {
            name: format!("Team {group}"),
            group_number: group,
            client_id: format!("sim-{group}"),
        };
        state = step(&state, &join, &mut rng)?;
    }
    state = step(&state, &Action::Start {}, &mut rng)?;

    let mut steps = 0;
    while state.phase == GamePhase::Playing {
        let team = state
            .current_team()
            .ok_or_else(|| CliError::InvalidInput("no team on turn".to_string()))?;
        let action = if team.chips > 0 && rng.random_bool(0.6) {
            Action::Pass {
                team_id: team.id.clone(),
            }
        } else {
            Action::Take {
                team_id: team.id.clone(),
            }
        };
        state = step(&state, &action, &mut rng)?;

        steps += 1;
        if steps >= MAX_STEPS {
            return Err(CliError::InvalidInput(
                "simulation did not terminate".to_string(),
            ));
        }
    }

    if json {
        serde_json::to_writer_pretty(&mut *out, &state)?;
        writeln!(out)?;
        return Ok(());
    }

    for line in &state.logs {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;
    writeln!(out, "== Final standings ==")?;

    let mut standings: Vec<_> = state.teams.iter().collect();
    standings.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.group_number.cmp(&b.group_number))
    });
    for (rank, team) in standings.iter().enumerate() {
        let marker = if Some(&team.id) == state.winner_id.as_ref() {
            "  << winner"
        } else {
            ""
        };
        let cards = team
            .cards
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            out,
            "{:>2}. group {:<2} score {:>4}  chips {:>3}  projects [{cards}]{marker}",
            rank + 1,
            team.group_number,
            team.score,
            team.chips,
        )?;
    }
    Ok(())
}

fn step(state: &GameState, action: &Action, rng: &mut ChaCha20Rng) -> Result<GameState, CliError> {
    match apply(state, action, rng)? {
        Outcome::Applied(next) => Ok(next),
        Outcome::Rejected(reason) => Err(CliError::Scripted(reason)),
    }
}
