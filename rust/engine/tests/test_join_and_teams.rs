use ma_engine::action::Action;
use ma_engine::resolver::{apply, Outcome, RejectReason};
use ma_engine::state::{GamePhase, GameState, RoomConfig};
use ma_engine::team::STARTING_CHIPS;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn room(max_teams: usize) -> GameState {
    GameState::new(RoomConfig {
        room_name: "Strategy night".to_string(),
        max_teams,
    })
}

fn join(name: &str, group: u32) -> Action {
    Action::Join {
        name: name.to_string(),
        group_number: group,
        client_id: format!("client-{name}"),
    }
}

fn applied(state: &GameState, action: &Action, rng: &mut ChaCha20Rng) -> GameState {
    match apply(state, action, rng).expect("state is sound") {
        Outcome::Applied(next) => next,
        Outcome::Rejected(reason) => panic!("expected apply, got rejection: {reason}"),
    }
}

fn rejected(state: &GameState, action: &Action, rng: &mut ChaCha20Rng) -> RejectReason {
    match apply(state, action, rng).expect("state is sound") {
        Outcome::Applied(_) => panic!("expected rejection, action applied"),
        Outcome::Rejected(reason) => reason,
    }
}

#[test]
fn first_join_founds_a_team_with_starting_resources() {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let state = applied(&room(5), &join("Ana", 1), &mut rng);

    assert_eq!(state.teams.len(), 1);
    let team = &state.teams[0];
    assert_eq!(team.group_number, 1);
    assert_eq!(team.chips, STARTING_CHIPS);
    assert_eq!(team.score, STARTING_CHIPS);
    assert!(team.cards.is_empty());
    assert_eq!(team.name, "Ana (lead)");
    assert_eq!(team.members.len(), 1);
    assert_eq!(team.members[0].client_id, "client-Ana");
}

#[test]
fn joining_an_existing_group_appends_a_member() {
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    let state = applied(&room(5), &join("Ana", 1), &mut rng);
    let founded_id = state.teams[0].id.clone();

    let state = applied(&state, &join("Ben", 1), &mut rng);
    assert_eq!(state.teams.len(), 1, "no new team for an existing group");
    let team = state.team_by_group(1).expect("group 1 exists");
    assert_eq!(team.id, founded_id);
    assert_eq!(team.members.len(), 2);
    assert_eq!(team.name, "Ana (lead)", "founder keeps the name");
}

#[test]
fn rejoining_with_the_same_client_id_is_a_no_op() {
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let state = applied(&room(5), &join("Ana", 1), &mut rng);
    assert_eq!(
        rejected(&state, &join("Ana", 1), &mut rng),
        RejectReason::AlreadyMember
    );
}

#[test]
fn founding_past_the_team_cap_is_rejected() {
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    let mut state = room(2);
    state = applied(&state, &join("Ana", 1), &mut rng);
    state = applied(&state, &join("Ben", 2), &mut rng);

    assert_eq!(
        rejected(&state, &join("Cleo", 3), &mut rng),
        RejectReason::RoomFull
    );
    // Joining one of the existing teams is still fine.
    let state = applied(&state, &join("Cleo", 2), &mut rng);
    assert_eq!(state.teams.len(), 2);
}

#[test]
fn teams_stay_sorted_by_group_number() {
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let mut state = room(5);
    for (name, group) in [("Ana", 3), ("Ben", 1), ("Cleo", 2)] {
        state = applied(&state, &join(name, group), &mut rng);
    }
    let groups: Vec<u32> = state.teams.iter().map(|t| t.group_number).collect();
    assert_eq!(groups, vec![1, 2, 3]);
}

#[test]
fn leave_removes_the_member_but_keeps_the_team() {
    let mut rng = ChaCha20Rng::seed_from_u64(6);
    let mut state = room(5);
    state = applied(&state, &join("Ana", 1), &mut rng);
    state = applied(&state, &join("Ben", 1), &mut rng);

    let leave = Action::Leave {
        client_id: "client-Ana".to_string(),
    };
    let state = applied(&state, &leave, &mut rng);
    assert_eq!(state.teams.len(), 1);
    assert_eq!(state.teams[0].members.len(), 1);
    assert_eq!(state.teams[0].members[0].client_id, "client-Ben");
    assert_eq!(state.teams[0].chips, STARTING_CHIPS, "resources untouched");
}

#[test]
fn leave_for_an_unknown_client_is_a_no_op() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let state = applied(&room(5), &join("Ana", 1), &mut rng);
    let leave = Action::Leave {
        client_id: "client-ghost".to_string(),
    };
    assert_eq!(
        rejected(&state, &leave, &mut rng),
        RejectReason::UnknownClient
    );
}

#[test]
fn join_is_valid_while_a_session_is_running() {
    let mut rng = ChaCha20Rng::seed_from_u64(8);
    let mut state = room(5);
    for (name, group) in [("Ana", 1), ("Ben", 2), ("Cleo", 3)] {
        state = applied(&state, &join(name, group), &mut rng);
    }
    state = applied(&state, &Action::Start {}, &mut rng);
    assert_eq!(state.phase, GamePhase::Playing);

    let state = applied(&state, &join("Dana", 4), &mut rng);
    assert_eq!(state.teams.len(), 4);
    assert_eq!(state.phase, GamePhase::Playing);
    state.check_card_conservation().expect("no cards disturbed");
}
