use ma_engine::action::Action;
use ma_engine::state::GamePhase;
use ma_server::{ApplyStatus, RoomManager, RoomSetup, StateBus};

fn join(name: &str, group: u32) -> Action {
    Action::Join {
        name: name.to_string(),
        group_number: group,
        client_id: format!("client-{name}"),
    }
}

#[test]
fn a_room_replicates_a_complete_game_to_its_mirrors() {
    let manager = RoomManager::new(StateBus::new());
    let room_id = manager
        .create_room(RoomSetup {
            room_name: "Quarterly auction".to_string(),
            max_teams: 5,
            seed: Some(42),
        })
        .expect("create room");

    let mut mirror = manager.subscribe(&room_id).expect("subscribe");
    let initial = mirror.receiver.try_recv().expect("sync on connect");
    assert_eq!(initial.phase, GamePhase::Lobby);

    let mut applied = 0usize;
    for (name, group) in [("Ana", 1), ("Ben", 2), ("Cleo", 3)] {
        let status = manager.apply(&room_id, &join(name, group)).expect("apply");
        assert_eq!(status, ApplyStatus::Applied);
        applied += 1;
    }
    let status = manager.apply(&room_id, &Action::Start {}).expect("apply");
    assert_eq!(status, ApplyStatus::Applied);
    applied += 1;

    // Play the session out: whoever is on turn takes every card.
    loop {
        let state = manager.state(&room_id).expect("state");
        if state.phase != GamePhase::Playing {
            break;
        }
        let team_id = state.current_team().expect("team on turn").id.clone();
        let status = manager
            .apply(&room_id, &Action::Take { team_id })
            .expect("apply");
        assert_eq!(status, ApplyStatus::Applied);
        applied += 1;
    }

    // Every applied transition reached the mirror, in order, as a full
    // snapshot; nothing else did.
    let mut received = Vec::new();
    while let Ok(snapshot) = mirror.receiver.try_recv() {
        received.push(snapshot);
    }
    assert_eq!(received.len(), applied);

    let last = received.last().expect("final snapshot");
    assert_eq!(last.phase, GamePhase::GameOver);
    assert!(last.winner_id.is_some());
    assert_eq!(last, &manager.state(&room_id).expect("state"));
}

#[test]
fn out_of_turn_messages_do_not_disturb_the_replica() {
    let manager = RoomManager::new(StateBus::new());
    let room_id = manager
        .create_room(RoomSetup {
            room_name: "Quarterly auction".to_string(),
            max_teams: 5,
            seed: Some(7),
        })
        .expect("create room");

    for (name, group) in [("Ana", 1), ("Ben", 2), ("Cleo", 3)] {
        manager.apply(&room_id, &join(name, group)).expect("apply");
    }
    manager.apply(&room_id, &Action::Start {}).expect("apply");

    let state = manager.state(&room_id).expect("state");
    let bystander = state.teams[(state.current_turn_index + 1) % 3].id.clone();

    let mut mirror = manager.subscribe(&room_id).expect("subscribe");
    let synced = mirror.receiver.try_recv().expect("sync on connect");

    // Two copies of the same out-of-turn take, as unsynchronized devices
    // would produce them.
    for _ in 0..2 {
        let status = manager
            .apply(
                &room_id,
                &Action::Take {
                    team_id: bystander.clone(),
                },
            )
            .expect("apply");
        assert!(matches!(status, ApplyStatus::Rejected(_)));
    }

    assert!(mirror.receiver.try_recv().is_err(), "nothing was published");
    assert_eq!(synced, manager.state(&room_id).expect("state"));
}

#[test]
fn snapshots_serialize_for_the_transport_boundary() {
    let manager = RoomManager::new(StateBus::new());
    let room_id = manager
        .create_room(RoomSetup {
            room_name: "Quarterly auction".to_string(),
            max_teams: 4,
            seed: Some(11),
        })
        .expect("create room");
    manager.apply(&room_id, &join("Ana", 1)).expect("apply");

    let state = manager.state(&room_id).expect("state");
    let value = serde_json::to_value(&state).expect("serialize");
    assert_eq!(value["phase"], "LOBBY");
    assert_eq!(value["teams"][0]["groupNumber"], 1);
    assert_eq!(value["teams"][0]["chips"], 9);
}
