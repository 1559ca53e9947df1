use flotilla::{
    Action, Cell, Cue, Event, GameError, Message, Outcome, Phase, Role, Session, NUM_SHIPS,
};

/// Place the whole fleet on distinct rows starting at column 0; returns the
/// messages emitted by the final placement (the `ready` announcement).
fn place_fleet(session: &mut Session) -> Vec<Message> {
    let mut last = Vec::new();
    for row in 0..NUM_SHIPS {
        let fx = session
            .step(Event::Local(Action::PlaceShip { row, col: 0 }))
            .unwrap();
        last = fx.outgoing;
    }
    last
}

/// Drive both sessions to the active phase by exchanging `ready`.
fn start_game() -> (Session, Session) {
    let mut host = Session::new(Role::Host);
    let mut guest = Session::new(Role::Guest);

    let host_ready = place_fleet(&mut host);
    let guest_ready = place_fleet(&mut guest);
    assert_eq!(host_ready, vec![Message::Ready]);
    assert_eq!(guest_ready, vec![Message::Ready]);

    host.step(Event::Incoming(guest_ready[0].clone())).unwrap();
    guest.step(Event::Incoming(host_ready[0].clone())).unwrap();
    (host, guest)
}

#[test]
fn test_placement_advances_and_announces_ready() {
    let mut session = Session::new(Role::Host);
    assert_eq!(session.phase(), Phase::Placement);

    for row in 0..NUM_SHIPS {
        assert_eq!(session.ships_placed(), row);
        let fx = session
            .step(Event::Local(Action::PlaceShip { row, col: 0 }))
            .unwrap();
        if row + 1 < NUM_SHIPS {
            assert!(fx.outgoing.is_empty());
            assert_eq!(session.phase(), Phase::Placement);
        } else {
            assert_eq!(fx.outgoing, vec![Message::Ready]);
            assert_eq!(session.phase(), Phase::AwaitingReady);
        }
    }
}

#[test]
fn test_rejected_placement_is_recoverable() {
    let mut session = Session::new(Role::Host);
    session
        .step(Event::Local(Action::PlaceShip { row: 0, col: 0 }))
        .unwrap();

    // overlapping the first ship is refused without advancing
    let err = session
        .step(Event::Local(Action::PlaceShip { row: 0, col: 2 }))
        .unwrap_err();
    assert_eq!(err, GameError::InvalidPlacement);
    assert_eq!(session.ships_placed(), 1);

    // a clear row still works afterwards
    session
        .step(Event::Local(Action::PlaceShip { row: 1, col: 0 }))
        .unwrap();
    assert_eq!(session.ships_placed(), 2);
}

#[test]
fn test_orientation_toggle_changes_footprint() {
    let mut session = Session::new(Role::Host);
    session
        .step(Event::Local(Action::ToggleOrientation))
        .unwrap();
    session
        .step(Event::Local(Action::PlaceShip { row: 0, col: 0 }))
        .unwrap();

    // first fleet entry is length five, laid out vertically after the toggle
    for row in 0..5 {
        assert_eq!(session.board().grid()[row][0], Cell::Ship);
    }
    assert_eq!(session.board().grid()[0][1], Cell::Water);
}

#[test]
fn test_ready_exchange_assigns_first_move_to_host() {
    let (host, guest) = start_game();
    assert_eq!(host.phase(), Phase::Active);
    assert_eq!(guest.phase(), Phase::Active);
    assert!(host.my_turn());
    assert!(!guest.my_turn());
}

#[test]
fn test_waiting_phase_ignores_other_messages() {
    let mut session = Session::new(Role::Guest);
    place_fleet(&mut session);
    assert_eq!(session.phase(), Phase::AwaitingReady);

    let fx = session
        .step(Event::Incoming(Message::Attack { row: 0, col: 0 }))
        .unwrap();
    assert!(fx.outgoing.is_empty());
    assert_eq!(session.phase(), Phase::AwaitingReady);
}

#[test]
fn test_full_attack_round_trip_swaps_turns() {
    let (mut host, mut guest) = start_game();

    // host fires at open water on the guest's board
    let fx = host
        .step(Event::Local(Action::Fire { row: 9, col: 9 }))
        .unwrap();
    assert_eq!(fx.outgoing, vec![Message::Attack { row: 9, col: 9 }]);
    assert!(!host.my_turn());

    // guest resolves it and replies; the reply hands the turn over
    let fx = guest
        .step(Event::Incoming(Message::Attack { row: 9, col: 9 }))
        .unwrap();
    assert_eq!(
        fx.outgoing,
        vec![Message::Result {
            row: 9,
            col: 9,
            hit: false,
            sunk: false,
            gameover: false,
        }]
    );
    assert_eq!(fx.cues, vec![Cue::Miss]);
    assert!(guest.my_turn());

    // host records the miss and yields the turn
    let fx = host.step(Event::Incoming(fx.outgoing[0].clone())).unwrap();
    assert_eq!(fx.cues, vec![Cue::Miss]);
    assert!(!host.my_turn());
    assert_eq!(host.tracking().grid()[9][9], Cell::Miss);
}

#[test]
fn test_fire_guards() {
    let (mut host, mut guest) = start_game();

    // the guest does not hold the first turn
    assert_eq!(
        guest
            .step(Event::Local(Action::Fire { row: 0, col: 0 }))
            .unwrap_err(),
        GameError::OutOfTurn
    );

    assert_eq!(
        host.step(Event::Local(Action::Fire { row: 0, col: 10 }))
            .unwrap_err(),
        GameError::ShotOutOfRange { row: 0, col: 10 }
    );

    // fire, get the result back, then try the same cell again
    host.step(Event::Local(Action::Fire { row: 3, col: 3 }))
        .unwrap();
    let reply = guest
        .step(Event::Incoming(Message::Attack { row: 3, col: 3 }))
        .unwrap();
    host.step(Event::Incoming(reply.outgoing[0].clone()))
        .unwrap();
    // hand the turn back so only the repeated target can fail
    guest
        .step(Event::Local(Action::Fire { row: 9, col: 9 }))
        .unwrap();
    let reply = host
        .step(Event::Incoming(Message::Attack { row: 9, col: 9 }))
        .unwrap();
    guest
        .step(Event::Incoming(reply.outgoing[0].clone()))
        .unwrap();

    assert!(host.my_turn());
    assert_eq!(
        host.step(Event::Local(Action::Fire { row: 3, col: 3 }))
            .unwrap_err(),
        GameError::AlreadyTargeted
    );
}

#[test]
fn test_duplicate_incoming_attack_reports_false_hit() {
    let (_, mut guest) = start_game();

    // first shot lands on the length-five ship at row 0
    let fx = guest
        .step(Event::Incoming(Message::Attack { row: 0, col: 0 }))
        .unwrap();
    assert_eq!(
        fx.outgoing,
        vec![Message::Result {
            row: 0,
            col: 0,
            hit: true,
            sunk: false,
            gameover: false,
        }]
    );
    assert_eq!(fx.cues, vec![Cue::Hit]);

    // the same cell again: the wire cannot say "duplicate", so the reply
    // reads as a miss, no cue fires, and the defender still takes the turn
    guest
        .step(Event::Local(Action::Fire { row: 9, col: 9 }))
        .unwrap();
    let fx = guest
        .step(Event::Incoming(Message::Attack { row: 0, col: 0 }))
        .unwrap();
    assert_eq!(
        fx.outgoing,
        vec![Message::Result {
            row: 0,
            col: 0,
            hit: false,
            sunk: false,
            gameover: false,
        }]
    );
    assert!(fx.cues.is_empty());
    assert!(guest.my_turn());
    assert_eq!(guest.board().grid()[0][0], Cell::Hit);
}

#[test]
fn test_incoming_attack_out_of_range_is_fatal() {
    let (_, mut guest) = start_game();
    let err = guest
        .step(Event::Incoming(Message::Attack { row: 42, col: 0 }))
        .unwrap_err();
    assert_eq!(err, GameError::ShotOutOfRange { row: 42, col: 0 });
}

#[test]
fn test_gameover_transitions_both_sides() {
    let (mut host, mut guest) = start_game();

    // sink the guest's entire fleet; boards are identical so the covered
    // cells are the five rows laid at column 0
    let targets: Vec<(usize, usize)> = flotilla::FLEET
        .iter()
        .enumerate()
        .flat_map(|(row, class)| (0..class.length()).map(move |col| (row, col)))
        .collect();

    for (i, &(row, col)) in targets.iter().enumerate() {
        host.step(Event::Local(Action::Fire { row, col })).unwrap();
        let reply = guest
            .step(Event::Incoming(Message::Attack { row, col }))
            .unwrap();
        let result = reply.outgoing[0].clone();
        let last = i + 1 == targets.len();

        if last {
            assert_eq!(guest.phase(), Phase::Over(Outcome::Lost));
            assert!(matches!(
                result,
                Message::Result { gameover: true, sunk: true, hit: true, .. }
            ));
        } else {
            assert_eq!(guest.phase(), Phase::Active);
        }

        host.step(Event::Incoming(result)).unwrap();
        if last {
            assert_eq!(host.phase(), Phase::Over(Outcome::Won));
        } else {
            // hand the turn back to the host with a throwaway exchange
            // against the empty bottom rows of the host's board
            let (row, col) = (9 - i / 10, i % 10);
            guest
                .step(Event::Local(Action::Fire { row, col }))
                .unwrap();
            let reply = host
                .step(Event::Incoming(Message::Attack { row, col }))
                .unwrap();
            guest
                .step(Event::Incoming(reply.outgoing[0].clone()))
                .unwrap();
        }
    }
}

#[test]
fn test_terminal_phase_processes_nothing() {
    let (mut host, _) = start_game();
    host.step(Event::Incoming(Message::Result {
        row: 0,
        col: 0,
        hit: true,
        sunk: true,
        gameover: true,
    }))
    .unwrap();
    assert_eq!(host.phase(), Phase::Over(Outcome::Won));

    let fx = host
        .step(Event::Incoming(Message::Attack { row: 1, col: 1 }))
        .unwrap();
    assert!(fx.outgoing.is_empty());
    assert!(fx.cues.is_empty());
    assert_eq!(host.phase(), Phase::Over(Outcome::Won));
}
