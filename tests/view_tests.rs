use flotilla::{view, Board, Orientation, Outcome, Phase, Role, TrackingGrid};

#[test]
fn test_render_own_board_shows_ships() {
    let mut board = Board::new();
    board.place_ship(0, 0, 2, Orientation::Horizontal).unwrap();
    board.receive_attack(0, 0).unwrap();
    board.receive_attack(5, 5).unwrap();

    let frame = view::render_grid(board.grid(), false, None);
    let rows: Vec<&str> = frame.lines().collect();
    // header plus ten grid rows
    assert_eq!(rows.len(), 11);
    assert!(rows[1].contains('X'), "hit cell should render");
    assert!(rows[1].contains('S'), "intact segment should render");
    assert!(rows[6].contains('o'), "miss should render");
}

#[test]
fn test_render_hides_ships_for_opponent_view() {
    let mut board = Board::new();
    board.place_ship(0, 0, 2, Orientation::Horizontal).unwrap();

    let frame = view::render_grid(board.grid(), true, None);
    assert!(!frame.contains('S'), "hidden fleet must not leak");
}

#[test]
fn test_render_highlight_marks_one_cell() {
    let tracking = TrackingGrid::new();
    let frame = view::render_grid(tracking.grid(), false, Some((2, 3)));
    assert_eq!(frame.matches('*').count(), 1);
}

#[test]
fn test_status_lines_follow_phase() {
    assert_eq!(
        view::status_line(Phase::Placement, Role::Host, false, 0),
        "Player 1: placing ship 1/5"
    );
    assert_eq!(
        view::status_line(Phase::Active, Role::Guest, true, 5),
        "Player 2: your turn"
    );
    assert_eq!(
        view::status_line(Phase::Over(Outcome::Lost), Role::Guest, false, 5),
        "Player 2 has lost"
    );
}
