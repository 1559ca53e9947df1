//! Text rendering collaborator. Pure functions of state; no game logic.

use crate::board::{Cell, Grid};
use crate::config::{BOARD_SIZE, NUM_SHIPS};
use crate::session::{Outcome, Phase, Role};

/// Render a grid as a text frame. `hide_ships` masks intact ship cells
/// (an opponent-facing view); `highlight` marks one coordinate.
pub fn render_grid(grid: &Grid, hide_ships: bool, highlight: Option<(usize, usize)>) -> String {
    let mut out = String::new();
    out.push_str("    ");
    for c in 0..BOARD_SIZE {
        out.push(' ');
        out.push((b'0' + c as u8) as char);
    }
    out.push('\n');
    for (r, row) in grid.iter().enumerate() {
        out.push_str(&format!("{r:3} "));
        for (c, &cell) in row.iter().enumerate() {
            out.push(' ');
            if highlight == Some((r, c)) {
                out.push('*');
                continue;
            }
            out.push(match cell {
                Cell::Water => '.',
                Cell::Ship if hide_ships => '.',
                Cell::Ship => 'S',
                Cell::Hit => 'X',
                Cell::Miss => 'o',
            });
        }
        out.push('\n');
    }
    out
}

/// Short status string for the current phase, turn, and placement progress.
pub fn status_line(phase: Phase, role: Role, my_turn: bool, ships_placed: usize) -> String {
    let player = role.player_number();
    match phase {
        Phase::Placement => format!(
            "Player {player}: placing ship {}/{NUM_SHIPS}",
            ships_placed + 1
        ),
        Phase::AwaitingReady => format!("Player {player}: waiting for opponent to finish placing"),
        Phase::Active if my_turn => format!("Player {player}: your turn"),
        Phase::Active => format!("Player {player}: waiting for opponent's shot"),
        Phase::Over(Outcome::Won) => format!("Player {player} wins!"),
        Phase::Over(Outcome::Lost) => format!("Player {player} has lost"),
    }
}
