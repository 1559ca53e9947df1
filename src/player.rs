//! Player trait and implementations: a seeded random AI and an interactive
//! terminal player.

use std::io::{self, BufRead, Write};

use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::{Board, TrackingGrid};
use crate::config::BOARD_SIZE;
use crate::ship::Orientation;
use crate::view;

/// Supplies the two decisions the node cannot make on its own: where the
/// next ship goes, and which cell to fire at.
pub trait Player: Send {
    /// Choose a placement for the next ship of `length` cells.
    fn next_placement(
        &mut self,
        rng: &mut SmallRng,
        board: &Board,
        length: usize,
    ) -> (usize, usize, Orientation);

    /// Choose the next target on the opponent's grid.
    fn select_target(&mut self, rng: &mut SmallRng, tracking: &TrackingGrid) -> (usize, usize);
}

/// Random but always-legal computer player.
pub struct AiPlayer;

impl AiPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Player for AiPlayer {
    fn next_placement(
        &mut self,
        rng: &mut SmallRng,
        board: &Board,
        length: usize,
    ) -> (usize, usize, Orientation) {
        if let Ok(placement) = board.random_placement(rng, length) {
            return placement;
        }
        // dense board: fall back to the first legal slot
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            for row in 0..BOARD_SIZE {
                for col in 0..BOARD_SIZE {
                    if board.can_place(row, col, length, orientation) {
                        return (row, col, orientation);
                    }
                }
            }
        }
        (0, 0, Orientation::Horizontal)
    }

    fn select_target(&mut self, rng: &mut SmallRng, tracking: &TrackingGrid) -> (usize, usize) {
        let open: Vec<(usize, usize)> = (0..BOARD_SIZE)
            .flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c)))
            .filter(|&(r, c)| tracking.is_unshot(r, c))
            .collect();
        if open.is_empty() {
            return (0, 0);
        }
        open[rng.random_range(0..open.len())]
    }
}

/// Interactive player reading coordinates from stdin. Prompting blocks the
/// local tick, which mirrors the turn discipline: nothing is expected from
/// the peer while this side is deciding.
pub struct CliPlayer;

impl CliPlayer {
    pub fn new() -> Self {
        Self
    }

    fn prompt(text: &str) -> String {
        print!("{text}");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => {
                // no way to keep playing without an input source
                eprintln!("stdin closed, leaving the game");
                std::process::exit(1);
            }
            Ok(_) => line,
        }
    }
}

fn parse_coord(row: &str, col: &str) -> Option<(usize, usize)> {
    let row: usize = row.parse().ok()?;
    let col: usize = col.parse().ok()?;
    if row < BOARD_SIZE && col < BOARD_SIZE {
        Some((row, col))
    } else {
        None
    }
}

impl Player for CliPlayer {
    fn next_placement(
        &mut self,
        _rng: &mut SmallRng,
        board: &Board,
        length: usize,
    ) -> (usize, usize, Orientation) {
        loop {
            println!("\nYour board:");
            println!("{}", view::render_grid(board.grid(), false, None));
            let line = Self::prompt(&format!("Place ship of length {length} (row col h|v): "));
            let parts: Vec<&str> = line.split_whitespace().collect();
            if let [row, col, orient] = parts[..] {
                let coord = parse_coord(row, col);
                let orientation = match orient {
                    "h" | "H" => Some(Orientation::Horizontal),
                    "v" | "V" => Some(Orientation::Vertical),
                    _ => None,
                };
                if let (Some((row, col)), Some(orientation)) = (coord, orientation) {
                    if board.can_place(row, col, length, orientation) {
                        return (row, col, orientation);
                    }
                    println!("That placement does not fit, try again.");
                    continue;
                }
            }
            println!("Expected: row col h|v (for example: 3 4 h)");
        }
    }

    fn select_target(&mut self, _rng: &mut SmallRng, tracking: &TrackingGrid) -> (usize, usize) {
        loop {
            println!("\nYour shots so far:");
            println!("{}", view::render_grid(tracking.grid(), false, None));
            let line = Self::prompt("Fire (row col): ");
            let parts: Vec<&str> = line.split_whitespace().collect();
            if let [row, col] = parts[..] {
                if let Some((row, col)) = parse_coord(row, col) {
                    if tracking.is_unshot(row, col) {
                        return (row, col);
                    }
                    println!("You already fired there.");
                    continue;
                }
            }
            println!("Expected: row col (for example: 5 5)");
        }
    }
}
