//! Game board state: the 10x10 cell grid, the placed fleet, and attack
//! resolution. A second grid type tracks shots fired at the opponent.

use core::fmt;
use rand::Rng;

use crate::config::BOARD_SIZE;
use crate::ship::{Orientation, Ship};

/// State of one grid position. `Hit` is only reachable from `Ship`, `Miss`
/// only from `Water`; no cell ever reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Water,
    Ship,
    Hit,
    Miss,
}

/// Fixed 10x10 grid of cell states.
pub type Grid = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// Result of resolving one attack against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// The cell held a ship segment; `sunk` reports whether that ship is
    /// now fully destroyed.
    Hit { sunk: bool },
    /// The cell was open water.
    Miss,
    /// The cell was attacked before; nothing changed.
    AlreadyShot,
}

/// Errors returned by board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Placement runs off the grid or overlaps another ship.
    InvalidPlacement,
    /// Coordinate outside the 10x10 grid.
    OutOfBounds,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidPlacement => write!(f, "ship placement is out of bounds or overlaps"),
            BoardError::OutOfBounds => write!(f, "coordinate is outside the board"),
        }
    }
}

/// One player's board: the authoritative grid plus the fleet placed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    ships: Vec<Ship>,
}

impl Board {
    /// An empty board, all water, no ships placed.
    pub fn new() -> Self {
        Self {
            grid: [[Cell::Water; BOARD_SIZE]; BOARD_SIZE],
            ships: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Cells a ship of `length` would cover from `(row, col)` along
    /// `orientation`, or `None` when any of them falls off the grid.
    fn footprint(
        row: usize,
        col: usize,
        length: usize,
        orientation: Orientation,
    ) -> Option<Vec<(usize, usize)>> {
        if length == 0 {
            return None;
        }
        let (dr, dc) = orientation.step();
        if row + dr * (length - 1) >= BOARD_SIZE || col + dc * (length - 1) >= BOARD_SIZE {
            return None;
        }
        Some((0..length).map(|i| (row + dr * i, col + dc * i)).collect())
    }

    /// True iff every cell the ship would occupy lies on the grid and holds
    /// no ship already. No side effects.
    pub fn can_place(&self, row: usize, col: usize, length: usize, orientation: Orientation) -> bool {
        match Self::footprint(row, col, length, orientation) {
            Some(cells) => cells.iter().all(|&(r, c)| self.grid[r][c] != Cell::Ship),
            None => false,
        }
    }

    /// Mark the covered cells as ship and register the new ship with an
    /// empty hit set. Re-validates the placement rather than trusting the
    /// caller to have checked `can_place`.
    pub fn place_ship(
        &mut self,
        row: usize,
        col: usize,
        length: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        if !self.can_place(row, col, length, orientation) {
            return Err(BoardError::InvalidPlacement);
        }
        let cells = Self::footprint(row, col, length, orientation)
            .ok_or(BoardError::InvalidPlacement)?;
        for &(r, c) in &cells {
            self.grid[r][c] = Cell::Ship;
        }
        self.ships.push(Ship::new(cells));
        Ok(())
    }

    /// Returns a random non-overlapping `(row, col, orientation)` for a ship
    /// of `length` cells.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Result<(usize, usize, Orientation), BoardError> {
        if length == 0 || length > BOARD_SIZE {
            return Err(BoardError::InvalidPlacement);
        }
        let mut attempts = 0;
        while attempts < 100 {
            attempts += 1;
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orientation {
                Orientation::Horizontal => (BOARD_SIZE - 1, BOARD_SIZE - length),
                Orientation::Vertical => (BOARD_SIZE - length, BOARD_SIZE - 1),
            };
            let r = rng.random_range(0..=max_r);
            let c = rng.random_range(0..=max_c);
            if self.can_place(r, c, length, orientation) {
                return Ok((r, c, orientation));
            }
        }
        Err(BoardError::InvalidPlacement)
    }

    /// Resolve an attack at `(row, col)`.
    ///
    /// A previously attacked cell reports `AlreadyShot` and mutates nothing,
    /// so repeat fire is rejected rather than re-resolved. A ship cell
    /// becomes a hit and the owning ship's hit set grows; `sunk` is set when
    /// that ship has every cell hit. Water becomes a miss.
    pub fn receive_attack(&mut self, row: usize, col: usize) -> Result<AttackOutcome, BoardError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(BoardError::OutOfBounds);
        }
        match self.grid[row][col] {
            Cell::Hit | Cell::Miss => Ok(AttackOutcome::AlreadyShot),
            Cell::Water => {
                self.grid[row][col] = Cell::Miss;
                Ok(AttackOutcome::Miss)
            }
            Cell::Ship => {
                self.grid[row][col] = Cell::Hit;
                for ship in &mut self.ships {
                    if ship.occupies(row, col) {
                        ship.record_hit(row, col);
                        return Ok(AttackOutcome::Hit { sunk: ship.is_sunk() });
                    }
                }
                // grid said ship but no owner was registered; report a
                // plain hit rather than losing the shot
                Ok(AttackOutcome::Hit { sunk: false })
            }
        }
    }

    /// True once no cell on the grid holds an intact ship segment.
    /// Trivially true on a board with no ships placed.
    pub fn all_sunk(&self) -> bool {
        self.grid
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Cell::Ship))
    }
}

/// The local player's knowledge of shots fired at the opponent. `Water`
/// means untried; never holds `Ship` since the enemy layout stays hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingGrid {
    grid: Grid,
}

impl TrackingGrid {
    pub fn new() -> Self {
        Self {
            grid: [[Cell::Water; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Whether `(row, col)` is on the grid and has not been fired at.
    pub fn is_unshot(&self, row: usize, col: usize) -> bool {
        row < BOARD_SIZE && col < BOARD_SIZE && self.grid[row][col] == Cell::Water
    }

    /// Record the reported outcome of a shot at `(row, col)`.
    pub fn record(&mut self, row: usize, col: usize, hit: bool) -> Result<(), BoardError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(BoardError::OutOfBounds);
        }
        self.grid[row][col] = if hit { Cell::Hit } else { Cell::Miss };
        Ok(())
    }

    /// Number of shots recorded so far.
    pub fn shots(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Water)
            .count()
    }
}
