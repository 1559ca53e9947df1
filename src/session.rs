//! Session and turn coordination: the phase state machine that translates
//! local actions and incoming messages into board calls, outgoing messages,
//! and sound cues.
//!
//! The session performs no I/O. Each tick feeds events through [`Session::step`],
//! the single update function; the returned [`Effects`] tell the caller what
//! to send and which cues fired.

use core::fmt;

use crate::board::{AttackOutcome, Board, TrackingGrid};
use crate::config::{BOARD_SIZE, FLEET, NUM_SHIPS};
use crate::protocol::Message;
use crate::ship::Orientation;

/// Which side of the connection this process is. The host listens, is
/// player 1, and takes the first move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Host,
    Guest,
}

impl Role {
    pub fn player_number(self) -> u8 {
        match self {
            Role::Host => 1,
            Role::Guest => 2,
        }
    }

    /// The host role starts the active phase as the mover.
    pub fn moves_first(self) -> bool {
        self == Role::Host
    }
}

/// How a finished game ended for the local player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// Mutually exclusive session phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Placing the local fleet, one ship at a time.
    Placement,
    /// Fleet placed and `ready` sent; waiting for the peer's `ready`.
    AwaitingReady,
    /// Alternating fire; exactly one side holds the turn at a time.
    Active,
    /// Game decided. Nothing further is sent or processed.
    Over(Outcome),
}

/// Attack-outcome events for the audio collaborator. The core does not
/// depend on playback happening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Hit,
    Miss,
    Sunk,
}

/// A local player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleOrientation,
    PlaceShip { row: usize, col: usize },
    Fire { row: usize, col: usize },
}

/// One input to the session: a local action or a decoded peer message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Local(Action),
    Incoming(Message),
}

/// What a step asks the caller to do: messages to put on the wire and cues
/// for the audio collaborator, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    pub outgoing: Vec<Message>,
    pub cues: Vec<Cue>,
}

/// Errors from session steps. The local variants are recoverable within the
/// tick that produced them; `ShotOutOfRange` on an incoming message is a
/// protocol violation and ends the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Rejected placement; nothing was mutated, the player retries.
    InvalidPlacement,
    /// Fired without holding the turn.
    OutOfTurn,
    /// Fired at a cell already tried.
    AlreadyTargeted,
    /// Action does not apply to the current phase.
    WrongPhase,
    /// Coordinate outside the 10x10 grid.
    ShotOutOfRange { row: usize, col: usize },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidPlacement => write!(f, "invalid ship placement"),
            GameError::OutOfTurn => write!(f, "not this player's turn"),
            GameError::AlreadyTargeted => write!(f, "cell was already fired at"),
            GameError::WrongPhase => write!(f, "action not valid in the current phase"),
            GameError::ShotOutOfRange { row, col } => {
                write!(f, "shot at ({row}, {col}) is outside the board")
            }
        }
    }
}

/// Per-player session state: own board, shot tracking, and the phase/turn
/// machine driving the exchange.
pub struct Session {
    board: Board,
    tracking: TrackingGrid,
    phase: Phase,
    role: Role,
    my_turn: bool,
    next_ship: usize,
    orientation: Orientation,
}

impl Session {
    pub fn new(role: Role) -> Self {
        Self {
            board: Board::new(),
            tracking: TrackingGrid::new(),
            phase: Phase::Placement,
            role,
            my_turn: false,
            next_ship: 0,
            orientation: Orientation::Horizontal,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the local side may fire. Meaningful only in `Active`.
    pub fn my_turn(&self) -> bool {
        self.my_turn
    }

    /// Orientation the next placement will use.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Ships placed so far; doubles as the index of the next fleet entry.
    pub fn ships_placed(&self) -> usize {
        self.next_ship
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tracking(&self) -> &TrackingGrid {
        &self.tracking
    }

    /// Advance the state machine by one event. All mutation funnels through
    /// here; callers send `Effects::outgoing` and surface `Effects::cues`.
    pub fn step(&mut self, event: Event) -> Result<Effects, GameError> {
        let mut effects = Effects::default();
        match event {
            Event::Local(action) => self.apply_local(action, &mut effects)?,
            Event::Incoming(msg) => self.apply_incoming(msg, &mut effects)?,
        }
        Ok(effects)
    }

    fn apply_local(&mut self, action: Action, fx: &mut Effects) -> Result<(), GameError> {
        match action {
            Action::ToggleOrientation => {
                if self.phase != Phase::Placement {
                    return Err(GameError::WrongPhase);
                }
                self.orientation = self.orientation.toggled();
            }
            Action::PlaceShip { row, col } => {
                if self.phase != Phase::Placement || self.next_ship >= NUM_SHIPS {
                    return Err(GameError::WrongPhase);
                }
                let class = FLEET[self.next_ship];
                self.board
                    .place_ship(row, col, class.length(), self.orientation)
                    .map_err(|_| GameError::InvalidPlacement)?;
                self.next_ship += 1;
                if self.next_ship == NUM_SHIPS {
                    fx.outgoing.push(Message::Ready);
                    self.phase = Phase::AwaitingReady;
                }
            }
            Action::Fire { row, col } => {
                if self.phase != Phase::Active {
                    return Err(GameError::WrongPhase);
                }
                if !self.my_turn {
                    return Err(GameError::OutOfTurn);
                }
                if row >= BOARD_SIZE || col >= BOARD_SIZE {
                    return Err(GameError::ShotOutOfRange { row, col });
                }
                if !self.tracking.is_unshot(row, col) {
                    return Err(GameError::AlreadyTargeted);
                }
                fx.outgoing.push(Message::Attack { row, col });
                // optimistic turn-passing: the turn clears on send, not on
                // reply, so at most one attack is in flight per side
                self.my_turn = false;
            }
        }
        Ok(())
    }

    fn apply_incoming(&mut self, msg: Message, fx: &mut Effects) -> Result<(), GameError> {
        match self.phase {
            Phase::AwaitingReady => {
                // only the peer's ready matters here; stream ordering rules
                // out a legal attack arriving first
                if msg == Message::Ready {
                    self.phase = Phase::Active;
                    self.my_turn = self.role.moves_first();
                }
            }
            Phase::Active => match msg {
                Message::Attack { row, col } => self.resolve_incoming_attack(row, col, fx)?,
                Message::Result {
                    row,
                    col,
                    hit,
                    sunk,
                    gameover,
                } => self.record_incoming_result(row, col, hit, sunk, gameover, fx)?,
                Message::Ready => {}
            },
            // the channel is not polled during placement, and a finished
            // session processes nothing further
            Phase::Placement | Phase::Over(_) => {}
        }
        Ok(())
    }

    fn resolve_incoming_attack(
        &mut self,
        row: usize,
        col: usize,
        fx: &mut Effects,
    ) -> Result<(), GameError> {
        let outcome = self
            .board
            .receive_attack(row, col)
            .map_err(|_| GameError::ShotOutOfRange { row, col })?;
        let (hit, sunk) = match outcome {
            AttackOutcome::Hit { sunk } => (true, sunk),
            // the wire reports false for a repeat shot as well as a miss
            AttackOutcome::Miss | AttackOutcome::AlreadyShot => (false, false),
        };
        match outcome {
            AttackOutcome::Hit { sunk: true } => fx.cues.push(Cue::Sunk),
            AttackOutcome::Hit { sunk: false } => fx.cues.push(Cue::Hit),
            AttackOutcome::Miss => fx.cues.push(Cue::Miss),
            AttackOutcome::AlreadyShot => {}
        }
        let gameover = hit && self.board.all_sunk();
        fx.outgoing.push(Message::Result {
            row,
            col,
            hit,
            sunk,
            gameover,
        });
        if gameover {
            self.phase = Phase::Over(Outcome::Lost);
        } else {
            self.my_turn = true;
        }
        Ok(())
    }

    fn record_incoming_result(
        &mut self,
        row: usize,
        col: usize,
        hit: bool,
        sunk: bool,
        gameover: bool,
        fx: &mut Effects,
    ) -> Result<(), GameError> {
        self.tracking
            .record(row, col, hit)
            .map_err(|_| GameError::ShotOutOfRange { row, col })?;
        fx.cues.push(if hit {
            if sunk {
                Cue::Sunk
            } else {
                Cue::Hit
            }
        } else {
            Cue::Miss
        });
        if gameover {
            self.phase = Phase::Over(Outcome::Won);
        } else {
            self.my_turn = false;
        }
        Ok(())
    }
}
