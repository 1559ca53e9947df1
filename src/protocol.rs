//! Wire messages exchanged between the two peers.
//!
//! Each message travels as one compact JSON object on its own line, e.g.
//! `{"type":"attack","row":3,"col":7}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    /// Sender has finished placing its fleet.
    Ready,
    /// Sender fires at the recipient's board.
    Attack { row: usize, col: usize },
    /// Reply to an attack. `gameover` means the attack's recipient has
    /// lost its whole fleet. `hit` is false for both a miss and a repeat
    /// shot; the wire does not distinguish them.
    Result {
        row: usize,
        col: usize,
        hit: bool,
        sunk: bool,
        gameover: bool,
    },
}
