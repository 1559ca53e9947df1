//! Framing layer: turns a raw duplex byte stream into discrete protocol
//! messages and back.
//!
//! The underlying stream has no message boundaries; a single read may carry
//! zero, one, or several complete messages, or a partial trailing one. Each
//! message is one newline-terminated JSON line, and [`LineDecoder`] holds
//! the unterminated tail between polls.

use core::fmt;

use crate::protocol::Message;

pub mod in_memory;
pub mod tcp;

/// Bytes requested per non-blocking read attempt.
pub const READ_CHUNK: usize = 4096;

/// Errors surfaced by a channel. All of them end the session; the protocol
/// has no redelivery or resynchronization path.
#[derive(Debug)]
pub enum ChannelError {
    /// The peer closed the connection.
    Closed,
    /// A line failed to parse as a protocol message.
    Malformed(String),
    /// Underlying transport failure.
    Io(std::io::Error),
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelError::Closed => write!(f, "connection closed by peer"),
            ChannelError::Malformed(detail) => write!(f, "malformed message: {detail}"),
            ChannelError::Io(err) => write!(f, "transport error: {err}"),
        }
    }
}

impl From<std::io::Error> for ChannelError {
    fn from(err: std::io::Error) -> Self {
        ChannelError::Io(err)
    }
}

/// Serialize a message to its wire form: compact JSON plus the newline
/// delimiter.
pub fn encode_line(msg: &Message) -> Result<String, ChannelError> {
    let mut line =
        serde_json::to_string(msg).map_err(|e| ChannelError::Malformed(e.to_string()))?;
    line.push('\n');
    Ok(line)
}

/// Incremental decoder for newline-delimited messages.
///
/// Bytes are accumulated until a newline completes a line; the remainder
/// stays buffered byte-exact, so a multi-byte character split across reads
/// survives intact.
#[derive(Debug, Default)]
pub struct LineDecoder {
    carryover: Vec<u8>,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self { carryover: Vec::new() }
    }

    /// Bytes held over from previous feeds, pending a terminating newline.
    pub fn carryover(&self) -> &[u8] {
        &self.carryover
    }

    /// Append freshly read bytes and parse every complete line, in arrival
    /// order. Whitespace-only lines are skipped; a line that is not valid
    /// UTF-8 or not a valid message is fatal.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<Vec<Message>, ChannelError> {
        self.carryover.extend_from_slice(bytes);
        let mut messages = Vec::new();
        while let Some(pos) = self.carryover.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.carryover.drain(..=pos).collect();
            let text = std::str::from_utf8(&line[..line.len() - 1])
                .map_err(|e| ChannelError::Malformed(e.to_string()))?;
            if text.trim().is_empty() {
                continue;
            }
            let msg = serde_json::from_str(text)
                .map_err(|e| ChannelError::Malformed(format!("{e} in {text:?}")))?;
            messages.push(msg);
        }
        Ok(messages)
    }
}

/// A duplex message channel to the single remote peer.
#[async_trait::async_trait]
pub trait Channel: Send {
    /// Serialize `msg` and write it fully to the peer, or fail.
    async fn send(&mut self, msg: &Message) -> Result<(), ChannelError>;

    /// One non-blocking read attempt. An empty result means no data has
    /// arrived yet, which is expected and silent; messages are returned in
    /// arrival order.
    async fn poll(&mut self) -> Result<Vec<Message>, ChannelError>;
}
