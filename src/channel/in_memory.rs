use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::channel::{encode_line, Channel, ChannelError, LineDecoder, READ_CHUNK};
use crate::protocol::Message;

/// Byte-level loopback channel for tests and local simulations. Framing
/// runs through the same line codec as the TCP path.
pub struct InMemoryChannel {
    incoming: Arc<Mutex<VecDeque<u8>>>,
    outgoing: Arc<Mutex<VecDeque<u8>>>,
    decoder: LineDecoder,
}

impl InMemoryChannel {
    /// Two connected endpoints; bytes sent on one arrive at the other.
    pub fn pair() -> (Self, Self) {
        let q1 = Arc::new(Mutex::new(VecDeque::new()));
        let q2 = Arc::new(Mutex::new(VecDeque::new()));
        (
            Self {
                incoming: q1.clone(),
                outgoing: q2.clone(),
                decoder: LineDecoder::new(),
            },
            Self {
                incoming: q2,
                outgoing: q1,
                decoder: LineDecoder::new(),
            },
        )
    }
}

#[async_trait::async_trait]
impl Channel for InMemoryChannel {
    async fn send(&mut self, msg: &Message) -> Result<(), ChannelError> {
        let line = encode_line(msg)?;
        let mut queue = self.outgoing.lock().unwrap();
        queue.extend(line.into_bytes());
        Ok(())
    }

    async fn poll(&mut self) -> Result<Vec<Message>, ChannelError> {
        let chunk: Vec<u8> = {
            let mut queue = self.incoming.lock().unwrap();
            let n = queue.len().min(READ_CHUNK);
            queue.drain(..n).collect()
        };
        if chunk.is_empty() {
            // pending bytes are drained before a dropped peer reads as closed
            if Arc::strong_count(&self.incoming) == 1 {
                return Err(ChannelError::Closed);
            }
            return Ok(Vec::new());
        }
        self.decoder.feed(&chunk)
    }
}
