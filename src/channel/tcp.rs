use std::io::ErrorKind;

use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};

use crate::channel::{encode_line, Channel, ChannelError, LineDecoder, READ_CHUNK};
use crate::protocol::Message;

/// Message channel over a single long-lived TCP stream. Tokio sockets are
/// non-blocking, so `poll` returns immediately when no data is pending.
pub struct TcpChannel {
    stream: TcpStream,
    decoder: LineDecoder,
}

impl TcpChannel {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            decoder: LineDecoder::new(),
        }
    }

    /// Bind `addr` and accept exactly one peer.
    pub async fn host<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let (stream, peer) = listener.accept().await?;
        log::info!("peer connected from {peer}");
        Ok(Self::new(stream))
    }

    /// Connect to a hosting peer at `addr`.
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        log::info!("connected to host");
        Ok(Self::new(stream))
    }
}

fn classify_io(err: std::io::Error) -> ChannelError {
    match err.kind() {
        ErrorKind::BrokenPipe | ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted => {
            ChannelError::Closed
        }
        _ => ChannelError::Io(err),
    }
}

#[async_trait::async_trait]
impl Channel for TcpChannel {
    async fn send(&mut self, msg: &Message) -> Result<(), ChannelError> {
        let line = encode_line(msg)?;
        self.stream
            .write_all(line.as_bytes())
            .await
            .map_err(classify_io)
    }

    async fn poll(&mut self) -> Result<Vec<Message>, ChannelError> {
        let mut buf = [0u8; READ_CHUNK];
        match self.stream.try_read(&mut buf) {
            Ok(0) => Err(ChannelError::Closed),
            Ok(n) => self.decoder.feed(&buf[..n]),
            Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(Vec::new()),
            Err(e) => Err(classify_io(e)),
        }
    }
}
