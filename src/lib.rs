mod board;
pub mod channel;
mod config;
mod logging;
mod node;
mod player;
pub mod protocol;
mod session;
mod ship;
pub mod view;

pub use board::*;
pub use channel::in_memory::InMemoryChannel;
pub use channel::tcp::TcpChannel;
pub use channel::{encode_line, Channel, ChannelError, LineDecoder};
pub use config::*;
pub use logging::init_logging;
pub use node::*;
pub use player::*;
pub use protocol::*;
pub use session::*;
pub use ship::*;
