//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept, pick plaintext or TLS transport)
//!     → tls.rs (lazy TLS handshake, session parameters)
//!     → channel.rs (staged input, adaptive output buffering)
//!     → h2::sniffer (protocol decision)
//!
//! Busy states reported by the channel:
//!     KeepAlive (blocking read) | Read (non-blocking read) | Write
//! ```
//!
//! # Design Decisions
//! - Sockets are bound by the parent and inherited by workers across fork
//! - Everything above the socket works on the `Transport` trait, so the
//!   in-memory transport can stand in for TCP and TLS
//! - Output coalescing is decided once per connection

pub mod channel;
pub mod connection;
pub mod listener;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod tls;
pub mod transport;

pub use channel::{BufferedChannel, ChannelError, ReadMode, ReadProgress};
pub use connection::{ActivityBoard, BusyState, ConnContext, ConnectionId, ConnectionTracker};
pub use listener::{Accepted, BoundListener, ListenEndpoint, Listener};
#[cfg(any(test, feature = "test-util"))]
pub use memory::{MemoryHandle, MemoryTransport};
pub use transport::{TlsSession, Transport};
