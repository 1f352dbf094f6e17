//! HTTP/2 negotiation and prefork worker management.
//!
//! - [`net`]: buffered connection I/O over plaintext, TLS and in-memory transports
//! - [`h2`]: connection preface / ALPN detection and RFC 7540 TLS requirements
//! - [`lifecycle`]: reaping and terminating workers, pipe of death
//! - [`server`]: the prefork parent and worker loops

pub mod config;
pub mod h2;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod server;

pub use config::schema::ServerConfig;
pub use h2::{Dispatch, ProtocolEngine, ProtocolSniffer, SecurityPolicy};
pub use lifecycle::{PipeOfDeath, ReclamationSupervisor};
pub use net::BufferedChannel;
