//! Prefork server.
//!
//! # Data Flow
//! ```text
//! supervisor.rs (parent)
//!     bind, fork workers, reap, shut down
//!
//! worker.rs (each child)
//!     accept → BufferedChannel → ProtocolSniffer
//!         → Handled:  RefusingEngine (fallback.rs) sent GOAWAY
//!         → Rejected: GOAWAY(INADEQUATE_SECURITY)
//!         → Declined: minimal HTTP/1 response (fallback.rs)
//! ```

pub mod fallback;
pub mod shutdown;
pub mod supervisor;
pub mod worker;

pub use supervisor::{run_server, ServerError, ShutdownCause};
pub use worker::{handle_connection, WorkerShared};
