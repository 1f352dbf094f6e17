//! Worker process lifecycle.
//!
//! # Data Flow
//! ```text
//! Startup (parent, before fork):
//!     install_fatal_handlers → PipeOfDeath::open → fork workers → ProcessTable
//!
//! Steady state (parent):
//!     every relieve interval: ReclamationSupervisor::relieve
//!         → fatal child? shut down : keep going
//!
//! Shutdown (parent):
//!     PipeOfDeath::signal per worker → ReclamationSupervisor::reclaim
//!         → SIGTERM at 3s, 5s, 7s → SIGKILL at 9s → give up at 10s
//!
//! Worker:
//!     accept → PodReader::check → Die? drain and exit
//! ```
//!
//! # Design Decisions
//! - The parent never blocks on a specific child; every wait is WNOHANG
//! - Signals only go to processes in our own process group
//! - Escalation always ends: the last step gives up and continues

pub mod fatal;
pub mod pod;
pub mod process;
pub mod reclaim;
pub mod scoreboard;
pub mod timeline;

pub use fatal::install_fatal_handlers;
pub use pod::{PipeOfDeath, PodReader, PodSignal, Wakeup};
pub use process::{safe_kill, ChildExit, ExitClass, KillError, Liveness, ProcessControl, SystemProcesses};
pub use reclaim::{ReclaimReport, ReclamationSupervisor, Reaped};
pub use scoreboard::{ProcessTable, WorkerTable};
pub use timeline::{Action, ReclamationTimeline};
