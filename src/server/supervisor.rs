//! Parent process: forks the workers and supervises them.
//!
//! # Responsibilities
//! - Bind listeners, install fatal handlers and open the pipe of death
//!   before forking, so workers inherit all of it
//! - Reap exited workers on a fixed interval
//! - Shut down on SIGTERM/SIGINT, SIGUSR1 (graceful) or a fatal worker exit
//!
//! # Data Flow
//! ```text
//! bind → install_fatal_handlers → PipeOfDeath::open → fork × workers
//!     → runtime (parent only)
//!         ├─ interval: relieve()
//!         └─ signals
//!     → stop:      pod.signal() per worker → reclaim(false)
//!     → graceful:  SIGUSR1 per worker → wake_all → reclaim(false)
//!     → fatal:     reclaim(true)
//! ```
//!
//! # Design Decisions
//! - Forking happens before any runtime exists; a forked runtime is unusable
//! - The metrics exporter runs in the parent only

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use nix::errno::Errno;
use nix::unistd::{fork, ForkResult};
use thiserror::Error;
use tokio::signal::unix::{signal, SignalKind};
use tokio::time::MissedTickBehavior;

use crate::config::{ServerConfig, SupervisorConfig};
use crate::lifecycle::fatal::{install_fatal_handlers, FatalSetupError};
use crate::lifecycle::pod::{PipeOfDeath, Wakeup};
use crate::lifecycle::process::{safe_kill, ProcessControl, SystemProcesses, SIGNAL_GRACEFUL};
use crate::lifecycle::reclaim::ReclamationSupervisor;
use crate::lifecycle::scoreboard::ProcessTable;
use crate::net::listener::{BoundListener, ListenerError};
use crate::observability::metrics;
use crate::server::worker::run_worker;

/// Error type for starting the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Listener setup failed: {0}")]
    Listener(#[from] ListenerError),

    #[error("Fatal signal setup failed: {0}")]
    FatalSetup(#[from] FatalSetupError),

    #[error("Failed to open pipe of death: {0}")]
    Pod(io::Error),

    #[error("Failed to fork worker: {0}")]
    Fork(Errno),

    #[error("Failed to build runtime: {0}")]
    Runtime(io::Error),

    #[error("Failed to install signal handler: {0}")]
    Signal(io::Error),
}

/// Why the parent stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownCause {
    /// SIGTERM or SIGINT.
    Stop,
    /// SIGUSR1: let workers finish their connections.
    Graceful,
    /// A worker exited with the fatal exit code.
    FatalChild,
    /// Every worker is gone.
    AllExited,
}

/// Start the server and block until it shuts down.
pub fn run_server(config: ServerConfig) -> Result<ShutdownCause, ServerError> {
    let coredump_dir = PathBuf::from(&config.server.coredump_dir);
    install_fatal_handlers(&coredump_dir)?;

    let listeners = config
        .listeners
        .iter()
        .map(BoundListener::bind)
        .collect::<Result<Vec<_>, _>>()?;

    let endpoints = listeners.iter().map(|l| l.endpoint().clone()).collect();
    let wakeup = Wakeup::new(endpoints, config.server.description.clone())
        .with_timeout(Duration::from_secs(config.supervisor.wakeup_timeout_secs));
    let pod = PipeOfDeath::open(wakeup).map_err(ServerError::Pod)?;

    let mut table = ProcessTable::new(config.server.workers);
    for slot in 0..config.server.workers {
        // SAFETY: no runtime and no other thread exists yet. The child owns
        // its copies of the listeners and the pipe, and exits without
        // returning here.
        match unsafe { fork() } {
            Ok(ForkResult::Parent { child }) => {
                table.insert(child);
                tracing::info!(slot, pid = child.as_raw(), "Worker started");
            }
            Ok(ForkResult::Child) => {
                std::process::exit(worker_main(slot, listeners, pod, &config));
            }
            Err(e) if table.live() > 0 => {
                tracing::error!(slot, error = %e, "Failed to start worker, continuing with fewer");
                break;
            }
            Err(e) => return Err(ServerError::Fork(e)),
        }
    }
    // Workers hold their own handles.
    drop(listeners);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ServerError::Runtime)?;

    let reclaimer = ReclamationSupervisor::new(table, SystemProcesses, coredump_dir);
    runtime.block_on(async {
        if config.observability.metrics_enabled {
            match config.observability.metrics_address.parse() {
                Ok(addr) => metrics::init_metrics(addr),
                Err(_) => tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                ),
            }
        }
        supervise(reclaimer, pod, &config.supervisor).await
    })
}

/// Body of a forked child. Closes the inherited write end of the pipe so
/// the worker sees `NoRestart` once the parent is gone.
fn worker_main(slot: usize, listeners: Vec<BoundListener>, pod: PipeOfDeath, config: &ServerConfig) -> i32 {
    run_worker(slot, listeners, pod.into_reader(), config)
}

/// Parent loop. Returns once every worker was reclaimed or abandoned.
pub async fn supervise<C: ProcessControl>(
    mut reclaimer: ReclamationSupervisor<ProcessTable, C>,
    pod: PipeOfDeath,
    config: &SupervisorConfig,
) -> Result<ShutdownCause, ServerError> {
    let mut term = signal(SignalKind::terminate()).map_err(ServerError::Signal)?;
    let mut int = signal(SignalKind::interrupt()).map_err(ServerError::Signal)?;
    let mut graceful = signal(SignalKind::user_defined1()).map_err(ServerError::Signal)?;

    let mut relieve = tokio::time::interval(Duration::from_millis(config.relieve_interval_ms));
    relieve.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let cause = loop {
        tokio::select! {
            _ = relieve.tick() => {
                let report = reclaimer.relieve();
                if report.has_fatal() {
                    break ShutdownCause::FatalChild;
                }
                if report.has_sick() {
                    tracing::warn!("Worker exited after a resource shortage");
                }
                if reclaimer.workers().live() == 0 {
                    tracing::error!("No workers left");
                    break ShutdownCause::AllExited;
                }
            }
            _ = term.recv() => break ShutdownCause::Stop,
            _ = int.recv() => break ShutdownCause::Stop,
            _ = graceful.recv() => break ShutdownCause::Graceful,
        }
    };

    let live = reclaimer.workers().live();
    tracing::info!(?cause, workers = live, "Shutting down");

    let terminate = match cause {
        ShutdownCause::Stop => {
            for _ in 0..live {
                if let Err(e) = pod.signal().await {
                    tracing::debug!(error = %e, "Stopped signalling workers through the pipe");
                    break;
                }
            }
            false
        }
        ShutdownCause::Graceful => {
            for pid in reclaimer.workers().pids() {
                if let Err(e) = safe_kill(pid, SIGNAL_GRACEFUL) {
                    tracing::warn!(pid = pid.as_raw(), error = %e, "Failed to signal worker");
                }
            }
            let woken = pod.wake_all(live).await;
            tracing::debug!(woken, workers = live, "Woke workers blocked in accept");
            false
        }
        ShutdownCause::FatalChild | ShutdownCause::AllExited => true,
    };

    let report = reclaimer.reclaim(terminate).await;
    if !report.abandoned.is_empty() {
        tracing::warn!(abandoned = report.abandoned.len(), "Some workers could not be stopped");
    }
    tracing::info!(reaped = report.reaped.len(), "Workers reclaimed");
    Ok(cause)
}

/// Exit code of the parent for a given shutdown cause.
pub fn exit_code(cause: ShutdownCause) -> u8 {
    match cause {
        ShutdownCause::Stop | ShutdownCause::Graceful => 0,
        ShutdownCause::FatalChild | ShutdownCause::AllExited => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    use nix::sys::signal::Signal;
    use nix::unistd::Pid;

    use crate::lifecycle::process::{ChildExit, KillError, Liveness, EXIT_CHILD_FATAL};

    /// Every child has already exited with the same code.
    struct ExitedWith {
        code: i32,
        reaped: Mutex<HashSet<i32>>,
    }

    impl ExitedWith {
        fn new(code: i32) -> Self {
            Self {
                code,
                reaped: Mutex::new(HashSet::new()),
            }
        }
    }

    impl ProcessControl for ExitedWith {
        fn try_reap(&self, pid: Pid) -> Liveness {
            if self.reaped.lock().unwrap().insert(pid.as_raw()) {
                Liveness::Exited(ChildExit::Exited(self.code))
            } else {
                Liveness::Gone
            }
        }

        fn send(&self, _pid: Pid, _signal: Signal) -> Result<(), KillError> {
            Ok(())
        }
    }

    fn reclaimer(code: i32) -> ReclamationSupervisor<ProcessTable, ExitedWith> {
        let mut table = ProcessTable::new(2);
        table.insert(Pid::from_raw(1001));
        table.insert(Pid::from_raw(1002));
        ReclamationSupervisor::new(table, ExitedWith::new(code), std::env::temp_dir())
    }

    fn quick() -> SupervisorConfig {
        SupervisorConfig {
            relieve_interval_ms: 10,
            ..SupervisorConfig::default()
        }
    }

    #[tokio::test]
    async fn fatal_worker_exit_stops_the_server() {
        let pod = PipeOfDeath::open(Wakeup::new(Vec::new(), "test")).unwrap();
        let cause = supervise(reclaimer(EXIT_CHILD_FATAL), pod, &quick()).await.unwrap();
        assert_eq!(cause, ShutdownCause::FatalChild);
    }

    #[tokio::test]
    async fn losing_every_worker_stops_the_server() {
        let pod = PipeOfDeath::open(Wakeup::new(Vec::new(), "test")).unwrap();
        let cause = supervise(reclaimer(0), pod, &quick()).await.unwrap();
        assert_eq!(cause, ShutdownCause::AllExited);
    }

    #[test]
    fn only_requested_stops_exit_cleanly() {
        assert_eq!(exit_code(ShutdownCause::Stop), 0);
        assert_eq!(exit_code(ShutdownCause::Graceful), 0);
        assert_eq!(exit_code(ShutdownCause::FatalChild), 1);
        assert_eq!(exit_code(ShutdownCause::AllExited), 1);
    }
}
