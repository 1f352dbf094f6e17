//! Worker process.
//!
//! # Responsibilities
//! - Run a single-threaded runtime over the listeners inherited from the parent
//! - Check the pipe of death after every accepted connection
//! - Route each connection through the sniffer, falling back to HTTP/1
//! - Drain in-flight connections before exiting
//!
//! # Data Flow
//! ```text
//! accept task (one per listener) ──mpsc──→ worker loop
//!                                             │ spawn connection task
//!                                             │ PodReader::check
//!                                             ↓
//!                                   Die / NoRestart / SIGUSR1
//!                                             ↓
//!                               stop accepting → drain → exit
//! ```

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

use crate::config::{IoConfig, ServerConfig};
use crate::h2::{Dispatch, ProtocolSniffer, SecurityPolicy};
use crate::lifecycle::pod::{PodReader, PodSignal};
use crate::lifecycle::process::{EXIT_CHILD_FATAL, EXIT_CHILD_SICK};
use crate::net::channel::{BufferedChannel, ChannelError};
use crate::net::connection::{ActivityBoard, ConnContext, ConnectionTracker};
use crate::net::listener::{Accepted, BoundListener, ListenerError};
use crate::net::transport::Transport;
use crate::observability::metrics;
use crate::server::fallback::{refuse_h2, serve_http1, RefusingEngine, INADEQUATE_SECURITY};
use crate::server::shutdown::Shutdown;

/// Error type for a worker's lifetime.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Failed to build runtime: {0}")]
    Runtime(io::Error),

    #[error("Failed to register listener: {0}")]
    Listener(#[from] ListenerError),

    #[error("Failed to install signal handler: {0}")]
    Signal(io::Error),
}

impl WorkerError {
    /// Exit code reported to the parent.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Out of threads or fds; the parent may try again later.
            WorkerError::Runtime(_) => EXIT_CHILD_SICK,
            WorkerError::Listener(_) | WorkerError::Signal(_) => EXIT_CHILD_FATAL,
        }
    }
}

/// Why a worker stopped accepting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Pod(PodSignal),
    Graceful,
    ListenersClosed,
}

/// State shared by every connection of one worker.
pub struct WorkerShared {
    pub sniffer: ProtocolSniffer<RefusingEngine>,
    pub tracker: ConnectionTracker,
    pub io: IoConfig,
    pub description: String,
}

impl WorkerShared {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            sniffer: ProtocolSniffer::new(
                Arc::new(SecurityPolicy::rfc7540(config.h2.modern_tls_only)),
                config.h2.direct,
                RefusingEngine,
            ),
            tracker: ConnectionTracker::new(),
            io: config.io.clone(),
            description: config.server.description.clone(),
        }
    }
}

/// Body of a forked worker. Returns the process exit code.
pub fn run_worker(
    slot: usize,
    listeners: Vec<BoundListener>,
    pod: PodReader,
    config: &ServerConfig,
) -> i32 {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            let err = WorkerError::Runtime(e);
            tracing::error!(slot, error = %err, "Worker failed to start");
            return err.exit_code();
        }
    };

    let shared = Arc::new(WorkerShared::from_config(config));
    let drain = Duration::from_secs(config.supervisor.drain_timeout_secs);

    match runtime.block_on(serve(listeners, pod, shared, drain)) {
        Ok(reason) => {
            tracing::debug!(slot, pid = std::process::id(), ?reason, "Worker exiting");
            0
        }
        Err(e) => {
            tracing::error!(slot, pid = std::process::id(), error = %e, "Worker failed");
            e.exit_code()
        }
    }
}

/// Accept and serve until told to stop, then drain.
pub async fn serve(
    listeners: Vec<BoundListener>,
    pod: PodReader,
    shared: Arc<WorkerShared>,
    drain: Duration,
) -> Result<StopReason, WorkerError> {
    // Installed before any accept task runs, so an early SIGUSR1 is not fatal.
    let mut graceful = signal(SignalKind::user_defined1()).map_err(WorkerError::Signal)?;

    let shutdown = Shutdown::new();
    let (tx, mut rx) = mpsc::channel::<(Accepted, SocketAddr, String)>(64);

    for bound in listeners {
        let listener = bound.into_listener()?;
        let tx = tx.clone();
        let mut stop = shutdown.subscribe();
        tokio::spawn(async move {
            let protocol = listener.endpoint().protocol.clone();
            loop {
                tokio::select! {
                    _ = stop.recv() => break,
                    accepted = listener.accept() => match accepted {
                        Ok((conn, addr)) => {
                            if tx.send((conn, addr, protocol.clone())).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::warn!(address = %listener.endpoint().addr, error = %e, "Accept failed");
                            tokio::time::sleep(Duration::from_millis(10)).await;
                        }
                    },
                }
            }
        });
    }
    drop(tx);

    let reason = loop {
        tokio::select! {
            next = rx.recv() => {
                let Some((conn, addr, protocol)) = next else {
                    break StopReason::ListenersClosed;
                };
                metrics::record_connection(&protocol);
                spawn_connection(conn, addr, Arc::clone(&shared));

                match pod.check() {
                    Ok(signal) => break StopReason::Pod(signal),
                    Err(e) if e.kind() == io::ErrorKind::WouldBlock => {}
                    Err(e) => tracing::warn!(error = %e, "Failed to check pipe of death"),
                }
            }
            _ = graceful.recv() => break StopReason::Graceful,
        }
    };

    shutdown.trigger();
    tracing::debug!(
        ?reason,
        active = shared.tracker.active_count(),
        "Stopped accepting, draining connections"
    );
    if !shared.tracker.wait_for_drain(drain).await {
        tracing::warn!(
            active = shared.tracker.active_count(),
            "Connections still open after drain timeout"
        );
    }
    Ok(reason)
}

fn spawn_connection(conn: Accepted, addr: SocketAddr, shared: Arc<WorkerShared>) {
    match conn {
        Accepted::Plain(stream) => {
            tokio::spawn(handle_connection(stream, addr, shared));
        }
        Accepted::Tls(stream) => {
            tokio::spawn(handle_connection(stream, addr, shared));
        }
    }
}

/// Serve one connection to completion.
pub async fn handle_connection<T: Transport + 'static>(
    transport: T,
    peer_addr: SocketAddr,
    shared: Arc<WorkerShared>,
) {
    let guard = shared.tracker.track();
    let board: Arc<dyn ActivityBoard> = Arc::new(shared.tracker.clone());
    let mut channel = BufferedChannel::new(guard.id(), transport, &shared.io, board);
    let mut ctx = ConnContext::new(guard.id());

    let result = match shared.sniffer.dispatch(&mut ctx, &mut channel).await {
        Dispatch::Handled(protocol) => {
            tracing::debug!(connection_id = %ctx.id, %peer_addr, %protocol, "Connection handled");
            Ok(())
        }
        Dispatch::Rejected(failure) => {
            tracing::info!(connection_id = %ctx.id, %peer_addr, reason = %failure, "Rejected HTTP/2 connection");
            refuse_h2(&mut channel, INADEQUATE_SECURITY).await
        }
        Dispatch::Declined => serve_http1(&mut channel, &shared.description).await,
    };

    match result {
        Ok(()) | Err(ChannelError::Eof) => {}
        Err(e) => tracing::debug!(connection_id = %ctx.id, %peer_addr, error = %e, "Connection ended with error"),
    }
}
