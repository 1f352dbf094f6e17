//! Connection identity, per-connection context and activity tracking.
//!
//! # Responsibilities
//! - Generate unique connection IDs for tracing
//! - Carry per-connection negotiation state (selected protocol, stream task flag)
//! - Track how many connections are in each busy state
//! - Let a dying worker wait for its connections to drain

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::h2::Protocol;

/// Global atomic counter for connection IDs.
/// Using relaxed ordering is sufficient since we only need uniqueness, not synchronization.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Negotiation state attached to a connection.
#[derive(Debug, Clone)]
pub struct ConnContext {
    /// Connection this context belongs to.
    pub id: ConnectionId,
    /// Set on the internal pseudo-connections that carry a single stream.
    /// Those are never sniffed.
    pub stream_task: bool,
    /// Protocol selected by any mechanism so far, `None` while on HTTP/1.1.
    pub selected: Option<Protocol>,
}

impl ConnContext {
    /// Context for a freshly accepted client connection.
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            stream_task: false,
            selected: None,
        }
    }

    /// Context for a per-stream pseudo-connection.
    pub fn stream_task(id: ConnectionId) -> Self {
        Self {
            id,
            stream_task: true,
            selected: None,
        }
    }
}

/// What a connection is currently blocked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyState {
    /// Waiting for the next request with nothing else to do.
    KeepAlive,
    /// Reading while work is pending.
    Read,
    /// Writing output to the client.
    Write,
}

/// Sink for per-connection status changes.
pub trait ActivityBoard: Send + Sync {
    /// Record that `conn` moved into `state`.
    fn set_busy(&self, conn: ConnectionId, state: BusyState);
}

/// Board that discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoActivity;

impl ActivityBoard for NoActivity {
    fn set_busy(&self, _conn: ConnectionId, _state: BusyState) {}
}

#[derive(Debug, Default)]
struct Counters {
    active: AtomicU64,
    keepalive: AtomicU64,
    read: AtomicU64,
    write: AtomicU64,
}

/// Tracks active connections for graceful shutdown and counts
/// status transitions reported by channels.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    counters: Arc<Counters>,
}

impl ConnectionTracker {
    /// Create a new connection tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new active connection. Returns a guard that decrements on drop.
    pub fn track(&self) -> ConnectionGuard {
        self.counters.active.fetch_add(1, Ordering::SeqCst);
        ConnectionGuard {
            counters: Arc::clone(&self.counters),
            id: ConnectionId::new(),
        }
    }

    /// Get current active connection count.
    pub fn active_count(&self) -> u64 {
        self.counters.active.load(Ordering::SeqCst)
    }

    /// Number of transitions into `state` seen so far.
    pub fn transitions(&self, state: BusyState) -> u64 {
        let counter = match state {
            BusyState::KeepAlive => &self.counters.keepalive,
            BusyState::Read => &self.counters.read,
            BusyState::Write => &self.counters.write,
        };
        counter.load(Ordering::Relaxed)
    }

    /// Wait until all connections are closed or the timeout expires.
    /// Returns `true` if every connection finished.
    pub async fn wait_for_drain(&self, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        while self.active_count() > 0 {
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        true
    }
}

impl ActivityBoard for ConnectionTracker {
    fn set_busy(&self, conn: ConnectionId, state: BusyState) {
        let counter = match state {
            BusyState::KeepAlive => &self.counters.keepalive,
            BusyState::Read => &self.counters.read,
            BusyState::Write => &self.counters.write,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(connection_id = %conn, ?state, "Connection status");
    }
}

/// Guard that tracks a connection's lifetime.
/// Decrements active count when dropped.
#[derive(Debug)]
pub struct ConnectionGuard {
    counters: Arc<Counters>,
    id: ConnectionId,
}

impl ConnectionGuard {
    /// Get this connection's ID.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.counters.active.fetch_sub(1, Ordering::SeqCst);
        tracing::trace!(connection_id = %self.id, "Connection closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_id_unique() {
        let id1 = ConnectionId::new();
        let id2 = ConnectionId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn connection_tracker_counts() {
        let tracker = ConnectionTracker::new();
        assert_eq!(tracker.active_count(), 0);

        let guard1 = tracker.track();
        let guard2 = tracker.track();
        assert_eq!(tracker.active_count(), 2);
        assert_ne!(guard1.id(), guard2.id());

        drop(guard1);
        assert_eq!(tracker.active_count(), 1);

        drop(guard2);
        assert_eq!(tracker.active_count(), 0);
    }

    #[test]
    fn tracker_counts_status_transitions() {
        let tracker = ConnectionTracker::new();
        let id = ConnectionId::new();

        tracker.set_busy(id, BusyState::KeepAlive);
        tracker.set_busy(id, BusyState::Read);
        tracker.set_busy(id, BusyState::Read);

        assert_eq!(tracker.transitions(BusyState::KeepAlive), 1);
        assert_eq!(tracker.transitions(BusyState::Read), 2);
        assert_eq!(tracker.transitions(BusyState::Write), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn drain_times_out_with_open_connection() {
        let tracker = ConnectionTracker::new();
        let _guard = tracker.track();
        assert!(!tracker.wait_for_drain(Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn drain_completes_when_idle() {
        let tracker = ConnectionTracker::new();
        drop(tracker.track());
        assert!(tracker.wait_for_drain(Duration::from_secs(1)).await);
    }
}
