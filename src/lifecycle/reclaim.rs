//! Reaping and terminating worker processes.
//!
//! # Responsibilities
//! - Reap exited children without blocking (`relieve`)
//! - Ask, then force, remaining children to exit on a fixed schedule (`reclaim`)
//! - Track extra (non-worker) children the parent also owns
//!
//! # Data Flow
//! ```text
//! reclaim(terminate)
//!     loop: sleep 16ms, 64ms, 256ms, 1s, 1s, ...
//!         → ReclamationTimeline (action due now)
//!         → every worker slot + every extra pid:
//!               exited? reap and classify : apply action
//!     until nobody is alive or the action was GiveUp
//! ```

use std::path::PathBuf;
use std::time::Duration;

use nix::sys::signal::Signal;
use nix::unistd::Pid;
use tokio::time::Instant;

use crate::lifecycle::process::{ChildExit, ExitClass, Liveness, ProcessControl, SystemProcesses};
use crate::lifecycle::scoreboard::WorkerTable;
use crate::lifecycle::timeline::{Action, ReclamationTimeline};
use crate::observability::metrics;

/// First sleep between polls.
pub const INITIAL_POLL: Duration = Duration::from_millis(16);

/// Longest sleep between polls.
pub const MAX_POLL: Duration = Duration::from_secs(1);

/// A child that was reaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reaped {
    pub pid: Pid,
    pub exit: ChildExit,
    pub class: ExitClass,
}

/// What a reclamation pass found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReclaimReport {
    pub reaped: Vec<Reaped>,
    /// Children still alive when the schedule gave up on them.
    pub abandoned: Vec<Pid>,
}

impl ReclaimReport {
    /// Whether any child asked the server to shut down.
    pub fn has_fatal(&self) -> bool {
        self.reaped.iter().any(|r| r.class == ExitClass::Fatal)
    }

    /// Whether any child reported a resource shortage.
    pub fn has_sick(&self) -> bool {
        self.reaped.iter().any(|r| r.class == ExitClass::Sick)
    }
}

/// The parent's view of its children.
pub struct ReclamationSupervisor<W, C = SystemProcesses> {
    workers: W,
    control: C,
    extras: Vec<Pid>,
    coredump_dir: PathBuf,
}

impl<W: WorkerTable, C: ProcessControl> ReclamationSupervisor<W, C> {
    pub fn new(workers: W, control: C, coredump_dir: PathBuf) -> Self {
        Self {
            workers,
            control,
            extras: Vec::new(),
            coredump_dir,
        }
    }

    pub fn workers(&self) -> &W {
        &self.workers
    }

    pub fn workers_mut(&mut self) -> &mut W {
        &mut self.workers
    }

    /// Extra processes, most recently registered first.
    pub fn extras(&self) -> &[Pid] {
        &self.extras
    }

    /// Track a child that is not in the worker table.
    pub fn register_extra(&mut self, pid: Pid) {
        if self.extras.contains(&pid) {
            tracing::debug!(pid = pid.as_raw(), "Extra process already registered");
            return;
        }
        self.extras.insert(0, pid);
    }

    /// Stop tracking `pid`. Returns `false` if it was not registered.
    pub fn unregister_extra(&mut self, pid: Pid) -> bool {
        match self.extras.iter().position(|p| *p == pid) {
            Some(index) => {
                self.extras.remove(index);
                true
            }
            None => false,
        }
    }

    /// Reap every child that has already exited. Never signals, never waits.
    pub fn relieve(&mut self) -> ReclaimReport {
        let mut report = ReclaimReport::default();
        self.reap_pass(Action::None, &mut report);
        report
    }

    /// Wait for every child to exit, escalating from SIGTERM to SIGKILL,
    /// and give up after the schedule's deadline.
    ///
    /// With `terminate`, children are sent a SIGTERM right away.
    pub async fn reclaim(&mut self, terminate: bool) -> ReclaimReport {
        let start = Instant::now();
        let mut timeline = ReclamationTimeline::new(terminate);
        let mut report = ReclaimReport::default();
        let mut wait = INITIAL_POLL;

        tracing::debug!(terminate, "Reclaiming child processes");

        loop {
            tokio::time::sleep(wait).await;
            wait = (wait * 4).min(MAX_POLL);

            let action = timeline.action_at(start.elapsed());
            let alive = self.reap_pass(action, &mut report);

            if alive == 0 || action == Action::GiveUp {
                break;
            }
        }

        tracing::debug!(
            reaped = report.reaped.len(),
            abandoned = report.abandoned.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Reclaim finished"
        );
        report
    }

    /// One pass over all children. Returns how many are still alive.
    fn reap_pass(&mut self, action: Action, report: &mut ReclaimReport) -> usize {
        let mut alive = 0;

        for slot in 0..self.workers.max_used() {
            let Some(pid) = self.workers.pid(slot) else {
                continue;
            };
            if self.reclaim_one(pid, action, report) {
                self.workers.note_child_killed(slot);
            } else {
                alive += 1;
            }
        }

        for pid in self.extras.clone() {
            if self.reclaim_one(pid, action, report) {
                self.unregister_extra(pid);
            } else {
                alive += 1;
            }
        }

        alive
    }

    /// Returns `true` once `pid` is gone.
    fn reclaim_one(&self, pid: Pid, action: Action, report: &mut ReclaimReport) -> bool {
        if pid.as_raw() < 1 {
            return true;
        }

        match self.control.try_reap(pid) {
            Liveness::Exited(exit) => {
                let class = exit.classify(pid, &self.coredump_dir);
                metrics::record_child_reaped(class.as_str());
                tracing::debug!(pid = pid.as_raw(), ?exit, class = class.as_str(), "Child reaped");
                report.reaped.push(Reaped { pid, exit, class });
                return true;
            }
            Liveness::Gone => return true,
            Liveness::Running => {}
        }

        match action {
            Action::None => {}
            Action::TermQuiet => self.signal(pid, Signal::SIGTERM, action),
            Action::Term => {
                tracing::warn!(pid = pid.as_raw(), action = %action, "Child still did not exit, sending a SIGTERM");
                self.signal(pid, Signal::SIGTERM, action);
            }
            Action::Kill => {
                tracing::error!(pid = pid.as_raw(), action = %action, "Child still did not exit, sending a SIGKILL");
                self.signal(pid, Signal::SIGKILL, action);
            }
            Action::GiveUp => {
                tracing::error!(
                    pid = pid.as_raw(),
                    action = %action,
                    "Could not make child exit, attempting to continue anyway"
                );
                report.abandoned.push(pid);
            }
        }
        false
    }

    fn signal(&self, pid: Pid, signal: Signal, action: Action) {
        metrics::record_signal(action.as_str());
        if let Err(e) = self.control.send(pid, signal) {
            tracing::debug!(pid = pid.as_raw(), signal = %signal, error = %e, "Signal not delivered");
        }
    }
}
