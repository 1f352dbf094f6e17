//! Child process control.
//!
//! # Responsibilities
//! - Check a child's status without blocking
//! - Deliver signals, refusing targets outside our process group
//! - Classify how a child ended and log unexpected deaths

use std::path::Path;

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{getpgid, getpgrp, Pid};
use thiserror::Error;

/// Exit code of a child that hit a transient resource shortage.
/// The parent should slow down forking.
pub const EXIT_CHILD_SICK: i32 = 7;

/// Exit code of a child that hit an unrecoverable error.
/// The parent should shut down.
pub const EXIT_CHILD_FATAL: i32 = 15;

/// Signal telling a worker to finish its connections and exit.
pub const SIGNAL_GRACEFUL: Signal = Signal::SIGUSR1;

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    Exited(i32),
    Signaled { signal: Signal, core_dumped: bool },
}

/// What the parent should make of a child's exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitClass {
    Normal,
    Sick,
    Fatal,
}

impl ExitClass {
    pub fn as_str(self) -> &'static str {
        match self {
            ExitClass::Normal => "normal",
            ExitClass::Sick => "sick",
            ExitClass::Fatal => "fatal",
        }
    }
}

impl ChildExit {
    /// Classify the exit, logging deaths by unexpected signals.
    pub fn classify(self, pid: Pid, coredump_dir: &Path) -> ExitClass {
        match self {
            ChildExit::Exited(EXIT_CHILD_SICK) => ExitClass::Sick,
            ChildExit::Exited(EXIT_CHILD_FATAL) => {
                tracing::error!(pid = pid.as_raw(), "Child returned a fatal error, server is exiting");
                ExitClass::Fatal
            }
            ChildExit::Exited(_) => ExitClass::Normal,
            ChildExit::Signaled { signal, core_dumped } => {
                match signal {
                    Signal::SIGTERM | Signal::SIGHUP | Signal::SIGKILL => {}
                    s if s == SIGNAL_GRACEFUL => {}
                    _ if core_dumped => tracing::warn!(
                        pid = pid.as_raw(),
                        signal = %signal,
                        coredump_dir = %coredump_dir.display(),
                        "Child exited on signal, possible coredump"
                    ),
                    _ => tracing::warn!(pid = pid.as_raw(), signal = %signal, "Child exited on signal"),
                }
                ExitClass::Normal
            }
        }
    }
}

/// Result of a non-blocking status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Running,
    Exited(ChildExit),
    /// Not our child, already reaped, or never existed.
    Gone,
}

/// Error type for signal delivery.
#[derive(Debug, Error)]
pub enum KillError {
    #[error("Invalid pid {0}")]
    InvalidPid(i32),

    #[error("Process {pid} not found: {source}")]
    NotFound { pid: i32, source: Errno },

    #[error("Refusing to send {signal} to pid {pid} outside process group")]
    OutsideGroup { pid: i32, signal: Signal },

    #[error("Failed to send {signal} to pid {pid}: {source}")]
    Kill {
        pid: i32,
        signal: Signal,
        source: Errno,
    },
}

/// Send `signal` to `pid` only if it belongs to our process group.
pub fn safe_kill(pid: Pid, signal: Signal) -> Result<(), KillError> {
    if pid.as_raw() < 1 {
        return Err(KillError::InvalidPid(pid.as_raw()));
    }

    let group = getpgid(Some(pid)).map_err(|source| KillError::NotFound {
        pid: pid.as_raw(),
        source,
    })?;
    if group != getpgrp() {
        tracing::error!(pid = pid.as_raw(), signal = %signal, "Refusing to signal process outside process group");
        return Err(KillError::OutsideGroup {
            pid: pid.as_raw(),
            signal,
        });
    }

    kill(pid, signal).map_err(|source| KillError::Kill {
        pid: pid.as_raw(),
        signal,
        source,
    })
}

/// Primitive operations on child processes.
pub trait ProcessControl {
    /// Reap `pid` if it has exited. Never blocks.
    fn try_reap(&self, pid: Pid) -> Liveness;

    /// Deliver `signal` to `pid`.
    fn send(&self, pid: Pid, signal: Signal) -> Result<(), KillError>;
}

/// The operating system's processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcesses;

impl ProcessControl for SystemProcesses {
    fn try_reap(&self, pid: Pid) -> Liveness {
        if pid.as_raw() < 1 {
            return Liveness::Gone;
        }
        match waitpid(pid, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Exited(_, code)) => Liveness::Exited(ChildExit::Exited(code)),
            Ok(WaitStatus::Signaled(_, signal, core_dumped)) => {
                Liveness::Exited(ChildExit::Signaled {
                    signal,
                    core_dumped,
                })
            }
            Ok(_) | Err(Errno::EINTR) => Liveness::Running,
            Err(_) => Liveness::Gone,
        }
    }

    fn send(&self, pid: Pid, signal: Signal) -> Result<(), KillError> {
        safe_kill(pid, signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_classified() {
        let pid = Pid::from_raw(4242);
        let dir = Path::new("/tmp");
        assert_eq!(ChildExit::Exited(0).classify(pid, dir), ExitClass::Normal);
        assert_eq!(ChildExit::Exited(1).classify(pid, dir), ExitClass::Normal);
        assert_eq!(ChildExit::Exited(EXIT_CHILD_SICK).classify(pid, dir), ExitClass::Sick);
        assert_eq!(ChildExit::Exited(EXIT_CHILD_FATAL).classify(pid, dir), ExitClass::Fatal);
    }

    #[test]
    fn signal_deaths_are_never_fatal() {
        let pid = Pid::from_raw(4242);
        let dir = Path::new("/tmp");
        for signal in [Signal::SIGTERM, Signal::SIGKILL, Signal::SIGSEGV, Signal::SIGUSR1] {
            let exit = ChildExit::Signaled {
                signal,
                core_dumped: signal == Signal::SIGSEGV,
            };
            assert_eq!(exit.classify(pid, dir), ExitClass::Normal);
        }
    }

    #[test]
    fn safe_kill_rejects_invalid_pids() {
        assert!(matches!(
            safe_kill(Pid::from_raw(0), Signal::SIGTERM),
            Err(KillError::InvalidPid(0))
        ));
        assert!(matches!(
            safe_kill(Pid::from_raw(-5), Signal::SIGTERM),
            Err(KillError::InvalidPid(-5))
        ));
    }

    #[test]
    fn reaping_a_stranger_reports_gone() {
        // pid 1 is never our child.
        assert_eq!(SystemProcesses.try_reap(Pid::from_raw(1)), Liveness::Gone);
        assert_eq!(SystemProcesses.try_reap(Pid::from_raw(0)), Liveness::Gone);
    }
}
