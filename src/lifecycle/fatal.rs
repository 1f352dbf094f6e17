//! Fatal signal handling.
//!
//! On SIGSEGV, SIGBUS, SIGABRT, SIGILL or SIGFPE the process moves into the
//! coredump directory and re-raises the signal, so the core lands somewhere
//! writable. Everything the handler touches is prepared at install time; the
//! handler itself only calls `chdir`, `write` and `kill`.

use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::sync::OnceLock;

use nix::errno::Errno;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use thiserror::Error;

/// Signals that leave a core behind.
pub const FATAL_SIGNALS: [Signal; 5] = [
    Signal::SIGSEGV,
    Signal::SIGBUS,
    Signal::SIGABRT,
    Signal::SIGILL,
    Signal::SIGFPE,
];

/// Error type for installing the handlers.
#[derive(Debug, Error)]
pub enum FatalSetupError {
    #[error("Coredump directory {0} does not exist")]
    MissingDirectory(String),

    #[error("Coredump directory {0} contains a NUL byte")]
    InvalidPath(String),

    #[error("Failed to install handler for {signal}: {source}")]
    Install { signal: Signal, source: Errno },
}

struct FatalState {
    coredump_dir: CString,
    parent_pid: libc::pid_t,
    notice: Vec<u8>,
}

static FATAL_STATE: OnceLock<FatalState> = OnceLock::new();

extern "C" fn on_fatal_signal(sig: libc::c_int) {
    // SAFETY: only async-signal-safe calls on data that is never mutated
    // after install.
    unsafe {
        if let Some(state) = FATAL_STATE.get() {
            libc::chdir(state.coredump_dir.as_ptr());
            if libc::getpid() == state.parent_pid {
                libc::write(
                    libc::STDERR_FILENO,
                    state.notice.as_ptr().cast(),
                    state.notice.len(),
                );
            }
        }
        // SA_RESETHAND restored the default action.
        libc::kill(libc::getpid(), sig);
    }
}

/// Install the coredump handlers. Must be called in the parent before forking
/// so that workers inherit them; the notice is only written by the parent.
///
/// Later calls keep the directory from the first one.
pub fn install_fatal_handlers(coredump_dir: &Path) -> Result<(), FatalSetupError> {
    let dir_name = coredump_dir.display().to_string();
    if !coredump_dir.is_dir() {
        return Err(FatalSetupError::MissingDirectory(dir_name));
    }
    let dir = CString::new(coredump_dir.as_os_str().as_bytes())
        .map_err(|_| FatalSetupError::InvalidPath(dir_name.clone()))?;

    let state = FatalState {
        coredump_dir: dir,
        parent_pid: std::process::id() as libc::pid_t,
        notice: format!("h2mpm: fatal signal, possible coredump in {dir_name}\n").into_bytes(),
    };
    if FATAL_STATE.set(state).is_err() {
        tracing::debug!("Fatal signal handlers already prepared");
    }

    let action = SigAction::new(
        SigHandler::Handler(on_fatal_signal),
        SaFlags::SA_RESETHAND,
        SigSet::empty(),
    );
    for signal in FATAL_SIGNALS {
        // SAFETY: the handler only performs async-signal-safe operations.
        unsafe { sigaction(signal, &action) }
            .map_err(|source| FatalSetupError::Install { signal, source })?;
    }

    tracing::debug!(coredump_dir = %dir_name, "Fatal signal handlers installed");
    Ok(())
}
