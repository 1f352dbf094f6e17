//! Escalation schedule for reclaiming children.

use std::fmt;
use std::time::Duration;

/// What to do to a child that is still alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Reap only.
    None,
    /// SIGTERM without complaining; the child was just told to stop.
    TermQuiet,
    /// SIGTERM, logged as a warning.
    Term,
    /// SIGKILL, logged as an error.
    Kill,
    /// Stop waiting and carry on without the child.
    GiveUp,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::None => "none",
            Action::TermQuiet => "term_quiet",
            Action::Term => "term",
            Action::Kill => "kill",
            Action::GiveUp => "giveup",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const SCHEDULE: [(Action, Duration); 5] = [
    (Action::Term, Duration::from_secs(3)),
    (Action::Term, Duration::from_secs(5)),
    (Action::Term, Duration::from_secs(7)),
    (Action::Kill, Duration::from_secs(9)),
    (Action::GiveUp, Duration::from_secs(10)),
];

/// One reclamation run's schedule. Every entry fires at most once.
#[derive(Debug, Clone)]
pub struct ReclamationTimeline {
    entries: Vec<(Action, Duration)>,
    next: usize,
}

impl ReclamationTimeline {
    /// `terminate` adds a silent SIGTERM at the start of the run.
    pub fn new(terminate: bool) -> Self {
        let mut entries = Vec::with_capacity(SCHEDULE.len() + 1);
        if terminate {
            entries.push((Action::TermQuiet, Duration::ZERO));
        }
        entries.extend_from_slice(&SCHEDULE);
        Self { entries, next: 0 }
    }

    /// Action due at `elapsed`: the latest entry whose threshold has passed,
    /// unless it already fired.
    pub fn action_at(&mut self, elapsed: Duration) -> Action {
        let due = self
            .entries
            .iter()
            .rposition(|(_, threshold)| *threshold <= elapsed);

        match due {
            Some(index) if index >= self.next => {
                self.next = index + 1;
                self.entries[index].0
            }
            _ => Action::None,
        }
    }

    /// Time after which the run always ends.
    pub fn deadline(&self) -> Duration {
        self.entries.last().map_or(Duration::ZERO, |(_, at)| *at)
    }
}
