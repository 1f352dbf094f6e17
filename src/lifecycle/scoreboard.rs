//! Worker slots owned by the parent process.

use nix::unistd::Pid;

/// Fixed-size table of worker processes, as seen by the reclaimer.
pub trait WorkerTable {
    /// Number of slots that may be in use; bounds iteration.
    fn max_used(&self) -> usize;

    /// Pid in `slot`, `None` when the slot is free.
    fn pid(&self, slot: usize) -> Option<Pid>;

    /// The child in `slot` was reaped.
    fn note_child_killed(&mut self, slot: usize);
}

/// Slot table for the workers forked by this process.
#[derive(Debug, Clone)]
pub struct ProcessTable {
    slots: Vec<Option<Pid>>,
}

impl ProcessTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Put `pid` in the first free slot. Returns the slot, or `None` when full.
    pub fn insert(&mut self, pid: Pid) -> Option<usize> {
        let slot = self.slots.iter().position(Option::is_none)?;
        self.slots[slot] = Some(pid);
        Some(slot)
    }

    pub fn slot_of(&self, pid: Pid) -> Option<usize> {
        self.slots.iter().position(|p| *p == Some(pid))
    }

    /// Pids of every occupied slot.
    pub fn pids(&self) -> Vec<Pid> {
        self.slots.iter().flatten().copied().collect()
    }

    /// Number of occupied slots.
    pub fn live(&self) -> usize {
        self.slots.iter().filter(|p| p.is_some()).count()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl WorkerTable for ProcessTable {
    fn max_used(&self) -> usize {
        self.slots
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |slot| slot + 1)
    }

    fn pid(&self, slot: usize) -> Option<Pid> {
        self.slots.get(slot).copied().flatten()
    }

    fn note_child_killed(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            tracing::trace!(slot, pid = ?entry.map(Pid::as_raw), "Worker slot freed");
            *entry = None;
        }
    }
}
