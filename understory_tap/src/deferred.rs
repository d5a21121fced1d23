// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-driven fixed-delay work.
//!
//! The crate owns no clock. Work is scheduled against the millisecond timestamp
//! of the event that caused it, and the host pops due entries by calling
//! [`TapMachine::run_deferred`](crate::machine::TapMachine::run_deferred) with
//! the current time. Entries cannot be cancelled; whoever runs them checks
//! liveness first.
//!
//! ```
//! use understory_tap::deferred::{Deferred, DeferredQueue};
//!
//! let mut queue = DeferredQueue::new();
//! queue.schedule(1_000, 150, Deferred::ReleaseKeyPress);
//! queue.schedule(1_000, 0, Deferred::ClearFocusSuppression);
//!
//! assert_eq!(queue.next_deadline(), Some(1_000));
//! assert_eq!(queue.pop_due(1_000), Some(Deferred::ClearFocusSuppression));
//! assert_eq!(queue.pop_due(1_100), None);
//! assert_eq!(queue.pop_due(1_150), Some(Deferred::ReleaseKeyPress));
//! ```

use alloc::vec::Vec;

/// Delay of the synthetic release after an Enter press.
pub const KEY_RELEASE_DELAY_MS: u64 = 150;

/// Delay of the focus suppression reset after a non-touch press ("after the current task").
pub const FOCUS_SUPPRESSION_RESET_DELAY_MS: u64 = 0;

/// Work items the tap machine defers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Deferred {
    /// End the synthetic keyboard press.
    ReleaseKeyPress,
    /// Stop suppressing focus after a non-touch press.
    ClearFocusSuppression,
}

#[derive(Copy, Clone, Debug)]
struct Entry {
    deadline: u64,
    seq: u64,
    task: Deferred,
}

/// Deadline-ordered queue; ties run in scheduling order.
#[derive(Clone, Debug, Default)]
pub struct DeferredQueue {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl DeferredQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `task` to run `delay_ms` after `now`.
    pub fn schedule(&mut self, now: u64, delay_ms: u64, task: Deferred) {
        let entry = Entry {
            deadline: now.saturating_add(delay_ms),
            seq: self.next_seq,
            task,
        };
        self.next_seq += 1;
        let at = self
            .entries
            .partition_point(|e| (e.deadline, e.seq) <= (entry.deadline, entry.seq));
        self.entries.insert(at, entry);
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.first().map(|e| e.deadline)
    }

    /// Removes and returns the earliest entry whose deadline is `<= now`.
    pub fn pop_due(&mut self, now: u64) -> Option<Deferred> {
        if self.entries.first()?.deadline > now {
            return None;
        }
        Some(self.entries.remove(0).task)
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every pending entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_run_in_scheduling_order() {
        let mut q = DeferredQueue::new();
        q.schedule(10, 5, Deferred::ReleaseKeyPress);
        q.schedule(15, 0, Deferred::ClearFocusSuppression);
        assert_eq!(q.pop_due(15), Some(Deferred::ReleaseKeyPress));
        assert_eq!(q.pop_due(15), Some(Deferred::ClearFocusSuppression));
        assert!(q.is_empty());
    }

    #[test]
    fn nothing_due_before_deadline() {
        let mut q = DeferredQueue::new();
        q.schedule(0, KEY_RELEASE_DELAY_MS, Deferred::ReleaseKeyPress);
        assert_eq!(q.pop_due(149), None);
        assert_eq!(q.len(), 1);
        assert_eq!(q.pop_due(150), Some(Deferred::ReleaseKeyPress));
    }

    #[test]
    fn earlier_deadline_scheduled_later_runs_first() {
        let mut q = DeferredQueue::new();
        q.schedule(0, 150, Deferred::ReleaseKeyPress);
        q.schedule(100, 0, Deferred::ClearFocusSuppression);
        assert_eq!(q.next_deadline(), Some(100));
        assert_eq!(q.pop_due(1_000), Some(Deferred::ClearFocusSuppression));
        assert_eq!(q.pop_due(1_000), Some(Deferred::ReleaseKeyPress));
    }

    #[test]
    fn deadline_saturates() {
        let mut q = DeferredQueue::new();
        q.schedule(u64::MAX - 1, 150, Deferred::ReleaseKeyPress);
        assert_eq!(q.next_deadline(), Some(u64::MAX));
    }

    #[test]
    fn clear_drops_pending() {
        let mut q = DeferredQueue::new();
        q.schedule(0, 0, Deferred::ReleaseKeyPress);
        q.clear();
        assert_eq!(q.pop_due(u64::MAX), None);
    }
}
