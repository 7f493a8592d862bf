//! # Visibility Timer
//!
//! Delayed-task queue behind auto-hide and progress polling.
//!
//! The queue knows nothing about threads or runtimes: it stores deadlines on a
//! [`Timestamp`] timeline and hands back whatever is due when asked. The
//! coordinator polls it from its own turn (see
//! [`TransportCoordinator::run_due`](crate::TransportCoordinator::run_due)) and
//! the tokio driver sleeps until [`VisibilityTimer::next_deadline`].
//!
//! At most one task per [`TaskKind`] is ever pending: [`VisibilityTimer::schedule`]
//! replaces an existing task of the same kind.

use bridge_traits::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of delayed work the coordinator arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Hide the overlay after an idle timeout.
    FadeOut,
    /// Re-read the engine position and refresh the seek bar.
    ProgressTick,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::FadeOut => write!(f, "fade_out"),
            TaskKind::ProgressTick => write!(f, "progress_tick"),
        }
    }
}

/// A pending task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub kind: TaskKind,
    pub fire_at: Timestamp,
    /// Arming order, used to break deadline ties first-in first-out.
    seq: u64,
}

/// Single-slot-per-kind delayed task queue.
#[derive(Debug, Default)]
pub struct VisibilityTimer {
    tasks: Vec<ScheduledTask>,
    next_seq: u64,
}

impl VisibilityTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `kind` to fire `delay_ms` after `now`, cancelling any pending task
    /// of the same kind first.
    pub fn schedule(&mut self, kind: TaskKind, now: Timestamp, delay_ms: u64) -> ScheduledTask {
        self.cancel(kind);

        let task = ScheduledTask {
            kind,
            fire_at: now.after(delay_ms),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.tasks.push(task);
        task
    }

    /// Drop the pending task of `kind`. Returns whether one was pending.
    pub fn cancel(&mut self, kind: TaskKind) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.kind != kind);
        self.tasks.len() != before
    }

    /// Drop every pending task.
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// The pending task of `kind`, if any.
    pub fn pending(&self, kind: TaskKind) -> Option<ScheduledTask> {
        self.tasks.iter().copied().find(|task| task.kind == kind)
    }

    pub fn is_pending(&self, kind: TaskKind) -> bool {
        self.pending(kind).is_some()
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Earliest deadline among pending tasks.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.tasks.iter().map(|task| task.fire_at).min()
    }

    /// Remove and return the earliest task due at `now`.
    ///
    /// Ties on the deadline resolve in arming order.
    pub fn pop_due(&mut self, now: Timestamp) -> Option<ScheduledTask> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.fire_at <= now)
            .min_by_key(|(_, task)| (task.fire_at, task.seq))
            .map(|(index, _)| index)?;

        Some(self.tasks.swap_remove(index))
    }
}
