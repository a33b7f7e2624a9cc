//! Cancellable one-shot timers on a logical clock
//!
//! Timers belong to the page that scheduled them so that leaving a page can
//! drop everything it left pending.

use std::time::Duration;

use tracing::debug;

use crate::models::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    WeekReset,
    DismissNotification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Pending {
    id: TimerId,
    owner: Page,
    due: Duration,
    task: Task,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, owner: Page, delay: Duration, task: Task) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now + delay;
        debug!(?owner, ?task, due_ms = due.as_millis() as u64, "timer scheduled");
        self.pending.push(Pending { id, owner, due, task });
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        before != self.pending.len()
    }

    /// Drop every timer owned by `owner`, returning how many were pending
    pub fn cancel_owned_by(&mut self, owner: Page) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| p.owner != owner);
        let cancelled = before - self.pending.len();
        if cancelled > 0 {
            debug!(?owner, cancelled, "timers cancelled");
        }
        cancelled
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward and return the next due task, if any
    ///
    /// Tasks fire in due order, ties in scheduling order. Callers loop on
    /// this so that a task scheduled while handling another one can still
    /// fire within the same advance.
    pub fn pop_due(&mut self, until: Duration) -> Option<(Page, Task)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.id.0))
            .map(|(i, _)| i)?;
        let fired = self.pending.remove(idx);
        self.now = self.now.max(fired.due);
        debug!(owner = ?fired.owner, task = ?fired.task, "timer fired");
        Some((fired.owner, fired.task))
    }

    /// Finish an advance: the clock lands on `until`
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(q: &mut TimerQueue, elapsed: Duration) -> Vec<Task> {
        let until = q.now() + elapsed;
        let mut fired = Vec::new();
        while let Some((_, task)) = q.pop_due(until) {
            fired.push(task);
        }
        q.settle(until);
        fired
    }

    #[test]
    fn fires_only_when_due() {
        let mut q = TimerQueue::new();
        q.schedule(Page::Report, Duration::from_secs(10), Task::WeekReset);
        assert!(drain(&mut q, Duration::from_secs(9)).is_empty());
        assert_eq!(drain(&mut q, Duration::from_secs(1)), vec![Task::WeekReset]);
        assert_eq!(q.pending(), 0);
    }

    #[test]
    fn fires_in_due_order() {
        let mut q = TimerQueue::new();
        q.schedule(Page::Report, Duration::from_secs(5), Task::DismissNotification);
        q.schedule(Page::Report, Duration::from_secs(2), Task::WeekReset);
        assert_eq!(
            drain(&mut q, Duration::from_secs(6)),
            vec![Task::WeekReset, Task::DismissNotification]
        );
    }

    #[test]
    fn cancel_by_owner_leaves_others() {
        let mut q = TimerQueue::new();
        q.schedule(Page::Report, Duration::from_secs(1), Task::WeekReset);
        q.schedule(Page::Home, Duration::from_secs(1), Task::DismissNotification);
        assert_eq!(q.cancel_owned_by(Page::Report), 1);
        assert_eq!(drain(&mut q, Duration::from_secs(2)), vec![Task::DismissNotification]);
    }

    #[test]
    fn cancel_single_timer() {
        let mut q = TimerQueue::new();
        let id = q.schedule(Page::Report, Duration::from_secs(1), Task::WeekReset);
        assert!(q.cancel(id));
        assert!(!q.cancel(id));
        assert!(drain(&mut q, Duration::from_secs(5)).is_empty());
    }
}
