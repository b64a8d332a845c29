//! Deferred callbacks.
//!
//! Staggered layout steps and delayed re-raises are timers on the host event
//! loop. Between scheduling and firing anything may happen, including the
//! target window being unregistered, so tasks must re-check their target.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    /// Run `task` once after roughly `delay_ms` milliseconds.
    fn schedule(&self, delay_ms: u32, task: Task);
}

/// Deterministic virtual-clock scheduler.
///
/// Nothing runs until the clock is advanced. Tasks fire in due-time order,
/// ties in scheduling order, and may schedule further tasks. Clones share
/// one clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualState>>,
}

#[derive(Default)]
struct ManualState {
    now: u64,
    seq: u64,
    queue: BTreeMap<(u64, u64), Task>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.inner.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Advance the clock by `ms`, running every task that becomes due.
    /// Returns the number of tasks run.
    pub fn advance(&self, ms: u64) -> usize {
        let target = self.inner.borrow().now + ms;
        let mut ran = 0;

        while let Some(task) = self.pop_due(target) {
            task();
            ran += 1;
        }

        self.inner.borrow_mut().now = target;
        ran
    }

    /// Run tasks until the queue is empty, moving the clock as needed.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let next_due = self.inner.borrow().queue.keys().next().map(|key| key.0);
            let Some(due) = next_due else {
                return ran;
            };
            let now = self.now();
            ran += self.advance(due.saturating_sub(now));
        }
    }

    // The borrow is released before the task runs so it can schedule more.
    fn pop_due(&self, target: u64) -> Option<Task> {
        let mut state = self.inner.borrow_mut();
        let key = *state.queue.keys().next()?;
        if key.0 > target {
            return None;
        }
        state.now = key.0;
        state.queue.remove(&key)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) {
        let mut state = self.inner.borrow_mut();
        let due = state.now + u64::from(delay_ms);
        let seq = state.seq;
        state.seq += 1;
        state.queue.insert((due, seq), task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_for_tasks = log.clone();
        let make = move |label: &'static str| -> Task {
            let log = log_for_tasks.clone();
            Box::new(move || log.borrow_mut().push(label))
        };
        (log, make)
    }

    #[test]
    fn tasks_wait_for_the_clock() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();

        scheduler.schedule(100, task("a"));
        assert_eq!(scheduler.advance(99), 0);
        assert!(log.borrow().is_empty());

        assert_eq!(scheduler.advance(1), 1);
        assert_eq!(*log.borrow(), vec!["a"]);
        assert_eq!(scheduler.now(), 100);
    }

    #[test]
    fn due_order_then_fifo() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();

        scheduler.schedule(50, task("late"));
        scheduler.schedule(10, task("first"));
        scheduler.schedule(10, task("second"));

        scheduler.run_until_idle();
        assert_eq!(*log.borrow(), vec!["first", "second", "late"]);
    }

    #[test]
    fn tasks_can_schedule_more_tasks() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let inner_scheduler = scheduler.clone();
        let inner_log = log.clone();
        scheduler.schedule(
            100,
            Box::new(move || {
                inner_log.borrow_mut().push(inner_scheduler.now());
                let nested_log = inner_log.clone();
                let nested_scheduler = inner_scheduler.clone();
                inner_scheduler.schedule(
                    500,
                    Box::new(move || nested_log.borrow_mut().push(nested_scheduler.now())),
                );
            }),
        );

        assert_eq!(scheduler.advance(1000), 2);
        assert_eq!(*log.borrow(), vec![100, 600]);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.now(), 1000);
    }
}
