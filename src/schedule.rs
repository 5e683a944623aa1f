//! One-shot deferred tasks.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    /// Runs `task` once, no sooner than `delay_ms` from now.
    fn schedule(&self, delay_ms: u32, task: Task);
}

impl<T: Scheduler + ?Sized> Scheduler for Rc<T> {
    fn schedule(&self, delay_ms: u32, task: Task) {
        (**self).schedule(delay_ms, task)
    }
}

struct Pending {
    due: u64,
    seq: u64,
    task: Task,
}

/// Scheduler on a virtual millisecond clock that only moves on
/// [`advance`](ManualScheduler::advance).
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<u64>,
    seq: Cell<u64>,
    queue: RefCell<Vec<Pending>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now.get()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Moves the clock forward, running due tasks in deadline order (ties in
    /// scheduling order). Tasks may schedule further tasks.
    pub fn advance(&self, ms: u64) {
        let target = self.now.get().saturating_add(ms);
        while let Some(next) = self.pop_due(target) {
            self.now.set(next.due);
            (next.task)();
        }
        self.now.set(target);
    }

    fn pop_due(&self, target: u64) -> Option<Pending> {
        let mut queue = self.queue.borrow_mut();
        let idx = queue
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(i, _)| i)?;
        Some(queue.swap_remove(idx))
    }

    /// Drops every pending task without running it.
    pub fn clear(&self) {
        self.queue.borrow_mut().clear();
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.queue.borrow_mut().push(Pending {
            due: self.now.get() + u64::from(delay_ms),
            seq,
            task,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_in_deadline_then_fifo_order() {
        let sched = Rc::new(ManualScheduler::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        for (delay, tag) in [(30, "c"), (10, "a"), (30, "d"), (20, "b")] {
            let log = log.clone();
            sched.schedule(delay, Box::new(move || log.borrow_mut().push(tag)));
        }
        sched.advance(25);
        assert_eq!(*log.borrow(), ["a", "b"]);
        assert_eq!(sched.pending(), 2);
        sched.advance(5);
        assert_eq!(*log.borrow(), ["a", "b", "c", "d"]);
        assert_eq!(sched.now_ms(), 30);
    }

    #[test]
    fn nested_schedule_fires_within_same_advance() {
        let sched = Rc::new(ManualScheduler::new());
        let hits = Rc::new(Cell::new(0));
        let inner_sched = sched.clone();
        let inner_hits = hits.clone();
        sched.schedule(
            100,
            Box::new(move || {
                inner_hits.set(inner_hits.get() + 1);
                let hits = inner_hits.clone();
                inner_sched.schedule(50, Box::new(move || hits.set(hits.get() + 1)));
            }),
        );
        sched.advance(149);
        assert_eq!(hits.get(), 1);
        sched.advance(1);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn clear_discards_tasks() {
        let sched = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        sched.schedule(1, Box::new(move || h.set(1)));
        sched.clear();
        sched.advance(10);
        assert_eq!(hits.get(), 0);
    }
}
