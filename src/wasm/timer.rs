use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::timers::callback::Timeout;

use crate::schedule::{Scheduler, Task};

/// `setTimeout`-backed scheduler. Pending timeouts are owned here so that
/// dropping the scheduler clears them.
#[derive(Default)]
pub struct TimeoutScheduler {
    pending: RefCell<Vec<(Rc<Cell<bool>>, Timeout)>>,
}

impl TimeoutScheduler {
    pub fn pending(&self) -> usize {
        self.pending
            .borrow()
            .iter()
            .filter(|(fired, _)| !fired.get())
            .count()
    }

    pub fn cancel_all(&self) {
        self.pending.borrow_mut().clear();
    }
}

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) {
        let mut pending = self.pending.borrow_mut();
        pending.retain(|(fired, _)| !fired.get());

        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let timeout = Timeout::new(delay_ms, move || {
            flag.set(true);
            task();
        });
        pending.push((fired, timeout));
    }
}
