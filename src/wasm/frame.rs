use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};

use crate::frame::TickList;

type Slot = Rc<RefCell<Option<AnimationFrame>>>;

/// Ticks every registered effect once per animation frame until dropped.
pub struct FrameLoop {
    slot: Slot,
}

impl FrameLoop {
    pub fn start(ticks: TickList) -> Self {
        let slot: Slot = Rc::new(RefCell::new(None));
        request_next(slot.clone(), Rc::new(ticks));
        Self { slot }
    }

    pub fn is_running(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        // Dropping the pending request cancels it.
        self.slot.borrow_mut().take();
    }
}

fn request_next(slot: Slot, ticks: Rc<TickList>) {
    let next = slot.clone();
    let handle = request_animation_frame(move |_| {
        ticks.tick_all();
        request_next(next, ticks);
    });
    *slot.borrow_mut() = Some(handle);
}
