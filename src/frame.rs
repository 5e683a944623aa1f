use std::cell::RefCell;
use std::rc::Rc;

/// Per-frame update, called once per display refresh.
pub trait Tick {
    fn tick(&mut self);
}

/// Effects advanced together by a frame driver.
#[derive(Default)]
pub struct TickList {
    entries: Vec<Rc<RefCell<dyn Tick>>>,
}

impl TickList {
    pub fn push(&mut self, entry: Rc<RefCell<dyn Tick>>) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ticks every entry in registration order. An entry already borrowed
    /// elsewhere is skipped for this frame.
    pub fn tick_all(&self) {
        for entry in &self.entries {
            if let Ok(mut entry) = entry.try_borrow_mut() {
                entry.tick();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(u32);

    impl Tick for Counter {
        fn tick(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn ticks_each_entry_once_per_frame() {
        let a = Rc::new(RefCell::new(Counter(0)));
        let b = Rc::new(RefCell::new(Counter(10)));
        let mut list = TickList::default();
        list.push(a.clone());
        list.push(b.clone());
        list.tick_all();
        list.tick_all();
        assert_eq!(a.borrow().0, 2);
        assert_eq!(b.borrow().0, 12);
    }

    #[test]
    fn busy_entry_is_skipped() {
        let a = Rc::new(RefCell::new(Counter(0)));
        let mut list = TickList::default();
        list.push(a.clone());
        {
            let _held = a.borrow();
            list.tick_all();
        }
        list.tick_all();
        assert_eq!(a.borrow().0, 1);
    }
}
