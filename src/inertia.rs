//! Pointer-driven inertial controller shared by the carousel and the marquee.
//!
//! The controller owns a position and a velocity. Dragging writes position
//! directly and records the last pointer delta as velocity; once released the
//! velocity is integrated and decays geometrically every frame. After a settle
//! delay with no new drag the controller returns to [`Phase::Auto`], where the
//! [`Motion`] adds its own constant drift whenever the residual velocity has
//! died out.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::config::InertiaConfig;
use crate::frame::Tick;
use crate::motion::Motion;
use crate::schedule::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Idle; drifts on its own once velocity is spent.
    Auto,
    Dragging,
    /// Released, coasting until the settle timer fires.
    Settling,
}

/// Mouse and touch input reduced to the horizontal coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Press { x: f64 },
    Move { x: f64 },
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub position: f64,
    pub velocity: f64,
    pub phase: Phase,
    pub last_x: f64,
    pub start_x: f64,
    pub start_position: f64,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    pub fn is_auto_mode(&self) -> bool {
        self.phase == Phase::Auto
    }
}

impl Default for DragState {
    fn default() -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            phase: Phase::Auto,
            last_x: 0.0,
            start_x: 0.0,
            start_position: 0.0,
        }
    }
}

pub struct InertialController<M> {
    motion: M,
    state: DragState,
    cfg: InertiaConfig,
}

impl<M: Motion> InertialController<M> {
    pub fn new(motion: M, cfg: InertiaConfig) -> Self {
        Self {
            motion,
            state: DragState::default(),
            cfg,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn position(&self) -> f64 {
        self.state.position
    }

    pub fn velocity(&self) -> f64 {
        self.state.velocity
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn motion(&self) -> &M {
        &self.motion
    }

    /// Applies one pointer event. Returns the settle delay when a release
    /// needs a resume timer armed.
    pub fn pointer(&mut self, input: PointerInput) -> Option<u32> {
        match input {
            PointerInput::Press { x } => {
                self.press(x);
                None
            }
            PointerInput::Move { x } => {
                self.drag_to(x);
                None
            }
            PointerInput::Release => self.release(),
        }
    }

    pub fn press(&mut self, x: f64) {
        let s = &mut self.state;
        s.phase = Phase::Dragging;
        s.velocity = 0.0;
        s.last_x = x;
        s.start_x = x;
        s.start_position = s.position;
    }

    /// Ignored unless a drag is in progress.
    pub fn drag_to(&mut self, x: f64) {
        if !self.state.is_dragging() {
            return;
        }
        let (position, velocity) = self.motion.drag(&self.state, x);
        self.state.position = self.motion.normalize(position);
        self.state.velocity = velocity;
        self.state.last_x = x;
    }

    pub fn release(&mut self) -> Option<u32> {
        if !self.state.is_dragging() {
            return None;
        }
        self.state.phase = Phase::Settling;
        debug!("drag released with velocity {:.3}", self.state.velocity);
        Some(self.cfg.settle_delay_ms)
    }

    /// Settle-timer body. A drag started since the timer was armed wins.
    pub fn resume_auto(&mut self) {
        if self.state.is_dragging() {
            return;
        }
        if self.state.phase != Phase::Auto {
            debug!("auto drift resumed");
        }
        self.state.phase = Phase::Auto;
    }

    /// Integrates one frame and writes the result to the motion's sink.
    pub fn step(&mut self) {
        let s = &mut self.state;
        if !s.is_dragging() {
            s.position = self.motion.normalize(s.position + s.velocity);
            s.velocity *= self.cfg.friction;
            if s.velocity.abs() < self.cfg.rest_velocity && s.is_auto_mode() {
                s.position = self.motion.auto_drift(s.position);
            }
        }
        self.motion.write(s.position);
    }
}

impl<M: Motion> Tick for InertialController<M> {
    fn tick(&mut self) {
        self.step();
    }
}

/// Arms a settle timer that only holds a weak reference to its controller.
pub fn schedule_resume<M, S>(scheduler: &S, controller: &Rc<RefCell<InertialController<M>>>, delay_ms: u32)
where
    M: Motion + 'static,
    S: Scheduler + ?Sized,
{
    let controller = Rc::downgrade(controller);
    scheduler.schedule(
        delay_ms,
        Box::new(move || {
            if let Some(controller) = controller.upgrade() {
                controller.borrow_mut().resume_auto();
            }
        }),
    );
}

/// Routes pointer input into a shared controller and arms settle timers.
pub struct DragDriver<M, S> {
    controller: Rc<RefCell<InertialController<M>>>,
    scheduler: S,
}

impl<M: Motion + 'static, S: Scheduler> DragDriver<M, S> {
    pub fn new(controller: InertialController<M>, scheduler: S) -> Self {
        Self {
            controller: Rc::new(RefCell::new(controller)),
            scheduler,
        }
    }

    pub fn controller(&self) -> &Rc<RefCell<InertialController<M>>> {
        &self.controller
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn pointer(&self, input: PointerInput) {
        let settle = self.controller.borrow_mut().pointer(input);
        if let Some(delay_ms) = settle {
            schedule_resume(&self.scheduler, &self.controller, delay_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unbounded motion with unit gain, no drift, recording writes.
    #[derive(Default)]
    struct Probe {
        writes: Vec<f64>,
    }

    impl Motion for Probe {
        fn drag(&self, state: &DragState, x: f64) -> (f64, f64) {
            let delta = x - state.last_x;
            (state.position + delta, delta)
        }

        fn auto_drift(&self, position: f64) -> f64 {
            position + 1.0
        }

        fn write(&mut self, position: f64) {
            self.writes.push(position);
        }
    }

    fn controller() -> InertialController<Probe> {
        InertialController::new(Probe::default(), InertiaConfig::default())
    }

    #[test]
    fn starts_in_auto_mode() {
        let c = controller();
        assert_eq!(c.phase(), Phase::Auto);
        assert_eq!(c.position(), 0.0);
    }

    #[test]
    fn press_stops_motion_and_leaves_auto() {
        let mut c = controller();
        c.step();
        c.press(40.0);
        assert!(c.state().is_dragging());
        assert!(!c.state().is_auto_mode());
        assert_eq!(c.velocity(), 0.0);
        let p = c.position();
        c.step();
        assert_eq!(c.position(), p);
    }

    #[test]
    fn moves_outside_drag_are_ignored() {
        let mut c = controller();
        c.drag_to(500.0);
        assert_eq!(c.position(), 0.0);
        assert_eq!(c.release(), None);
        assert_eq!(c.phase(), Phase::Auto);
    }

    #[test]
    fn release_requests_settle_timer() {
        let mut c = controller();
        assert_eq!(c.pointer(PointerInput::Press { x: 0.0 }), None);
        assert_eq!(c.pointer(PointerInput::Move { x: 3.0 }), None);
        assert_eq!(c.pointer(PointerInput::Release), Some(3000));
        assert_eq!(c.phase(), Phase::Settling);
    }

    #[test]
    fn resume_is_guarded_by_active_drag() {
        let mut c = controller();
        c.press(0.0);
        c.resume_auto();
        assert_eq!(c.phase(), Phase::Dragging);
        c.release();
        c.resume_auto();
        assert_eq!(c.phase(), Phase::Auto);
    }

    #[test]
    fn step_writes_every_frame() {
        let mut c = controller();
        c.step();
        c.press(0.0);
        c.step();
        c.step();
        assert_eq!(c.motion().writes.len(), 3);
    }

    #[test]
    fn settling_does_not_drift() {
        let mut c = controller();
        c.press(0.0);
        c.release();
        for _ in 0..10 {
            c.step();
        }
        assert_eq!(c.position(), 0.0);
    }
}
