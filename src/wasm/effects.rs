use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use super::drag::{self, ElementTrack, StyleSink};
use super::frame::FrameLoop;
use super::render;
use super::timer::TimeoutScheduler;
use crate::config::FxConfig;
use crate::error::FxError;
use crate::frame::TickList;
use crate::inertia::{DragDriver, InertialController};
use crate::motion::{Rotation, Scroll};

/// Everything mounted on the page. Dropping it (or calling
/// [`stop`](Effects::stop)) detaches listeners, clears settle timers and
/// cancels the frame loop.
pub struct Effects {
    frame: FrameLoop,
    listeners: Vec<EventListener>,
    timers: Rc<TimeoutScheduler>,
}

impl Effects {
    /// Resolves the configured elements and starts whatever was found. Absent
    /// elements and malformed selectors only disable their own effect.
    pub fn mount(window: &Window, document: &Document, cfg: &FxConfig) -> Result<Self, FxError> {
        let mut ticks = TickList::default();
        let mut listeners = Vec::new();
        let timers = Rc::new(TimeoutScheduler::default());

        if let Some((waveform, on_resize)) =
            render::mount(window, document, &cfg.selectors.waveform, &cfg.waveform)
        {
            ticks.push(waveform);
            listeners.push(on_resize);
        }

        match find::<HtmlElement>(document, &cfg.selectors.carousel) {
            Some(el) => {
                let motion = Rotation::new(StyleSink::new(el.clone()), cfg.rotation.clone());
                let controller = InertialController::new(motion, cfg.inertia.clone());
                let driver = Rc::new(DragDriver::new(controller, timers.clone()));
                ticks.push(driver.controller().clone());
                listeners.extend(drag::listen(&el, window, driver));
            }
            None => log::warn!("carousel `{}` not found; spin disabled", cfg.selectors.carousel),
        }

        match find::<HtmlElement>(document, &cfg.selectors.marquee) {
            Some(container) => {
                let strip = match container.query_selector(&cfg.selectors.marquee_track) {
                    Ok(track) => track,
                    Err(err) => {
                        log::warn!(
                            "marquee track `{}` rejected: {}",
                            cfg.selectors.marquee_track,
                            FxError::from(err)
                        );
                        None
                    }
                }
                .unwrap_or_else(|| container.clone().unchecked_into::<Element>());
                let motion = Scroll::new(ElementTrack::new(container.clone(), strip), cfg.scroll.clone());
                let controller = InertialController::new(motion, cfg.inertia.clone());
                let driver = Rc::new(DragDriver::new(controller, timers.clone()));
                ticks.push(driver.controller().clone());
                listeners.extend(drag::listen(&container, window, driver));
            }
            None => log::warn!("marquee `{}` not found; scroll disabled", cfg.selectors.marquee),
        }

        log::info!("effects mounted: {} animated, {} listeners", ticks.len(), listeners.len());
        Ok(Self {
            frame: FrameLoop::start(ticks),
            listeners,
            timers,
        })
    }

    pub fn is_running(&self) -> bool {
        self.frame.is_running()
    }

    /// Settle timers armed and not yet fired.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn stop(self) {
        let timers = self.timers.pending();
        self.timers.cancel_all();
        log::info!(
            "effects stopped; {} listeners removed, {timers} settle timers cleared",
            self.listeners.len()
        );
    }
}

/// A selector the DOM rejects counts as not found.
fn find<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    match document.query_selector(selector) {
        Ok(found) => found.and_then(|el| el.dyn_into::<T>().ok()),
        Err(err) => {
            log::warn!("selector `{selector}` rejected: {}", FxError::from(err));
            None
        }
    }
}
