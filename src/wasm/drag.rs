use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, EventTarget, HtmlElement, MouseEvent, TouchEvent};

use crate::inertia::{DragDriver, PointerInput};
use crate::motion::{Motion, ScrollTrack, Transform, TransformSink};
use crate::schedule::Scheduler;

/// Writes rotation transforms to an element's inline style.
pub struct StyleSink {
    el: HtmlElement,
}

impl StyleSink {
    pub fn new(el: HtmlElement) -> Self {
        Self { el }
    }
}

impl TransformSink for StyleSink {
    fn write(&mut self, transform: Transform) {
        if let Err(err) = self
            .el
            .style()
            .set_property("transform", &transform.to_string())
        {
            log::debug!("transform write failed: {err:?}");
        }
    }
}

/// Scroll container plus the element whose children make up the strip.
pub struct ElementTrack {
    container: HtmlElement,
    strip: Element,
}

impl ElementTrack {
    pub fn new(container: HtmlElement, strip: Element) -> Self {
        Self { container, strip }
    }
}

impl TransformSink for ElementTrack {
    fn write(&mut self, transform: Transform) {
        if let Transform::ScrollOffset(px) = transform {
            // Through Reflect so fractional offsets are kept.
            let _ = js_sys::Reflect::set(
                &self.container,
                &JsValue::from_str("scrollLeft"),
                &JsValue::from_f64(px),
            );
        }
    }
}

impl ScrollTrack for ElementTrack {
    fn child_count(&self) -> usize {
        self.strip.children().length() as usize
    }

    fn duplicate_children(&mut self) {
        let children = self.strip.children();
        let originals: Vec<Element> = (0..children.length())
            .filter_map(|i| children.item(i))
            .collect();
        for child in originals {
            let copy = match child.clone_node_with_deep(true) {
                Ok(copy) => copy,
                Err(err) => {
                    log::warn!("marquee child not cloned: {err:?}");
                    continue;
                }
            };
            if let Err(err) = self.strip.append_child(&copy) {
                log::warn!("marquee child not appended: {err:?}");
            }
        }
    }

    fn scroll_width(&self) -> f64 {
        f64::from(self.container.scroll_width())
    }
}

fn pointer_x(event: &Event) -> Option<f64> {
    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        return Some(f64::from(mouse.client_x()));
    }
    let touch = event.dyn_ref::<TouchEvent>()?.touches().item(0)?;
    Some(f64::from(touch.client_x()))
}

/// Wires mouse and touch events to `driver`. Presses are taken from `target`;
/// moves and releases from `window` so a drag may leave the element.
pub fn listen<M, S>(
    target: &EventTarget,
    window: &EventTarget,
    driver: Rc<DragDriver<M, S>>,
) -> Vec<EventListener>
where
    M: Motion + 'static,
    S: Scheduler + 'static,
{
    let mut listeners = Vec::with_capacity(6);

    for kind in ["mousedown", "touchstart"] {
        let driver = driver.clone();
        listeners.push(EventListener::new_with_options(
            target,
            kind,
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(x) = pointer_x(event) else {
                    return;
                };
                if event.type_() == "mousedown" {
                    event.prevent_default();
                }
                driver.pointer(PointerInput::Press { x });
            },
        ));
    }

    for kind in ["mousemove", "touchmove"] {
        let driver = driver.clone();
        listeners.push(EventListener::new(window, kind, move |event: &Event| {
            if let Some(x) = pointer_x(event) {
                driver.pointer(PointerInput::Move { x });
            }
        }));
    }

    for kind in ["mouseup", "touchend"] {
        let driver = driver.clone();
        listeners.push(EventListener::new(window, kind, move |_event: &Event| {
            driver.pointer(PointerInput::Release);
        }));
    }

    listeners
}
