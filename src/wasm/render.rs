use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use crate::config::WaveformConfig;
use crate::error::FxError;
use crate::grid::GridRenderer;
use crate::surface::{Rgba, Surface};

/// 2D canvas backing the waveform grid.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, FxError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| FxError::NoContext(canvas.id()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FxError::NoContext(canvas.id()))?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        f64::from(self.canvas.width())
    }

    fn height(&self) -> f64 {
        f64::from(self.canvas.height())
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width(), self.height());
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill_rect(x, y, w, h);
    }
}

pub type Waveform = Rc<RefCell<GridRenderer<CanvasSurface>>>;

pub fn viewport(window: &Window) -> (f64, f64) {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h)
}

/// Builds the waveform on the canvas matching `selector`, sized to the
/// viewport and kept in sync with window resizes. `None` when the canvas is
/// absent or has no 2D context.
pub fn mount(
    window: &Window,
    document: &Document,
    selector: &str,
    cfg: &WaveformConfig,
) -> Option<(Waveform, EventListener)> {
    let surface = match find_canvas(document, selector).and_then(CanvasSurface::new) {
        Ok(surface) => Some(surface),
        Err(err) => {
            log::warn!("waveform disabled: {err}");
            None
        }
    };
    let renderer = GridRenderer::new(surface, cfg.clone());
    if !renderer.is_enabled() {
        return None;
    }

    let renderer = Rc::new(RefCell::new(renderer));
    let (w, h) = viewport(window);
    renderer.borrow_mut().resize(w, h);

    let on_resize = {
        let renderer = renderer.clone();
        let win = window.clone();
        EventListener::new(window, "resize", move |_| {
            let (w, h) = viewport(&win);
            renderer.borrow_mut().resize(w, h);
        })
    };
    Some((renderer, on_resize))
}

fn find_canvas(document: &Document, selector: &str) -> Result<HtmlCanvasElement, FxError> {
    document
        .query_selector(selector)?
        .ok_or_else(|| FxError::MissingTarget(selector.to_owned()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| FxError::MissingTarget(selector.to_owned()))
}
