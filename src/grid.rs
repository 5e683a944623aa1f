//! Noise-driven pixel grid covering the lower part of a surface.

use log::{debug, warn};

use crate::config::WaveformConfig;
use crate::frame::Tick;
use crate::noise;
use crate::surface::Surface;

/// Cells fainter than this are not drawn at all.
pub const VISIBILITY_FLOOR: f64 = 0.01;
const MAX_INTENSITY: f64 = 0.9;
const ALPHA_SCALE: f64 = 0.35;

/// Number of columns and rows needed to cover `width x height`. A cell size
/// that is not a positive finite number yields an empty grid.
pub fn grid_dims(width: f64, height: f64, cell_size: f64) -> (u32, u32) {
    if !(cell_size > 0.0 && cell_size.is_finite()) {
        return (0, 0);
    }
    // NaN and negatives saturate to 0.
    let cols = (width / cell_size).ceil() as u32;
    let rows = (height / cell_size).ceil() as u32;
    (cols, rows)
}

/// 0 at `start_row`, approaching 1 at the bottom row. `None` when the active
/// region is empty.
pub fn height_factor(row: u32, start_row: u32, rows: u32) -> Option<f64> {
    if rows <= start_row {
        return None;
    }
    Some(f64::from(row.saturating_sub(start_row)) / f64::from(rows - start_row))
}

/// Activation bar for a row; lower rows light up more easily.
pub fn threshold(height_factor: f64) -> f64 {
    0.6 - height_factor * 0.4
}

/// Opacity of a cell with noise `n`, or `None` if it stays dark.
pub fn cell_alpha(n: f64, height_factor: f64) -> Option<f64> {
    let bar = threshold(height_factor);
    if n <= bar {
        return None;
    }
    let alpha = ((n - bar) * 3.0).min(MAX_INTENSITY) * height_factor * ALPHA_SCALE;
    (alpha > VISIBILITY_FLOOR).then_some(alpha)
}

pub struct GridRenderer<S> {
    surface: Option<S>,
    cfg: WaveformConfig,
    cols: u32,
    rows: u32,
    time: f64,
}

impl<S: Surface> GridRenderer<S> {
    /// Builds a renderer sized to the surface's current dimensions. Without a
    /// surface the renderer stays inert for its whole life.
    pub fn new(surface: Option<S>, cfg: WaveformConfig) -> Self {
        let mut renderer = Self {
            surface: None,
            cfg,
            cols: 0,
            rows: 0,
            time: 0.0,
        };
        match surface {
            Some(surface) => {
                let (w, h) = (surface.width(), surface.height());
                renderer.surface = Some(surface);
                renderer.resize(w, h);
            }
            None => warn!("waveform surface missing; grid renderer disabled"),
        }
        renderer
    }

    pub fn is_enabled(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// First evaluated row; everything above it is skipped.
    pub fn start_row(&self) -> u32 {
        (f64::from(self.rows) * self.cfg.start_fraction).floor() as u32
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.set_size(width, height);
        let (cols, rows) = grid_dims(width, height, self.cfg.cell_size);
        if (cols, rows) != (self.cols, self.rows) {
            debug!("waveform grid {}x{} -> {cols}x{rows}", self.cols, self.rows);
        }
        self.cols = cols;
        self.rows = rows;
    }

    /// Cells evaluated by [`draw`](Self::draw), row-major from `start_row`.
    pub fn active_cells(&self) -> impl Iterator<Item = (u32, u32)> + 'static {
        let cols = self.cols;
        (self.start_row()..self.rows).flat_map(move |row| (0..cols).map(move |col| (col, row)))
    }

    /// Renders one frame from scratch and advances time.
    pub fn draw(&mut self) {
        let start_row = self.start_row();
        let cell = self.cfg.cell_size;
        let color = self.cfg.color;
        let time = self.time;
        let rows = self.rows;
        let cells = self.active_cells();

        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.clear();
        for (col, row) in cells {
            let Some(hf) = height_factor(row, start_row, rows) else {
                break;
            };
            let n = noise::sample(f64::from(col), f64::from(row), time);
            if let Some(alpha) = cell_alpha(n, hf) {
                surface.fill_rect(
                    f64::from(col) * cell,
                    f64::from(row) * cell,
                    cell - 1.0,
                    cell - 1.0,
                    color.with_alpha(alpha * color.a),
                );
            }
        }
        self.time += self.cfg.time_step;
    }
}

impl<S: Surface> Tick for GridRenderer<S> {
    fn tick(&mut self) {
        self.draw();
    }
}
