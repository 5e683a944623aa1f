use std::fmt;

use serde::Deserialize;

/// Straight-alpha colour as understood by a CSS fill style.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 1.0,
    };

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// 2D raster target the waveform grid paints into.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    /// Resize the backing store. Implementations may clear contents.
    fn set_size(&mut self, width: f64, height: f64);
    /// Clear the full `width() x height()` area.
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba);
}

/// A fill recorded by [`CommandBuffer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub color: Rgba,
}

/// Off-screen surface that records the commands of the most recent frame.
///
/// Useful for headless hosts and for inspecting what a frame would draw.
#[derive(Debug, Default, Clone)]
pub struct CommandBuffer {
    width: f64,
    height: f64,
    clears: usize,
    fills: Vec<Fill>,
}

impl CommandBuffer {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Fills issued since the last clear.
    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    /// Total number of clears, one per drawn frame.
    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl Surface for CommandBuffer {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.fills.clear();
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        self.fills.push(Fill { x, y, w, h, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_fill_style() {
        assert_eq!(Rgba::WHITE.with_alpha(0.25).to_string(), "rgba(255, 255, 255, 0.25)");
    }

    #[test]
    fn colour_reads_from_options() {
        let c: Rgba = serde_json::from_str(r#"{ "r": 0, "g": 200, "b": 80, "a": 0.5 }"#).unwrap();
        assert_eq!(c.to_string(), "rgba(0, 200, 80, 0.5)");
    }

    #[test]
    fn clear_drops_previous_frame() {
        let mut buf = CommandBuffer::new(20.0, 20.0);
        buf.fill_rect(0.0, 0.0, 9.0, 9.0, Rgba::WHITE);
        buf.clear();
        assert!(buf.fills().is_empty());
        assert_eq!(buf.clears(), 1);
    }
}
