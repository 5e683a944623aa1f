//! Tunables for the effects. Defaults reproduce the stock look and feel; any
//! subset can be overridden from JS with a plain object.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::surface::Rgba;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FxConfig {
    pub waveform: WaveformConfig,
    pub inertia: InertiaConfig,
    pub rotation: RotationConfig,
    pub scroll: ScrollConfig,
    pub selectors: Selectors,
    /// `log` level used by the console logger ("error" .. "trace").
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WaveformConfig {
    /// Edge length of one grid cell in surface pixels.
    pub cell_size: f64,
    /// Added to the noise time after every frame.
    pub time_step: f64,
    /// Fraction of rows, from the top, that are never evaluated.
    pub start_fraction: f64,
    pub color: Rgba,
}

impl Default for WaveformConfig {
    fn default() -> Self {
        Self {
            cell_size: 10.0,
            time_step: 0.05,
            start_fraction: 0.4,
            color: Rgba::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InertiaConfig {
    /// Per-frame velocity multiplier once the pointer is released.
    pub friction: f64,
    /// Delay between release and the return of auto-drift.
    pub settle_delay_ms: u32,
    /// Below this speed the controller counts as resting.
    pub rest_velocity: f64,
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self {
            friction: 0.95,
            settle_delay_ms: 3000,
            rest_velocity: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RotationConfig {
    /// Degrees per pointer pixel.
    pub drag_gain: f64,
    /// Degrees subtracted per frame while drifting.
    pub auto_speed: f64,
    pub perspective_px: f64,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            drag_gain: 0.5,
            auto_speed: 0.2,
            perspective_px: 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollConfig {
    /// Scroll pixels per pointer pixel.
    pub drag_gain: f64,
    /// Scroll pixels added per frame while drifting.
    pub auto_speed: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            drag_gain: 2.0,
            auto_speed: 1.0,
        }
    }
}

/// CSS selectors resolved once by the page entry point.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    pub waveform: String,
    pub carousel: String,
    pub marquee: String,
    pub marquee_track: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            waveform: "#waveform".into(),
            carousel: ".carousel-3d".into(),
            marquee: ".marquee".into(),
            marquee_track: ".marquee-track".into(),
        }
    }
}

impl FxConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("waveform.cellSize", self.waveform.cell_size)?;
        finite("waveform.timeStep", self.waveform.time_step)?;
        if !(0.0..1.0).contains(&self.waveform.start_fraction) {
            return Err(ConfigError::new(
                "waveform.startFraction",
                format!("{} is outside [0, 1)", self.waveform.start_fraction),
            ));
        }
        if !self.waveform.color.a.is_finite() {
            return Err(ConfigError::new("waveform.color", "alpha is not finite"));
        }
        let friction = self.inertia.friction;
        if !(friction > 0.0 && friction <= 1.0) {
            return Err(ConfigError::new(
                "inertia.friction",
                format!("{friction} is outside (0, 1]"),
            ));
        }
        finite("inertia.restVelocity", self.inertia.rest_velocity)?;
        finite("rotation.dragGain", self.rotation.drag_gain)?;
        finite("rotation.autoSpeed", self.rotation.auto_speed)?;
        positive("rotation.perspectivePx", self.rotation.perspective_px)?;
        finite("scroll.dragGain", self.scroll.drag_gain)?;
        finite("scroll.autoSpeed", self.scroll.auto_speed)?;
        Ok(())
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::new(field, format!("{value} is not finite")))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::new(field, format!("{value} must be positive")))
    }
}
