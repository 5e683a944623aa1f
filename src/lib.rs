//! Animated page effects: a noise-driven pixel waveform and inertial drag
//! controllers for a 3D carousel and a looping marquee.
//!
//! Everything outside the wasm32 `wasm` module is plain Rust against small traits
//! ([`surface::Surface`], [`motion::TransformSink`], [`schedule::Scheduler`])
//! so the simulation runs and tests on the host.

pub mod config;
pub mod error;
pub mod frame;
pub mod grid;
pub mod inertia;
pub mod motion;
pub mod noise;
pub mod schedule;
pub mod surface;

pub use config::FxConfig;
pub use error::{ConfigError, FxError};
pub use grid::GridRenderer;
pub use inertia::{DragDriver, InertialController, Phase, PointerInput};
pub use motion::{Rotation, Scroll, Transform};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use crate::config::FxConfig;
    use crate::error::FxError;

    mod drag;
    mod effects;
    mod frame;
    mod render;
    mod timer;

    pub use effects::Effects;

    thread_local! {
        static RUNNING: RefCell<Option<Effects>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        start_with(FxConfig::default())?;
        Ok(())
    }

    /// Stops the running effects and mounts them again with `options`
    /// (a partial config object; missing fields keep their defaults).
    #[wasm_bindgen]
    pub fn restart(options: JsValue) -> Result<(), JsValue> {
        let cfg = if options.is_undefined() || options.is_null() {
            FxConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        // A rejected config leaves the current effects running.
        cfg.validate().map_err(FxError::from)?;
        stop();
        start_with(cfg)?;
        Ok(())
    }

    /// Removes every listener, timer and animation-frame request.
    #[wasm_bindgen]
    pub fn stop() {
        if let Some(effects) = RUNNING.with(|running| running.borrow_mut().take()) {
            effects.stop();
        }
    }

    /// Whether effects are mounted and their frame loop is live.
    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running() -> bool {
        RUNNING.with(|running| running.borrow().as_ref().is_some_and(Effects::is_running))
    }

    fn init_logging(level: log::Level) {
        // Only the first call installs the logger; later ones just move the level.
        let _ = console_log::init_with_level(level);
        log::set_max_level(level.to_level_filter());
    }

    fn start_with(cfg: FxConfig) -> Result<(), FxError> {
        init_logging(cfg.log_level());
        cfg.validate()?;

        let window = web_sys::window().ok_or_else(|| FxError::MissingTarget("window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| FxError::MissingTarget("document".into()))?;

        let effects = Effects::mount(&window, &document, &cfg)?;
        RUNNING.with(|running| *running.borrow_mut() = Some(effects));
        Ok(())
    }
}
