use thiserror::Error;

/// Rejected configuration value.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid `{field}`: {reason}")]
pub struct ConfigError {
    pub field: &'static str,
    pub reason: String,
}

impl ConfigError {
    pub(crate) fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FxError {
    #[error("element `{0}` not found")]
    MissingTarget(String),
    #[error("2d context unavailable on `{0}`")]
    NoContext(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("js error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for FxError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<FxError> for wasm_bindgen::JsValue {
    fn from(err: FxError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
