use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum UiError {
    /// A required element is not rendered on this page. Components treat
    /// this as "not present" and skip mounting without logging.
    #[error("Missing element: {0}")]
    MissingElement(String),
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error("HTTP {status}: {text}")]
    Http { status: u16, text: String },
    #[error("Storage unavailable: {0}")]
    Storage(String),
    #[error("Network error: {0}")]
    Network(#[from] gloo_net::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl UiError {
    pub fn missing(selector: &str) -> Self {
        UiError::MissingElement(selector.to_string())
    }

    pub fn is_missing_element(&self) -> bool {
        matches!(self, UiError::MissingElement(_))
    }
}

impl From<serde_wasm_bindgen::Error> for UiError {
    fn from(error: serde_wasm_bindgen::Error) -> Self {
        UiError::Js(error.to_string())
    }
}

impl From<JsValue> for UiError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));
        UiError::Js(message)
    }
}
