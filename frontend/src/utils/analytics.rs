use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

use crate::error::UiError;

pub const CATALOG_CTA_EVENT: &str = "catalog_cta_click";

/// Record pushed onto `window.dataLayer`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub event: String,
    pub label: String,
    pub timestamp: f64,
}

/// Parameters for the `gtag('event', ...)` fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GtagParams {
    pub event_label: String,
    pub event_category: String,
    pub value: f64,
}

impl AnalyticsEvent {
    pub fn catalog_cta(label: impl Into<String>, timestamp: f64) -> Self {
        Self {
            event: CATALOG_CTA_EVENT.to_string(),
            label: label.into(),
            timestamp,
        }
    }

    pub fn gtag_params(&self) -> GtagParams {
        GtagParams {
            event_label: self.label.clone(),
            event_category: "catalog".to_string(),
            value: self.timestamp,
        }
    }
}

/// Label for a tracked element: `data-track-label` wins over its text.
pub fn cta_label(data_label: Option<String>, text: Option<String>) -> String {
    data_label
        .filter(|label| !label.trim().is_empty())
        .or(text)
        .map(|label| label.trim().to_string())
        .unwrap_or_default()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, UiError> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}

/// Sends the event to the first sink the page provides: a `dataLayer` array,
/// then a `gtag` function, then the log.
pub fn push_event(window: &Window, event: &AnalyticsEvent) -> Result<(), UiError> {
    let data_layer = js_sys::Reflect::get(window, &JsValue::from_str("dataLayer"))?;
    if js_sys::Array::is_array(&data_layer) {
        let data_layer: js_sys::Array = data_layer.unchecked_into();
        data_layer.push(&to_js(event)?);
        return Ok(());
    }

    let gtag = js_sys::Reflect::get(window, &JsValue::from_str("gtag"))?;
    if let Some(gtag) = gtag.dyn_ref::<js_sys::Function>() {
        gtag.call3(
            &JsValue::NULL,
            &JsValue::from_str("event"),
            &JsValue::from_str(&event.event),
            &to_js(&event.gtag_params())?,
        )?;
        return Ok(());
    }

    log::info!("Catalog CTA click: {:?}", event);
    Ok(())
}
