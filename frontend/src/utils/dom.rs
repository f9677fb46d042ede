use std::any::Any;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::error::UiError;

/// Everything a mounted component must keep alive: listeners detach and
/// timers cancel when this is dropped.
#[derive(Default)]
pub struct Mounted {
    listeners: Vec<EventListener>,
    keep: Vec<Box<dyn Any>>,
}

impl Mounted {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    pub fn keep<T: 'static>(&mut self, value: T) {
        self.keep.push(Box::new(value));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Keeps a successfully mounted component. A component whose markup is
/// absent is skipped quietly; any other failure is logged.
pub fn settle(name: &str, result: Result<Mounted, UiError>) -> Option<Mounted> {
    match result {
        Ok(mounted) => {
            log::debug!("Mounted {} ({} listeners)", name, mounted.listener_count());
            Some(mounted)
        }
        Err(e) if e.is_missing_element() => None,
        Err(e) => {
            log::error!("Failed to mount {}: {}", name, e);
            None
        }
    }
}

pub fn window() -> Result<Window, UiError> {
    web_sys::window().ok_or_else(|| UiError::missing("window"))
}

pub fn document() -> Result<Document, UiError> {
    window()?.document().ok_or_else(|| UiError::missing("document"))
}

pub fn by_id(document: &Document, id: &str) -> Result<Element, UiError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| UiError::missing(&format!("#{}", id)))
}

pub fn html_by_id(document: &Document, id: &str) -> Result<HtmlElement, UiError> {
    by_id(document, id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| UiError::missing(&format!("#{}", id)))
}

/// `querySelector` that treats both "no match" and "bad selector" as missing.
pub fn query(root: &Element, selector: &str) -> Result<Element, UiError> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .ok_or_else(|| UiError::missing(selector))
}

pub fn query_document(document: &Document, selector: &str) -> Result<Element, UiError> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .ok_or_else(|| UiError::missing(selector))
}

pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(|list| collect_elements(&list))
        .unwrap_or_default()
}

pub fn query_all_document(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(|list| collect_elements(&list))
        .unwrap_or_default()
}

fn collect_elements(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn add_class(element: &Element, class: &str) {
    let _ = element.class_list().add_1(class);
}

pub fn remove_class(element: &Element, class: &str) {
    let _ = element.class_list().remove_1(class);
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property(property, value);
    }
}

pub fn set_css_text(element: &Element, css: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        element.style().set_css_text(css);
    }
}

pub fn scroll_window_to(window: &Window, top: f64, smooth: bool) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(scroll_behavior(smooth));
    window.scroll_to_with_scroll_to_options(&options);
}

pub fn scroll_element_to(element: &Element, left: f64, smooth: bool) {
    let options = ScrollToOptions::new();
    options.set_left(left);
    options.set_behavior(scroll_behavior(smooth));
    element.scroll_to_with_scroll_to_options(&options);
}

fn scroll_behavior(smooth: bool) -> ScrollBehavior {
    if smooth {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Auto
    }
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

/// Parses a CSS length such as `"24px"` into pixels; anything else is 0.
pub fn parse_px(value: &str) -> f64 {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    match number.parse::<f64>() {
        Ok(px) if px.is_finite() => px,
        _ => 0.0,
    }
}

/// Computed `column-gap`, falling back to `gap`.
pub fn computed_gap(window: &Window, element: &Element) -> f64 {
    let Ok(Some(style)) = window.get_computed_style(element) else {
        return 0.0;
    };
    let column_gap = style.get_property_value("column-gap").unwrap_or_default();
    if !column_gap.is_empty() && column_gap != "normal" {
        return parse_px(&column_gap);
    }
    parse_px(&style.get_property_value("gap").unwrap_or_default())
}

/// `clientX` of a mouse event or of the first touch point.
pub fn pointer_client_x(event: &web_sys::Event) -> Option<f64> {
    if let Some(mouse) = event.dyn_ref::<web_sys::MouseEvent>() {
        return Some(f64::from(mouse.client_x()));
    }
    let touch = event.dyn_ref::<web_sys::TouchEvent>()?;
    touch
        .touches()
        .item(0)
        .or_else(|| touch.changed_touches().item(0))
        .map(|t| f64::from(t.client_x()))
}
