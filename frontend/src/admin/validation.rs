use gloo_events::{EventListener, EventListenerOptions};
use once_cell::sync::Lazy;
use regex::Regex;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::config::Messages;
use crate::error::UiError;
use crate::utils::dom::{self, Mounted};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

const ERROR_CLASS: &str = "admin-field-error";
const ERROR_COLOR: &str = "#DC3545";

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldInput {
    pub required: bool,
    pub kind: FieldKind,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldVerdict {
    Valid,
    Missing,
    InvalidEmail,
}

impl FieldVerdict {
    pub fn message(self, messages: &Messages) -> Option<&str> {
        match self {
            FieldVerdict::Valid => None,
            FieldVerdict::Missing => Some(&messages.required_field),
            FieldVerdict::InvalidEmail => Some(&messages.invalid_email),
        }
    }
}

/// A required field must be non-blank; a non-empty email field must look
/// like an address. Optional blank fields always pass.
pub fn check_field(field: &FieldInput) -> FieldVerdict {
    if field.required && field.value.trim().is_empty() {
        return FieldVerdict::Missing;
    }
    if field.kind == FieldKind::Email && !field.value.is_empty() && !is_valid_email(&field.value) {
        return FieldVerdict::InvalidEmail;
    }
    FieldVerdict::Valid
}

fn field_value(field: &Element) -> String {
    js_sys::Reflect::get(field, &JsValue::from_str("value"))
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_default()
}

fn read_field(field: &Element) -> FieldInput {
    let is_email = field.tag_name().eq_ignore_ascii_case("input")
        && field
            .get_attribute("type")
            .is_some_and(|kind| kind.eq_ignore_ascii_case("email"));
    FieldInput {
        required: field.has_attribute("required"),
        kind: if is_email {
            FieldKind::Email
        } else {
            FieldKind::Text
        },
        value: field_value(field),
    }
}

fn clear_field_error(field: &Element) {
    dom::set_style(field, "border-color", "");
    if let Some(parent) = field.parent_element() {
        if let Ok(existing) = dom::query(&parent, &format!(".{}", ERROR_CLASS)) {
            existing.remove();
        }
    }
}

fn show_field_error(document: &Document, field: &Element, message: &str) -> Result<(), UiError> {
    clear_field_error(field);
    dom::set_style(field, "border-color", ERROR_COLOR);

    let error = document.create_element("div")?;
    error.set_class_name(ERROR_CLASS);
    error.set_text_content(Some(message));
    dom::set_css_text(
        &error,
        &format!("color: {}; font-size: 0.875rem; margin-top: 4px;", ERROR_COLOR),
    );
    let parent = field
        .parent_element()
        .ok_or_else(|| UiError::missing("field parent"))?;
    parent.append_child(&error)?;
    Ok(())
}

/// Checks every `[required]` and email field of `form`, marking failures
/// and clearing stale errors. Returns whether the form may be submitted.
pub fn validate_form(document: &Document, form: &Element, messages: &Messages) -> bool {
    let fields = dom::query_all(form, "[required], input[type=\"email\"]");
    let mut valid = true;
    for field in &fields {
        let verdict = check_field(&read_field(field));
        match verdict.message(messages) {
            Some(message) => {
                valid = false;
                if let Err(e) = show_field_error(document, field, message) {
                    log::error!("Failed to show field error: {}", e);
                }
            }
            None => clear_field_error(field),
        }
    }
    valid
}

pub fn mount(document: &Document, messages: &Messages) -> Result<Mounted, UiError> {
    let forms = dom::query_all_document(document, ".admin-form");
    if forms.is_empty() {
        return Err(UiError::missing(".admin-form"));
    }
    let mut mounted = Mounted::new();
    for form in forms {
        let target = form.clone();
        let document = document.clone();
        let messages = messages.clone();
        mounted.listen(EventListener::new_with_options(
            &target,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                if !validate_form(&document, &form, &messages) {
                    event.prevent_default();
                }
            },
        ));
    }
    Ok(mounted)
}
