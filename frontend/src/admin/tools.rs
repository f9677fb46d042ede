//! Small admin helpers: character counters, toast notifications, and the
//! functions exported for inline `onclick`/`onchange` handlers.

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Element, FileReader, HtmlImageElement, HtmlInputElement, HtmlTextAreaElement};

use crate::config::LandingConfig;
use crate::error::UiError;
use crate::utils::dom::{self, Mounted};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLevel {
    Normal,
    Warning,
    Over,
}

impl CounterLevel {
    /// Over the limit is red, past 90% of it amber.
    pub fn for_length(length: usize, max: usize) -> Self {
        if length > max {
            CounterLevel::Over
        } else if length as f64 > max as f64 * 0.9 {
            CounterLevel::Warning
        } else {
            CounterLevel::Normal
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            CounterLevel::Normal => "#6c757d",
            CounterLevel::Warning => "#ffc107",
            CounterLevel::Over => "#dc3545",
        }
    }
}

pub fn counter_text(length: usize, max: usize) -> String {
    format!("{}/{}", length, max)
}

/// Length as the browser counts it for `maxlength`, in UTF-16 units.
fn text_length(value: &str) -> usize {
    value.encode_utf16().count()
}

fn update_counter(counter: &Element, length: usize, max: usize) {
    counter.set_text_content(Some(&counter_text(length, max)));
    dom::set_style(counter, "color", CounterLevel::for_length(length, max).color());
}

pub fn mount_char_counters(document: &Document) -> Result<Mounted, UiError> {
    let fields: Vec<HtmlTextAreaElement> = dom::query_all_document(document, "textarea[data-max-length]")
        .into_iter()
        .filter_map(|field| field.dyn_into::<HtmlTextAreaElement>().ok())
        .collect();
    if fields.is_empty() {
        return Err(UiError::missing("textarea[data-max-length]"));
    }

    let mut mounted = Mounted::new();
    for field in fields {
        let Some(max) = field
            .get_attribute("data-max-length")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
        else {
            log::warn!("Ignoring textarea with a non-numeric data-max-length");
            continue;
        };
        let counter = document.create_element("div")?;
        counter.set_class_name("admin-char-counter");
        dom::set_css_text(&counter, "text-align: right; font-size: 0.875rem; margin-top: 4px;");
        if let Some(parent) = field.parent_node() {
            parent.append_child(&counter)?;
        }
        update_counter(&counter, text_length(&field.value()), max);

        let target = field.clone();
        mounted.listen(EventListener::new(&target, "input", move |_| {
            update_counter(&counter, text_length(&field.value()), max)
        }));
    }
    Ok(mounted)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    fn name(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }

    fn background(self) -> &'static str {
        match self {
            NotificationKind::Success => "#28a745",
            NotificationKind::Error => "#dc3545",
        }
    }
}

/// Slides a toast in at the top right and removes it after `visible_ms`.
pub fn show_notification(message: &str, kind: NotificationKind, visible_ms: u32) -> Result<(), UiError> {
    let document = dom::document()?;
    let body = document.body().ok_or_else(|| UiError::missing("body"))?;

    let toast = document.create_element("div")?;
    toast.set_class_name(&format!("admin-notification admin-notification-{}", kind.name()));
    toast.set_text_content(Some(message));
    dom::set_css_text(
        &toast,
        &format!(
            "position: fixed; top: 20px; right: 20px; background: {}; color: white; \
             padding: 12px 20px; border-radius: 8px; box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15); \
             z-index: 10000; opacity: 0; transform: translateX(100%); transition: all 0.3s ease;",
            kind.background()
        ),
    );
    body.append_child(&toast)?;

    let shown = toast.clone();
    Timeout::new(100, move || {
        dom::set_style(&shown, "opacity", "1");
        dom::set_style(&shown, "transform", "translateX(0)");
    })
    .forget();
    Timeout::new(visible_ms, move || {
        dom::set_style(&toast, "opacity", "0");
        dom::set_style(&toast, "transform", "translateX(100%)");
        Timeout::new(300, move || toast.remove()).forget();
    })
    .forget();
    Ok(())
}

fn notify(message: &str, kind: NotificationKind, visible_ms: u32) {
    if let Err(e) = show_notification(message, kind, visible_ms) {
        log::error!("Failed to show notification: {}", e);
    }
}

/// Copies `text` and reports the outcome with a toast.
#[wasm_bindgen(js_name = copyToClipboard)]
pub fn copy_to_clipboard(text: String) {
    let config = dom::document()
        .map(|document| LandingConfig::load(&document))
        .unwrap_or_default();
    let Ok(window) = dom::window() else {
        return;
    };
    let clipboard = window.navigator().clipboard();
    spawn_local(async move {
        let visible_ms = config.notification_ms;
        match JsFuture::from(clipboard.write_text(&text)).await {
            Ok(_) => notify(&config.messages.copied, NotificationKind::Success, visible_ms),
            Err(e) => {
                log::warn!("Clipboard write failed: {}", UiError::from(e));
                notify(&config.messages.copy_failed, NotificationKind::Error, visible_ms);
            }
        }
    });
}

fn preview_image_inner(input: &HtmlInputElement, preview_id: &str) -> Result<(), UiError> {
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(());
    };
    let preview = dom::by_id(&dom::document()?, preview_id)?;

    let reader = FileReader::new()?;
    let onload = Closure::wrap(Box::new({
        let reader = reader.clone();
        move || {
            let Some(data_url) = reader.result().ok().and_then(|result| result.as_string()) else {
                return;
            };
            match preview.dyn_ref::<HtmlImageElement>() {
                Some(image) => image.set_src(&data_url),
                None => {
                    let _ = preview.set_attribute("src", &data_url);
                }
            }
            dom::set_style(&preview, "display", "block");
        }
    }) as Box<dyn FnMut()>);
    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();
    reader.read_as_data_url(&file)?;
    Ok(())
}

/// Shows the first selected file of `input` in the image `#previewId`.
#[wasm_bindgen(js_name = previewImage)]
pub fn preview_image(input: HtmlInputElement, preview_id: String) {
    match preview_image_inner(&input, &preview_id) {
        Ok(()) => {}
        Err(e) if e.is_missing_element() => {}
        Err(e) => log::error!("Image preview failed: {}", e),
    }
}
