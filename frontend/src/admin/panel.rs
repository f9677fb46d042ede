use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use web_sys::Document;

use super::{autosave, tools, validation};
use crate::config::LandingConfig;
use crate::error::UiError;
use crate::utils::dom::{self, settle, Mounted};

/// Fades each `.admin-flash` out after the configured delay, then removes it.
pub fn mount_flash_messages(document: &Document, config: &LandingConfig) -> Result<Mounted, UiError> {
    let messages = dom::query_all_document(document, ".admin-flash");
    if messages.is_empty() {
        return Err(UiError::missing(".admin-flash"));
    }

    let removals: Rc<RefCell<Vec<Timeout>>> = Rc::default();
    let fades: Vec<Timeout> = messages
        .into_iter()
        .map(|message| {
            let removals = removals.clone();
            let fade_out_ms = config.fade_out_ms;
            Timeout::new(config.flash_timeout_ms, move || {
                dom::set_style(&message, "opacity", "0");
                removals
                    .borrow_mut()
                    .push(Timeout::new(fade_out_ms, move || message.remove()));
            })
        })
        .collect();

    let mut mounted = Mounted::new();
    mounted.keep(fades);
    mounted.keep(removals);
    Ok(mounted)
}

/// Destructive buttons only proceed after the user confirms.
pub fn mount_delete_confirmation(document: &Document, config: &LandingConfig) -> Result<Mounted, UiError> {
    let buttons = dom::query_all_document(document, ".admin-btn-danger");
    if buttons.is_empty() {
        return Err(UiError::missing(".admin-btn-danger"));
    }
    let window = dom::window()?;

    let mut mounted = Mounted::new();
    for button in buttons {
        let window = window.clone();
        let question = config.messages.confirm_delete.clone();
        mounted.listen(EventListener::new_with_options(
            &button,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                if !window.confirm_with_message(&question).unwrap_or(false) {
                    event.prevent_default();
                }
            },
        ));
    }
    Ok(mounted)
}

/// Mounts every admin panel behaviour present on the page.
pub fn mount(document: &Document, config: &LandingConfig) -> Vec<Mounted> {
    [
        settle("admin flash", mount_flash_messages(document, config)),
        settle("delete confirmation", mount_delete_confirmation(document, config)),
        settle("form validation", validation::mount(document, &config.messages)),
        settle("draft autosave", autosave::mount(document, config)),
        settle("character counters", tools::mount_char_counters(document)),
    ]
    .into_iter()
    .flatten()
    .collect()
}
