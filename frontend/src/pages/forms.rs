use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlFormElement, HtmlInputElement};

use crate::config::LandingConfig;
use crate::error::UiError;
use crate::utils::analytics::{self, AnalyticsEvent};
use crate::utils::api::Api;
use crate::utils::dom::{self, Mounted};

fn form_by_id(document: &Document, id: &str) -> Result<HtmlFormElement, UiError> {
    dom::by_id(document, id)?
        .dyn_into::<HtmlFormElement>()
        .map_err(|_| UiError::missing(&format!("form#{}", id)))
}

/// Thank-you stub shared by the contact and subscribe forms: the submission
/// is swallowed, logged, acknowledged and the form cleared.
fn acknowledge_on_submit(
    form: HtmlFormElement,
    message: String,
    describe: impl Fn(&HtmlFormElement) -> String + 'static,
) -> EventListener {
    let target = form.clone();
    EventListener::new_with_options(
        &target,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            log::info!("{}", describe(&form));
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&message);
            }
            form.reset();
        },
    )
}

pub fn mount_contact(document: &Document, config: &LandingConfig) -> Result<Mounted, UiError> {
    let form = form_by_id(document, "contactForm")?;
    let mut mounted = Mounted::new();
    mounted.listen(acknowledge_on_submit(
        form,
        config.messages.contact_sent.clone(),
        |_| "Contact form submitted".to_string(),
    ));
    Ok(mounted)
}

pub fn mount_subscribe(document: &Document, config: &LandingConfig) -> Result<Mounted, UiError> {
    let form = form_by_id(document, "subscribeForm")?;
    let mut mounted = Mounted::new();
    mounted.listen(acknowledge_on_submit(
        form,
        config.messages.subscribed.clone(),
        |form| {
            let email = form
                .query_selector("input[type=\"email\"]")
                .ok()
                .flatten()
                .and_then(|input| input.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default();
            format!("Subscription requested for {}", email)
        },
    ));
    Ok(mounted)
}

/// Reports clicks on catalog call-to-action links.
pub fn mount_cta_tracking(document: &Document) -> Result<Mounted, UiError> {
    let window = dom::window()?;
    let links = dom::query_all_document(document, "[data-track-event=\"catalog-cta\"]");
    if links.is_empty() {
        return Err(UiError::missing("[data-track-event=\"catalog-cta\"]"));
    }

    let mut mounted = Mounted::new();
    for link in links {
        let window = window.clone();
        let target = link.clone();
        mounted.listen(EventListener::new(&target, "click", move |_| {
            let label = analytics::cta_label(link.get_attribute("data-track-label"), link.text_content());
            let event = AnalyticsEvent::catalog_cta(label, js_sys::Date::now());
            if let Err(e) = analytics::push_event(&window, &event) {
                log::error!("Failed to record CTA click: {}", e);
            }
        }));
    }
    Ok(mounted)
}

/// Body of a successful `/set_language` reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LanguageResponse {
    pub status: String,
    pub language: String,
}

/// Which button regains the active marker after a failed switch: the one for
/// the page's current `lang`, else the one for the default language.
pub fn rollback_language(
    button_langs: &[Option<String>],
    page_lang: Option<&str>,
    default_lang: &str,
) -> Option<usize> {
    let position = |lang: &str| {
        button_langs
            .iter()
            .position(|candidate| candidate.as_deref() == Some(lang))
    };
    page_lang
        .filter(|lang| !lang.is_empty())
        .and_then(position)
        .or_else(|| position(default_lang))
}

struct LanguageSwitcher {
    document: Document,
    buttons: Vec<Element>,
    default_lang: String,
}

impl LanguageSwitcher {
    fn langs(&self) -> Vec<Option<String>> {
        self.buttons
            .iter()
            .map(|button| button.get_attribute("data-lang"))
            .collect()
    }

    fn activate(&self, index: Option<usize>) {
        for (i, button) in self.buttons.iter().enumerate() {
            dom::set_class(button, "active", Some(i) == index);
        }
    }

    fn roll_back(&self) {
        let page_lang = self
            .document
            .document_element()
            .map(|root| root.get_attribute("lang").unwrap_or_default());
        let index = rollback_language(&self.langs(), page_lang.as_deref(), &self.default_lang);
        self.activate(index);
    }

    async fn switch(self: Rc<Self>, lang: String) {
        match request_language(&lang).await {
            Ok(()) => match dom::window().and_then(|w| Ok(w.location().reload()?)) {
                Ok(()) => {}
                Err(e) => log::error!("Failed to reload after language change: {}", e),
            },
            Err(e) => {
                log::error!("Language change to {} failed: {}", lang, e);
                self.roll_back();
            }
        }
    }
}

fn ensure_success(status: u16, text: String) -> Result<(), UiError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(UiError::Http { status, text })
    }
}

async fn request_language(lang: &str) -> Result<(), UiError> {
    let response = Api::post(&format!("/set_language/{}", lang))
        .header("Content-Type", "application/json")
        .send()
        .await?;
    ensure_success(response.status(), response.status_text())?;
    match response.json::<LanguageResponse>().await {
        Ok(body) => log::debug!("Language set to {} ({})", body.language, body.status),
        Err(e) => log::debug!("Language reply without body: {}", e),
    }
    Ok(())
}

pub fn mount_language_switcher(document: &Document, config: &LandingConfig) -> Result<Mounted, UiError> {
    let buttons = dom::query_all_document(document, ".lang-btn");
    if buttons.is_empty() {
        return Err(UiError::missing(".lang-btn"));
    }
    let switcher = Rc::new(LanguageSwitcher {
        document: document.clone(),
        buttons,
        default_lang: config.default_language.clone(),
    });

    let config = Rc::new(config.clone());
    let mut mounted = Mounted::new();
    for (index, button) in switcher.buttons.iter().enumerate() {
        let switcher = switcher.clone();
        let config = config.clone();
        mounted.listen(EventListener::new(button, "click", move |_| {
            let Some(lang) = switcher.buttons[index].get_attribute("data-lang") else {
                return;
            };
            if !config.is_supported_language(&lang) {
                log::warn!("Ignoring unsupported language {}", lang);
                return;
            }
            switcher.activate(Some(index));
            spawn_local(switcher.clone().switch(lang));
        }));
    }
    Ok(mounted)
}
