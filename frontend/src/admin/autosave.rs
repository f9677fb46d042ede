use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlTextAreaElement, Storage};

use crate::config::LandingConfig;
use crate::error::UiError;
use crate::utils::dom::{self, Mounted};
use crate::utils::timer::{BrowserScheduler, Scheduler};

const INDICATOR_CSS: &str = "position: absolute; top: -30px; right: 0; background: #28a745; \
    color: white; padding: 4px 8px; border-radius: 4px; font-size: 0.75rem; z-index: 1000; \
    opacity: 0; transition: opacity 0.3s ease;";

/// Durable string store for unsaved form drafts.
pub trait DraftStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), UiError>;
}

/// `window.localStorage`.
pub struct LocalDraftStore {
    storage: Storage,
}

impl LocalDraftStore {
    pub fn open() -> Result<Self, UiError> {
        let storage = dom::window()?
            .local_storage()
            .map_err(|e| UiError::Storage(UiError::from(e).to_string()))?
            .ok_or_else(|| UiError::Storage("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl DraftStore for LocalDraftStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), UiError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| UiError::Storage(UiError::from(e).to_string()))
    }
}

pub fn draft_key(field_name: &str, path: &str) -> String {
    format!("admin_{}_{}", field_name, path)
}

/// Value a field should show at load: a saved draft only fills an empty field.
pub fn restore_value(current: &str, saved: Option<String>) -> Option<String> {
    if !current.is_empty() {
        return None;
    }
    saved.filter(|draft| !draft.is_empty())
}

/// Debounced draft writer for one field. Every edit restarts the timer; the
/// value is stored once edits pause for the whole debounce window.
pub struct DraftAutosaver<S: Scheduler, D: DraftStore> {
    key: String,
    store: Rc<D>,
    scheduler: S,
    debounce_ms: u32,
    pending: Option<S::Handle>,
    on_saved: Rc<dyn Fn()>,
}

impl<S: Scheduler + 'static, D: DraftStore + 'static> DraftAutosaver<S, D> {
    pub fn new(
        key: String,
        store: Rc<D>,
        scheduler: S,
        debounce_ms: u32,
        on_saved: impl Fn() + 'static,
    ) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            key,
            store,
            scheduler,
            debounce_ms,
            pending: None,
            on_saved: Rc::new(on_saved),
        }))
    }

    /// Fills `current` from the store if it is empty.
    pub fn restore(&self, current: &str) -> Option<String> {
        restore_value(current, self.store.get(&self.key))
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn input(this: &Rc<RefCell<Self>>, value: String) {
        let weak = Rc::downgrade(this);
        let mut saver = this.borrow_mut();
        saver.pending.take();
        let key = saver.key.clone();
        let store = saver.store.clone();
        let on_saved = saver.on_saved.clone();
        let handle = saver.scheduler.once(
            saver.debounce_ms,
            Box::new(move || {
                if let Some(saver) = weak.upgrade() {
                    saver.borrow_mut().pending.take();
                }
                match store.set(&key, &value) {
                    Ok(()) => on_saved(),
                    Err(e) => log::error!("Failed to save draft {}: {}", key, e),
                }
            }),
        );
        saver.pending = Some(handle);
    }
}

/// Briefly shows the "saved locally" badge in the field's form group.
fn show_saved_indicator(document: &Document, field: &Element, label: &str) -> Result<(), UiError> {
    let Some(group) = field.closest(".admin-form-group")? else {
        return Ok(());
    };
    let indicator = document.create_element("div")?;
    indicator.set_class_name("admin-save-indicator");
    indicator.set_text_content(Some(label));
    dom::set_css_text(&indicator, INDICATOR_CSS);
    dom::set_style(&group, "position", "relative");
    group.append_child(&indicator)?;

    let shown = indicator.clone();
    Timeout::new(100, move || dom::set_style(&shown, "opacity", "1")).forget();
    Timeout::new(2000, move || {
        dom::set_style(&indicator, "opacity", "0");
        Timeout::new(300, move || indicator.remove()).forget();
    })
    .forget();
    Ok(())
}

pub fn mount(document: &Document, config: &LandingConfig) -> Result<Mounted, UiError> {
    let fields: Vec<HtmlTextAreaElement> = dom::query_all_document(document, ".admin-form-textarea")
        .into_iter()
        .filter_map(|field| field.dyn_into::<HtmlTextAreaElement>().ok())
        .collect();
    if fields.is_empty() {
        return Err(UiError::missing(".admin-form-textarea"));
    }
    let store = Rc::new(LocalDraftStore::open()?);
    let path = dom::window()?.location().pathname()?;

    let mut mounted = Mounted::new();
    for field in fields {
        let on_saved = {
            let document = document.clone();
            let field = field.clone();
            let label = config.messages.saved_locally.clone();
            move || {
                if let Err(e) = show_saved_indicator(&document, &field, &label) {
                    log::warn!("Failed to show save indicator: {}", e);
                }
            }
        };
        let saver = DraftAutosaver::new(
            draft_key(&field.name(), &path),
            store.clone(),
            BrowserScheduler,
            config.autosave_debounce_ms,
            on_saved,
        );
        if let Some(draft) = saver.borrow().restore(&field.value()) {
            field.set_value(&draft);
        }

        let target = field.clone();
        mounted.listen(EventListener::new(&target, "input", {
            let saver = saver.clone();
            move |_| DraftAutosaver::input(&saver, field.value())
        }));
        mounted.keep(saver);
    }
    Ok(mounted)
}
