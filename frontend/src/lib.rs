use std::cell::RefCell;

use wasm_bindgen::prelude::*;

mod config;
mod error;
mod utils {
    pub mod analytics;
    pub mod api;
    pub mod dom;
    pub mod logger;
    pub mod timer;
}
mod components {
    pub mod autoplay;
    pub mod carousel;
    pub mod drag;
    pub mod pager;
    pub mod reveal;
    pub mod section_tracker;
    pub mod slides;
}
mod pages {
    pub mod before_after;
    pub mod effects;
    pub mod forms;
    pub mod landing;
    pub mod navigation;
    pub mod products;
    pub mod reviews;
}
mod admin {
    pub mod autosave;
    pub mod panel;
    pub mod tools;
    pub mod validation;
}

pub use admin::tools::{copy_to_clipboard, preview_image};
pub use config::LandingConfig;
pub use error::UiError;

use config::CONFIG_ELEMENT_ID;
use utils::dom::{self, Mounted};

thread_local! {
    /// Components mounted on the current page. They live until `unmount`.
    static MOUNTED: RefCell<Vec<Mounted>> = RefCell::new(Vec::new());
}

/// Wires every component whose markup is on the page and returns how many
/// were mounted. Mounting again first drops the previous set.
pub fn mount(document: &web_sys::Document, config: &LandingConfig) -> usize {
    unmount();
    let mut mounted = pages::landing::mount(document, config);
    mounted.extend(admin::panel::mount(document, config));
    let count = mounted.len();
    MOUNTED.with(|registry| *registry.borrow_mut() = mounted);
    count
}

/// Detaches every listener and cancels every timer of the mounted components.
pub fn unmount() {
    let previous = MOUNTED.with(|registry| std::mem::take(&mut *registry.borrow_mut()));
    drop(previous);
}

#[wasm_bindgen(start)]
pub fn start() {
    utils::logger::init(log::LevelFilter::Info);
    let document = match dom::document() {
        Ok(document) => document,
        Err(e) => {
            log::error!("No document to enhance: {}", e);
            return;
        }
    };
    let config = LandingConfig::load(&document);
    log::set_max_level(config.log_level());
    if document.get_element_by_id(CONFIG_ELEMENT_ID).is_some() {
        log::debug!("Using inline landing config");
    }
    let count = mount(&document, &config);
    log::info!("Page enhanced with {} components", count);
}
