use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node, Window};

use crate::components::section_tracker::{anchor_target, HeaderMode, SectionBounds, SectionTracker};
use crate::config::LandingConfig;
use crate::error::UiError;
use crate::utils::dom::{self, Mounted};

/// Burger toggle for the collapsed navbar.
pub fn mount_mobile_menu(document: &Document) -> Result<Mounted, UiError> {
    let toggle = dom::by_id(document, "navbarToggle")?;
    let menu = dom::by_id(document, "navbarMenu")?;

    let close = {
        let toggle = toggle.clone();
        let menu = menu.clone();
        move || {
            dom::remove_class(&menu, "active");
            dom::remove_class(&toggle, "active");
        }
    };

    let mut mounted = Mounted::new();
    mounted.listen(EventListener::new(&toggle, "click", {
        let toggle = toggle.clone();
        let menu = menu.clone();
        move |_| {
            let open = !dom::has_class(&menu, "active");
            dom::set_class(&menu, "active", open);
            dom::set_class(&toggle, "active", open);
        }
    }));
    for link in dom::query_all(&menu, ".nav-link") {
        let close = close.clone();
        mounted.listen(EventListener::new(&link, "click", move |_| close()));
    }
    mounted.listen(EventListener::new(document, "click", move |event| {
        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        let inside = |element: &Element| element.contains(target.as_ref());
        if !inside(&toggle) && !inside(&menu) {
            close();
        }
    }));
    Ok(mounted)
}

/// Scroll-dependent classes on the header and the back-to-top button.
pub fn mount_scroll_state(document: &Document, config: &LandingConfig) -> Result<Mounted, UiError> {
    let window = dom::window()?;
    let header = dom::query_document(document, ".header").ok();
    let back_to_top = document.get_element_by_id("backToTop");
    if header.is_none() && back_to_top.is_none() {
        return Err(UiError::missing(".header, #backToTop"));
    }

    let mut mounted = Mounted::new();
    if let Some(button) = &back_to_top {
        mounted.listen(EventListener::new(button, "click", {
            let window = window.clone();
            move |_| dom::scroll_window_to(&window, 0.0, true)
        }));
    }

    let scrolled_threshold = config.header_scrolled_threshold;
    let visible_threshold = config.back_to_top_threshold;
    mounted.listen(EventListener::new(&window.clone(), "scroll", move |_| {
        let y = dom::scroll_y(&window);
        if let Some(header) = &header {
            dom::set_class(header, "scrolled", y > scrolled_threshold);
        }
        if let Some(button) = &back_to_top {
            dom::set_class(button, "visible", y > visible_threshold);
        }
    }));
    Ok(mounted)
}

/// In-page links scroll smoothly, leaving room for the fixed header.
pub fn mount_smooth_scroll(document: &Document, config: &LandingConfig) -> Result<Mounted, UiError> {
    let window = dom::window()?;
    let anchors = dom::query_all_document(document, "a[href^=\"#\"]");
    if anchors.is_empty() {
        return Err(UiError::missing("a[href^=\"#\"]"));
    }

    let offset = config.header_offset;
    let mut mounted = Mounted::new();
    for anchor in anchors {
        let window = window.clone();
        let document = document.clone();
        let href = anchor.get_attribute("href").unwrap_or_default();
        mounted.listen(EventListener::new_with_options(
            &anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                if href == "#" || href == "#!" {
                    event.prevent_default();
                    return;
                }
                let Ok(Some(target)) = document.query_selector(&href) else {
                    return;
                };
                event.prevent_default();
                let top = target.get_bounding_client_rect().top() + dom::scroll_y(&window) - offset;
                dom::scroll_window_to(&window, top, true);
            },
        ));
    }
    Ok(mounted)
}

/// Highlights the navigation link of the section under the viewport top and
/// flips the header between its hero and section looks.
struct SectionHighlighter {
    window: Window,
    header: Element,
    sections: Vec<HtmlElement>,
    links: Vec<Element>,
    tracker: RefCell<SectionTracker>,
}

impl SectionHighlighter {
    fn refresh(&self) {
        let bounds: Vec<SectionBounds> = self
            .sections
            .iter()
            .map(|section| SectionBounds {
                id: section.id(),
                top: f64::from(section.offset_top()),
                height: f64::from(section.offset_height()),
            })
            .collect();

        let mut tracker = self.tracker.borrow_mut();
        tracker.update(dom::scroll_y(&self.window), &bounds);

        let mode = tracker.header_mode();
        for candidate in [HeaderMode::Hero, HeaderMode::Section] {
            dom::set_class(&self.header, candidate.class(), candidate == mode);
        }
        for link in &self.links {
            let href = link.get_attribute("href").unwrap_or_default();
            dom::set_class(link, "active", tracker.is_active_href(&href));
        }
    }
}

pub fn mount_section_tracking(document: &Document, config: &LandingConfig) -> Result<Mounted, UiError> {
    let window = dom::window()?;
    let header = dom::query_document(document, ".header")?;
    let sections: Vec<HtmlElement> = dom::query_all_document(document, "section[id]")
        .into_iter()
        .filter_map(|section| section.dyn_into::<HtmlElement>().ok())
        .collect();
    if sections.is_empty() {
        return Err(UiError::missing("section[id]"));
    }
    let links = dom::query_all_document(document, ".nav-link");
    let linked = links
        .iter()
        .filter_map(|link| link.get_attribute("href"))
        .filter_map(|href| anchor_target(&href).map(str::to_string))
        .collect();

    let highlighter = Rc::new(SectionHighlighter {
        window: window.clone(),
        header,
        sections,
        links,
        tracker: RefCell::new(SectionTracker::new(config.section_lookahead, linked)),
    });
    highlighter.refresh();

    let mut mounted = Mounted::new();
    for event in ["scroll", "resize"] {
        let highlighter = highlighter.clone();
        mounted.listen(EventListener::new(&window, event, move |_| highlighter.refresh()));
    }
    Ok(mounted)
}
