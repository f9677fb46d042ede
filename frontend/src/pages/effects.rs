//! Scroll-triggered decoration: lazy images, entrance animations, parallax,
//! counters and progress bars.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::components::reveal::{
    parallax_speed, parallax_transform, progress_width, reveal_delay, CounterAnimation,
    RevealEffect, REVEALED_CLASS, REVEAL_TRANSITION,
};
use crate::error::UiError;
use crate::utils::dom::{self, Mounted};

const REVEALED_STYLE: &str = ".aos-animate { opacity: 1 !important; transform: none !important; }";
const REVEALED_STYLE_ID: &str = "aos-revealed-style";

type EntryCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// An `IntersectionObserver` that stops observing each element the first
/// time it intersects. Disconnects when dropped.
pub struct Observer {
    observer: IntersectionObserver,
    _callback: EntryCallback,
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub fn observer_supported(window: &Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

fn observe_once(
    elements: &[Element],
    threshold: f64,
    root_margin: Option<&str>,
    mut on_enter: impl FnMut(Element) + 'static,
) -> Result<Observer, UiError> {
    let callback: EntryCallback = Closure::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    observer.unobserve(&target);
                    on_enter(target);
                }
            }
        },
    );
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        init.set_root_margin(margin);
    }
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for element in elements {
        observer.observe(element);
    }
    Ok(Observer {
        observer,
        _callback: callback,
    })
}

fn load_image(image: &Element) {
    let Some(src) = image.get_attribute("data-src") else {
        return;
    };
    if let Some(image) = image.dyn_ref::<HtmlImageElement>() {
        image.set_src(&src);
    } else {
        let _ = image.set_attribute("src", &src);
    }
    let _ = image.remove_attribute("data-src");
}

pub fn mount_lazy_images(document: &Document) -> Result<Mounted, UiError> {
    let images = dom::query_all_document(document, "img[data-src]");
    if images.is_empty() {
        return Err(UiError::missing("img[data-src]"));
    }
    let mut mounted = Mounted::new();
    if observer_supported(&dom::window()?) {
        mounted.keep(observe_once(&images, 0.0, None, |image| load_image(&image))?);
    } else {
        images.iter().for_each(load_image);
    }
    Ok(mounted)
}

/// Adds the `.aos-animate` rule to `<head>` unless an earlier mount did.
fn inject_revealed_style(document: &Document) -> Result<(), UiError> {
    if document.get_element_by_id(REVEALED_STYLE_ID).is_some() {
        return Ok(());
    }
    let style = document.create_element("style")?;
    style.set_id(REVEALED_STYLE_ID);
    style.set_text_content(Some(REVEALED_STYLE));
    let head = document.head().ok_or_else(|| UiError::missing("head"))?;
    head.append_child(&style)?;
    Ok(())
}

/// `[data-aos]` entrance animations.
pub fn mount_reveal(document: &Document) -> Result<Mounted, UiError> {
    let elements = dom::query_all_document(document, "[data-aos]");
    if elements.is_empty() {
        return Err(UiError::missing("[data-aos]"));
    }

    let mut mounted = Mounted::new();
    if !observer_supported(&dom::window()?) {
        for element in &elements {
            dom::set_style(element, "opacity", "1");
            dom::set_style(element, "transform", "none");
        }
        return Ok(mounted);
    }

    inject_revealed_style(document)?;
    for element in &elements {
        let effect = RevealEffect::parse(&element.get_attribute("data-aos").unwrap_or_default());
        dom::set_style(element, "opacity", "0");
        dom::set_style(element, "transform", effect.initial_transform());
        dom::set_style(element, "transition", REVEAL_TRANSITION);
    }

    let delayed: Rc<RefCell<Vec<Timeout>>> = Rc::default();
    let observer = observe_once(&elements, 0.1, Some("0px 0px -50px 0px"), {
        let delayed = delayed.clone();
        move |element| {
            let delay = reveal_delay(element.get_attribute("data-aos-delay").as_deref());
            if delay == 0 {
                dom::add_class(&element, REVEALED_CLASS);
            } else {
                delayed.borrow_mut().push(Timeout::new(delay, move || {
                    dom::add_class(&element, REVEALED_CLASS)
                }));
            }
        }
    })?;
    mounted.keep(observer);
    mounted.keep(delayed);
    Ok(mounted)
}

pub fn mount_parallax(document: &Document) -> Result<Mounted, UiError> {
    let elements = dom::query_all_document(document, "[data-parallax]");
    if elements.is_empty() {
        return Err(UiError::missing("[data-parallax]"));
    }
    let window = dom::window()?;
    let layers: Vec<(Element, f64)> = elements
        .into_iter()
        .map(|element| {
            let speed = parallax_speed(element.get_attribute("data-parallax").as_deref());
            (element, speed)
        })
        .collect();

    let mut mounted = Mounted::new();
    mounted.listen(EventListener::new(&window.clone(), "scroll", move |_| {
        let scrolled = dom::scroll_y(&window);
        for (element, speed) in &layers {
            dom::set_style(element, "transform", &parallax_transform(scrolled, *speed));
        }
    }));
    Ok(mounted)
}

type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

/// Renders one counter frame and schedules the next until the target is shown.
fn run_counter(element: Element, mut animation: CounterAnimation, slot: FrameSlot) {
    let (text, done) = animation.tick();
    element.set_text_content(Some(&text));
    if done {
        slot.borrow_mut().take();
        return;
    }
    let next = slot.clone();
    let frame = request_animation_frame(move |_| run_counter(element, animation, next));
    *slot.borrow_mut() = Some(frame);
}

pub fn mount_counters(document: &Document) -> Result<Mounted, UiError> {
    let counters = dom::query_all_document(document, "[data-counter]");
    if counters.is_empty() {
        return Err(UiError::missing("[data-counter]"));
    }

    let mut mounted = Mounted::new();
    if !observer_supported(&dom::window()?) {
        for counter in &counters {
            let target = CounterAnimation::parse(counter.get_attribute("data-counter").as_deref());
            if let Some(animation) = target {
                counter.set_text_content(Some(&animation.target().to_string()));
            }
        }
        return Ok(mounted);
    }

    let slots: Vec<FrameSlot> = counters.iter().map(|_| Rc::default()).collect();
    let observer = observe_once(&counters, 0.5, None, {
        let counters = counters.clone();
        let slots = slots.clone();
        move |element| {
            let Some(index) = counters.iter().position(|c| c == &element) else {
                return;
            };
            match CounterAnimation::parse(element.get_attribute("data-counter").as_deref()) {
                Some(animation) => run_counter(element, animation, slots[index].clone()),
                None => log::warn!("Counter without a numeric target"),
            }
        }
    })?;
    mounted.keep(observer);
    mounted.keep(slots);
    Ok(mounted)
}

pub fn mount_progress_bars(document: &Document) -> Result<Mounted, UiError> {
    let bars = dom::query_all_document(document, "[data-progress]");
    if bars.is_empty() {
        return Err(UiError::missing("[data-progress]"));
    }

    let fill = |bar: &Element| {
        let width = progress_width(bar.get_attribute("data-progress").as_deref());
        dom::set_style(bar, "width", &width);
    };
    let mut mounted = Mounted::new();
    if !observer_supported(&dom::window()?) {
        bars.iter().for_each(fill);
        return Ok(mounted);
    }
    for bar in &bars {
        dom::set_style(bar, "width", "0%");
        dom::set_style(bar, "transition", "width 1.5s ease");
    }
    mounted.keep(observe_once(&bars, 0.5, None, move |bar| fill(&bar))?);
    Ok(mounted)
}
