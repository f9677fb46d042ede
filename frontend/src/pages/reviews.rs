use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, TouchEvent};

use crate::components::autoplay::Autoplay;
use crate::components::slides::{SlideShow, SlideTrack, SlideView};
use crate::config::LandingConfig;
use crate::error::UiError;
use crate::utils::dom::{self, Mounted};
use crate::utils::timer::BrowserScheduler;

const DOT_CLASS: &str = "slider-dot";

struct TestimonialView {
    wrapper: HtmlElement,
    dots: Vec<Element>,
}

impl SlideView for TestimonialView {
    fn show(&self, track: &SlideTrack) {
        let _ = self.wrapper.style().set_property("transform", &track.transform());
        for (index, dot) in self.dots.iter().enumerate() {
            dom::set_class(dot, "active", index == track.current());
        }
    }
}

fn screen_x(event: &web_sys::Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().item(0)?;
    Some(f64::from(touch.screen_x()))
}

fn render_dots(
    document: &Document,
    container: &Element,
    total: usize,
    config: &LandingConfig,
) -> Result<Vec<Element>, UiError> {
    container.set_inner_html("");
    let mut dots = Vec::with_capacity(total);
    for index in 0..total {
        let dot = document.create_element("button")?;
        dot.set_class_name(DOT_CLASS);
        dot.set_attribute("aria-label", &config.messages.review_dot_label(index))?;
        container.append_child(&dot)?;
        dots.push(dot);
    }
    Ok(dots)
}

/// Lays the slides out side by side so the wrapper transform pages them.
fn position_slides(wrapper: &HtmlElement, slides: &[Element]) {
    for (index, slide) in slides.iter().enumerate() {
        set_css(
            slide,
            &[
                ("position", "absolute"),
                ("top", "0"),
                ("left", &format!("{}%", index * 100)),
                ("width", "100%"),
            ],
        );
    }
    set_css(
        wrapper,
        &[
            ("position", "relative"),
            ("display", "flex"),
            ("transition", "transform 0.5s ease-in-out"),
        ],
    );
}

fn set_css(element: &Element, properties: &[(&str, &str)]) {
    for (property, value) in properties {
        dom::set_style(element, property, value);
    }
}

pub fn mount(document: &Document, config: &LandingConfig) -> Result<Mounted, UiError> {
    let wrapper = dom::query_document(document, ".reviews-wrapper")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| UiError::missing(".reviews-wrapper"))?;
    let slides = dom::query_all(&wrapper, ".review-slide");
    if slides.is_empty() {
        return Err(UiError::missing(".review-slide"));
    }

    let dots = match dom::query_document(document, ".slider-dots") {
        Ok(container) => render_dots(document, &container, slides.len(), config)?,
        Err(_) => Vec::new(),
    };
    let slideshow = SlideShow::new(
        slides.len(),
        TestimonialView {
            wrapper: wrapper.clone(),
            dots: dots.clone(),
        },
        Autoplay::new(BrowserScheduler, config.reviews_autoplay_ms),
    );

    let mut mounted = Mounted::new();
    for (index, dot) in dots.iter().enumerate() {
        let slideshow = slideshow.clone();
        mounted.listen(EventListener::new(dot, "click", move |_| {
            SlideShow::go_to(&slideshow, index as isize)
        }));
    }
    for (selector, delta) in [(".slider-prev", -1), (".slider-next", 1)] {
        if let Ok(button) = dom::query_document(document, selector) {
            let slideshow = slideshow.clone();
            mounted.listen(EventListener::new(&button, "click", move |_| {
                SlideShow::step(&slideshow, delta)
            }));
        }
    }

    mounted.listen(EventListener::new(&wrapper, "mouseenter", {
        let slideshow = slideshow.clone();
        move |_| SlideShow::pause(&slideshow)
    }));
    mounted.listen(EventListener::new(&wrapper, "mouseleave", {
        let slideshow = slideshow.clone();
        move |_| SlideShow::resume(&slideshow)
    }));
    mounted.listen(EventListener::new(&wrapper, "touchstart", {
        let slideshow = slideshow.clone();
        move |event| {
            if let Some(x) = screen_x(event) {
                slideshow.borrow_mut().touch_start(x);
            }
        }
    }));
    mounted.listen(EventListener::new(&wrapper, "touchend", {
        let slideshow = slideshow.clone();
        let threshold = config.swipe_threshold;
        move |event| {
            if let Some(x) = screen_x(event) {
                SlideShow::touch_end(&slideshow, x, threshold);
            }
        }
    }));
    mounted.listen(EventListener::new(document, "keydown", {
        let slideshow = slideshow.clone();
        move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            match event.key().as_str() {
                "ArrowLeft" => SlideShow::step(&slideshow, -1),
                "ArrowRight" => SlideShow::step(&slideshow, 1),
                _ => {}
            }
        }
    }));

    SlideShow::resume(&slideshow);
    position_slides(&wrapper, &slides);
    mounted.keep(slideshow);
    Ok(mounted)
}
