use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::request_animation_frame;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, Window};

use crate::components::autoplay::Autoplay;
use crate::components::carousel::{Carousel, PagerView};
use crate::components::pager::{CarouselGeometry, Controls, ScrollRequest};
use crate::config::LandingConfig;
use crate::error::UiError;
use crate::utils::dom::{self, Mounted};
use crate::utils::timer::BrowserScheduler;

const SLIDER_ID: &str = "productsSlider";
const PREV_ID: &str = "productsPrev";
const NEXT_ID: &str = "productsNext";
const DOTS_ID: &str = "productsDots";
const DOT_CLASS: &str = "slider-dot";

/// Live measurements of the product strip.
struct StripMeasure {
    window: Window,
    slider: HtmlElement,
    cards: Vec<HtmlElement>,
}

impl CarouselGeometry for StripMeasure {
    fn container_width(&self) -> f64 {
        let client = f64::from(self.slider.client_width());
        if client > 0.0 {
            client
        } else {
            self.slider.get_bounding_client_rect().width()
        }
    }

    fn scroll_width(&self) -> f64 {
        f64::from(self.slider.scroll_width())
    }

    fn gap(&self) -> f64 {
        dom::computed_gap(&self.window, &self.slider)
    }

    fn card_width(&self) -> f64 {
        self.cards
            .first()
            .map(|card| card.get_bounding_client_rect().width())
            .unwrap_or(0.0)
    }

    fn card_offsets(&self) -> Vec<f64> {
        self.cards
            .iter()
            .map(|card| f64::from(card.offset_left()))
            .collect()
    }
}

struct DomPagerView {
    document: Document,
    slider: HtmlElement,
    prev: HtmlButtonElement,
    next: HtmlButtonElement,
    dots: Option<Element>,
}

impl PagerView for DomPagerView {
    fn scroll_to(&self, request: ScrollRequest) {
        dom::scroll_element_to(&self.slider, request.left, request.smooth);
    }

    fn set_controls(&self, controls: Controls) {
        self.prev.set_disabled(controls.prev_disabled);
        self.next.set_disabled(controls.next_disabled);
    }

    fn render_dots(&self, total: usize, active: usize) {
        let Some(dots) = &self.dots else {
            return;
        };
        dots.set_inner_html("");
        for index in 0..total {
            let Ok(dot) = self.document.create_element("div") else {
                continue;
            };
            dot.set_class_name(DOT_CLASS);
            dom::set_class(&dot, "active", index == active);
            let _ = dots.append_child(&dot);
        }
    }

    fn mark_dot(&self, active: usize) {
        let Some(dots) = &self.dots else {
            return;
        };
        for (index, dot) in dom::query_all(dots, &format!(".{}", DOT_CLASS)).iter().enumerate() {
            dom::set_class(dot, "active", index == active);
        }
    }
}

fn button(document: &Document, id: &str) -> Result<HtmlButtonElement, UiError> {
    dom::by_id(document, id)?
        .dyn_into::<HtmlButtonElement>()
        .map_err(|_| UiError::missing(&format!("button#{}", id)))
}

/// Index of the dot an event landed on, if any.
fn clicked_dot(dots: &Element, event: &web_sys::Event) -> Option<usize> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let dot = target.closest(&format!(".{}", DOT_CLASS)).ok()??;
    dom::query_all(dots, &format!(".{}", DOT_CLASS))
        .iter()
        .position(|candidate| candidate == &dot)
}

pub fn mount(document: &Document, config: &LandingConfig) -> Result<Mounted, UiError> {
    let window = dom::window()?;
    let slider = dom::html_by_id(document, SLIDER_ID)?;
    let prev = button(document, PREV_ID)?;
    let next = button(document, NEXT_ID)?;
    let dots = document.get_element_by_id(DOTS_ID);

    let cards: Vec<HtmlElement> = dom::query_all(&slider, ".product-card")
        .into_iter()
        .filter_map(|card| card.dyn_into::<HtmlElement>().ok())
        .collect();
    if cards.is_empty() {
        return Err(UiError::missing(".product-card"));
    }

    let measure = Rc::new(StripMeasure {
        window: window.clone(),
        slider: slider.clone(),
        cards,
    });
    let view = DomPagerView {
        document: document.clone(),
        slider: slider.clone(),
        prev: prev.clone(),
        next: next.clone(),
        dots: dots.clone(),
    };
    let carousel = Carousel::new(
        view,
        Autoplay::new(BrowserScheduler, config.products_autoplay_ms),
    );

    let mut mounted = Mounted::new();
    mounted.listen(EventListener::new(&prev, "click", {
        let carousel = carousel.clone();
        move |_| Carousel::step(&carousel, -1)
    }));
    mounted.listen(EventListener::new(&next, "click", {
        let carousel = carousel.clone();
        move |_| Carousel::step(&carousel, 1)
    }));
    if let Some(dots) = dots {
        let target = dots.clone();
        mounted.listen(EventListener::new(&target, "click", {
            let carousel = carousel.clone();
            move |event| {
                if let Some(index) = clicked_dot(&dots, event) {
                    Carousel::go_to(&carousel, index as isize);
                }
            }
        }));
    }
    mounted.listen(EventListener::new(&slider, "mouseenter", {
        let carousel = carousel.clone();
        move |_| Carousel::pause(&carousel)
    }));
    mounted.listen(EventListener::new(&slider, "mouseleave", {
        let carousel = carousel.clone();
        move |_| Carousel::resume(&carousel)
    }));
    mounted.listen(EventListener::new(&window, "resize", {
        let carousel = carousel.clone();
        let measure = measure.clone();
        move |_| Carousel::relayout(&carousel, &*measure)
    }));

    // Card widths are only reliable once the first frame has been laid out.
    let first_frame = request_animation_frame({
        let carousel = carousel.clone();
        move |_| {
            carousel.borrow_mut().layout(&*measure);
            Carousel::resume(&carousel);
        }
    });
    mounted.keep(first_frame);
    mounted.keep(carousel);
    Ok(mounted)
}
