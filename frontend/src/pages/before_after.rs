use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node};

use crate::components::drag::{ClipStyle, DragSlider, GestureBinder, SliderBounds};
use crate::error::UiError;
use crate::utils::dom::{self, Mounted};

const CANONICAL_ID: &str = "auracloudSlider";
const LEGACY_HANDLE_ID: &str = "sliderHandle";
const INITIAL_PERCENTAGE: f64 = 50.0;

/// The elements a drag moves: the handle and the clipped after-image,
/// measured against `frame`.
struct RevealSurface {
    frame: HtmlElement,
    handle: HtmlElement,
    after: Element,
    clip: ClipStyle,
}

impl RevealSurface {
    fn bounds(&self) -> SliderBounds {
        let rect = self.frame.get_bounding_client_rect();
        SliderBounds {
            left: rect.left(),
            width: rect.width(),
        }
    }

    fn apply(&self, percentage: f64) {
        let _ = self
            .handle
            .style()
            .set_property("left", &format!("{}%", percentage));
        dom::set_style(&self.after, "clip-path", &self.clip.css(percentage));
    }
}

struct RevealSlider {
    surface: RevealSurface,
    drag: RefCell<DragSlider<DocumentGesture>>,
}

impl RevealSlider {
    fn new(surface: RevealSurface, document: Document) -> Rc<Self> {
        Rc::new_cyclic(|owner| RevealSlider {
            surface,
            drag: RefCell::new(DragSlider::new(
                DocumentGesture {
                    document,
                    owner: owner.clone(),
                },
                INITIAL_PERCENTAGE,
            )),
        })
    }

    fn grab(&self, event: &web_sys::Event) {
        let Some(x) = dom::pointer_client_x(event) else {
            return;
        };
        if self.drag.borrow_mut().pointer_down(x) {
            event.prevent_default();
        }
    }

    fn drag_to(&self, event: &web_sys::Event) {
        let Some(x) = dom::pointer_client_x(event) else {
            return;
        };
        let moved = self.drag.borrow_mut().pointer_move(x, self.surface.bounds());
        if let Some(percentage) = moved {
            self.surface.apply(percentage);
            event.prevent_default();
        }
    }

    fn release(&self) {
        let mut drag = self.drag.borrow_mut();
        log::debug!(
            "Reveal drag released at x={:?} ({}%)",
            drag.pointer_x(),
            drag.percentage()
        );
        drag.pointer_up();
    }

    fn click(&self, event: &web_sys::Event) {
        let Some(x) = dom::pointer_client_x(event) else {
            return;
        };
        let clicked = self.drag.borrow_mut().click(x, self.surface.bounds());
        if let Some(percentage) = clicked {
            self.surface.apply(percentage);
        }
    }
}

/// Binds the document-wide move/up listeners of one drag.
struct DocumentGesture {
    document: Document,
    owner: Weak<RevealSlider>,
}

impl GestureBinder for DocumentGesture {
    type Guard = Vec<EventListener>;

    fn bind(&mut self) -> Vec<EventListener> {
        let on_move = |owner: Weak<RevealSlider>| {
            move |event: &web_sys::Event| {
                if let Some(slider) = owner.upgrade() {
                    slider.drag_to(event);
                }
            }
        };
        let on_up = |owner: Weak<RevealSlider>| {
            move |_: &web_sys::Event| {
                if let Some(slider) = owner.upgrade() {
                    slider.release();
                }
            }
        };
        vec![
            EventListener::new_with_options(
                &self.document,
                "mousemove",
                EventListenerOptions::enable_prevent_default(),
                on_move(self.owner.clone()),
            ),
            EventListener::new_with_options(
                &self.document,
                "touchmove",
                EventListenerOptions::enable_prevent_default(),
                on_move(self.owner.clone()),
            ),
            EventListener::new(&self.document, "mouseup", on_up(self.owner.clone())),
            EventListener::new(&self.document, "touchend", on_up(self.owner.clone())),
        ]
    }
}

fn html(element: Element, selector: &str) -> Result<HtmlElement, UiError> {
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| UiError::missing(selector))
}

fn listen_grab(mounted: &mut Mounted, target: &Element, slider: &Rc<RevealSlider>) {
    let on_grab = |slider: Rc<RevealSlider>| move |event: &web_sys::Event| slider.grab(event);
    for event in ["mousedown", "touchstart"] {
        mounted.listen(EventListener::new_with_options(
            target,
            event,
            EventListenerOptions::enable_prevent_default(),
            on_grab(slider.clone()),
        ));
    }
}

/// `#auracloudSlider`: grabbed by its handle or button, clicked anywhere on
/// the background, starts centred.
pub fn mount(document: &Document) -> Result<Mounted, UiError> {
    let frame = dom::html_by_id(document, CANONICAL_ID)?;
    let handle = html(dom::query(&frame, ".slider-handle")?, ".slider-handle")?;
    let after = dom::query(&frame, ".after-image")?;
    let button = dom::query(&frame, ".slider-button")?;

    let slider = RevealSlider::new(
        RevealSurface {
            frame: frame.clone(),
            handle: handle.clone(),
            after,
            clip: ClipStyle::Polygon,
        },
        document.clone(),
    );

    let mut mounted = Mounted::new();
    listen_grab(&mut mounted, &button, &slider);
    listen_grab(&mut mounted, &handle, &slider);
    mounted.listen(EventListener::new(&frame, "click", {
        let slider = slider.clone();
        let frame: Node = frame.clone().into();
        move |event| {
            let on_background = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .map(|target| {
                    target.is_same_node(Some(&frame))
                        || dom::has_class(&target, "slider-container")
                })
                .unwrap_or(false);
            if on_background {
                slider.click(event);
            }
        }
    }));

    slider.surface.apply(slider.drag.borrow().percentage());
    mounted.keep(slider);
    Ok(mounted)
}

/// `#sliderHandle` inside a `.slider-wrapper`: handle drag only.
pub fn mount_legacy(document: &Document) -> Result<Mounted, UiError> {
    let handle = dom::html_by_id(document, LEGACY_HANDLE_ID)?;
    let wrapper = handle
        .closest(".slider-wrapper")?
        .ok_or_else(|| UiError::missing(".slider-wrapper"))?;
    let after = dom::query(&wrapper, ".after-image")?;

    let slider = RevealSlider::new(
        RevealSurface {
            frame: html(wrapper, ".slider-wrapper")?,
            handle: handle.clone(),
            after,
            clip: ClipStyle::Inset,
        },
        document.clone(),
    );

    let mut mounted = Mounted::new();
    listen_grab(&mut mounted, &handle, &slider);
    mounted.keep(slider);
    Ok(mounted)
}
