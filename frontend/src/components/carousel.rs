use std::cell::RefCell;
use std::rc::Rc;

use super::autoplay::Autoplay;
use super::pager::{CarouselGeometry, Controls, PagerState, ScrollRequest};
use crate::utils::timer::Scheduler;

/// Where the carousel writes its state. The dot indicator lives here and only
/// mirrors the pager.
pub trait PagerView {
    fn scroll_to(&self, request: ScrollRequest);
    fn set_controls(&self, controls: Controls);
    /// Recreates the dots for `total` pages.
    fn render_dots(&self, total: usize, active: usize);
    fn mark_dot(&self, active: usize);
}

/// Paged carousel with autoplay.
///
/// Shared as `Rc<RefCell<Carousel>>` between the DOM listeners; the autoplay
/// tick only holds a weak reference so dropping the carousel stops it.
pub struct Carousel<V: PagerView, S: Scheduler> {
    pager: PagerState,
    view: V,
    autoplay: Autoplay<S>,
}

impl<V: PagerView + 'static, S: Scheduler + 'static> Carousel<V, S> {
    pub fn new(view: V, autoplay: Autoplay<S>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            pager: PagerState::default(),
            view,
            autoplay,
        }))
    }

    #[cfg(test)]
    pub fn current_page(&self) -> usize {
        self.pager.current_page
    }

    /// Re-measures the layout, clamps the current page into the new range and
    /// jumps there without animation.
    pub fn layout(&mut self, geometry: &impl CarouselGeometry) {
        self.pager = self.pager.rebuild(geometry);
        log::debug!(
            "Carousel laid out: {} pages of {} cards",
            self.pager.total_pages,
            self.pager.visible_count
        );
        self.view
            .render_dots(self.pager.total_pages, self.pager.current_page);
        self.view.scroll_to(self.pager.scroll_request(false));
        self.view.set_controls(self.pager.controls());
    }

    fn show(&mut self, index: isize, animated: bool) {
        if let Some(request) = self.pager.go_to_page(index, animated) {
            self.view.scroll_to(request);
        }
        self.view.set_controls(self.pager.controls());
        self.view.mark_dot(self.pager.current_page);
    }

    fn advance(&mut self) {
        let next = self.pager.next_wrapping();
        self.show(next as isize, true);
    }

    pub fn pause(this: &Rc<RefCell<Self>>) {
        this.borrow_mut().autoplay.stop();
    }

    pub fn resume(this: &Rc<RefCell<Self>>) {
        let weak = Rc::downgrade(this);
        let mut carousel = this.borrow_mut();
        let total_pages = carousel.pager.total_pages;
        carousel.autoplay.start(total_pages, move || {
            if let Some(carousel) = weak.upgrade() {
                carousel.borrow_mut().advance();
            }
        });
    }

    /// Manual navigation: autoplay is cancelled first and re-armed after, so a
    /// tick can never land in the middle of the transition.
    pub fn go_to(this: &Rc<RefCell<Self>>, index: isize) {
        Self::pause(this);
        this.borrow_mut().show(index, true);
        Self::resume(this);
    }

    /// Layout change after mount (resize): the page count may have changed,
    /// so autoplay is re-armed for the new range.
    pub fn relayout(this: &Rc<RefCell<Self>>, geometry: &impl CarouselGeometry) {
        Self::pause(this);
        this.borrow_mut().layout(geometry);
        Self::resume(this);
    }

    pub fn step(this: &Rc<RefCell<Self>>, delta: isize) {
        let current = this.borrow().pager.current_page as isize;
        Self::go_to(this, current + delta);
    }

    #[cfg(test)]
    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_running()
    }
}
