use std::cell::RefCell;
use std::rc::Rc;

use super::autoplay::Autoplay;
use crate::utils::timer::Scheduler;

/// Full-width slides shown one at a time, wrapping at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideTrack {
    current: usize,
    total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Next,
    Prev,
}

impl SlideTrack {
    pub fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Below zero goes to the last slide, past the end goes to the first.
    pub fn go_to(&mut self, index: isize) -> usize {
        if self.total == 0 {
            return 0;
        }
        self.current = if index < 0 {
            self.total - 1
        } else if index as usize >= self.total {
            0
        } else {
            index as usize
        };
        self.current
    }

    pub fn next(&mut self) -> usize {
        self.go_to(self.current as isize + 1)
    }

    /// CSS transform that brings the current slide into view.
    pub fn transform(&self) -> String {
        format!("translateX({}%)", -(self.current as i64) * 100)
    }
}

/// Classifies a horizontal touch movement. Left swipes advance.
pub fn swipe(start_x: f64, end_x: f64, threshold: f64) -> Option<Swipe> {
    if end_x < start_x - threshold {
        Some(Swipe::Next)
    } else if end_x > start_x + threshold {
        Some(Swipe::Prev)
    } else {
        None
    }
}

/// Where a slideshow writes the visible slide.
pub trait SlideView {
    fn show(&self, track: &SlideTrack);
}

/// Testimonial-style slideshow: wrapping track, autoplay paused on hover and
/// around every manual step.
pub struct SlideShow<V: SlideView, S: Scheduler> {
    track: SlideTrack,
    view: V,
    autoplay: Autoplay<S>,
    touch_start_x: Option<f64>,
}

impl<V: SlideView + 'static, S: Scheduler + 'static> SlideShow<V, S> {
    pub fn new(total: usize, view: V, autoplay: Autoplay<S>) -> Rc<RefCell<Self>> {
        let show = Self {
            track: SlideTrack::new(total),
            view,
            autoplay,
            touch_start_x: None,
        };
        show.view.show(&show.track);
        Rc::new(RefCell::new(show))
    }

    #[cfg(test)]
    pub fn current(&self) -> usize {
        self.track.current()
    }

    fn show(&mut self, index: isize) {
        self.track.go_to(index);
        self.view.show(&self.track);
    }

    pub fn pause(this: &Rc<RefCell<Self>>) {
        this.borrow_mut().autoplay.stop();
    }

    pub fn resume(this: &Rc<RefCell<Self>>) {
        let weak = Rc::downgrade(this);
        let mut slideshow = this.borrow_mut();
        let total = slideshow.track.total();
        slideshow.autoplay.start(total, move || {
            if let Some(slideshow) = weak.upgrade() {
                let mut slideshow = slideshow.borrow_mut();
                slideshow.track.next();
                slideshow.view.show(&slideshow.track);
            }
        });
    }

    pub fn go_to(this: &Rc<RefCell<Self>>, index: isize) {
        Self::pause(this);
        this.borrow_mut().show(index);
        Self::resume(this);
    }

    pub fn step(this: &Rc<RefCell<Self>>, delta: isize) {
        let current = this.borrow().track.current() as isize;
        Self::go_to(this, current + delta);
    }

    pub fn touch_start(&mut self, x: f64) {
        self.touch_start_x = Some(x);
    }

    /// Finishes a touch; a long enough horizontal swipe steps the slideshow.
    pub fn touch_end(this: &Rc<RefCell<Self>>, x: f64, threshold: f64) {
        let Some(start) = this.borrow_mut().touch_start_x.take() else {
            return;
        };
        match swipe(start, x, threshold) {
            Some(Swipe::Next) => Self::step(this, 1),
            Some(Swipe::Prev) => Self::step(this, -1),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::timer::manual::ManualScheduler;
    use pretty_assertions::assert_eq;

    #[derive(Clone, Default)]
    struct Shown(Rc<RefCell<Vec<usize>>>);

    impl SlideView for Shown {
        fn show(&self, track: &SlideTrack) {
            self.0.borrow_mut().push(track.current());
        }
    }

    fn slideshow(
        scheduler: &ManualScheduler,
        total: usize,
    ) -> (Rc<RefCell<SlideShow<Shown, ManualScheduler>>>, Shown) {
        let shown = Shown::default();
        let show = SlideShow::new(total, shown.clone(), Autoplay::new(scheduler.clone(), 5000));
        SlideShow::resume(&show);
        (show, shown)
    }

    #[test]
    fn autoplay_cycles_through_slides() {
        let scheduler = ManualScheduler::new();
        let (show, shown) = slideshow(&scheduler, 3);
        scheduler.advance(15_000);
        assert_eq!(show.borrow().current(), 0);
        assert_eq!(*shown.0.borrow(), vec![0, 1, 2, 0]);
    }

    #[test]
    fn swipe_left_advances_and_restarts_timer() {
        let scheduler = ManualScheduler::new();
        let (show, _) = slideshow(&scheduler, 3);
        scheduler.advance(4000);
        show.borrow_mut().touch_start(300.0);
        SlideShow::touch_end(&show, 120.0, 50.0);
        assert_eq!(show.borrow().current(), 1);
        scheduler.advance(4999);
        assert_eq!(show.borrow().current(), 1);
        scheduler.advance(1);
        assert_eq!(show.borrow().current(), 2);
    }

    #[test]
    fn short_swipe_and_stray_touch_end_do_nothing() {
        let scheduler = ManualScheduler::new();
        let (show, _) = slideshow(&scheduler, 3);
        SlideShow::touch_end(&show, 10.0, 50.0);
        show.borrow_mut().touch_start(300.0);
        SlideShow::touch_end(&show, 280.0, 50.0);
        assert_eq!(show.borrow().current(), 0);
    }

    #[test]
    fn prev_from_first_wraps_to_last() {
        let scheduler = ManualScheduler::new();
        let (show, _) = slideshow(&scheduler, 4);
        SlideShow::step(&show, -1);
        assert_eq!(show.borrow().current(), 3);
    }

    #[test]
    fn single_slide_has_no_autoplay() {
        let scheduler = ManualScheduler::new();
        let (_show, _) = slideshow(&scheduler, 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn wraps_both_ways() {
        let mut track = SlideTrack::new(3);
        assert_eq!(track.go_to(-1), 2);
        assert_eq!(track.next(), 0);
        assert_eq!(track.next(), 1);
        assert_eq!(track.go_to(7), 0);
    }

    #[test]
    fn transform_moves_by_whole_slides() {
        let mut track = SlideTrack::new(4);
        assert_eq!(track.transform(), "translateX(0%)");
        track.go_to(2);
        assert_eq!(track.transform(), "translateX(-200%)");
    }

    #[test]
    fn empty_track_is_inert() {
        let mut track = SlideTrack::new(0);
        assert_eq!(track.next(), 0);
        assert_eq!(track.go_to(-1), 0);
    }

    #[test]
    fn swipe_needs_to_pass_threshold() {
        assert_eq!(swipe(300.0, 200.0, 50.0), Some(Swipe::Next));
        assert_eq!(swipe(200.0, 300.0, 50.0), Some(Swipe::Prev));
        assert_eq!(swipe(200.0, 240.0, 50.0), None);
        assert_eq!(swipe(200.0, 150.0, 50.0), None);
    }
}
