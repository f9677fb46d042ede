//! Before/after reveal slider driven by a pointer drag.

/// Horizontal extent of the slider on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderBounds {
    pub left: f64,
    pub width: f64,
}

/// Attaches the document-wide move/up listeners for one gesture. The guard
/// owns them; dropping it detaches every one.
pub trait GestureBinder {
    type Guard;

    fn bind(&mut self) -> Self::Guard;
}

pub enum DragState<G> {
    Idle,
    /// Dropping the state detaches the gesture's listeners.
    Dragging { pointer_x: f64, _gesture: G },
}

/// How the after-image is clipped at the handle position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipStyle {
    /// After-image visible to the right of the handle.
    Polygon,
    /// After-image visible to the left of the handle.
    Inset,
}

impl ClipStyle {
    pub fn css(self, percentage: f64) -> String {
        match self {
            ClipStyle::Polygon => format!(
                "polygon({p}% 0%, 100% 0%, 100% 100%, {p}% 100%)",
                p = percentage
            ),
            ClipStyle::Inset => format!("inset(0 {}% 0 0)", 100.0 - percentage),
        }
    }
}

/// Maps a pointer x coordinate to a reveal percentage in `[0, 100]`.
pub fn reveal_percentage(pointer_x: f64, bounds: SliderBounds) -> f64 {
    let width = if bounds.width > 0.0 { bounds.width } else { 1.0 };
    (100.0 * (pointer_x - bounds.left) / width).clamp(0.0, 100.0)
}

pub struct DragSlider<B: GestureBinder> {
    binder: B,
    state: DragState<B::Guard>,
    percentage: f64,
}

impl<B: GestureBinder> DragSlider<B> {
    pub fn new(binder: B, initial_percentage: f64) -> Self {
        Self {
            binder,
            state: DragState::Idle,
            percentage: initial_percentage.clamp(0.0, 100.0),
        }
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Last pointer position of the active gesture.
    pub fn pointer_x(&self) -> Option<f64> {
        match self.state {
            DragState::Dragging { pointer_x, .. } => Some(pointer_x),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Starts a gesture. Ignored while one is already active, so listeners
    /// are bound exactly once per gesture.
    pub fn pointer_down(&mut self, pointer_x: f64) -> bool {
        if self.is_dragging() {
            return false;
        }
        let gesture = self.binder.bind();
        self.state = DragState::Dragging {
            pointer_x,
            _gesture: gesture,
        };
        true
    }

    /// Returns the new percentage while dragging, `None` when idle.
    pub fn pointer_move(&mut self, pointer_x: f64, bounds: SliderBounds) -> Option<f64> {
        let DragState::Dragging { pointer_x: last, .. } = &mut self.state else {
            return None;
        };
        *last = pointer_x;
        self.percentage = reveal_percentage(pointer_x, bounds);
        Some(self.percentage)
    }

    /// Ends the gesture, dropping its listeners.
    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }

    /// A click on the slider background jumps to the click point, but only
    /// between gestures.
    pub fn click(&mut self, pointer_x: f64, bounds: SliderBounds) -> Option<f64> {
        if self.is_dragging() {
            return None;
        }
        self.percentage = reveal_percentage(pointer_x, bounds);
        Some(self.percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts listeners the way the DOM binder attaches them: four per gesture.
    #[derive(Clone, Default)]
    struct CountingBinder {
        attached: Rc<Cell<usize>>,
        binds: Rc<Cell<usize>>,
    }

    struct CountingGuard {
        attached: Rc<Cell<usize>>,
    }

    impl Drop for CountingGuard {
        fn drop(&mut self) {
            self.attached.set(self.attached.get() - 4);
        }
    }

    impl GestureBinder for CountingBinder {
        type Guard = CountingGuard;

        fn bind(&mut self) -> CountingGuard {
            self.binds.set(self.binds.get() + 1);
            self.attached.set(self.attached.get() + 4);
            CountingGuard {
                attached: self.attached.clone(),
            }
        }
    }

    const BOUNDS: SliderBounds = SliderBounds {
        left: 100.0,
        width: 400.0,
    };

    #[test]
    fn percentage_is_clamped_outside_the_slider() {
        assert_eq!(reveal_percentage(50.0, BOUNDS), 0.0);
        assert_eq!(reveal_percentage(100.0, BOUNDS), 0.0);
        assert_eq!(reveal_percentage(300.0, BOUNDS), 50.0);
        assert_eq!(reveal_percentage(500.0, BOUNDS), 100.0);
        assert_eq!(reveal_percentage(900.0, BOUNDS), 100.0);
    }

    #[test]
    fn percentage_is_monotonic() {
        let mut previous = -1.0;
        for x in (0..=600).step_by(7) {
            let p = reveal_percentage(x as f64, BOUNDS);
            assert!(p >= previous, "x={} p={} previous={}", x, p, previous);
            previous = p;
        }
    }

    #[test]
    fn zero_width_does_not_divide_by_zero() {
        let bounds = SliderBounds {
            left: 10.0,
            width: 0.0,
        };
        assert_eq!(reveal_percentage(10.5, bounds), 50.0);
        assert!(reveal_percentage(1e9, bounds).is_finite());
    }

    #[test]
    fn moves_are_ignored_while_idle() {
        let mut slider = DragSlider::new(CountingBinder::default(), 50.0);
        assert_eq!(slider.pointer_move(400.0, BOUNDS), None);
        assert_eq!(slider.percentage(), 50.0);
    }

    #[test]
    fn listeners_do_not_accumulate_across_drags() {
        let binder = CountingBinder::default();
        let mut slider = DragSlider::new(binder.clone(), 50.0);
        for cycle in 0..25 {
            assert!(slider.pointer_down(200.0));
            assert_eq!(binder.attached.get(), 4);
            slider.pointer_move(150.0 + cycle as f64, BOUNDS);
            slider.pointer_up();
            assert_eq!(binder.attached.get(), 0);
        }
        assert_eq!(binder.binds.get(), 25);
    }

    #[test]
    fn second_pointer_down_does_not_bind_again() {
        let binder = CountingBinder::default();
        let mut slider = DragSlider::new(binder.clone(), 50.0);
        assert!(slider.pointer_down(200.0));
        assert!(!slider.pointer_down(260.0));
        assert_eq!(binder.binds.get(), 1);
        assert_eq!(binder.attached.get(), 4);
        slider.pointer_up();
        slider.pointer_up();
        assert_eq!(binder.attached.get(), 0);
    }

    #[test]
    fn click_only_applies_between_gestures() {
        let mut slider = DragSlider::new(CountingBinder::default(), 50.0);
        assert_eq!(slider.click(200.0, BOUNDS), Some(25.0));
        slider.pointer_down(200.0);
        assert_eq!(slider.click(500.0, BOUNDS), None);
        assert_eq!(slider.pointer_move(400.0, BOUNDS), Some(75.0));
        assert_eq!(slider.pointer_x(), Some(400.0));
        slider.pointer_up();
        assert_eq!(slider.pointer_x(), None);
        assert_eq!(slider.percentage(), 75.0);
    }

    #[test]
    fn clip_styles() {
        assert_eq!(
            ClipStyle::Polygon.css(30.0),
            "polygon(30% 0%, 100% 0%, 100% 100%, 30% 100%)"
        );
        assert_eq!(ClipStyle::Inset.css(30.0), "inset(0 70% 0 0)");
    }
}
