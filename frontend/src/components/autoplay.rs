use crate::utils::timer::Scheduler;

/// Periodic auto-advance that can be paused by user interaction.
///
/// Holds at most one timer handle: `start` always cancels the previous timer
/// before arming a new one, and `stop` simply drops it.
pub struct Autoplay<S: Scheduler> {
    scheduler: S,
    interval_ms: u32,
    handle: Option<S::Handle>,
}

impl<S: Scheduler> Autoplay<S> {
    pub fn new(scheduler: S, interval_ms: u32) -> Self {
        Self {
            scheduler,
            interval_ms,
            handle: None,
        }
    }

    /// Arms the timer. With one page or fewer there is nothing to advance to.
    pub fn start(&mut self, total_pages: usize, tick: impl FnMut() + 'static) {
        if total_pages <= 1 {
            self.stop();
            return;
        }
        self.stop();
        self.handle = Some(self.scheduler.every(self.interval_ms, Box::new(tick)));
    }

    pub fn stop(&mut self) {
        self.handle.take();
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}
