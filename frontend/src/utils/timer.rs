use gloo_timers::callback::{Interval, Timeout};

/// Source of cancellable timers. Dropping a returned handle cancels the
/// timer, so owning at most one handle means at most one pending task.
pub trait Scheduler {
    type Handle;

    /// Runs `task` every `millis` until the handle is dropped.
    fn every(&self, millis: u32, task: Box<dyn FnMut()>) -> Self::Handle;

    /// Runs `task` once after `millis` unless the handle is dropped first.
    fn once(&self, millis: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `setInterval`/`setTimeout` through `gloo-timers`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

/// Cancels its timer on drop.
#[allow(dead_code)]
pub enum TimerHandle {
    Interval(Interval),
    Timeout(Timeout),
}

impl Scheduler for BrowserScheduler {
    type Handle = TimerHandle;

    fn every(&self, millis: u32, mut task: Box<dyn FnMut()>) -> TimerHandle {
        TimerHandle::Interval(Interval::new(millis, move || task()))
    }

    fn once(&self, millis: u32, task: Box<dyn FnOnce()>) -> TimerHandle {
        TimerHandle::Timeout(Timeout::new(millis, task))
    }
}

#[cfg(test)]
pub(crate) mod manual {
    //! Deterministic clock for driving timers from tests.

    use super::Scheduler;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::{Rc, Weak};

    enum Task {
        Repeat(Box<dyn FnMut()>),
        Once(Box<dyn FnOnce()>),
    }

    struct Pending {
        id: u64,
        due: u64,
        period: Option<u64>,
        task: Task,
    }

    #[derive(Default)]
    struct Clock {
        now: u64,
        next_id: u64,
        pending: Vec<Pending>,
        cancelled: HashSet<u64>,
    }

    #[derive(Clone, Default)]
    pub(crate) struct ManualScheduler {
        clock: Rc<RefCell<Clock>>,
    }

    pub(crate) struct ManualHandle {
        id: u64,
        clock: Weak<RefCell<Clock>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            if let Some(clock) = self.clock.upgrade() {
                let mut clock = clock.borrow_mut();
                let before = clock.pending.len();
                clock.pending.retain(|p| p.id != self.id);
                if clock.pending.len() == before {
                    // Currently firing; keep it from being re-armed.
                    clock.cancelled.insert(self.id);
                }
            }
        }
    }

    impl ManualScheduler {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn now(&self) -> u64 {
            self.clock.borrow().now
        }

        pub(crate) fn pending(&self) -> usize {
            self.clock.borrow().pending.len()
        }

        fn push(&self, millis: u32, period: Option<u64>, task: Task) -> ManualHandle {
            let mut clock = self.clock.borrow_mut();
            let id = clock.next_id;
            clock.next_id += 1;
            let due = clock.now + u64::from(millis);
            clock.pending.push(Pending { id, due, period, task });
            ManualHandle {
                id,
                clock: Rc::downgrade(&self.clock),
            }
        }

        /// Moves the clock forward, firing every task that comes due in order.
        pub(crate) fn advance(&self, millis: u64) {
            let target = self.now() + millis;
            loop {
                let next = {
                    let mut clock = self.clock.borrow_mut();
                    let Some(index) = clock
                        .pending
                        .iter()
                        .enumerate()
                        .filter(|(_, p)| p.due <= target)
                        .min_by_key(|(_, p)| (p.due, p.id))
                        .map(|(i, _)| i)
                    else {
                        break;
                    };
                    let pending = clock.pending.remove(index);
                    clock.now = pending.due;
                    pending
                };
                let Pending { id, due, period, task } = next;
                match task {
                    Task::Once(task) => {
                        task();
                        self.clock.borrow_mut().cancelled.remove(&id);
                    }
                    Task::Repeat(mut task) => {
                        task();
                        let mut clock = self.clock.borrow_mut();
                        if !clock.cancelled.remove(&id) {
                            let period = period.unwrap_or(1).max(1);
                            clock.pending.push(Pending {
                                id,
                                due: due + period,
                                period: Some(period),
                                task: Task::Repeat(task),
                            });
                        }
                    }
                }
            }
            self.clock.borrow_mut().now = target;
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn every(&self, millis: u32, task: Box<dyn FnMut()>) -> ManualHandle {
            self.push(millis, Some(u64::from(millis)), Task::Repeat(task))
        }

        fn once(&self, millis: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
            self.push(millis, None, Task::Once(task))
        }
    }
}
