//! Self-rescheduling animation loop.
//!
//! The loop holds at most one pending frame request. Dropping the
//! [`FrameLoop`] drops that request, which cancels it, and any callback the
//! scheduler still delivers afterwards finds the loop gone and does nothing.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

pub trait FrameScheduler: 'static {
    /// Cancels the request when dropped.
    type Handle: 'static;

    fn request(&self, callback: Box<dyn FnOnce(f64)>) -> Self::Handle;
}

struct LoopInner<S: FrameScheduler> {
    scheduler: S,
    pending: RefCell<Option<S::Handle>>,
    on_frame: RefCell<Box<dyn FnMut(f64)>>,
}

pub struct FrameLoop<S: FrameScheduler> {
    inner: Rc<LoopInner<S>>,
}

impl<S: FrameScheduler> FrameLoop<S> {
    /// Requests the first frame immediately.
    pub fn start(scheduler: S, on_frame: impl FnMut(f64) + 'static) -> Self {
        let inner = Rc::new(LoopInner {
            scheduler,
            pending: RefCell::new(None),
            on_frame: RefCell::new(Box::new(on_frame)),
        });
        schedule_next(&inner);
        Self { inner }
    }
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.inner.pending.borrow_mut().take();
    }
}

fn schedule_next<S: FrameScheduler>(inner: &Rc<LoopInner<S>>) {
    let weak: Weak<LoopInner<S>> = Rc::downgrade(inner);
    let handle = inner.scheduler.request(Box::new(move |timestamp| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        inner.pending.borrow_mut().take();
        (inner.on_frame.borrow_mut())(timestamp);
        schedule_next(&inner);
    }));
    *inner.pending.borrow_mut() = Some(handle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    type Queue = Rc<RefCell<Vec<(u32, Box<dyn FnOnce(f64)>)>>>;

    /// Scheduler spy: records every request and lets the test deliver frames.
    #[derive(Clone, Default)]
    struct ManualFrames {
        queue: Queue,
        requested: Rc<Cell<u32>>,
        cancelled: Rc<RefCell<Vec<u32>>>,
    }

    struct ManualHandle {
        id: u32,
        cancelled: Rc<RefCell<Vec<u32>>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.cancelled.borrow_mut().push(self.id);
        }
    }

    impl FrameScheduler for ManualFrames {
        type Handle = ManualHandle;

        fn request(&self, callback: Box<dyn FnOnce(f64)>) -> ManualHandle {
            let id = self.requested.get() + 1;
            self.requested.set(id);
            self.queue.borrow_mut().push((id, callback));
            ManualHandle {
                id,
                cancelled: self.cancelled.clone(),
            }
        }
    }

    impl ManualFrames {
        /// Delivers queued frames the way a browser would: cancelled requests
        /// are skipped.
        fn deliver(&self, timestamp: f64) {
            let due = std::mem::take(&mut *self.queue.borrow_mut());
            for (id, callback) in due {
                if self.cancelled.borrow().contains(&id) {
                    continue;
                }
                callback(timestamp);
            }
        }
    }

    #[test]
    fn each_frame_requests_the_next() {
        let frames = ManualFrames::default();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let _running = FrameLoop::start(frames.clone(), move |_| counter.set(counter.get() + 1));

        assert_eq!(frames.requested.get(), 1);
        frames.deliver(16.0);
        frames.deliver(32.0);

        assert_eq!(count.get(), 2);
        assert_eq!(frames.requested.get(), 3);
    }

    #[test]
    fn dropping_the_loop_stops_all_frames() {
        let frames = ManualFrames::default();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let running = FrameLoop::start(frames.clone(), move |_| counter.set(counter.get() + 1));

        frames.deliver(16.0);
        drop(running);
        let requested_at_teardown = frames.requested.get();

        frames.deliver(32.0);
        frames.deliver(48.0);

        assert_eq!(count.get(), 1);
        assert_eq!(frames.requested.get(), requested_at_teardown);
        assert_eq!(frames.cancelled.borrow().last(), Some(&requested_at_teardown));
    }

    #[test]
    fn late_callback_after_drop_is_inert() {
        let frames = ManualFrames::default();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let running = FrameLoop::start(frames.clone(), move |_| counter.set(counter.get() + 1));

        drop(running);
        let (_, callback) = frames.queue.borrow_mut().pop().expect("one pending request");
        callback(16.0);

        assert_eq!(count.get(), 0);
        assert_eq!(frames.requested.get(), 1);
    }
}
