//! Browser-independent state behind the page animations.
//!
//! Each submodule is a small state machine fed by the browser glue in
//! `frontend::motion`. Nothing here touches the DOM, so the behaviour is
//! tested natively.

pub mod cursor;
pub mod frame;
pub mod particles;
pub mod reveal;
pub mod scroll;
pub mod typewriter;

#[cfg(test)]
mod tests {
    use super::{
        frame::{FrameLoop, FrameScheduler},
        particles::{ParticleField, Surface, DEFAULT_PARTICLE_COUNT},
    };
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
    };

    #[derive(Clone, Default)]
    struct SpyFrames {
        requested: Rc<Cell<u32>>,
        queue: Rc<RefCell<Vec<Box<dyn FnOnce(f64)>>>>,
        live: Rc<Cell<bool>>,
    }

    struct SpyHandle(Rc<Cell<bool>>);

    impl Drop for SpyHandle {
        fn drop(&mut self) {
            self.0.set(false);
        }
    }

    impl FrameScheduler for SpyFrames {
        type Handle = SpyHandle;

        fn request(&self, callback: Box<dyn FnOnce(f64)>) -> SpyHandle {
            self.requested.set(self.requested.get() + 1);
            self.live.set(true);
            self.queue.borrow_mut().push(callback);
            SpyHandle(self.live.clone())
        }
    }

    struct CountingSurface(Rc<Cell<usize>>);

    impl Surface for CountingSurface {
        fn clear(&mut self, _width: f64, _height: f64) {}

        fn fill_circle(&mut self, _x: f64, _y: f64, _radius: f64, _opacity: f64) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn particle_background_runs_until_teardown() {
        let mut rng = Pcg32::seed_from_u64(800_600);
        let field = ParticleField::new(800.0, 600.0, DEFAULT_PARTICLE_COUNT, &mut rng);

        assert_eq!(field.particles().len(), 50);
        assert!(field
            .particles()
            .iter()
            .all(|p| (0.0..800.0).contains(&p.x) && (0.0..600.0).contains(&p.y)));

        let field = Rc::new(RefCell::new(field));
        let drawn = Rc::new(Cell::new(0));
        let frames = SpyFrames::default();
        let running = {
            let field = field.clone();
            let mut surface = CountingSurface(drawn.clone());
            FrameLoop::start(frames.clone(), move |_| field.borrow_mut().frame(&mut surface))
        };

        for timestamp in [16.0, 32.0, 48.0] {
            let due = std::mem::take(&mut *frames.queue.borrow_mut());
            due.into_iter().for_each(|callback| callback(timestamp));
        }
        assert_eq!(drawn.get(), 150);

        drop(running);
        assert!(!frames.live.get());
        let requested_at_teardown = frames.requested.get();

        let stale = std::mem::take(&mut *frames.queue.borrow_mut());
        stale.into_iter().for_each(|callback| callback(64.0));

        assert_eq!(drawn.get(), 150);
        assert_eq!(frames.requested.get(), requested_at_teardown);
    }
}
