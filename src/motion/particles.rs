//! Particle background simulation.
//!
//! Particles drift at a constant velocity and wrap toroidally at the canvas
//! edges. Drawing goes through [`Surface`] so the browser canvas and tests
//! share the same frame code.

use rand::Rng;

pub const DEFAULT_PARTICLE_COUNT: usize = 50;

const MAX_SPEED: f64 = 0.25;
const RADIUS_RANGE: (f64, f64) = (1.0, 3.0);
const OPACITY_RANGE: (f64, f64) = (0.2, 0.7);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    fn random<R: Rng>(rng: &mut R, width: f64, height: f64) -> Self {
        Self {
            x: uniform(rng, 0.0, width),
            y: uniform(rng, 0.0, height),
            vx: uniform(rng, -MAX_SPEED, MAX_SPEED),
            vy: uniform(rng, -MAX_SPEED, MAX_SPEED),
            radius: uniform(rng, RADIUS_RANGE.0, RADIUS_RANGE.1),
            opacity: uniform(rng, OPACITY_RANGE.0, OPACITY_RANGE.1),
        }
    }

    fn advance(&mut self, width: f64, height: f64) {
        self.x = wrap(self.x + self.vx, width);
        self.y = wrap(self.y + self.vy, height);
    }
}

pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, opacity: f64);
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new<R: Rng>(width: f64, height: f64, count: usize, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|_| Particle::random(rng, width, height))
            .collect();

        Self {
            width,
            height,
            particles,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Existing particles keep their positions; the next step wraps any that
    /// fall outside the new bounds.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.advance(width, height);
        }
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        for particle in &self.particles {
            surface.fill_circle(particle.x, particle.y, particle.radius, particle.opacity);
        }
    }

    /// One animation frame: clear, advance, redraw.
    pub fn frame(&mut self, surface: &mut impl Surface) {
        surface.clear(self.width, self.height);
        self.step();
        self.draw(surface);
    }
}

/// Accent token when the theme defines one, otherwise the text colour.
pub fn fill_colour(accent: &str, text: &str) -> String {
    [accent, text]
        .into_iter()
        .map(str::trim)
        .find(|colour| !colour.is_empty())
        .unwrap_or("currentColor")
        .to_string()
}

fn uniform<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high <= low {
        return low;
    }
    rng.random_range(low..high)
}

/// Maps `value` into `[0, extent)`. A zero-sized extent pins to the origin.
fn wrap(value: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }

    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[derive(Default)]
    struct RecordingSurface {
        clears: usize,
        circles: Vec<(f64, f64)>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, _width: f64, _height: f64) {
            self.clears += 1;
            self.circles.clear();
        }

        fn fill_circle(&mut self, x: f64, y: f64, _radius: f64, _opacity: f64) {
            self.circles.push((x, y));
        }
    }

    fn field_with(particle: Particle, width: f64, height: f64) -> ParticleField {
        ParticleField {
            width,
            height,
            particles: vec![particle],
        }
    }

    fn moving(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle {
            x,
            y,
            vx,
            vy,
            radius: 1.0,
            opacity: 0.5,
        }
    }

    #[test]
    fn initial_pool_lies_inside_the_canvas() {
        let mut rng = Pcg32::seed_from_u64(7);
        let field = ParticleField::new(800.0, 600.0, DEFAULT_PARTICLE_COUNT, &mut rng);

        assert_eq!(field.particles().len(), 50);
        for particle in field.particles() {
            assert!((0.0..800.0).contains(&particle.x));
            assert!((0.0..600.0).contains(&particle.y));
            assert!((-MAX_SPEED..MAX_SPEED).contains(&particle.vx));
            assert!((RADIUS_RANGE.0..RADIUS_RANGE.1).contains(&particle.radius));
            assert!((OPACITY_RANGE.0..OPACITY_RANGE.1).contains(&particle.opacity));
        }
    }

    #[test]
    fn leaving_right_edge_reenters_on_the_left() {
        let mut field = field_with(moving(799.9, 10.0, 0.2, 0.0), 800.0, 600.0);
        field.step();

        let particle = field.particles()[0];
        assert!(particle.x < 1.0, "x = {}", particle.x);
        assert_eq!(particle.y, 10.0);
    }

    #[test]
    fn leaving_top_edge_reenters_at_the_bottom() {
        let mut field = field_with(moving(10.0, 0.1, 0.0, -0.2), 800.0, 600.0);
        field.step();

        let particle = field.particles()[0];
        assert!(particle.y > 599.0 && particle.y < 600.0, "y = {}", particle.y);
    }

    #[test]
    fn shrinking_the_canvas_keeps_positions_until_the_next_step() {
        let mut field = field_with(moving(700.0, 500.0, 0.1, 0.1), 800.0, 600.0);
        field.resize(400.0, 300.0);
        assert_eq!(field.particles()[0].x, 700.0);

        field.step();
        let particle = field.particles()[0];
        assert!((0.0..400.0).contains(&particle.x));
        assert!((0.0..300.0).contains(&particle.y));
    }

    #[test]
    fn frame_clears_then_draws_every_particle() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = ParticleField::new(320.0, 240.0, 12, &mut rng);
        let mut surface = RecordingSurface::default();

        field.frame(&mut surface);
        field.frame(&mut surface);

        assert_eq!(surface.clears, 2);
        assert_eq!(surface.circles.len(), 12);
        assert_eq!(surface.circles[0], (field.particles()[0].x, field.particles()[0].y));
    }

    #[test]
    fn fill_prefers_the_accent_and_falls_back_to_text() {
        assert_eq!(fill_colour(" #64ffda", "#e6f1ff"), "#64ffda");
        assert_eq!(fill_colour("  ", "rgb(15, 23, 42)"), "rgb(15, 23, 42)");
        assert_eq!(fill_colour("", ""), "currentColor");
    }

    #[test]
    fn zero_sized_canvas_pins_particles() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = ParticleField::new(0.0, 0.0, 4, &mut rng);
        field.step();

        assert!(field.particles().iter().all(|p| p.x == 0.0 && p.y == 0.0));
    }

    proptest! {
        #[test]
        fn positions_stay_in_bounds(
            seed in any::<u64>(),
            width in 1.0f64..2_000.0,
            height in 1.0f64..2_000.0,
            frames in 1usize..300,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut field = ParticleField::new(width, height, 20, &mut rng);

            for _ in 0..frames {
                field.step();
                for particle in field.particles() {
                    prop_assert!(particle.x >= 0.0 && particle.x < width);
                    prop_assert!(particle.y >= 0.0 && particle.y < height);
                }
            }
        }
    }
}
