//! Particle field animation (stateful).
//!
//! A fixed set of points drifts across a surface, bouncing off its edges.
//! Every frame the field is redrawn and each pair of points closer than the
//! link distance is joined by a line that fades out with distance.

use ember_core::ParticleConfig;
use rand::Rng;

use crate::surface::Surface;

/// A single moving point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
}

impl Particle {
    /// Spawn at a uniformly random position with random velocity and radius.
    pub fn random<R: Rng + ?Sized>(
        width: f64,
        height: f64,
        config: &ParticleConfig,
        rng: &mut R,
    ) -> Self {
        let speed = config.max_speed;
        Self {
            x: rng.random::<f64>() * width,
            y: rng.random::<f64>() * height,
            vx: (rng.random::<f64>() - 0.5) * 2.0 * speed,
            vy: (rng.random::<f64>() - 0.5) * 2.0 * speed,
            radius: config.radius_min
                + rng.random::<f64>() * (config.radius_max - config.radius_min),
        }
    }

    /// Advance one frame, reflecting off the edges of a `width` x `height` surface.
    pub fn advance(&mut self, width: f64, height: f64) {
        (self.x, self.vx) = step_axis(self.x, self.vx, width);
        (self.y, self.vy) = step_axis(self.y, self.vy, height);
    }

    /// Euclidean distance to another particle.
    pub fn distance_to(&self, other: &Particle) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Move along one axis. A particle that starts inside `[0, extent)` stays
/// inside even when one step is longer than the distance to the far edge.
fn step_axis(position: f64, velocity: f64, extent: f64) -> (f64, f64) {
    let velocity = reflect(position, velocity, extent);
    let next = position + velocity;
    let inside = |value: f64| (0.0..extent).contains(&value);
    if inside(position) && !inside(next) {
        (next.clamp(0.0, extent - extent * f64::EPSILON), velocity)
    } else {
        (next, velocity)
    }
}

/// Velocity after checking the projected position against `[0, extent)`.
///
/// A particle heading out of range turns around; one already outside (after a
/// shrink) keeps heading back in.
fn reflect(position: f64, velocity: f64, extent: f64) -> f64 {
    let next = position + velocity;
    if next < 0.0 {
        velocity.abs()
    } else if next >= extent {
        -velocity.abs()
    } else {
        velocity
    }
}

/// A line between two nearby particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Index of the first particle (always lower than `b`).
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub opacity: f64,
}

/// Opacity of a link of the given length; zero at or beyond `max_distance`.
pub fn link_opacity(distance: f64, max_distance: f64, base_opacity: f64) -> f64 {
    if distance >= max_distance {
        0.0
    } else {
        base_opacity * (1.0 - distance / max_distance)
    }
}

/// The full set of particles bound to one surface.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    config: ParticleConfig,
}

impl ParticleField {
    /// Spawn `config.count` particles across a `width` x `height` surface.
    pub fn spawn<R: Rng + ?Sized>(
        width: f64,
        height: f64,
        config: &ParticleConfig,
        rng: &mut R,
    ) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let particles = (0..config.count)
            .map(|_| Particle::random(width, height, config, rng))
            .collect();
        Self {
            particles,
            width,
            height,
            config: config.clone(),
        }
    }

    /// Build a field from explicit particles.
    pub fn from_particles(
        particles: Vec<Particle>,
        width: f64,
        height: f64,
        config: &ParticleConfig,
    ) -> Self {
        Self {
            particles,
            width,
            height,
            config: config.clone(),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// Change the surface bounds. Positions are left as they are; particles
    /// outside the new bounds drift back in through the edge reflection.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Move every particle by one frame. A field with no area stays still.
    pub fn step(&mut self) {
        if self.width <= 0.0 || self.height <= 0.0 {
            return;
        }
        for particle in &mut self.particles {
            particle.advance(self.width, self.height);
        }
    }

    /// Every unordered pair closer than the link distance, each exactly once.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        let max = self.config.link_distance;
        let base = self.config.link_opacity;
        self.particles.iter().enumerate().flat_map(move |(a, p1)| {
            self.particles[a + 1..]
                .iter()
                .enumerate()
                .filter_map(move |(offset, p2)| {
                    let distance = p1.distance_to(p2);
                    (distance < max).then(|| Link {
                        a,
                        b: a + 1 + offset,
                        distance,
                        opacity: link_opacity(distance, max, base),
                    })
                })
        })
    }

    /// Draw the current state: clear, dots, then links.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let color = self.config.color;
        surface.clear();

        for p in &self.particles {
            surface.fill_circle(p.x, p.y, p.radius, color, self.config.dot_opacity);
        }

        for link in self.links() {
            let p1 = &self.particles[link.a];
            let p2 = &self.particles[link.b];
            surface.stroke_line(
                (p1.x, p1.y),
                (p2.x, p2.y),
                self.config.line_width,
                color,
                link.opacity,
            );
        }
    }
}
