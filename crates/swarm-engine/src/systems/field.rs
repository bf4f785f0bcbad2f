//! The particle pool: spawn, retarget on glyph change, per-frame step.

use glam::Vec2;

use super::particle::{Particle, ParticleStyle};
use crate::api::config::DeviceTuning;
use crate::core::rng::Rng;
use crate::renderer::traits::Surface;

/// Canvas edge a particle spawns on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// A uniformly random point along this edge of a `size` canvas.
    pub fn random_point(self, size: Vec2, rng: &mut Rng) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(rng.range(0.0, size.x), 0.0),
            Edge::Right => Vec2::new(size.x, rng.range(0.0, size.y)),
            Edge::Bottom => Vec2::new(rng.range(0.0, size.x), size.y),
            Edge::Left => Vec2::new(0.0, rng.range(0.0, size.y)),
        }
    }
}

/// Fixed-size collection of particles sharing one canvas and tuning.
pub struct ParticleField {
    particles: Vec<Particle>,
    style: ParticleStyle,
    size: Vec2,
    jitter: f32,
    mouse_radius: f32,
    rng: Rng,
    // true once a glyph shape has been assigned
    shaped: bool,
}

impl ParticleField {
    /// An empty field over a `width × height` logical canvas.
    /// Call `initialize` to fill the pool.
    pub fn new(
        style: ParticleStyle,
        tuning: DeviceTuning,
        width: f32,
        height: f32,
        seed: u64,
    ) -> Self {
        Self {
            particles: Vec::with_capacity(tuning.particle_count),
            style,
            size: Vec2::new(width, height),
            jitter: tuning.jitter,
            mouse_radius: tuning.mouse_radius,
            rng: Rng::new(seed),
            shaped: false,
        }
    }

    /// Replace the pool with `count` particles, each on a random canvas edge
    /// (1-in-4 per edge) and aimed at the canvas center.
    pub fn initialize(&mut self, count: usize) {
        let center = self.center();
        self.shaped = false;
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let edge = Edge::ALL[self.rng.next_index(Edge::ALL.len())];
            let pos = edge.random_point(self.size, &mut self.rng);
            let particle = self.style.spawn(pos, center, &mut self.rng);
            self.particles.push(particle);
        }
        log::info!(
            "spawned {} particles on a {}x{} canvas",
            count,
            self.size.x,
            self.size.y
        );
    }

    /// Point every particle at a shape point of the new glyph.
    ///
    /// Points are shuffled so particle index does not follow scan order,
    /// assigned round-robin (`i mod len`), then jittered by up to
    /// `jitter / 2` per axis. An empty set leaves all targets unchanged.
    pub fn retarget(&mut self, points: &[Vec2]) {
        if points.is_empty() {
            log::debug!("retarget skipped: no shape points");
            return;
        }

        let mut shuffled = points.to_vec();
        self.rng.shuffle(&mut shuffled);

        let half = self.jitter / 2.0;
        for (i, particle) in self.particles.iter_mut().enumerate() {
            let base = shuffled[i % shuffled.len()];
            let offset = Vec2::new(self.rng.spread(half), self.rng.spread(half));
            particle.target = base + offset;
            particle.visible = true;
        }
        self.shaped = true;
    }

    /// Update then draw each particle, in order.
    pub fn step<S: Surface + ?Sized>(&mut self, pointer: Option<Vec2>, surface: &mut S) {
        let radius = self.mouse_radius;
        for particle in &mut self.particles {
            particle.update(pointer, radius);
            particle.draw(surface);
        }
    }

    /// Record new canvas bounds. Particles keep their state; the caller
    /// re-samples the active glyph. Until a shape has been assigned the
    /// particles follow the new center.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
        if !self.shaped {
            let center = self.center();
            for particle in &mut self.particles {
                particle.target = center;
            }
        }
    }

    /// Swap jitter and pointer radius (device class changed). The pool size
    /// is fixed at `initialize`.
    pub fn set_tuning(&mut self, tuning: DeviceTuning) {
        self.jitter = tuning.jitter;
        self.mouse_radius = tuning.mouse_radius;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn center(&self) -> Vec2 {
        self.size * 0.5
    }

    pub fn jitter(&self) -> f32 {
        self.jitter
    }

    pub fn mouse_radius(&self) -> f32 {
        self.mouse_radius
    }
}
