//! A single swarm particle: spring toward a target, pointer repulsion,
//! friction, and a breathing size/opacity pulse.

use glam::Vec2;

use crate::api::config::SwarmConfig;
use crate::api::types::Color;
use crate::core::rng::Rng;
use crate::renderer::traits::Surface;

/// Fraction of the per-tick spring correction applied to velocity.
const SPRING_SHARE: f32 = 0.5;
/// Velocity pushed away from the pointer at zero distance.
const REPULSION_SCALE: f32 = 2.0;
/// Size and opacity swing around their base values.
const BREATHE_DEPTH: f32 = 0.3;
const BASE_OPACITY: f32 = 0.7;
const MIN_OPACITY: f32 = 0.2;
const MAX_OPACITY: f32 = 1.0;

/// Repulsion strength at `distance` from the pointer: 1.0 at the pointer,
/// falling linearly to 0.0 at `radius` and beyond.
pub fn repulsion_force(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 || distance >= radius {
        return 0.0;
    }
    (radius - distance) / radius
}

/// A single animated point.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub target: Vec2,
    pub vel: Vec2,
    pub friction: f32,
    /// Spring coefficient, fixed for the particle's lifetime.
    pub ease: f32,
    pub base_size: f32,
    pub size: f32,
    /// Breathing angle in radians; wraps through sin().
    pub phase: f32,
    pub breathe_speed: f32,
    pub color: Color,
    pub visible: bool,
}

impl Particle {
    /// A resting, invisible particle at `pos` aimed at `target`.
    pub fn new(pos: Vec2, target: Vec2, color: Color) -> Self {
        Particle {
            pos,
            target,
            vel: Vec2::ZERO,
            friction: 0.66,
            ease: 0.1,
            base_size: 2.0,
            size: 2.0,
            phase: 0.0,
            breathe_speed: 0.03,
            color,
            visible: false,
        }
    }

    /// Advance one tick.
    ///
    /// Pure in its inputs: the same particle state, pointer and radius
    /// always give the same next state.
    pub fn update(&mut self, pointer: Option<Vec2>, mouse_radius: f32) {
        let to_target = self.target - self.pos;
        self.vel += to_target * self.ease * SPRING_SHARE;

        if let Some(pointer) = pointer {
            self.vel -= self.repulsion(pointer, mouse_radius);
        }

        self.vel *= self.friction;
        self.pos += self.vel;

        self.phase += self.breathe_speed;
        self.size = self.base_size * (1.0 + self.phase.sin() * BREATHE_DEPTH);
    }

    /// Velocity pointing from the particle toward the pointer, scaled by
    /// the repulsion force. Subtracting it pushes the particle away.
    pub fn repulsion(&self, pointer: Vec2, mouse_radius: f32) -> Vec2 {
        let delta = pointer - self.pos;
        let force = repulsion_force(delta.length(), mouse_radius);
        if force == 0.0 {
            return Vec2::ZERO;
        }
        let angle = delta.y.atan2(delta.x);
        Vec2::from_angle(angle) * force * REPULSION_SCALE
    }

    /// Current opacity, pulsing with the same phase as the size.
    pub fn opacity(&self) -> f32 {
        (BASE_OPACITY + self.phase.sin() * BREATHE_DEPTH).clamp(MIN_OPACITY, MAX_OPACITY)
    }

    /// Draw as a filled circle. Invisible particles draw nothing.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if !self.visible {
            return;
        }
        surface.fill_circle(self.pos, self.size, self.color, self.opacity());
    }
}

/// Per-particle randomization bands, taken from the config.
#[derive(Debug, Clone)]
pub struct ParticleStyle {
    pub palette: Vec<Color>,
    pub friction: f32,
    pub ease_range: (f32, f32),
    pub size_range: (f32, f32),
    pub breathe_speed_range: (f32, f32),
}

impl ParticleStyle {
    pub fn from_config(config: &SwarmConfig) -> Self {
        Self {
            palette: config.palette.clone(),
            friction: config.friction,
            ease_range: config.ease_range,
            size_range: config.size_range,
            breathe_speed_range: config.breathe_speed_range,
        }
    }

    /// Spawn a particle at `pos` heading for `target`, drawing its fixed
    /// traits (ease, size, breathing, color) from the bands.
    pub fn spawn(&self, pos: Vec2, target: Vec2, rng: &mut Rng) -> Particle {
        let color = if self.palette.is_empty() {
            Color::WHITE
        } else {
            self.palette[rng.next_index(self.palette.len())]
        };
        let base_size = rng.range(self.size_range.0, self.size_range.1);
        Particle {
            pos,
            target,
            vel: Vec2::ZERO,
            friction: self.friction,
            ease: rng.range(self.ease_range.0, self.ease_range.1),
            base_size,
            size: base_size,
            phase: rng.range(0.0, std::f32::consts::TAU),
            breathe_speed: rng.range(self.breathe_speed_range.0, self.breathe_speed_range.1),
            color,
            visible: false,
        }
    }
}

impl Default for ParticleStyle {
    fn default() -> Self {
        Self::from_config(&SwarmConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::instance::InstanceBuffer;

    fn particle_at(pos: Vec2, target: Vec2) -> Particle {
        let mut p = Particle::new(pos, target, Color::WHITE);
        p.ease = 0.1;
        p.friction = 0.66;
        p
    }

    #[test]
    fn spring_moves_toward_target() {
        let mut p = particle_at(Vec2::ZERO, Vec2::new(100.0, 0.0));
        p.update(None, 100.0);
        // vel = 100 * 0.1 * 0.5 * 0.66
        assert!((p.vel.x - 3.3).abs() < 1e-4);
        assert!((p.pos.x - 3.3).abs() < 1e-4);
        assert_eq!(p.pos.y, 0.0);
    }

    #[test]
    fn settles_on_target() {
        let mut p = particle_at(Vec2::new(300.0, -40.0), Vec2::new(10.0, 20.0));
        for _ in 0..400 {
            p.update(None, 100.0);
        }
        assert!(p.pos.distance(p.target) < 0.01, "ended at {}", p.pos);
    }

    #[test]
    fn update_is_deterministic() {
        let mut a = particle_at(Vec2::new(5.0, 7.0), Vec2::new(50.0, 60.0));
        a.vel = Vec2::new(1.5, -2.0);
        let mut b = a.clone();
        let pointer = Some(Vec2::new(20.0, 20.0));
        for _ in 0..20 {
            a.update(pointer, 80.0);
            b.update(pointer, 80.0);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn repulsion_force_bounds() {
        assert_eq!(repulsion_force(100.0, 100.0), 0.0);
        assert_eq!(repulsion_force(150.0, 100.0), 0.0);
        assert_eq!(repulsion_force(0.0, 100.0), 1.0);
        assert_eq!(repulsion_force(25.0, 100.0), 0.75);
        assert_eq!(repulsion_force(0.0, 0.0), 0.0);
    }

    #[test]
    fn pointer_pushes_particle_away() {
        let mut p = particle_at(Vec2::new(50.0, 50.0), Vec2::new(50.0, 50.0));
        p.update(Some(Vec2::new(60.0, 50.0)), 100.0);
        // force 0.9, toward-pointer is +x, so velocity goes -x
        assert!(p.vel.x < 0.0);
        assert!((p.vel.x + 0.9 * 2.0 * 0.66).abs() < 1e-4);
        assert!(p.vel.y.abs() < 1e-4);
    }

    #[test]
    fn pointer_outside_radius_is_ignored() {
        let mut with = particle_at(Vec2::new(0.0, 0.0), Vec2::new(30.0, 40.0));
        let mut without = with.clone();
        with.update(Some(Vec2::new(500.0, 500.0)), 100.0);
        without.update(None, 100.0);
        assert_eq!(with, without);
    }

    #[test]
    fn absent_pointer_is_pure_spring_and_friction() {
        let mut p = particle_at(Vec2::new(12.0, -8.0), Vec2::new(-30.0, 44.0));
        p.vel = Vec2::new(0.5, 0.25);
        let expected_vel = (p.vel + (p.target - p.pos) * p.ease * 0.5) * p.friction;
        let expected_pos = p.pos + expected_vel;
        p.update(None, 100.0);
        assert!(p.vel.abs_diff_eq(expected_vel, 1e-5));
        assert!(p.pos.abs_diff_eq(expected_pos, 1e-5));
    }

    #[test]
    fn breathing_size_stays_within_band() {
        let mut p = particle_at(Vec2::ZERO, Vec2::ZERO);
        p.base_size = 2.0;
        p.breathe_speed = 0.37;
        for _ in 0..500 {
            p.update(None, 0.0);
            assert!(p.size >= 2.0 * 0.7 - 1e-5 && p.size <= 2.0 * 1.3 + 1e-5, "size {}", p.size);
            let o = p.opacity();
            assert!((0.2..=1.0).contains(&o));
        }
    }

    #[test]
    fn invisible_particle_draws_nothing() {
        let mut buf = InstanceBuffer::new();
        let mut p = particle_at(Vec2::new(1.0, 2.0), Vec2::ZERO);
        p.draw(&mut buf);
        assert_eq!(buf.instance_count(), 0);
        p.visible = true;
        p.draw(&mut buf);
        assert_eq!(buf.instance_count(), 1);
        let c = buf.instances()[0];
        assert_eq!((c.x, c.y, c.radius), (1.0, 2.0, p.size));
        assert_eq!(c.alpha, p.opacity());
    }

    #[test]
    fn spawn_draws_traits_from_bands() {
        let style = ParticleStyle::default();
        let mut rng = Rng::new(11);
        for _ in 0..200 {
            let p = style.spawn(Vec2::ZERO, Vec2::ONE, &mut rng);
            assert!(p.ease >= style.ease_range.0 && p.ease <= style.ease_range.1);
            assert!(p.base_size >= style.size_range.0 && p.base_size <= style.size_range.1);
            assert!(style.palette.contains(&p.color));
            assert!(!p.visible);
            assert_eq!(p.target, Vec2::ONE);
        }
    }
}
