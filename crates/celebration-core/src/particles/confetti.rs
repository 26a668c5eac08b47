//! Party-popper confetti for the landing hero.
//!
//! Particles launch upward from just below the surface, curl as their
//! travel angle spins, get pulled down by a constant gravity bias and fade
//! out. A particle that fades away or leaves the surface is respawned in
//! place.

use super::{chance, sample_span, Hsl, ParticleEffect};
use crate::rng::{entropy_seed, seeded};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_6};

/// Shape drawn for a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Filled square
    Confetti,
    /// Four-point diamond
    Sparkle,
}

/// A single confetti particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Hsl,
    /// Distance travelled per frame along `angle`
    pub speed: f32,
    /// Travel angle in radians (screen coordinates, -π/2 is straight up)
    pub angle: f32,
    /// Change of `angle` per frame
    pub spin: f32,
    /// 0.0 (invisible) to 1.0 (opaque)
    pub opacity: f32,
    pub kind: ParticleKind,
}

/// Configuration for the confetti field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfettiConfig {
    /// Number of particles in the pool
    pub pool_size: usize,
    /// Downward drift added every frame
    pub gravity: f32,
    /// Opacity lost every frame
    pub fade_step: f32,
    /// Distance below the bottom edge where particles launch
    pub spawn_margin: f32,
    pub size_min: f32,
    pub size_max: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    /// Half-width of the launch cone around straight up, in radians
    pub launch_spread: f32,
    /// Maximum absolute spin per frame, in radians
    pub max_spin: f32,
    /// Probability that a particle is a sparkle rather than a square
    pub sparkle_ratio: f64,
    pub saturation: f32,
    pub lightness: f32,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self::hero()
    }
}

impl ConfettiConfig {
    /// Browser canvas, measured in CSS pixels
    pub fn hero() -> Self {
        Self {
            pool_size: 50,
            gravity: 0.5,
            fade_step: 0.005,
            spawn_margin: 20.0,
            size_min: 4.0,
            size_max: 8.0,
            speed_min: 2.0,
            speed_max: 5.0,
            launch_spread: FRAC_PI_6,
            max_spin: 0.1,
            sparkle_ratio: 0.5,
            saturation: 1.0,
            lightness: 0.7,
        }
    }

    /// Terminal surface, measured in character cells
    pub fn terminal() -> Self {
        Self {
            pool_size: 40,
            gravity: 0.08,
            fade_step: 0.01,
            spawn_margin: 1.0,
            size_min: 1.0,
            size_max: 1.0,
            speed_min: 0.3,
            speed_max: 0.9,
            launch_spread: FRAC_PI_6,
            max_spin: 0.05,
            sparkle_ratio: 0.5,
            saturation: 1.0,
            lightness: 0.7,
        }
    }
}

/// Fixed pool of confetti particles
pub struct ConfettiField {
    particles: Vec<Particle>,
    config: ConfettiConfig,
    width: f32,
    height: f32,
    rng: StdRng,
}

impl ConfettiField {
    pub fn new(config: ConfettiConfig, width: f32, height: f32) -> Self {
        Self::with_seed(config, width, height, entropy_seed())
    }

    pub fn with_seed(config: ConfettiConfig, width: f32, height: f32, seed: u64) -> Self {
        let mut field = Self {
            particles: Vec::with_capacity(config.pool_size),
            config,
            width,
            height,
            rng: seeded(seed),
        };
        field.populate();
        field
    }

    fn populate(&mut self) {
        self.particles.clear();
        for _ in 0..self.config.pool_size {
            let mut particle = Particle {
                x: 0.0,
                y: 0.0,
                size: 0.0,
                color: Hsl::new(0.0, 0.0, 0.0),
                speed: 0.0,
                angle: 0.0,
                spin: 0.0,
                opacity: 1.0,
                kind: ParticleKind::Confetti,
            };
            seed_particle(&mut particle, &self.config, &mut self.rng, self.width, self.height);
            // Stagger lifetimes so the pool doesn't recycle in lockstep
            particle.opacity = self.rng.gen_range(0.2..=1.0);
            self.particles.push(particle);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &ConfettiConfig {
        &self.config
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    fn has_left_surface(&self, particle: &Particle) -> bool {
        let margin = self.config.spawn_margin;
        particle.y > self.height + margin
            || particle.x < -margin
            || particle.x > self.width + margin
    }
}

impl ParticleEffect for ConfettiField {
    fn reset(&mut self) {
        self.populate();
    }

    fn step(&mut self) {
        for i in 0..self.particles.len() {
            let particle = &mut self.particles[i];
            particle.x += particle.angle.cos() * particle.speed;
            particle.y += particle.angle.sin() * particle.speed + self.config.gravity;
            particle.angle += particle.spin;
            particle.opacity = (particle.opacity - self.config.fade_step).max(0.0);

            let expired = particle.opacity <= 0.0 || self.has_left_surface(&self.particles[i]);
            if expired {
                let particle = &mut self.particles[i];
                respawn_particle(particle, &self.config, &mut self.rng, self.width, self.height);
            }
        }
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn pool_len(&self) -> usize {
        self.particles.len()
    }
}

/// Full randomization of a particle, including its shape and color
fn seed_particle(p: &mut Particle, config: &ConfettiConfig, rng: &mut StdRng, width: f32, height: f32) {
    p.size = sample_span(rng, config.size_min, config.size_max);
    p.color = Hsl::new(rng.gen_range(0.0..360.0), config.saturation, config.lightness);
    p.speed = sample_span(rng, config.speed_min, config.speed_max);
    p.spin = sample_span(rng, -config.max_spin, config.max_spin);
    p.kind = if chance(rng, config.sparkle_ratio) {
        ParticleKind::Sparkle
    } else {
        ParticleKind::Confetti
    };
    respawn_particle(p, config, rng, width, height);
}

/// Put a particle back at the launch line, opaque, with a fresh heading
fn respawn_particle(p: &mut Particle, config: &ConfettiConfig, rng: &mut StdRng, width: f32, height: f32) {
    p.x = rng.gen_range(0.0..=width.max(0.0));
    p.y = height + config.spawn_margin;
    p.opacity = 1.0;
    p.angle = -FRAC_PI_2 + sample_span(rng, -config.launch_spread, config.launch_spread);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_is_fixed_size() {
        let mut field = ConfettiField::with_seed(ConfettiConfig::hero(), 800.0, 600.0, 42);
        assert_eq!(field.pool_len(), 50);
        for _ in 0..5_000 {
            field.step();
            assert_eq!(field.pool_len(), 50);
        }
    }

    #[test]
    fn test_opacity_stays_in_range() {
        let mut field = ConfettiField::with_seed(ConfettiConfig::hero(), 320.0, 240.0, 9);
        for _ in 0..2_000 {
            field.step();
            for p in field.particles() {
                assert!((0.0..=1.0).contains(&p.opacity), "opacity {}", p.opacity);
            }
        }
    }

    #[test]
    fn test_faded_particle_respawns_opaque() {
        let mut config = ConfettiConfig::hero();
        config.fade_step = 1.0;
        let mut field = ConfettiField::with_seed(config, 800.0, 600.0, 3);
        field.step();
        for p in field.particles() {
            assert_eq!(p.opacity, 1.0);
            assert_eq!(p.y, 620.0);
        }
    }

    #[test]
    fn test_launch_heads_upward() {
        let field = ConfettiField::with_seed(ConfettiConfig::hero(), 800.0, 600.0, 11);
        for p in field.particles() {
            assert!(p.angle.sin() < 0.0, "angle {} does not point up", p.angle);
            assert!(p.x >= 0.0 && p.x <= 800.0);
            assert!(p.size >= 4.0 && p.size < 8.0);
            assert_eq!(p.color.saturation, 1.0);
        }
    }

    #[test]
    fn test_fixed_speed_and_odd_ratios_are_accepted() {
        let config = ConfettiConfig {
            speed_min: 3.0,
            speed_max: 3.0,
            sparkle_ratio: 1.5,
            max_spin: -0.1,
            ..ConfettiConfig::hero()
        };
        let mut field = ConfettiField::with_seed(config, 800.0, 600.0, 21);
        for _ in 0..100 {
            field.step();
        }
        for p in field.particles() {
            assert_eq!(p.speed, 3.0);
            assert_eq!(p.kind, ParticleKind::Sparkle);
            assert!(p.spin.abs() <= 0.1);
        }

        let config = ConfettiConfig {
            speed_min: 9.0,
            speed_max: 6.0,
            sparkle_ratio: -1.0,
            ..ConfettiConfig::hero()
        };
        let field = ConfettiField::with_seed(config, 800.0, 600.0, 22);
        for p in field.particles() {
            assert!((6.0..9.0).contains(&p.speed));
            assert_eq!(p.kind, ParticleKind::Confetti);
        }
    }

    #[test]
    fn test_particles_are_not_reallocated() {
        let mut field = ConfettiField::with_seed(ConfettiConfig::hero(), 800.0, 600.0, 5);
        let before = field.particles().as_ptr();
        for _ in 0..1_000 {
            field.step();
        }
        assert_eq!(before, field.particles().as_ptr());
    }
}
