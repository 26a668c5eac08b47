//! Particle effects driven one frame at a time over fixed-size pools.

pub mod confetti;
pub mod glyph_rain;

pub use confetti::{ConfettiConfig, ConfettiField, Particle, ParticleKind};
pub use glyph_rain::{GlyphDrop, GlyphRain, GlyphRainConfig};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A visual effect whose state advances once per animation frame
pub trait ParticleEffect {
    /// Re-seed the pool for a fresh activation
    fn reset(&mut self);
    /// Advance every element by one frame
    fn step(&mut self);
    /// Track the drawing surface size
    fn resize(&mut self, width: f32, height: f32);
    /// Number of elements in the pool
    fn pool_len(&self) -> usize;
}

/// Start/stop bookkeeping around an effect.
///
/// Frames requested while stopped do nothing, so a late callback from a
/// torn-down driver cannot advance the effect.
pub struct EffectLoop<E> {
    effect: E,
    running: bool,
    frames: u64,
}

impl<E: ParticleEffect> EffectLoop<E> {
    pub fn new(effect: E) -> Self {
        Self {
            effect,
            running: false,
            frames: 0,
        }
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.effect.reset();
        self.running = true;
        tracing::debug!(pool = self.effect.pool_len(), "effect loop started");
    }

    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            tracing::debug!(frames = self.frames, "effect loop stopped");
        }
    }

    /// Advance one frame. Returns false (and does nothing) when stopped.
    pub fn frame(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.effect.step();
        self.frames += 1;
        true
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.effect.resize(width, height);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames advanced since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn effect(&self) -> &E {
        &self.effect
    }

    pub fn effect_mut(&mut self) -> &mut E {
        &mut self.effect
    }
}

/// Uniform sample between two bounds given in either order.
///
/// An empty, inverted or non-finite span yields the lower bound.
pub(crate) fn sample_span<R: Rng>(rng: &mut R, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if hi > lo && (hi - lo).is_finite() {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Bernoulli trial with the probability clamped to 0.0-1.0 (NaN never hits)
pub(crate) fn chance<R: Rng>(rng: &mut R, p: f64) -> bool {
    if p.is_nan() {
        return false;
    }
    rng.gen_bool(p.clamp(0.0, 1.0))
}

/// HSL color; hue in degrees, saturation and lightness in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    pub fn as_css(&self) -> String {
        format!(
            "hsl({:.0}, {:.0}%, {:.0}%)",
            self.hue,
            self.saturation * 100.0,
            self.lightness * 100.0
        )
    }

    /// Convert to 8-bit RGB
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = self.saturation.clamp(0.0, 1.0);
        let l = self.lightness.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as i32 % 6 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        (to_byte(r), to_byte(g), to_byte(b))
    }
}
