//! Falling-glyph rain for the brain-mode overlay.
//!
//! One drop per column. Each frame every drop gets a fresh random glyph and
//! moves down one row; once a drop is past the bottom edge it restarts at the
//! top with a small per-frame probability, which staggers the columns. The
//! renderer dims the previous frame with a translucent fill instead of
//! clearing it, leaving fading trails.

use super::{chance, ParticleEffect};
use crate::rng::{entropy_seed, seeded};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Configuration for the glyph rain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlyphRainConfig {
    /// Column width and row height
    pub glyph_size: f32,
    /// Alpha of the dimming fill applied each frame
    pub fade_alpha: f64,
    /// Per-frame chance that an overflowed drop restarts at the top
    pub reset_chance: f64,
    /// Target interval between frames
    pub frame_interval_ms: u32,
    /// First code point of the glyph block
    pub glyph_start: u32,
    /// Number of code points in the glyph block
    pub glyph_span: u32,
}

impl Default for GlyphRainConfig {
    fn default() -> Self {
        Self::canvas()
    }
}

impl GlyphRainConfig {
    /// Katakana at 14 px, ~30 fps
    pub fn canvas() -> Self {
        Self {
            glyph_size: 14.0,
            fade_alpha: 0.05,
            reset_chance: 0.025,
            frame_interval_ms: 33,
            glyph_start: 0x30A0,
            glyph_span: 96,
        }
    }

    /// Printable ASCII, one glyph per terminal cell
    pub fn terminal() -> Self {
        Self {
            glyph_size: 1.0,
            fade_alpha: 0.2,
            reset_chance: 0.025,
            frame_interval_ms: 50,
            glyph_start: 0x21,
            glyph_span: 94,
        }
    }
}

/// The head of one falling column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphDrop {
    pub column: usize,
    /// Row of the head; advances by one each frame
    pub row: u32,
    pub glyph: char,
}

/// Column drops for the whole surface
pub struct GlyphRain {
    drops: Vec<GlyphDrop>,
    config: GlyphRainConfig,
    width: f32,
    height: f32,
    rng: StdRng,
}

impl GlyphRain {
    pub fn new(config: GlyphRainConfig, width: f32, height: f32) -> Self {
        Self::with_seed(config, width, height, entropy_seed())
    }

    pub fn with_seed(config: GlyphRainConfig, width: f32, height: f32, seed: u64) -> Self {
        let mut rain = Self {
            drops: Vec::new(),
            config,
            width,
            height,
            rng: seeded(seed),
        };
        rain.populate();
        rain
    }

    /// One drop per whole column that fits the current width
    fn populate(&mut self) {
        let columns = column_count(self.width, self.config.glyph_size);
        self.drops.clear();
        for column in 0..columns {
            let glyph = random_glyph(&self.config, &mut self.rng);
            self.drops.push(GlyphDrop {
                column,
                row: 1,
                glyph,
            });
        }
    }

    pub fn drops(&self) -> &[GlyphDrop] {
        &self.drops
    }

    pub fn config(&self) -> &GlyphRainConfig {
        &self.config
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Surface position of a drop's head
    pub fn position(&self, drop: &GlyphDrop) -> (f32, f32) {
        let size = self.config.glyph_size;
        (drop.column as f32 * size, drop.row as f32 * size)
    }
}

impl ParticleEffect for GlyphRain {
    /// Columns are laid out once per activation from the width at that time
    fn reset(&mut self) {
        self.populate();
    }

    fn step(&mut self) {
        let size = self.config.glyph_size;
        for drop in self.drops.iter_mut() {
            drop.glyph = random_glyph(&self.config, &mut self.rng);
            if drop.row as f32 * size > self.height
                && chance(&mut self.rng, self.config.reset_chance)
            {
                drop.row = 0;
            }
            drop.row += 1;
        }
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn pool_len(&self) -> usize {
        self.drops.len()
    }
}

fn column_count(width: f32, glyph_size: f32) -> usize {
    if glyph_size <= 0.0 || width <= 0.0 {
        return 0;
    }
    (width / glyph_size).floor() as usize
}

fn random_glyph(config: &GlyphRainConfig, rng: &mut StdRng) -> char {
    let offset = rng.gen_range(0..config.glyph_span.max(1));
    config
        .glyph_start
        .checked_add(offset)
        .and_then(char::from_u32)
        .unwrap_or('0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_layout() {
        let rain = GlyphRain::with_seed(GlyphRainConfig::canvas(), 140.0, 100.0, 1);
        assert_eq!(rain.pool_len(), 10);
        assert!(rain.drops().iter().all(|d| d.row == 1));
        assert_eq!(rain.position(&rain.drops()[3]), (42.0, 14.0));
    }

    #[test]
    fn test_drops_fall_one_row_per_frame() {
        let mut rain = GlyphRain::with_seed(GlyphRainConfig::canvas(), 140.0, 1000.0, 1);
        for _ in 0..10 {
            rain.step();
        }
        assert!(rain.drops().iter().all(|d| d.row == 11));
    }

    #[test]
    fn test_overflowed_drops_eventually_restart() {
        let mut rain = GlyphRain::with_seed(GlyphRainConfig::canvas(), 140.0, 70.0, 4);
        let mut restarted = vec![false; rain.pool_len()];
        for _ in 0..2_000 {
            rain.step();
            for (i, d) in rain.drops().iter().enumerate() {
                if d.row == 1 {
                    restarted[i] = true;
                }
            }
            assert_eq!(rain.pool_len(), 10);
        }
        assert!(restarted.iter().all(|r| *r));
    }

    #[test]
    fn test_out_of_range_reset_chance_is_clamped() {
        let config = GlyphRainConfig {
            reset_chance: 2.0,
            ..GlyphRainConfig::canvas()
        };
        let mut rain = GlyphRain::with_seed(config, 140.0, 28.0, 6);
        for _ in 0..3 {
            rain.step();
        }
        // Past the bottom with a certain reset: every drop wraps to row 1
        assert!(rain.drops().iter().all(|d| d.row == 1));

        let config = GlyphRainConfig {
            reset_chance: -1.0,
            ..GlyphRainConfig::canvas()
        };
        let mut rain = GlyphRain::with_seed(config, 140.0, 28.0, 6);
        for _ in 0..10 {
            rain.step();
        }
        assert!(rain.drops().iter().all(|d| d.row == 11));
    }

    #[test]
    fn test_glyphs_come_from_block() {
        let mut rain = GlyphRain::with_seed(GlyphRainConfig::canvas(), 280.0, 100.0, 8);
        for _ in 0..50 {
            rain.step();
            for d in rain.drops() {
                let code = d.glyph as u32;
                assert!((0x30A0..0x30A0 + 96).contains(&code));
            }
        }
    }

    #[test]
    fn test_resize_keeps_columns_until_reset() {
        let mut rain = GlyphRain::with_seed(GlyphRainConfig::canvas(), 140.0, 100.0, 2);
        rain.resize(280.0, 100.0);
        assert_eq!(rain.pool_len(), 10);
        rain.reset();
        assert_eq!(rain.pool_len(), 20);
    }
}
