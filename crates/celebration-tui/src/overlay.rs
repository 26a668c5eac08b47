//! Brain-mode glyph rain drawn into a grid of terminal cells.
//!
//! A terminal has no translucent fill, so the fade is kept per cell: each
//! frame every cell loses `fade_alpha` of its brightness and the drop heads
//! are written at full brightness.

use celebration_core::{EffectLoop, GlyphRain, GlyphRainConfig, ParticleEffect};
use std::time::{Duration, Instant};

/// Cells dimmer than this are not drawn
pub const MIN_VISIBLE: f32 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailCell {
    pub glyph: char,
    pub brightness: f32,
}

impl TrailCell {
    const EMPTY: TrailCell = TrailCell {
        glyph: ' ',
        brightness: 0.0,
    };
}

pub struct RainOverlay {
    effect: EffectLoop<GlyphRain>,
    cells: Vec<TrailCell>,
    width: u16,
    height: u16,
    next_frame: Option<Instant>,
}

impl RainOverlay {
    pub fn new(config: GlyphRainConfig, width: u16, height: u16, seed: u64) -> Self {
        let rain = GlyphRain::with_seed(config, width as f32, height as f32, seed);
        Self {
            effect: EffectLoop::new(rain),
            cells: vec![TrailCell::EMPTY; width as usize * height as usize],
            width,
            height,
            next_frame: None,
        }
    }

    pub fn activate(&mut self, now: Instant) {
        if self.effect.is_running() {
            return;
        }
        self.cells.fill(TrailCell::EMPTY);
        self.effect.start();
        self.next_frame = Some(now);
        tracing::debug!(columns = self.columns(), "brain rain started");
    }

    pub fn deactivate(&mut self) {
        if self.effect.is_running() {
            tracing::debug!(frames = self.frames(), "brain rain stopped");
        }
        self.effect.stop();
        self.next_frame = None;
        self.cells.fill(TrailCell::EMPTY);
    }

    pub fn is_active(&self) -> bool {
        self.effect.is_running()
    }

    /// Advance as many frames as are due; returns true if anything changed
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(mut due) = self.next_frame else {
            return false;
        };
        let interval = self.frame_interval();
        let mut advanced = false;
        // Catch up at most a few frames after a stall
        let mut budget = 4;
        while due <= now && budget > 0 {
            self.frame();
            due += interval;
            budget -= 1;
            advanced = true;
        }
        if due <= now {
            due = now + interval;
        }
        self.next_frame = Some(due);
        advanced
    }

    fn frame(&mut self) {
        if !self.effect.frame() {
            return;
        }
        let fade = self.effect.effect().config().fade_alpha as f32;
        for cell in self.cells.iter_mut() {
            cell.brightness *= 1.0 - fade;
            if cell.brightness < MIN_VISIBLE {
                *cell = TrailCell::EMPTY;
            }
        }

        let (width, height) = (self.width as usize, self.height as usize);
        let rain = self.effect.effect();
        for drop in rain.drops() {
            let (x, y) = rain.position(drop);
            let (col, row) = (x as usize, y as usize);
            if col < width && row < height {
                self.cells[row * width + col] = TrailCell {
                    glyph: drop.glyph,
                    brightness: 1.0,
                };
            }
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![TrailCell::EMPTY; width as usize * height as usize];
        self.effect.resize(width as f32, height as f32);
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.effect.effect().config().frame_interval_ms.max(1) as u64)
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<TrailCell> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells
            .get(row as usize * self.width as usize + col as usize)
            .copied()
    }

    pub fn columns(&self) -> usize {
        self.effect.effect().pool_len()
    }

    pub fn frames(&self) -> u64 {
        self.effect.frames()
    }

    pub fn width(&self) -> u16 {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay() -> RainOverlay {
        RainOverlay::new(GlyphRainConfig::terminal(), 20, 10, 7)
    }

    #[test]
    fn test_inactive_overlay_does_nothing() {
        let mut rain = overlay();
        assert!(!rain.tick(Instant::now()));
        assert_eq!(rain.frames(), 0);
    }

    #[test]
    fn test_heads_drawn_at_full_brightness() {
        let mut rain = overlay();
        let start = Instant::now();
        rain.activate(start);
        assert!(rain.tick(start));
        assert_eq!(rain.columns(), 20);
        // After one frame every head sits on row 2
        for col in 0..20 {
            let cell = rain.cell(col, 2).unwrap();
            assert_eq!(cell.brightness, 1.0);
            assert_ne!(cell.glyph, ' ');
        }
    }

    #[test]
    fn test_trails_fade() {
        let mut rain = overlay();
        let start = Instant::now();
        rain.activate(start);
        rain.tick(start);
        rain.tick(start + rain.frame_interval());
        let trail = rain.cell(0, 2).unwrap();
        assert!(trail.brightness < 1.0 && trail.brightness > MIN_VISIBLE);
        assert_eq!(rain.cell(0, 3).unwrap().brightness, 1.0);
    }

    #[test]
    fn test_frames_follow_interval() {
        let mut rain = overlay();
        let start = Instant::now();
        rain.activate(start);
        assert!(rain.tick(start));
        assert!(!rain.tick(start + Duration::from_millis(10)));
        assert!(rain.tick(start + Duration::from_millis(50)));
        assert_eq!(rain.frames(), 2);
    }

    #[test]
    fn test_deactivate_clears() {
        let mut rain = overlay();
        let start = Instant::now();
        rain.activate(start);
        rain.tick(start);
        rain.deactivate();
        assert!(!rain.is_active());
        assert!(!rain.tick(start + Duration::from_secs(1)));
        assert_eq!(rain.cell(0, 2).unwrap(), TrailCell::EMPTY);
    }

    #[test]
    fn test_out_of_range_cell() {
        let rain = overlay();
        assert!(rain.cell(20, 0).is_none());
        assert!(rain.cell(0, 10).is_none());
    }
}
