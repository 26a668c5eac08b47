//! Canvas surfaces and drawing for the hero confetti and the brain-mode rain

use crate::theme::Theme;
use celebration_core::{ConfettiField, GlyphRain, ParticleKind};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

/// A canvas sized to the viewport, with its 2d context
pub struct Surface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    dpr: f64, // Device pixel ratio for crisp rendering
}

impl Surface {
    /// Look up a canvas by element id and size it to the window
    pub fn attach(canvas_id: &str) -> Result<Surface, JsValue> {
        let document = web_sys::window()
            .ok_or("No window")?
            .document()
            .ok_or("No document")?;

        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("Canvas not found: {}", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or("Failed to get 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let mut surface = Surface {
            canvas,
            ctx,
            width: 0.0,
            height: 0.0,
            dpr: 1.0,
        };
        surface.fit_to_window();
        Ok(surface)
    }

    /// Resize to the current viewport; returns the logical size
    pub fn fit_to_window(&mut self) -> (f64, f64) {
        let Some(window) = web_sys::window() else {
            return (self.width, self.height);
        };
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(self.width);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(self.height);
        self.resize(width, height);
        (width, height)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);

        // Update dpr in case it changed (e.g., moving to different monitor)
        self.dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);

        // Set actual canvas resolution (scaled by dpr for crisp rendering)
        self.canvas.set_width((self.width * self.dpr) as u32);
        self.canvas.set_height((self.height * self.dpr) as u32);

        // Set CSS display size (logical pixels)
        let html_element: &HtmlElement = self.canvas.as_ref();
        let style = html_element.style();
        let _ = style.set_property("width", &format!("{}px", self.width));
        let _ = style.set_property("height", &format!("{}px", self.height));

        // Reset and scale context to account for dpr
        let _ = self.ctx.reset_transform();
        let _ = self.ctx.scale(self.dpr, self.dpr);
    }

    pub fn clear(&self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    pub fn set_visible(&self, visible: bool) {
        let html_element: &HtmlElement = self.canvas.as_ref();
        let display = if visible { "block" } else { "none" };
        let _ = html_element.style().set_property("display", display);
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Clear and redraw every confetti particle
pub fn render_confetti(surface: &Surface, field: &ConfettiField) {
    let ctx = &surface.ctx;
    surface.clear();

    for p in field.particles() {
        let size = p.size as f64;
        ctx.save();
        let _ = ctx.translate(p.x as f64, p.y as f64);
        let _ = ctx.rotate(p.angle as f64);
        ctx.set_global_alpha(p.opacity as f64);
        ctx.set_fill_style_str(&p.color.as_css());

        match p.kind {
            ParticleKind::Confetti => {
                ctx.fill_rect(-size / 2.0, -size / 2.0, size, size);
            }
            ParticleKind::Sparkle => {
                ctx.begin_path();
                ctx.move_to(0.0, -size);
                ctx.line_to(size / 2.0, 0.0);
                ctx.line_to(0.0, size);
                ctx.line_to(-size / 2.0, 0.0);
                ctx.close_path();
                ctx.fill();
            }
        }

        ctx.restore();
    }
}

/// Dim the previous frame and draw the current drop heads
pub fn render_rain(surface: &Surface, rain: &GlyphRain, theme: &Theme) {
    let ctx = &surface.ctx;
    let config = rain.config();

    // Translucent fill instead of a clear leaves fading trails
    ctx.set_fill_style_str(&theme.rain_fade.as_css_alpha(config.fade_alpha));
    ctx.fill_rect(0.0, 0.0, surface.width, surface.height);

    ctx.set_fill_style_str(&theme.rain_glyph.as_css());
    ctx.set_font(&format!("{}px {}", config.glyph_size, theme.glyph_font));

    let mut buf = [0u8; 4];
    for drop in rain.drops() {
        let (x, y) = rain.position(drop);
        let _ = ctx.fill_text(drop.glyph.encode_utf8(&mut buf), x as f64, y as f64);
    }
}
