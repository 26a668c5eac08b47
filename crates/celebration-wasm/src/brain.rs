//! Full-screen glyph rain shown while brain mode is on.
//!
//! The overlay never owns the flag; the page flips `BrainMode` and calls
//! [`RainOverlay::sync`] with the new value.

use crate::render::{render_rain, Surface};
use crate::sections::ChangeNotifier;
use crate::theme::Theme;
use celebration_core::brain_mode::TOO_COMPLEX_AFTER_MS;
use celebration_core::{EffectLoop, GlyphRain, GlyphRainConfig};
use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use std::cell::RefCell;
use std::rc::Rc;

struct RainInner {
    surface: Surface,
    effect: EffectLoop<GlyphRain>,
    theme: Theme,
    ticker: Option<Interval>,
    resize: Option<EventListener>,
    caption_timer: Option<Timeout>,
}

impl RainInner {
    fn draw_frame(&mut self) {
        if self.effect.frame() {
            render_rain(&self.surface, self.effect.effect(), &self.theme);
        }
    }

    fn fit_to_window(&mut self) {
        let (width, height) = self.surface.fit_to_window();
        self.effect.resize(width as f32, height as f32);
    }
}

pub struct RainOverlay {
    inner: Rc<RefCell<RainInner>>,
    notifier: ChangeNotifier,
}

impl RainOverlay {
    pub fn new(
        surface: Surface,
        config: GlyphRainConfig,
        theme: Theme,
        seed: u64,
        notifier: ChangeNotifier,
    ) -> Self {
        surface.set_visible(false);
        let rain = GlyphRain::with_seed(
            config,
            surface.width() as f32,
            surface.height() as f32,
            seed,
        );
        Self {
            inner: Rc::new(RefCell::new(RainInner {
                surface,
                effect: EffectLoop::new(rain),
                theme,
                ticker: None,
                resize: None,
                caption_timer: None,
            })),
            notifier,
        }
    }

    /// Bring the overlay in line with the brain-mode flag
    pub fn sync(&self, active: bool) {
        if active {
            self.activate();
        } else {
            self.deactivate();
        }
    }

    fn activate(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.effect.is_running() {
            return;
        }
        inner.surface.set_visible(true);
        // Columns are laid out from the size at activation
        inner.fit_to_window();
        inner.effect.start();

        let interval_ms = inner.effect.effect().config().frame_interval_ms;
        let weak = Rc::downgrade(&self.inner);
        inner.ticker = Some(Interval::new(interval_ms, move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().draw_frame();
            }
        }));

        let weak = Rc::downgrade(&self.inner);
        inner.resize = web_sys::window().map(|window| {
            EventListener::new(&window, "resize", move |_event| {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().fit_to_window();
                }
            })
        });

        // The caption itself is derived from `BrainMode`; this only prompts
        // the host to re-read it once it changes
        let weak = Rc::downgrade(&self.inner);
        let notifier = self.notifier.clone();
        inner.caption_timer = Some(Timeout::new(TOO_COMPLEX_AFTER_MS as u32, move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().caption_timer = None;
                notifier.notify();
            }
        }));

        gloo::console::log!("brain mode rain started with", inner.effect.effect().drops().len() as u32, "columns");
    }

    fn deactivate(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.effect.is_running() {
            return;
        }
        inner.effect.stop();
        inner.ticker = None;
        inner.resize = None;
        inner.caption_timer = None;
        inner.surface.clear();
        inner.surface.set_visible(false);
        gloo::console::log!("brain mode rain stopped");
    }

    pub fn set_theme(&self, theme: Theme) {
        self.inner.borrow_mut().theme = theme;
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.inner.borrow().effect.is_running()
    }

    #[cfg(test)]
    pub fn frames(&self) -> u64 {
        self.inner.borrow().effect.frames()
    }
}
