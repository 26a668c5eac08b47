//! Landing hero: confetti redrawn on every animation frame

use crate::render::{render_confetti, Surface};
use celebration_core::{ConfettiConfig, ConfettiField, EffectLoop};
use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use std::cell::RefCell;
use std::rc::Rc;

struct HeroInner {
    surface: Surface,
    effect: EffectLoop<ConfettiField>,
    /// Next requested frame; dropping it cancels the request
    frame: Option<AnimationFrame>,
    resize: Option<EventListener>,
}

impl HeroInner {
    fn draw_frame(&mut self) -> bool {
        if !self.effect.frame() {
            return false;
        }
        render_confetti(&self.surface, self.effect.effect());
        true
    }

    fn fit_to_window(&mut self) {
        let (width, height) = self.surface.fit_to_window();
        self.effect.resize(width as f32, height as f32);
    }
}

pub struct Hero {
    inner: Rc<RefCell<HeroInner>>,
}

impl Hero {
    pub fn new(surface: Surface, config: ConfettiConfig, seed: u64) -> Self {
        let field = ConfettiField::with_seed(
            config,
            surface.width() as f32,
            surface.height() as f32,
            seed,
        );
        Self {
            inner: Rc::new(RefCell::new(HeroInner {
                surface,
                effect: EffectLoop::new(field),
                frame: None,
                resize: None,
            })),
        }
    }

    pub fn start(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.effect.is_running() {
                return;
            }
            inner.fit_to_window();
            inner.effect.start();

            let weak = Rc::downgrade(&self.inner);
            inner.resize = web_sys::window().map(|window| {
                EventListener::new(&window, "resize", move |_event| {
                    if let Some(inner) = weak.upgrade() {
                        inner.borrow_mut().fit_to_window();
                    }
                })
            });
        }
        gloo::console::log!("hero confetti started");
        schedule_frame(&self.inner);
    }

    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.effect.is_running() {
            return;
        }
        inner.effect.stop();
        inner.frame = None;
        inner.resize = None;
        inner.surface.clear();
        gloo::console::log!("hero confetti stopped after", inner.effect.frames() as f64, "frames");
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().effect.is_running()
    }

    #[cfg(test)]
    pub fn frames(&self) -> u64 {
        self.inner.borrow().effect.frames()
    }
}

fn schedule_frame(inner: &Rc<RefCell<HeroInner>>) {
    let weak = Rc::downgrade(inner);
    let handle = request_animation_frame(move |_timestamp| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let advanced = inner.borrow_mut().draw_frame();
        if advanced {
            schedule_frame(&inner);
        }
    });
    inner.borrow_mut().frame = Some(handle);
}
