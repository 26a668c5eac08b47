//! WebAssembly frontend for the celebration page
//!
//! The page's markup lives in JavaScript; this crate owns the state behind
//! it, the countdown and chat timers, and the two canvas effects. Timer
//! driven changes are reported through the callback registered with
//! [`CelebrationPage::set_on_change`].

use celebration_core::content::{
    CODING_CHALLENGES, LANDING_HEADLINE, LANDING_TAGLINES, MATH_PROBLEMS, ROASTS,
};
use celebration_core::{
    entropy_seed, AnswerMatch, ChallengeSession, ChatSession, ConfettiConfig, GlyphRainConfig,
    RoastSelector, ScriptedResponder, WISHES,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod brain;
mod hero;
mod render;
mod sections;
mod theme;
mod view;


pub use theme::Theme;

use brain::RainOverlay;
use hero::Hero;
use render::Surface;
use sections::{
    cancel_chat, now_ms, send_chat, start_countdown, stop_countdown, ChangeNotifier, PageState,
    QuizKind, SharedPage,
};
use view::{CaptionView, PageSnapshot, QuizView};

// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Construction options, passed from JavaScript as a plain object
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageOptions {
    pub hero_canvas_id: String,
    pub rain_canvas_id: String,
    /// Fixed seed for every random choice on the page; entropy when absent
    pub seed: Option<u64>,
    pub theme: String,
    pub confetti: ConfettiConfig,
    pub rain: GlyphRainConfig,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            hero_canvas_id: "hero-canvas".to_string(),
            rain_canvas_id: "brain-canvas".to_string(),
            seed: None,
            theme: "dark".to_string(),
            confetti: ConfettiConfig::hero(),
            rain: GlyphRainConfig::canvas(),
        }
    }
}

impl PageOptions {
    pub fn from_js(options: JsValue) -> Result<Self, JsValue> {
        if options.is_undefined() || options.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_wasm_bindgen::from_value(options)?)
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(to_js_error)
}

/// Counts cross into JS as plain numbers, pinned at `u32::MAX`
fn saturating_count(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Build the page state from a seed; each component gets its own stream
fn build_state(seed: u64) -> Result<PageState, JsValue> {
    let coding = ChallengeSession::with_seed(CODING_CHALLENGES, AnswerMatch::Exact, seed)
        .map_err(to_js_error)?;
    let math = ChallengeSession::with_seed(
        MATH_PROBLEMS,
        AnswerMatch::IgnoreCase,
        seed.wrapping_add(1),
    )
    .map_err(to_js_error)?;
    let roast = RoastSelector::with_seed(ROASTS, seed.wrapping_add(2)).map_err(to_js_error)?;
    let chat = ChatSession::new(ScriptedResponder::birthday_with_seed(seed.wrapping_add(3)));
    Ok(PageState::new(coding, math, chat, roast))
}

/// The page controller
#[wasm_bindgen]
pub struct CelebrationPage {
    page: SharedPage,
    hero: Hero,
    rain: RainOverlay,
    notifier: ChangeNotifier,
}

#[wasm_bindgen]
impl CelebrationPage {
    /// Attach to the hero and brain-mode canvases
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<CelebrationPage, JsValue> {
        let options = PageOptions::from_js(options)?;
        let seed = options.seed.unwrap_or_else(entropy_seed);
        let notifier = ChangeNotifier::default();

        let page = Rc::new(RefCell::new(build_state(seed)?));
        let hero = Hero::new(
            Surface::attach(&options.hero_canvas_id)?,
            options.confetti,
            seed.wrapping_add(4),
        );
        let rain = RainOverlay::new(
            Surface::attach(&options.rain_canvas_id)?,
            options.rain,
            Theme::by_name(&options.theme),
            seed.wrapping_add(5),
            notifier.clone(),
        );

        gloo::console::log!("celebration page ready");
        Ok(CelebrationPage {
            page,
            hero,
            rain,
            notifier,
        })
    }

    /// Start the hero confetti and both countdowns
    #[wasm_bindgen]
    pub fn start(&mut self) {
        self.page.borrow_mut().started = true;
        self.hero.start();
        start_countdown(&self.page, QuizKind::Coding, &self.notifier);
        start_countdown(&self.page, QuizKind::Math, &self.notifier);
    }

    /// Stop every loop and timer; the page can be started again
    #[wasm_bindgen]
    pub fn stop(&mut self) {
        self.hero.stop();
        self.page.borrow_mut().brain.deactivate();
        self.rain.sync(false);
        stop_countdown(&self.page, QuizKind::Coding);
        stop_countdown(&self.page, QuizKind::Math);
        cancel_chat(&self.page);
        self.page.borrow_mut().started = false;
    }

    #[wasm_bindgen]
    pub fn is_running(&self) -> bool {
        self.hero.is_running()
    }

    /// Register the re-render callback; `null` clears it
    #[wasm_bindgen]
    pub fn set_on_change(&self, callback: Option<js_sys::Function>) {
        self.notifier.set(callback);
    }

    #[wasm_bindgen]
    pub fn set_theme(&self, theme_name: &str) {
        self.rain.set_theme(Theme::by_name(theme_name));
    }

    // Brain mode

    #[wasm_bindgen]
    pub fn toggle_brain_mode(&mut self) -> bool {
        let active = self.page.borrow_mut().brain.toggle(now_ms());
        self.rain.sync(active);
        active
    }

    #[wasm_bindgen]
    pub fn is_brain_mode(&self) -> bool {
        self.page.borrow().brain.is_active()
    }

    /// `{ headline, lines }` while brain mode is on, otherwise `undefined`
    #[wasm_bindgen]
    pub fn brain_caption(&self) -> Result<JsValue, JsValue> {
        let caption = self.page.borrow().brain.caption(now_ms()).map(CaptionView::from);
        Ok(serde_wasm_bindgen::to_value(&caption)?)
    }

    // Coding dojo

    #[wasm_bindgen]
    pub fn coding_title(&self) -> String {
        self.quiz_title(QuizKind::Coding)
    }

    #[wasm_bindgen]
    pub fn coding_prompt(&self) -> String {
        self.quiz_prompt(QuizKind::Coding)
    }

    #[wasm_bindgen]
    pub fn coding_clock(&self) -> String {
        self.quiz_clock(QuizKind::Coding)
    }

    #[wasm_bindgen]
    pub fn coding_set_answer(&mut self, answer: &str) {
        self.quiz_set_answer(QuizKind::Coding, answer);
    }

    #[wasm_bindgen]
    pub fn coding_submit(&mut self, answer: &str) -> String {
        self.quiz_submit(QuizKind::Coding, answer)
    }

    #[wasm_bindgen]
    pub fn coding_next(&mut self) {
        self.quiz_next(QuizKind::Coding);
    }

    #[wasm_bindgen]
    pub fn coding_feedback(&self) -> Option<String> {
        self.quiz_feedback(QuizKind::Coding)
    }

    #[wasm_bindgen]
    pub fn coding_hint(&self) -> Option<String> {
        self.quiz_hint(QuizKind::Coding)
    }

    #[wasm_bindgen]
    pub fn coding_view(&self) -> Result<JsValue, JsValue> {
        self.quiz_view(QuizKind::Coding)
    }

    // Maths lab

    #[wasm_bindgen]
    pub fn math_title(&self) -> String {
        self.quiz_title(QuizKind::Math)
    }

    #[wasm_bindgen]
    pub fn math_prompt(&self) -> String {
        self.quiz_prompt(QuizKind::Math)
    }

    /// LaTeX source of the current problem's formula
    #[wasm_bindgen]
    pub fn math_formula(&self) -> Option<String> {
        self.page
            .borrow()
            .math
            .session
            .current()
            .formula
            .map(str::to_string)
    }

    #[wasm_bindgen]
    pub fn math_clock(&self) -> String {
        self.quiz_clock(QuizKind::Math)
    }

    #[wasm_bindgen]
    pub fn math_set_answer(&mut self, answer: &str) {
        self.quiz_set_answer(QuizKind::Math, answer);
    }

    #[wasm_bindgen]
    pub fn math_submit(&mut self, answer: &str) -> String {
        self.quiz_submit(QuizKind::Math, answer)
    }

    #[wasm_bindgen]
    pub fn math_next(&mut self) {
        self.quiz_next(QuizKind::Math);
    }

    #[wasm_bindgen]
    pub fn math_feedback(&self) -> Option<String> {
        self.quiz_feedback(QuizKind::Math)
    }

    #[wasm_bindgen]
    pub fn math_hint(&self) -> Option<String> {
        self.quiz_hint(QuizKind::Math)
    }

    #[wasm_bindgen]
    pub fn math_view(&self) -> Result<JsValue, JsValue> {
        self.quiz_view(QuizKind::Math)
    }

    // Chat

    /// Send a message; false when it is blank or a reply is still pending
    #[wasm_bindgen]
    pub fn chat_send(&mut self, text: &str) -> bool {
        match send_chat(&self.page, text, &self.notifier) {
            Ok(_) => true,
            Err(err) => {
                gloo::console::debug!("chat message not sent:", err.to_string());
                false
            }
        }
    }

    #[wasm_bindgen]
    pub fn chat_transcript_json(&self) -> Result<String, JsValue> {
        to_json(self.page.borrow().chat.messages())
    }

    #[wasm_bindgen]
    pub fn chat_is_typing(&self) -> bool {
        self.page.borrow().chat.is_typing()
    }

    // Roasts

    #[wasm_bindgen]
    pub fn roast(&mut self) -> String {
        self.page.borrow_mut().roast.next().to_string()
    }

    #[wasm_bindgen]
    pub fn roast_count(&self) -> u32 {
        saturating_count(self.page.borrow().roast.count())
    }

    #[wasm_bindgen]
    pub fn roast_level(&self) -> u32 {
        saturating_count(self.page.borrow().roast.level())
    }

    // Landing and wishes

    /// `{ greeting, name, taglines }` for the hero
    #[wasm_bindgen]
    pub fn landing_json(&self) -> String {
        let (greeting, name) = LANDING_HEADLINE;
        serde_json::json!({
            "greeting": greeting,
            "name": name,
            "taglines": LANDING_TAGLINES,
        })
        .to_string()
    }

    #[wasm_bindgen]
    pub fn wishes_json(&self) -> Result<String, JsValue> {
        to_json(WISHES)
    }

    /// The whole page state as JSON, for debugging and snapshot tests
    #[wasm_bindgen]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        let state = self.page.borrow();
        to_json(&PageSnapshot::of(&state, now_ms()))
    }
}

// Shared implementation of the per-section exports
impl CelebrationPage {
    fn quiz_title(&self, kind: QuizKind) -> String {
        self.page.borrow().quiz(kind).session.current().title.to_string()
    }

    fn quiz_prompt(&self, kind: QuizKind) -> String {
        self.page.borrow().quiz(kind).session.current().prompt.to_string()
    }

    fn quiz_clock(&self, kind: QuizKind) -> String {
        self.page.borrow().quiz(kind).session.clock()
    }

    fn quiz_set_answer(&mut self, kind: QuizKind, answer: &str) {
        self.page.borrow_mut().quiz_mut(kind).session.set_answer(answer);
    }

    fn quiz_submit(&mut self, kind: QuizKind, answer: &str) -> String {
        let verdict = self.page.borrow_mut().quiz_mut(kind).session.submit(answer);
        // A judged round no longer counts down
        stop_countdown(&self.page, kind);
        verdict.as_str().to_string()
    }

    fn quiz_next(&mut self, kind: QuizKind) {
        let started = {
            let mut state = self.page.borrow_mut();
            state.quiz_mut(kind).session.advance();
            state.started
        };
        if started {
            start_countdown(&self.page, kind, &self.notifier);
        }
    }

    fn quiz_feedback(&self, kind: QuizKind) -> Option<String> {
        self.page.borrow().quiz(kind).session.feedback().map(str::to_string)
    }

    fn quiz_hint(&self, kind: QuizKind) -> Option<String> {
        self.page.borrow().quiz(kind).session.hint().map(str::to_string)
    }

    fn quiz_view(&self, kind: QuizKind) -> Result<JsValue, JsValue> {
        let view = QuizView::of(&self.page.borrow().quiz(kind).session);
        Ok(serde_wasm_bindgen::to_value(&view)?)
    }
}

impl Drop for CelebrationPage {
    fn drop(&mut self) {
        self.stop();
    }
}
