//! Shared page state and the timers that drive it.
//!
//! Every timer is an owned gloo handle stored next to the state it drives,
//! so replacing or dropping the handle cancels the timer. Callbacks hold a
//! `Weak` pointer to the page and the round or ticket they were scheduled
//! for; a callback that outlives its page or its round does nothing.

use celebration_core::{
    BrainMode, ChallengeSession, ChatError, ChatSession, PendingReply, RoastSelector,
};
use gloo::timers::callback::{Interval, Timeout};
use js_sys::Function;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;

/// Countdown resolution
const TICK_MS: u32 = 1000;

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Which quiz section an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizKind {
    Coding,
    Math,
}

impl QuizKind {
    pub fn name(self) -> &'static str {
        match self {
            QuizKind::Coding => "coding",
            QuizKind::Math => "math",
        }
    }
}

pub struct QuizSection {
    pub session: ChallengeSession,
    countdown: Option<Interval>,
}

impl QuizSection {
    pub fn new(session: ChallengeSession) -> Self {
        Self {
            session,
            countdown: None,
        }
    }
}

pub struct PageState {
    pub coding: QuizSection,
    pub math: QuizSection,
    pub chat: ChatSession,
    chat_reply: Option<Timeout>,
    pub roast: RoastSelector,
    pub brain: BrainMode,
    /// Whether the page has been started; countdowns only run while it is
    pub started: bool,
}

pub type SharedPage = Rc<RefCell<PageState>>;

impl PageState {
    pub fn new(
        coding: ChallengeSession,
        math: ChallengeSession,
        chat: ChatSession,
        roast: RoastSelector,
    ) -> Self {
        Self {
            coding: QuizSection::new(coding),
            math: QuizSection::new(math),
            chat,
            chat_reply: None,
            roast,
            brain: BrainMode::new(),
            started: false,
        }
    }

    pub fn quiz(&self, kind: QuizKind) -> &QuizSection {
        match kind {
            QuizKind::Coding => &self.coding,
            QuizKind::Math => &self.math,
        }
    }

    pub fn quiz_mut(&mut self, kind: QuizKind) -> &mut QuizSection {
        match kind {
            QuizKind::Coding => &mut self.coding,
            QuizKind::Math => &mut self.math,
        }
    }
}

/// Callback invoked after any state change the page did not initiate
/// itself (timer ticks, bot replies, the brain caption switch)
#[derive(Clone, Default)]
pub struct ChangeNotifier(Rc<RefCell<Option<Function>>>);

impl ChangeNotifier {
    pub fn set(&self, callback: Option<Function>) {
        *self.0.borrow_mut() = callback;
    }

    pub fn notify(&self) {
        // Clone out so the callback may call back into the page
        let callback = self.0.borrow().clone();
        if let Some(callback) = callback {
            if let Err(err) = callback.call0(&JsValue::NULL) {
                gloo::console::error!("change callback failed:", err);
            }
        }
    }
}

/// (Re)start the one-second countdown for the current round of a section
pub fn start_countdown(page: &SharedPage, kind: QuizKind, notifier: &ChangeNotifier) {
    let mut state = page.borrow_mut();
    let section = state.quiz_mut(kind);
    // Replacing the handle cancels the previous round's interval
    section.countdown = None;
    if !section.session.is_counting() {
        return;
    }

    let round = section.session.round();
    let weak = Rc::downgrade(page);
    let notifier = notifier.clone();
    section.countdown = Some(Interval::new(TICK_MS, move || {
        let Some(page) = weak.upgrade() else {
            return;
        };
        let keep_running = {
            let mut state = page.borrow_mut();
            let section = state.quiz_mut(kind);
            let outcome = section.session.tick_round(round);
            if !outcome.keep_running() {
                section.countdown = None;
            }
            outcome.keep_running()
        };
        if !keep_running {
            gloo::console::debug!(kind.name(), "countdown finished");
        }
        notifier.notify();
    }));
}

pub fn stop_countdown(page: &SharedPage, kind: QuizKind) {
    page.borrow_mut().quiz_mut(kind).countdown = None;
}

/// Append the user's message and schedule the bot reply
pub fn send_chat(
    page: &SharedPage,
    text: &str,
    notifier: &ChangeNotifier,
) -> Result<PendingReply, ChatError> {
    let mut state = page.borrow_mut();
    let pending = state.chat.send(text, now_ms())?;

    let weak = Rc::downgrade(page);
    let notifier = notifier.clone();
    state.chat_reply = Some(Timeout::new(pending.delay_ms, move || {
        let Some(page) = weak.upgrade() else {
            return;
        };
        let delivered = {
            let mut state = page.borrow_mut();
            state.chat_reply = None;
            state.chat.deliver(pending.ticket, now_ms()).is_ok()
        };
        if delivered {
            notifier.notify();
        }
    }));
    Ok(pending)
}

/// Drop any scheduled bot reply
pub fn cancel_chat(page: &SharedPage) {
    let mut state = page.borrow_mut();
    state.chat_reply = None;
    state.chat.cancel_pending();
}
