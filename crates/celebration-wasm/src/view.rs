//! Serializable read-only views handed to the page's JavaScript

use crate::sections::PageState;
use celebration_core::{BrainCaption, ChallengeSession, ChatMessage, RoundState, Verdict};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct QuizView {
    pub index: usize,
    pub deck_len: usize,
    pub id: u32,
    pub title: &'static str,
    pub prompt: &'static str,
    pub formula: Option<&'static str>,
    pub time_limit_secs: u32,
    pub remaining_secs: u32,
    pub clock: String,
    pub state: RoundState,
    pub verdict: Verdict,
    pub feedback: Option<&'static str>,
    pub hint: Option<&'static str>,
    pub answer: String,
    /// Submit is offered only while counting with a non-blank answer
    pub can_submit: bool,
}

impl QuizView {
    pub fn of(session: &ChallengeSession) -> Self {
        let challenge = session.current();
        Self {
            index: session.index(),
            deck_len: session.deck_len(),
            id: challenge.id,
            title: challenge.title,
            prompt: challenge.prompt,
            formula: challenge.formula,
            time_limit_secs: challenge.time_limit_secs,
            remaining_secs: session.remaining_secs(),
            clock: session.clock(),
            state: session.state(),
            verdict: session.verdict(),
            feedback: session.feedback(),
            hint: session.hint(),
            answer: session.answer().to_string(),
            can_submit: session.is_counting() && !session.answer().trim().is_empty(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaptionView {
    pub headline: &'static str,
    pub lines: &'static [&'static str],
}

impl From<BrainCaption> for CaptionView {
    fn from(caption: BrainCaption) -> Self {
        Self {
            headline: caption.headline(),
            lines: caption.lines(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoastView {
    pub current: Option<&'static str>,
    pub count: u64,
    pub level: u64,
}

/// Everything the page shows, in one document
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot<'a> {
    pub coding: QuizView,
    pub math: QuizView,
    pub chat: &'a [ChatMessage],
    pub chat_typing: bool,
    pub roast: RoastView,
    pub brain_mode: bool,
    pub brain_caption: Option<CaptionView>,
}

impl<'a> PageSnapshot<'a> {
    pub fn of(state: &'a PageState, now_ms: f64) -> Self {
        Self {
            coding: QuizView::of(&state.coding.session),
            math: QuizView::of(&state.math.session),
            chat: state.chat.messages(),
            chat_typing: state.chat.is_typing(),
            roast: RoastView {
                current: state.roast.current(),
                count: state.roast.count(),
                level: state.roast.level(),
            },
            brain_mode: state.brain.is_active(),
            brain_caption: state.brain.caption(now_ms).map(CaptionView::from),
        }
    }
}
