//! Core engine for the celebration page.
//!
//! Everything here is platform-neutral: the browser and terminal frontends
//! own the clocks and drawing surfaces and drive these types by calling
//! `tick`, `frame`, `send`/`deliver` and friends.

pub mod brain_mode;
pub mod challenge;
pub mod chat;
pub mod content;
pub mod error;
pub mod particles;
pub mod roast;
mod rng;

pub use brain_mode::{BrainCaption, BrainMode};
pub use challenge::{
    format_clock, AnswerMatch, ChallengeSession, RoundId, RoundState, TickOutcome, Verdict,
};
pub use chat::{ChatMessage, ChatSession, PendingReply, ReplyTicket, ScriptedResponder};
pub use content::{Challenge, Wish, WISHES};
pub use error::{ChatError, ContentError};
pub use particles::{
    ConfettiConfig, ConfettiField, EffectLoop, GlyphDrop, GlyphRain, GlyphRainConfig, Hsl,
    Particle, ParticleEffect, ParticleKind,
};
pub use rng::entropy_seed;
pub use roast::RoastSelector;
