//! Timed challenge engine shared by the coding and math sections.
//!
//! A session walks a fixed deck of [`Challenge`]s. Each round counts down
//! once per [`ChallengeSession::tick`] and ends either when the timer
//! reaches zero (`Expired`) or when an answer is submitted (`Judged`).
//! [`ChallengeSession::advance`] moves to the next challenge, wrapping at
//! the end of the deck, and starts a fresh round.

use crate::content::{Challenge, CODING_CHALLENGES, MATH_PROBLEMS};
use crate::error::ContentError;
use crate::rng::{entropy_seed, seeded};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// How a submitted answer is compared against the expected one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerMatch {
    /// Trimmed, case-sensitive equality (coding challenges)
    Exact,
    /// Trimmed, case-insensitive equality (math problems)
    IgnoreCase,
}

impl AnswerMatch {
    pub fn matches(self, answer: &str, expected: &str) -> bool {
        let answer = answer.trim();
        match self {
            AnswerMatch::Exact => answer == expected,
            AnswerMatch::IgnoreCase => answer.to_lowercase() == expected.to_lowercase(),
        }
    }
}

/// Outcome of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Unresolved,
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Unresolved => "unresolved",
            Verdict::Correct => "correct",
            Verdict::Incorrect => "incorrect",
        }
    }
}

/// Round state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// Timer running, answer not yet submitted
    Counting,
    /// Timer reached zero
    Expired,
    /// Answer submitted
    Judged,
}

/// Identity of one round. Ticks carrying an older id are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundId(u64);

impl RoundId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Result of a countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still counting; seconds left
    Counting(u32),
    /// This tick ran the timer out
    Expired,
    /// The round was already over, nothing changed
    Idle,
    /// Tick belonged to a superseded round, nothing changed
    Stale,
}

impl TickOutcome {
    /// Whether the countdown driver should keep firing
    pub fn keep_running(self) -> bool {
        matches!(self, TickOutcome::Counting(_))
    }
}

/// Format seconds as `M:SS`
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// One section's challenge state
pub struct ChallengeSession {
    deck: &'static [Challenge],
    matching: AnswerMatch,
    index: usize,
    round: RoundId,
    state: RoundState,
    remaining: u32,
    answer: String,
    verdict: Verdict,
    feedback: Option<&'static str>,
    hint: Option<&'static str>,
    rng: StdRng,
}

impl ChallengeSession {
    /// Coding dojo: exact, case-sensitive answers
    pub fn coding() -> Self {
        Self::from_deck(CODING_CHALLENGES, AnswerMatch::Exact, entropy_seed())
    }

    /// Maths lab: case-insensitive answers
    pub fn math() -> Self {
        Self::from_deck(MATH_PROBLEMS, AnswerMatch::IgnoreCase, entropy_seed())
    }

    /// Session over a custom deck
    pub fn new(deck: &'static [Challenge], matching: AnswerMatch) -> Result<Self, ContentError> {
        Self::with_seed(deck, matching, entropy_seed())
    }

    /// Session with a specific seed for reproducible feedback selection
    pub fn with_seed(
        deck: &'static [Challenge],
        matching: AnswerMatch,
        seed: u64,
    ) -> Result<Self, ContentError> {
        if deck.is_empty() {
            return Err(ContentError::EmptyPool { what: "challenge" });
        }
        Ok(Self::from_deck(deck, matching, seed))
    }

    fn from_deck(deck: &'static [Challenge], matching: AnswerMatch, seed: u64) -> Self {
        let mut session = Self {
            deck,
            matching,
            index: 0,
            round: RoundId(0),
            state: RoundState::Counting,
            remaining: 0,
            answer: String::new(),
            verdict: Verdict::Unresolved,
            feedback: None,
            hint: None,
            rng: seeded(seed),
        };
        session.start();
        session
    }

    /// Restart the current challenge as a new round
    pub fn start(&mut self) -> RoundId {
        let deck = self.deck;
        let challenge = &deck[self.index];
        self.round = RoundId(self.round.0 + 1);
        self.state = RoundState::Counting;
        self.remaining = challenge.time_limit_secs;
        self.answer.clear();
        self.verdict = Verdict::Unresolved;
        self.feedback = None;
        self.hint = None;
        tracing::debug!(
            challenge = challenge.id,
            round = self.round.0,
            limit = challenge.time_limit_secs,
            "round started"
        );
        self.round
    }

    /// Jump to a challenge (index wraps) and start a round on it
    pub fn select(&mut self, index: usize) -> RoundId {
        self.index = index % self.deck.len();
        self.start()
    }

    /// Move to the next challenge, wrapping after the last
    pub fn advance(&mut self) -> RoundId {
        self.select(self.index + 1)
    }

    /// One second elapsed on the current round
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != RoundState::Counting {
            return TickOutcome::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.expire();
            TickOutcome::Expired
        } else {
            TickOutcome::Counting(self.remaining)
        }
    }

    /// Tick on behalf of a specific round; ticks from older rounds are dropped
    pub fn tick_round(&mut self, round: RoundId) -> TickOutcome {
        if round != self.round {
            tracing::trace!(stale = round.0, current = self.round.0, "dropped stale tick");
            return TickOutcome::Stale;
        }
        self.tick()
    }

    fn expire(&mut self) {
        self.state = RoundState::Expired;
        self.verdict = Verdict::Incorrect;
        self.feedback = self.pick_roast();
        self.hint = self.pick_roast();
        tracing::debug!(round = self.round.0, "round expired");
    }

    /// Update the in-progress answer text without judging it
    pub fn set_answer(&mut self, answer: &str) {
        if self.state == RoundState::Counting {
            self.answer = answer.to_string();
        }
    }

    /// Judge an answer. Once the round is over this is a no-op returning the
    /// existing verdict.
    pub fn submit(&mut self, answer: &str) -> Verdict {
        if self.state != RoundState::Counting {
            return self.verdict;
        }
        self.answer = answer.to_string();
        self.state = RoundState::Judged;

        let deck = self.deck;
        let challenge = &deck[self.index];
        if self.matching.matches(answer, challenge.expected_answer) {
            self.verdict = Verdict::Correct;
            self.feedback = challenge.praises.choose(&mut self.rng).copied();
            self.hint = None;
        } else {
            self.verdict = Verdict::Incorrect;
            self.feedback = self.pick_roast();
            self.hint = self.pick_roast();
        }
        tracing::debug!(round = self.round.0, verdict = self.verdict.as_str(), "answer judged");
        self.verdict
    }

    /// Judge the answer typed so far
    pub fn submit_current(&mut self) -> Verdict {
        let answer = std::mem::take(&mut self.answer);
        self.submit(&answer)
    }

    fn pick_roast(&mut self) -> Option<&'static str> {
        let deck = self.deck;
        deck[self.index].roasts.choose(&mut self.rng).copied()
    }

    // Getters
    pub fn current(&self) -> &'static Challenge {
        let deck = self.deck;
        &deck[self.index]
    }
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }
    pub fn matching(&self) -> AnswerMatch {
        self.matching
    }
    pub fn round(&self) -> RoundId {
        self.round
    }
    pub fn state(&self) -> RoundState {
        self.state
    }
    pub fn is_counting(&self) -> bool {
        self.state == RoundState::Counting
    }
    pub fn remaining_secs(&self) -> u32 {
        self.remaining
    }
    pub fn clock(&self) -> String {
        format_clock(self.remaining)
    }
    pub fn answer(&self) -> &str {
        &self.answer
    }
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }
    pub fn feedback(&self) -> Option<&'static str> {
        self.feedback
    }
    pub fn hint(&self) -> Option<&'static str> {
        self.hint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUICK_DECK: &[Challenge] = &[
        Challenge {
            id: 1,
            title: "one",
            prompt: "",
            formula: None,
            time_limit_secs: 3,
            expected_answer: "Yes",
            roasts: &["nope"],
            praises: &[],
        },
        Challenge {
            id: 2,
            title: "two",
            prompt: "",
            formula: None,
            time_limit_secs: 1,
            expected_answer: "2",
            roasts: &["still nope", "really nope"],
            praises: &["nice"],
        },
    ];

    #[test]
    fn test_start_state() {
        let session = ChallengeSession::coding();
        assert_eq!(session.state(), RoundState::Counting);
        assert_eq!(session.verdict(), Verdict::Unresolved);
        assert_eq!(session.remaining_secs(), 300);
        assert_eq!(session.clock(), "5:00");
        assert!(session.feedback().is_none());
    }

    #[test]
    fn test_countdown_expires_once() {
        let mut session = ChallengeSession::with_seed(QUICK_DECK, AnswerMatch::Exact, 7).unwrap();
        assert_eq!(session.tick(), TickOutcome::Counting(2));
        assert_eq!(session.tick(), TickOutcome::Counting(1));
        assert_eq!(session.tick(), TickOutcome::Expired);
        assert_eq!(session.remaining_secs(), 0);
        assert_eq!(session.state(), RoundState::Expired);
        assert_eq!(session.verdict(), Verdict::Incorrect);
        assert_eq!(session.feedback(), Some("nope"));

        for _ in 0..5 {
            assert_eq!(session.tick(), TickOutcome::Idle);
        }
        assert_eq!(session.remaining_secs(), 0);
    }

    #[test]
    fn test_submit_after_expiry_is_ignored() {
        let mut session = ChallengeSession::with_seed(QUICK_DECK, AnswerMatch::Exact, 7).unwrap();
        session.select(1);
        assert_eq!(session.tick(), TickOutcome::Expired);
        assert_eq!(session.submit("2"), Verdict::Incorrect);
        assert_eq!(session.state(), RoundState::Expired);
    }

    #[test]
    fn test_exact_match_is_case_sensitive() {
        let mut session = ChallengeSession::with_seed(QUICK_DECK, AnswerMatch::Exact, 1).unwrap();
        assert_eq!(session.submit("yes"), Verdict::Incorrect);
        session.start();
        assert_eq!(session.submit("  Yes \n"), Verdict::Correct);
        assert_eq!(session.state(), RoundState::Judged);
    }

    #[test]
    fn test_correct_answer_picks_praise() {
        let mut session =
            ChallengeSession::with_seed(QUICK_DECK, AnswerMatch::IgnoreCase, 3).unwrap();
        session.select(1);
        assert_eq!(session.submit("2"), Verdict::Correct);
        assert_eq!(session.feedback(), Some("nice"));
        assert!(session.hint().is_none());
    }

    #[test]
    fn test_tick_for_old_round_is_stale() {
        let mut session = ChallengeSession::with_seed(QUICK_DECK, AnswerMatch::Exact, 5).unwrap();
        let old = session.round();
        let new = session.advance();
        assert_ne!(old, new);
        assert_eq!(session.tick_round(old), TickOutcome::Stale);
        assert_eq!(session.remaining_secs(), 1);
        assert_eq!(session.tick_round(new), TickOutcome::Expired);
    }

    #[test]
    fn test_advance_resets_round() {
        let mut session = ChallengeSession::with_seed(QUICK_DECK, AnswerMatch::Exact, 5).unwrap();
        session.set_answer("draft");
        session.submit("wrong");
        session.advance();
        assert_eq!(session.index(), 1);
        assert_eq!(session.answer(), "");
        assert_eq!(session.verdict(), Verdict::Unresolved);
        assert!(session.feedback().is_none());
        assert!(session.hint().is_none());
        assert_eq!(session.remaining_secs(), 1);
    }

    #[test]
    fn test_submit_current_uses_typed_answer() {
        let mut session = ChallengeSession::with_seed(QUICK_DECK, AnswerMatch::Exact, 5).unwrap();
        session.set_answer("Yes");
        assert_eq!(session.submit_current(), Verdict::Correct);
        assert_eq!(session.answer(), "Yes");
    }

    #[test]
    fn test_empty_deck_rejected() {
        let result = ChallengeSession::new(&[], AnswerMatch::Exact);
        assert!(matches!(result, Err(ContentError::EmptyPool { .. })));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(61), "1:01");
        assert_eq!(format_clock(900), "15:00");
    }
}
