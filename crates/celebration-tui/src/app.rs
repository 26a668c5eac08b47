use crate::overlay::RainOverlay;
use crate::theme::Theme;
use celebration_core::content::{CODING_CHALLENGES, MATH_PROBLEMS, ROASTS};
use celebration_core::{
    AnswerMatch, BrainCaption, BrainMode, ChallengeSession, ChatError, ChatSession,
    ConfettiConfig, ConfettiField, ContentError, EffectLoop, GlyphRainConfig, ReplyTicket,
    RoastSelector, RoundId, ScriptedResponder, Verdict,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

const ONE_SECOND: Duration = Duration::from_secs(1);

/// How long a status message stays on screen
const MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Result of handling a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// Page sections, in scroll order
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Section {
    Landing,
    Coding,
    Math,
    Roast,
    Chat,
    Wishes,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Landing,
        Section::Coding,
        Section::Math,
        Section::Roast,
        Section::Chat,
        Section::Wishes,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Landing => "Home",
            Section::Coding => "DSA Dojo",
            Section::Math => "Maths Lab",
            Section::Roast => "Roast Master",
            Section::Chat => "GautamBot",
            Section::Wishes => "Wishes",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Startup options, filled from the command line
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub section: Section,
    pub seed: u64,
    pub fps: u32,
    pub theme: Theme,
    pub width: u16,
    pub height: u16,
}

struct Countdown {
    round: RoundId,
    next_tick: Instant,
}

/// A quiz section and the countdown driving its current round
pub struct Quiz {
    pub session: ChallengeSession,
    countdown: Option<Countdown>,
}

impl Quiz {
    fn new(session: ChallengeSession, now: Instant) -> Self {
        let mut quiz = Self {
            session,
            countdown: None,
        };
        quiz.arm(now);
        quiz
    }

    /// Point the countdown at the current round, if it is still counting
    fn arm(&mut self, now: Instant) {
        self.countdown = self.session.is_counting().then(|| Countdown {
            round: self.session.round(),
            next_tick: now + ONE_SECOND,
        });
    }

    /// Apply every one-second tick due by `now`
    fn tick(&mut self, now: Instant) {
        while let Some(countdown) = self.countdown.as_mut() {
            if countdown.next_tick > now {
                break;
            }
            countdown.next_tick += ONE_SECOND;
            let round = countdown.round;
            if !self.session.tick_round(round).keep_running() {
                self.countdown = None;
            }
        }
    }

    /// Judge the typed answer; blank answers are not submitted
    fn submit(&mut self) -> Option<Verdict> {
        if !self.session.is_counting() || self.session.answer().trim().is_empty() {
            return None;
        }
        let verdict = self.session.submit_current();
        self.countdown = None;
        Some(verdict)
    }

    fn next(&mut self, now: Instant) {
        self.session.advance();
        self.arm(now);
    }

    pub fn is_ticking(&self) -> bool {
        self.countdown.is_some()
    }
}

/// The main application state
pub struct App {
    /// Section on screen
    pub section: Section,
    pub coding: Quiz,
    pub math: Quiz,
    pub chat: ChatSession,
    /// Chat input line
    pub chat_draft: String,
    /// Outstanding bot reply and when to deliver it
    chat_reply: Option<(ReplyTicket, Instant)>,
    pub roast: RoastSelector,
    pub brain: BrainMode,
    pub confetti: EffectLoop<ConfettiField>,
    pub rain: RainOverlay,
    pub theme: Theme,
    /// Message to display
    pub message: Option<String>,
    message_until: Option<Instant>,
    frame_interval: Duration,
    /// Reference point for brain-mode timestamps
    epoch: Instant,
    width: u16,
    height: u16,
}

impl App {
    pub fn new(config: AppConfig, now: Instant) -> Result<Self, ContentError> {
        let seed = config.seed;
        let coding = ChallengeSession::with_seed(CODING_CHALLENGES, AnswerMatch::Exact, seed)?;
        let math = ChallengeSession::with_seed(
            MATH_PROBLEMS,
            AnswerMatch::IgnoreCase,
            seed.wrapping_add(1),
        )?;
        let roast = RoastSelector::with_seed(ROASTS, seed.wrapping_add(2))?;
        let chat = ChatSession::new(ScriptedResponder::birthday_with_seed(seed.wrapping_add(3)));
        let confetti = ConfettiField::with_seed(
            ConfettiConfig::terminal(),
            config.width as f32,
            config.height as f32,
            seed.wrapping_add(4),
        );
        let rain = RainOverlay::new(
            GlyphRainConfig::terminal(),
            config.width,
            config.height,
            seed.wrapping_add(5),
        );

        let mut app = Self {
            section: config.section,
            coding: Quiz::new(coding, now),
            math: Quiz::new(math, now),
            chat,
            chat_draft: String::new(),
            chat_reply: None,
            roast,
            brain: BrainMode::new(),
            confetti: EffectLoop::new(confetti),
            rain,
            theme: config.theme,
            message: None,
            message_until: None,
            frame_interval: Duration::from_millis(1000 / config.fps.max(1) as u64),
            epoch: now,
            width: config.width,
            height: config.height,
        };
        if app.section == Section::Landing {
            app.confetti.start();
        }
        Ok(app)
    }

    /// Interval between animation ticks
    pub fn tick_rate(&self) -> Duration {
        self.frame_interval
    }

    /// Advance timers and animations to `now`
    pub fn tick(&mut self, now: Instant) {
        self.coding.tick(now);
        self.math.tick(now);

        if let Some((ticket, due)) = self.chat_reply {
            if due <= now {
                self.chat_reply = None;
                if let Err(err) = self.chat.deliver(ticket, wall_clock_ms()) {
                    tracing::warn!(%err, "chat reply dropped");
                }
            }
        }

        self.confetti.frame();
        self.rain.tick(now);

        if self.message_until.is_some_and(|until| until <= now) {
            self.message = None;
            self.message_until = None;
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str, now: Instant) {
        self.message = Some(msg.to_string());
        self.message_until = Some(now + MESSAGE_TTL);
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> AppAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                if !self.brain.is_active() {
                    return AppAction::Quit;
                }
                self.toggle_brain_mode(now);
            }
            KeyCode::Char('b') if ctrl => self.toggle_brain_mode(now),
            // The overlay covers the page and swallows everything else
            _ if self.brain.is_active() => {}
            KeyCode::Tab => self.switch_section(self.section.next()),
            KeyCode::BackTab => self.switch_section(self.section.prev()),
            KeyCode::Char('n') if ctrl => self.next_challenge(now),
            KeyCode::Enter => self.activate(now),
            KeyCode::Backspace => self.edit_input(|input| {
                input.pop();
            }),
            KeyCode::Char(c) if !ctrl => self.edit_input(|input| input.push(c)),
            _ => {}
        }
        AppAction::Continue
    }

    pub fn switch_section(&mut self, section: Section) {
        if section == self.section {
            return;
        }
        // Confetti only runs while the hero is on screen
        if self.section == Section::Landing {
            self.confetti.stop();
        }
        if section == Section::Landing {
            self.confetti.start();
        }
        tracing::debug!(from = ?self.section, to = ?section, "section changed");
        self.section = section;
    }

    pub fn toggle_brain_mode(&mut self, now: Instant) {
        if self.brain.toggle(self.elapsed_ms(now)) {
            self.rain.activate(now);
        } else {
            self.rain.deactivate();
        }
        tracing::info!(active = self.brain.is_active(), "brain mode toggled");
    }

    /// Caption over the rain at `now`, while brain mode is on
    pub fn brain_caption(&self, now: Instant) -> Option<BrainCaption> {
        self.brain.caption(self.elapsed_ms(now))
    }

    fn elapsed_ms(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.epoch).as_secs_f64() * 1000.0
    }

    /// Enter: submit an answer, send a chat line, or ask for a roast
    fn activate(&mut self, now: Instant) {
        match self.section {
            Section::Landing => self.switch_section(Section::Coding),
            Section::Coding | Section::Math => {
                if let Some(quiz) = self.active_quiz_mut() {
                    if let Some(verdict) = quiz.submit() {
                        tracing::info!(verdict = verdict.as_str(), "answer submitted");
                    }
                }
            }
            Section::Roast => {
                self.roast.next();
            }
            Section::Chat => self.send_chat(now),
            Section::Wishes => {}
        }
    }

    fn send_chat(&mut self, now: Instant) {
        match self.chat.send(&self.chat_draft, wall_clock_ms()) {
            Ok(pending) => {
                self.chat_draft.clear();
                let due = now + Duration::from_millis(pending.delay_ms as u64);
                self.chat_reply = Some((pending.ticket, due));
            }
            Err(ChatError::EmptyMessage) => {}
            Err(err) => {
                tracing::debug!(%err, "chat message not sent");
                self.show_message("GautamBot is still typing...", now);
            }
        }
    }

    fn next_challenge(&mut self, now: Instant) {
        if let Some(quiz) = self.active_quiz_mut() {
            quiz.next(now);
        }
    }

    fn active_quiz_mut(&mut self) -> Option<&mut Quiz> {
        match self.section {
            Section::Coding => Some(&mut self.coding),
            Section::Math => Some(&mut self.math),
            _ => None,
        }
    }

    /// Apply an edit to the input line of the current section
    fn edit_input(&mut self, edit: impl FnOnce(&mut String)) {
        if self.section == Section::Chat {
            edit(&mut self.chat_draft);
            return;
        }
        if let Some(quiz) = self.active_quiz_mut() {
            if !quiz.session.is_counting() {
                return;
            }
            let mut answer = quiz.session.answer().to_string();
            edit(&mut answer);
            quiz.session.set_answer(&answer);
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.confetti.resize(width as f32, height as f32);
        self.rain.resize(width, height);
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }
}

/// Wall-clock time for chat timestamps
fn wall_clock_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use celebration_core::RoundState;

    fn app_at(section: Section, now: Instant) -> App {
        let config = AppConfig {
            section,
            seed: 42,
            fps: 30,
            theme: Theme::dark(),
            width: 80,
            height: 24,
        };
        App::new(config, now).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str, now: Instant) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)), now);
        }
    }

    #[test]
    fn test_tab_cycles_sections() {
        let now = Instant::now();
        let mut app = app_at(Section::Landing, now);
        for expected in Section::ALL.iter().skip(1) {
            app.handle_key(key(KeyCode::Tab), now);
            assert_eq!(app.section, *expected);
        }
        app.handle_key(key(KeyCode::Tab), now);
        assert_eq!(app.section, Section::Landing);
        app.handle_key(key(KeyCode::BackTab), now);
        assert_eq!(app.section, Section::Wishes);
    }

    #[test]
    fn test_confetti_runs_only_on_landing() {
        let now = Instant::now();
        let mut app = app_at(Section::Landing, now);
        assert!(app.confetti.is_running());
        app.handle_key(key(KeyCode::Tab), now);
        assert!(!app.confetti.is_running());
        app.handle_key(key(KeyCode::BackTab), now);
        assert!(app.confetti.is_running());
    }

    #[test]
    fn test_enter_on_landing_opens_dojo() {
        let now = Instant::now();
        let mut app = app_at(Section::Landing, now);
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.section, Section::Coding);
    }

    #[test]
    fn test_countdown_ticks_once_per_second() {
        let now = Instant::now();
        let mut app = app_at(Section::Coding, now);
        assert_eq!(app.coding.session.remaining_secs(), 300);
        app.tick(now + Duration::from_millis(999));
        assert_eq!(app.coding.session.remaining_secs(), 300);
        app.tick(now + Duration::from_secs(3));
        assert_eq!(app.coding.session.remaining_secs(), 297);
        assert_eq!(app.coding.session.clock(), "4:57");
    }

    #[test]
    fn test_countdown_expires_and_stops() {
        let now = Instant::now();
        let mut app = app_at(Section::Coding, now);
        app.tick(now + Duration::from_secs(400));
        assert_eq!(app.coding.session.state(), RoundState::Expired);
        assert_eq!(app.coding.session.remaining_secs(), 0);
        assert_eq!(app.coding.session.verdict(), Verdict::Incorrect);
        assert!(!app.coding.is_ticking());
        // Math shares the 300 s limit
        assert_eq!(app.math.session.state(), RoundState::Expired);
    }

    #[test]
    fn test_correct_coding_answer() {
        let now = Instant::now();
        let mut app = app_at(Section::Coding, now);
        type_text(&mut app, "[[3],[9,20],[15,7]]", now);
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.coding.session.verdict(), Verdict::Correct);
        assert!(!app.coding.is_ticking());

        app.tick(now + Duration::from_secs(10));
        assert_eq!(app.coding.session.remaining_secs(), 300);
    }

    #[test]
    fn test_blank_answer_not_submitted() {
        let now = Instant::now();
        let mut app = app_at(Section::Coding, now);
        type_text(&mut app, "   ", now);
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.coding.session.verdict(), Verdict::Unresolved);
        assert!(app.coding.is_ticking());
    }

    #[test]
    fn test_backspace_edits_answer() {
        let now = Instant::now();
        let mut app = app_at(Section::Math, now);
        type_text(&mut app, "233", now);
        app.handle_key(key(KeyCode::Backspace), now);
        assert_eq!(app.math.session.answer(), "23");
    }

    #[test]
    fn test_math_answer_ignores_case() {
        let now = Instant::now();
        let mut app = app_at(Section::Math, now);
        type_text(&mut app, "SIN(X)/X", now);
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.math.session.verdict(), Verdict::Correct);
        assert!(app.math.session.feedback().is_some());
    }

    #[test]
    fn test_next_challenge_restarts_clock() {
        let now = Instant::now();
        let mut app = app_at(Section::Coding, now);
        app.tick(now + Duration::from_secs(5));
        let later = now + Duration::from_secs(5);
        app.handle_key(ctrl('n'), later);
        assert_eq!(app.coding.session.index(), 1);
        assert_eq!(app.coding.session.remaining_secs(), 600);
        app.tick(later + Duration::from_secs(1));
        assert_eq!(app.coding.session.remaining_secs(), 599);
    }

    #[test]
    fn test_chat_reply_arrives_after_delay() {
        let now = Instant::now();
        let mut app = app_at(Section::Chat, now);
        type_text(&mut app, "hello", now);
        app.handle_key(key(KeyCode::Enter), now);
        assert!(app.chat_draft.is_empty());
        assert!(app.chat.is_typing());
        assert_eq!(app.chat.messages().len(), 1);

        app.tick(now + Duration::from_millis(500));
        assert_eq!(app.chat.messages().len(), 1);

        app.tick(now + Duration::from_secs(2));
        let messages = app.chat.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].from_user);
        assert!(!messages[1].from_user);
        assert!(!app.chat.is_typing());
    }

    #[test]
    fn test_chat_send_blocked_while_typing() {
        let now = Instant::now();
        let mut app = app_at(Section::Chat, now);
        type_text(&mut app, "party", now);
        app.handle_key(key(KeyCode::Enter), now);
        type_text(&mut app, "again", now);
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.chat.messages().len(), 1);
        assert_eq!(app.chat_draft, "again");
        assert!(app.message.is_some());

        app.tick(now + MESSAGE_TTL + Duration::from_secs(1));
        assert!(app.message.is_none());
    }

    #[test]
    fn test_roast_on_enter() {
        let now = Instant::now();
        let mut app = app_at(Section::Roast, now);
        for _ in 0..6 {
            app.handle_key(key(KeyCode::Enter), now);
        }
        assert_eq!(app.roast.count(), 6);
        assert_eq!(app.roast.level(), 2);
        assert!(app.roast.current().is_some());
    }

    #[test]
    fn test_brain_mode_toggle_and_escape() {
        let now = Instant::now();
        let mut app = app_at(Section::Coding, now);
        app.handle_key(ctrl('b'), now);
        assert!(app.brain.is_active());
        assert!(app.rain.is_active());
        assert_eq!(app.brain_caption(now), Some(BrainCaption::Welcome));
        assert_eq!(
            app.brain_caption(now + Duration::from_secs(6)),
            Some(BrainCaption::TooComplex)
        );

        // Keys other than the toggles are swallowed
        app.handle_key(key(KeyCode::Tab), now);
        assert_eq!(app.section, Section::Coding);

        assert_eq!(app.handle_key(key(KeyCode::Esc), now), AppAction::Continue);
        assert!(!app.brain.is_active());
        assert!(!app.rain.is_active());
        assert!(app.brain_caption(now).is_none());
        assert_eq!(app.handle_key(key(KeyCode::Esc), now), AppAction::Quit);
    }

    #[test]
    fn test_resize_tracks_terminal() {
        let now = Instant::now();
        let mut app = app_at(Section::Landing, now);
        app.resize(120, 40);
        assert_eq!((app.width(), app.height()), (120, 40));
        assert_eq!(app.confetti.effect().width(), 120.0);
        assert_eq!(app.rain.width(), 120);
    }
}
