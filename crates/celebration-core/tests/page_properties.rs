use celebration_core::{
    ChallengeSession, ChatSession, ConfettiConfig, ConfettiField, EffectLoop, GlyphRain,
    GlyphRainConfig, ParticleEffect, RoastSelector, ScriptedResponder, TickOutcome, Verdict,
};

#[test]
fn coding_countdown_is_monotonic_and_stops_at_zero() {
    let mut session = ChallengeSession::coding();
    for _ in 0..session.deck_len() {
        let limit = session.current().time_limit_secs;
        let mut previous = session.remaining_secs();
        assert_eq!(previous, limit);

        let mut ticks = 0;
        while session.tick().keep_running() {
            assert!(session.remaining_secs() < previous);
            previous = session.remaining_secs();
            ticks += 1;
        }
        assert_eq!(ticks + 1, limit);
        assert_eq!(session.remaining_secs(), 0);
        assert_eq!(session.verdict(), Verdict::Incorrect);
        assert!(session.feedback().is_some());
        assert_eq!(session.tick(), TickOutcome::Idle);
        assert_eq!(session.remaining_secs(), 0);

        session.advance();
    }
}

#[test]
fn first_coding_challenge_accepts_exact_answer() {
    let mut session = ChallengeSession::coding();
    assert_eq!(session.submit("[[3],[9,20],[15,7]]"), Verdict::Correct);

    for wrong in ["[[3],[9,20],[15,7]] extra", "[[3], [9,20], [15,7]]", ""] {
        session.start();
        assert_eq!(session.submit(wrong), Verdict::Incorrect);
        let feedback = session.feedback().expect("incorrect answers carry feedback");
        assert!(!feedback.is_empty());
        assert!(session.current().roasts.contains(&feedback));
    }
}

#[test]
fn math_answers_ignore_case() {
    let mut session = ChallengeSession::math();
    assert_eq!(session.current().title, "Calculus Challenge");
    assert_eq!(session.submit("SIN(X)/X"), Verdict::Correct);

    session.select(2);
    assert_eq!(session.current().title, "Number Theory Problem");
    assert_eq!(session.submit("23"), Verdict::Correct);

    // eigenvalues are compared as text, not as a set
    session.select(1);
    assert_eq!(session.submit("3,1"), Verdict::Incorrect);
}

#[test]
fn advance_wraps_to_start() {
    let mut session = ChallengeSession::math();
    let first = session.current().id;
    for _ in 0..session.deck_len() {
        session.advance();
    }
    assert_eq!(session.current().id, first);
    assert_eq!(session.index(), 0);
}

#[test]
fn roasts_never_repeat_back_to_back() {
    for seed in 0..50 {
        let mut selector = RoastSelector::with_seed(celebration_core::content::ROASTS, seed).unwrap();
        let mut previous = selector.next();
        for _ in 0..200 {
            let line = selector.next();
            assert_ne!(line, previous);
            previous = line;
        }
        assert_eq!(selector.count(), 201);
    }
}

#[test]
fn chat_cycle_orders_user_then_bot() {
    let mut chat = ChatSession::new(ScriptedResponder::birthday_with_seed(12));
    let pending = chat.send("xyz123", 0.0).unwrap();
    chat.deliver(pending.ticket, pending.delay_ms as f64).unwrap();

    let messages = chat.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].from_user);
    assert!(!messages[1].from_user);
    assert!(celebration_core::content::FALLBACK_REPLIES.contains(&messages[1].text.as_str()));
    assert!(messages[0].timestamp_ms <= messages[1].timestamp_ms);
}

#[test]
fn effect_loops_keep_pool_size_and_stop_cleanly() {
    let mut confetti = EffectLoop::new(ConfettiField::with_seed(
        ConfettiConfig::hero(),
        1024.0,
        768.0,
        77,
    ));
    let mut rain = EffectLoop::new(GlyphRain::with_seed(
        GlyphRainConfig::canvas(),
        1024.0,
        768.0,
        77,
    ));
    confetti.start();
    rain.start();

    let confetti_pool = confetti.effect().pool_len();
    let rain_pool = rain.effect().pool_len();
    for _ in 0..3_000 {
        assert!(confetti.frame());
        assert!(rain.frame());
        assert_eq!(confetti.effect().pool_len(), confetti_pool);
        assert_eq!(rain.effect().pool_len(), rain_pool);
        assert!(confetti
            .effect()
            .particles()
            .iter()
            .all(|p| (0.0..=1.0).contains(&p.opacity)));
    }

    confetti.stop();
    rain.stop();
    let frames = (confetti.frames(), rain.frames());
    for _ in 0..100 {
        assert!(!confetti.frame());
        assert!(!rain.frame());
    }
    assert_eq!((confetti.frames(), rain.frames()), frames);
}
