//! Basic example of driving the celebration engine without a frontend

use celebration_core::{
    ChallengeSession, ChatSession, ConfettiConfig, ConfettiField, EffectLoop, RoastSelector,
    WISHES,
};

fn main() {
    // Play one coding round
    let mut dojo = ChallengeSession::coding();
    let challenge = dojo.current();
    println!("Challenge {}: {}", challenge.id, challenge.title);
    println!("{}\n", challenge.prompt);
    println!("Time left: {}", dojo.clock());

    for _ in 0..3 {
        dojo.tick();
    }
    println!("Time left after 3s: {}", dojo.clock());

    let verdict = dojo.submit("[[3],[9,20],[15,7]]");
    println!("Verdict: {}\n", verdict.as_str());

    // Ask the bot something
    let mut chat = ChatSession::default();
    if let Ok(pending) = chat.send("Happy birthday!", 0.0) {
        println!("(bot is typing for {} ms)", pending.delay_ms);
        let _ = chat.deliver(pending.ticket, pending.delay_ms as f64);
    }
    for message in chat.messages() {
        let who = if message.from_user { "you" } else { "bot" };
        println!("{}: {}", who, message.text);
    }

    // A few roasts
    let mut roaster = RoastSelector::default();
    println!();
    for _ in 0..3 {
        println!("🔥 {}", roaster.next());
    }
    println!("Roasts: {} (level {})\n", roaster.count(), roaster.level());

    // Run the hero confetti for a second of frames
    let mut hero = EffectLoop::new(ConfettiField::new(ConfettiConfig::hero(), 800.0, 600.0));
    hero.start();
    for _ in 0..60 {
        hero.frame();
    }
    println!(
        "Confetti: {} particles after {} frames",
        hero.effect().particles().len(),
        hero.frames()
    );

    println!("\nWishes:");
    for wish in WISHES {
        println!("  {} {}: {}", wish.avatar, wish.name, wish.message);
    }
}
