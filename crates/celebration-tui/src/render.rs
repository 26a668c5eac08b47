use crate::app::{App, Quiz, Section};
use crate::overlay::MIN_VISIBLE;
use crate::theme::Theme;
use celebration_core::content::{LANDING_HEADLINE, LANDING_TAGLINES};
use celebration_core::{ParticleKind, RoundState, Verdict, WISHES};
use crossterm::{
    cursor::{Hide, MoveTo},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io;
use std::time::Instant;

/// Confetti glyphs by particle shape
const CONFETTI_CHAR: char = '■';
const SPARKLE_CHAR: char = '✦';

/// Rows taken by the tab bar and the message line
const HEADER_ROWS: u16 = 2;
/// Rows taken by the key bindings
const FOOTER_ROWS: u16 = 2;

pub fn render(stdout: &mut io::Stdout, app: &App, now: Instant) -> io::Result<()> {
    let theme = &app.theme;
    let (width, height) = (app.width(), app.height());

    execute!(stdout, Hide, SetBackgroundColor(theme.bg), Clear(ClearType::All))?;

    if app.brain.is_active() {
        return render_brain_overlay(stdout, app, now, width, height);
    }

    match app.section {
        Section::Landing => render_landing(stdout, app, width, height)?,
        Section::Coding => render_quiz(stdout, theme, &app.coding, width, "DSA Dojo")?,
        Section::Math => render_quiz(stdout, theme, &app.math, width, "Maths Lab")?,
        Section::Roast => render_roast(stdout, app, width)?,
        Section::Chat => render_chat(stdout, app, width, height)?,
        Section::Wishes => render_wishes(stdout, theme, width, height)?,
    }

    render_tabs(stdout, app, width)?;
    if let Some(ref msg) = app.message {
        render_message(stdout, theme, msg, width)?;
    }
    render_controls(stdout, app, height)?;
    Ok(())
}

fn put(stdout: &mut io::Stdout, x: u16, y: u16, fg: Color, text: &str) -> io::Result<()> {
    execute!(stdout, MoveTo(x, y), SetForegroundColor(fg), Print(text))
}

fn centered_x(text: &str, width: u16) -> u16 {
    width.saturating_sub(text.chars().count() as u16) / 2
}

fn render_tabs(stdout: &mut io::Stdout, app: &App, width: u16) -> io::Result<()> {
    let theme = &app.theme;
    let mut x = 1u16;
    for section in Section::ALL {
        let label = format!(" {} ", section.title());
        let len = label.chars().count() as u16;
        if x + len >= width {
            break;
        }
        if section == app.section {
            execute!(
                stdout,
                MoveTo(x, 0),
                SetBackgroundColor(theme.selected_bg),
                SetForegroundColor(theme.accent),
                Print(&label),
                SetBackgroundColor(theme.bg)
            )?;
        } else {
            put(stdout, x, 0, theme.info, &label)?;
        }
        x += len + 1;
    }
    Ok(())
}

fn render_message(stdout: &mut io::Stdout, theme: &Theme, msg: &str, width: u16) -> io::Result<()> {
    let padded = format!("  {}  ", msg);
    execute!(
        stdout,
        MoveTo(centered_x(&padded, width), 1),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.selected_bg),
        Print(&padded),
        SetBackgroundColor(theme.bg)
    )
}

fn render_controls(stdout: &mut io::Stdout, app: &App, height: u16) -> io::Result<()> {
    let theme = &app.theme;
    let enter = match app.section {
        Section::Landing => "Enter the Dojo",
        Section::Coding | Section::Math => "Submit",
        Section::Roast => "Roast me",
        Section::Chat => "Send",
        Section::Wishes => "-",
    };
    let mut controls = vec![("Tab/S-Tab", "Section"), ("Enter", enter)];
    if matches!(app.section, Section::Coding | Section::Math) {
        controls.push(("Ctrl-N", "Next"));
    }
    controls.push(("Ctrl-B", "Brain mode"));
    controls.push(("Esc", "Quit"));

    let y = height.saturating_sub(FOOTER_ROWS - 1);
    let mut x = 1u16;
    for (key, desc) in controls {
        put(stdout, x, y, theme.key, key)?;
        x += key.chars().count() as u16 + 1;
        put(stdout, x, y, theme.info, desc)?;
        x += desc.chars().count() as u16 + 3;
    }
    Ok(())
}

fn render_landing(stdout: &mut io::Stdout, app: &App, width: u16, height: u16) -> io::Result<()> {
    let theme = &app.theme;

    for p in app.confetti.effect().particles() {
        if p.x < 0.0 || p.y < 0.0 {
            continue;
        }
        let (col, row) = (p.x as u16, p.y as u16);
        if col >= width || row < HEADER_ROWS || row >= height.saturating_sub(FOOTER_ROWS) {
            continue;
        }
        let (r, g, b) = p.color.to_rgb();
        let fade = |v: u8| (v as f32 * p.opacity) as u8;
        let glyph = match p.kind {
            ParticleKind::Confetti => CONFETTI_CHAR,
            ParticleKind::Sparkle => SPARKLE_CHAR,
        };
        let color = Color::Rgb {
            r: fade(r),
            g: fade(g),
            b: fade(b),
        };
        put(stdout, col, row, color, glyph.encode_utf8(&mut [0u8; 4]))?;
    }

    let (greeting, name) = LANDING_HEADLINE;
    let mid = height / 2;
    let top = mid.saturating_sub(3);
    put(stdout, centered_x(greeting, width), top, theme.accent, greeting)?;
    put(stdout, centered_x(name, width), top + 1, theme.fg, name)?;
    for (i, tagline) in LANDING_TAGLINES.iter().enumerate() {
        put(stdout, centered_x(tagline, width), top + 3 + i as u16, theme.info, tagline)?;
    }
    Ok(())
}

fn render_quiz(
    stdout: &mut io::Stdout,
    theme: &Theme,
    quiz: &Quiz,
    width: u16,
    heading: &str,
) -> io::Result<()> {
    let session = &quiz.session;
    let challenge = session.current();
    let text_width = width.saturating_sub(4) as usize;
    let mut y = HEADER_ROWS + 1;

    put(stdout, 2, y, theme.accent, heading)?;
    let progress = format!(
        "{}/{}   ⏱ {}",
        session.index() + 1,
        session.deck_len(),
        session.clock()
    );
    let clock_color = if quiz.is_ticking() && session.remaining_secs() <= 30 {
        theme.error
    } else {
        theme.info
    };
    put(
        stdout,
        width.saturating_sub(progress.chars().count() as u16 + 2),
        y,
        clock_color,
        &progress,
    )?;
    y += 2;

    put(stdout, 2, y, theme.fg, challenge.title)?;
    y += 1;
    for line in wrap(challenge.prompt, text_width) {
        put(stdout, 2, y, theme.info, &line)?;
        y += 1;
    }
    if let Some(formula) = challenge.formula {
        y += 1;
        put(stdout, 4, y, theme.key, formula)?;
        y += 1;
    }
    y += 1;

    put(stdout, 2, y, theme.fg, "Answer: ")?;
    let answer_color = if session.is_counting() { theme.user } else { theme.info };
    let cursor = if session.is_counting() { "_" } else { "" };
    put(stdout, 10, y, answer_color, &format!("{}{}", session.answer(), cursor))?;
    y += 2;

    let status = match (session.state(), session.verdict()) {
        (RoundState::Expired, _) => Some(("Time's up!", theme.error)),
        (_, Verdict::Correct) => Some(("Correct!", theme.success)),
        (_, Verdict::Incorrect) => Some(("Not quite.", theme.error)),
        _ => None,
    };
    if let Some((label, color)) = status {
        put(stdout, 2, y, color, label)?;
        y += 1;
    }
    if let Some(feedback) = session.feedback() {
        for line in wrap(feedback, text_width) {
            put(stdout, 2, y, theme.fg, &line)?;
            y += 1;
        }
    }
    if let Some(hint) = session.hint() {
        for line in wrap(&format!("Hint: {}", hint), text_width) {
            put(stdout, 2, y, theme.info, &line)?;
            y += 1;
        }
    }
    Ok(())
}

fn render_roast(stdout: &mut io::Stdout, app: &App, width: u16) -> io::Result<()> {
    let theme = &app.theme;
    let mut y = HEADER_ROWS + 1;
    put(stdout, 2, y, theme.accent, "Roast Master")?;
    y += 2;

    match app.roast.current() {
        Some(roast) => {
            for line in wrap(roast, width.saturating_sub(4) as usize) {
                put(stdout, 2, y, theme.fg, &line)?;
                y += 1;
            }
        }
        None => {
            put(stdout, 2, y, theme.info, "Press Enter to get roasted.")?;
            y += 1;
        }
    }
    y += 1;

    let stats = format!(
        "Roasts: {}   Level: {}",
        app.roast.count(),
        app.roast.level()
    );
    put(stdout, 2, y, theme.key, &stats)
}

fn render_chat(stdout: &mut io::Stdout, app: &App, width: u16, height: u16) -> io::Result<()> {
    let theme = &app.theme;
    let text_width = width.saturating_sub(16) as usize;
    let input_y = height.saturating_sub(FOOTER_ROWS + 1);
    let top = HEADER_ROWS + 1;

    put(stdout, 2, top, theme.accent, "Chat with GautamBot")?;

    // Lay out the transcript bottom-up so the newest lines stay visible
    let mut lines: Vec<(String, Color)> = Vec::new();
    for message in app.chat.messages() {
        let (who, color) = if message.from_user {
            ("You", theme.user)
        } else {
            ("GautamBot", theme.bot)
        };
        for (i, line) in wrap(&message.text, text_width).into_iter().enumerate() {
            let label = if i == 0 { who } else { "" };
            lines.push((format!("{:>10}  {}", label, line), color));
        }
    }
    if app.chat.is_typing() {
        lines.push((format!("{:>10}  ...", "GautamBot"), theme.info));
    }

    let first_row = top + 2;
    let rows = input_y.saturating_sub(first_row + 1) as usize;
    let skip = lines.len().saturating_sub(rows);
    for (i, (line, color)) in lines.iter().skip(skip).enumerate() {
        put(stdout, 2, first_row + i as u16, *color, line)?;
    }

    put(stdout, 2, input_y, theme.fg, "> ")?;
    put(stdout, 4, input_y, theme.user, &format!("{}_", app.chat_draft))
}

fn render_wishes(stdout: &mut io::Stdout, theme: &Theme, width: u16, height: u16) -> io::Result<()> {
    let text_width = width.saturating_sub(8) as usize;
    let bottom = height.saturating_sub(FOOTER_ROWS);
    let mut y = HEADER_ROWS + 1;

    put(stdout, 2, y, theme.accent, "Birthday Wishes")?;
    y += 2;

    for wish in WISHES {
        if y >= bottom {
            break;
        }
        put(stdout, 2, y, theme.key, &format!("{} {}", wish.avatar, wish.name))?;
        y += 1;
        for line in wrap(wish.message, text_width) {
            if y >= bottom {
                break;
            }
            put(stdout, 5, y, theme.fg, &line)?;
            y += 1;
        }
        y += 1;
    }
    Ok(())
}

fn render_brain_overlay(
    stdout: &mut io::Stdout,
    app: &App,
    now: Instant,
    width: u16,
    height: u16,
) -> io::Result<()> {
    let (r, g, b) = app.theme.rain;
    execute!(stdout, SetBackgroundColor(Color::Black), Clear(ClearType::All))?;

    for row in 0..height {
        for col in 0..width {
            let Some(cell) = app.rain.cell(col, row) else {
                continue;
            };
            if cell.brightness < MIN_VISIBLE {
                continue;
            }
            let scale = |v: u8| (v as f32 * cell.brightness) as u8;
            let color = Color::Rgb {
                r: scale(r),
                g: scale(g),
                b: scale(b),
            };
            put(stdout, col, row, color, cell.glyph.encode_utf8(&mut [0u8; 4]))?;
        }
    }

    if let Some(caption) = app.brain_caption(now) {
        let mid = height / 2;
        let headline = caption.headline();
        put(stdout, centered_x(headline, width), mid.saturating_sub(1), Color::White, headline)?;
        for (i, line) in caption.lines().iter().enumerate() {
            put(stdout, centered_x(line, width), mid + 1 + i as u16, Color::Grey, line)?;
        }
    }

    let hint = "Esc / Ctrl-B to leave";
    put(stdout, centered_x(hint, width), height.saturating_sub(1), Color::DarkGrey, hint)
}

/// Greedy word wrap by character count
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = line.chars().count() + usize::from(!line.is_empty()) + word.chars().count();
        if !line.is_empty() && needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_breaks_on_words() {
        let lines = wrap("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_wrap_keeps_long_words_whole() {
        let lines = wrap("a [[3],[9,20],[15,7]] b", 5);
        assert_eq!(lines, vec!["a", "[[3],[9,20],[15,7]]", "b"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap("   ", 10).is_empty());
    }
}
