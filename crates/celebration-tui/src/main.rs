mod app;
mod overlay;
mod render;
mod theme;

use app::{App, AppAction, AppConfig, Section};
use celebration_core::entropy_seed;
use clap::{Parser, ValueEnum};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use theme::Theme;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ThemeName {
    Dark,
    HighContrast,
}

impl ThemeName {
    fn theme(self) -> Theme {
        match self {
            ThemeName::Dark => Theme::dark(),
            ThemeName::HighContrast => Theme::high_contrast(),
        }
    }
}

/// A birthday celebration page for the terminal
#[derive(Parser, Debug)]
#[command(name = "celebration", version, about)]
struct Args {
    /// Section to open on
    #[arg(long, value_enum, default_value_t = Section::Landing)]
    section: Section,

    /// Seed for every random choice; fresh entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Animation frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=120))]
    fps: u32,

    /// Color theme
    #[arg(long, value_enum, default_value_t = ThemeName::Dark)]
    theme: ThemeName,

    /// Write logs to this file (RUST_LOG overrides the default filter)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("celebration=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Run the app
    let result = run_app(&mut stdout, &args);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, Show)?;

    if let Err(e) = result {
        tracing::error!(%e, "terminal loop failed");
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, args: &Args) -> io::Result<()> {
    let (width, height) = terminal::size()?;
    let seed = args.seed.unwrap_or_else(entropy_seed);
    let config = AppConfig {
        section: args.section,
        seed,
        fps: args.fps,
        theme: args.theme.theme(),
        width,
        height,
    };
    let mut app = App::new(config, Instant::now())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    tracing::info!(seed, width, height, "celebration started");

    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.tick_rate();

        // Render
        render::render(stdout, &app, Instant::now())?;
        stdout.flush()?;

        // Handle input with timeout for animation updates
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // Handle Ctrl+C
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }

                    match app.handle_key(key, Instant::now()) {
                        AppAction::Continue => {}
                        AppAction::Quit => break,
                    }
                }
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        // Tick animations and timers
        if last_tick.elapsed() >= tick_rate {
            app.tick(Instant::now());
            last_tick = Instant::now();
        }
    }

    tracing::info!("celebration closed");
    Ok(())
}
