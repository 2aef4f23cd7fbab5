mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser as _;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use grid_invaders::compute::{handle_key, new_game, render_state, tick};
use grid_invaders::config::GameConfig;
use grid_invaders::entities::{GameState, Key, RuleSet};
use grid_invaders::layout::random_layout;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Share of field cells filled when no layout file is given.
const RANDOM_DENSITY: f64 = 0.3;

#[derive(clap::Parser, Debug)]
#[clap(about = "Rotate the field, shoot down destroyables, collect the rest")]
struct Arguments {
    /// Rule set: 1 = basic, 2 = advanced (cosmetic), 3 = lives.
    /// Shows a menu when omitted.
    #[clap(short, long, value_parser = clap::value_parser!(u8).range(1..=3))]
    task: Option<u8>,

    /// TOML game config (grid size, layout, target, lives).
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Seed for the random starting layout used when the config has none.
    #[clap(short, long)]
    seed: Option<u64>,

    /// Milliseconds between shot ticks.
    #[clap(long, default_value = "150")]
    tick_ms: u64,

    /// Move entities toward the player every N ticks.
    #[clap(long)]
    advance_interval: Option<u32>,
}

fn rules_for_task(task: u8) -> RuleSet {
    match task {
        1 => RuleSet::Basic,
        2 => RuleSet::Advanced,
        _ => RuleSet::Lives,
    }
}

fn key_for(code: &KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::RotateLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::RotateRight),
        KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::FireDestroy),
        KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::FireCollect),
        _ => None,
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(RuleSet),
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  GRID  INVADERS  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select rules:"))?;

    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Basic   ", Color::Green, "One life"),
        ("2", "Advanced", Color::Yellow, "Same rules, richer screen"),
        ("3", "Lives   ", Color::Red, "Survive a few hits"),
    ];

    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(10), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<9}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" — {}", desc)))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        if let Ok(Event::Key(KeyEvent { code, .. })) = rx.recv() {
            match code {
                KeyCode::Char(c @ '1'..='3') => {
                    return Ok(MenuResult::Start(rules_for_task(c as u8 - b'0')));
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → start another game.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    tick_every: Duration,
) -> anyhow::Result<bool> {
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();

        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(true),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(true);
                }
                KeyCode::Char('r') | KeyCode::Char('R') if state.outcome.is_terminal() => {
                    return Ok(false);
                }
                _ => {
                    if let Some(key) = key_for(&code) {
                        *state = handle_key(state, key)?;
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_every {
            *state = tick(state)?;
            last_tick = Instant::now();
        }

        display::render(out, &render_state(state))?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; redirect it (`2>grid_invaders.log`) to keep the
    // screen clean.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("grid_invaders=warn"))
        .init();

    let args = Arguments::parse();

    let base = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let base = GameConfig {
        advance_interval: args.advance_interval.or(base.advance_interval),
        ..base
    };
    // `--task` wins over the file's `rules`; with neither, the menu picks.
    let fixed_rules = args
        .task
        .map(rules_for_task)
        .or_else(|| args.config.as_ref().map(|_| base.rules));
    let base = match fixed_rules {
        Some(rules) => base.with_rules(rules),
        None => base,
    };
    // Fail before touching the terminal.
    base.validate()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &args, &base, fixed_rules);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    args: &Arguments,
    base: &GameConfig,
    fixed_rules: Option<RuleSet>,
) -> anyhow::Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let tick_every = Duration::from_millis(args.tick_ms.max(1));

    loop {
        let rules = match fixed_rules {
            Some(rules) => rules,
            None => match show_menu(out, rx)? {
                MenuResult::Quit => break,
                MenuResult::Start(rules) => rules,
            },
        };

        let mut config = base.clone().with_rules(rules);
        if base.layout.is_empty() {
            config.layout = random_layout(config.rows, config.cols, RANDOM_DENSITY, &mut rng);
        }

        let mut state = new_game(&config).context("building a new game")?;
        if game_loop(out, &mut state, rx, tick_every)? {
            break;
        }
    }
    Ok(())
}
