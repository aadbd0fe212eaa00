use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};

use space_invaders::config::coerce_difficulty;
use space_invaders::display::{self, TerminalSurface};
use space_invaders::entities::{GameStatus, Key};
use space_invaders::{Config, Game};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key counts as held if its last press/repeat event arrived within this
/// many frames. Covers terminals that never report key releases.
const HOLD_WINDOW: u64 = 8;

#[derive(Debug, Parser)]
#[command(name = "space_invaders", about = "Defend the line against a descending alien fleet")]
struct Cli {
    /// Alien rows and speed multiplier. Prompted for when omitted.
    #[arg(short, long)]
    difficulty: Option<u32>,

    /// Draw the playfield edges.
    #[arg(long)]
    debug: bool,

    /// JSON file with `difficulty` / `debug` options.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (controlled by RUST_LOG, default `info`).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Up | KeyCode::Char(' ') => Some(Key::Fire),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Difficulty prompt ─────────────────────────────────────────────────────────

/// Blocking prompt. `None` means the player asked to quit.
fn prompt_difficulty<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<Option<u32>> {
    let mut answer = String::new();

    loop {
        let (width, height) = terminal::size()?;
        let cx = width / 2;
        let cy = height / 2;

        out.queue(terminal::Clear(terminal::ClearType::All))?;
        let title = "★  SPACE  INVADERS  ★";
        out.queue(cursor::MoveTo(
            cx.saturating_sub(title.chars().count() as u16 / 2),
            cy.saturating_sub(3),
        ))?;
        out.queue(style::SetForegroundColor(Color::Cyan))?;
        out.queue(Print(title))?;

        let question = "Please enter your difficulty (1 - 5): ";
        let qx = cx.saturating_sub((question.len() + 2) as u16 / 2);
        out.queue(cursor::MoveTo(qx, cy))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(question))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&answer))?;

        out.queue(cursor::MoveTo(cx.saturating_sub(17), cy + 2))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print("ENTER : Start   ESC : Quit"))?;
        out.queue(style::ResetColor)?;
        out.flush()?;

        let (code, kind, modifiers) = match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) => (code, kind, modifiers),
            Ok(_) => continue,
            Err(_) => return Ok(None),
        };
        if kind == KeyEventKind::Release {
            continue;
        }
        match code {
            KeyCode::Enter => return Ok(Some(coerce_difficulty(&answer))),
            KeyCode::Backspace => {
                answer.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() && answer.len() < 3 => answer.push(c),
            _ if is_quit(code, modifiers) => return Ok(None),
            _ => {}
        }
    }
}

// ── Game-over notice ──────────────────────────────────────────────────────────

/// Blocks until a key is pressed. Returns `true` if that key means quit.
fn show_game_over<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    game: &Game,
) -> anyhow::Result<bool> {
    let (width, height) = terminal::size()?;
    let ticks = format!("Survived {} ticks", game.ticks());
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        ("The aliens have landed.", Color::Yellow),
        (&ticks, Color::Yellow),
        ("Any key - Play Again   Q - Quit", Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    out.queue(style::ResetColor)?;
    out.flush()?;

    // Drop keys still buffered from play so a held key doesn't dismiss the notice.
    while rx.try_recv().is_ok() {}

    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. })) => {
                return Ok(is_quit(code, modifiers));
            }
            Ok(_) => {}
            // Input thread gone, nothing can dismiss the notice.
            Err(_) => return Ok(true),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs sessions back to back until the player quits.
///
/// Input model: `key_frame` records the frame of the last press/repeat event
/// for every simulation key. Keyboard-enhancement terminals also deliver
/// releases; on classic terminals a key is released once it has been silent
/// for `HOLD_WINDOW` frames.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let mut key_frame: HashMap<Key, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut session_start = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            if kind == KeyEventKind::Press && is_quit(code, modifiers) {
                return Ok(());
            }
            let Some(key) = map_key(code) else {
                continue;
            };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    key_frame.insert(key, frame);
                    game.press(key);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&key);
                    game.release(key);
                }
            }
        }

        key_frame.retain(|&key, &mut last| {
            let live = frame.saturating_sub(last) <= HOLD_WINDOW;
            if !live {
                game.release(key);
            }
            live
        });

        let status = game.tick(session_start.elapsed());

        let (width, height) = terminal::size()?;
        let mut surface =
            TerminalSurface::new(&mut *out, game.playfield(), width, height.saturating_sub(1));
        display::render(&mut surface, game)?;
        game.frame_rendered();

        if status == GameStatus::GameOver {
            log::info!("game over after {} ticks", game.ticks());
            if show_game_over(out, rx, game)? {
                return Ok(());
            }
            game.reset();
            key_frame.clear();
            session_start = Instant::now();
            continue;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    config.debug |= cli.debug;
    let prompt = cli.difficulty.is_none() && cli.config.is_none();

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events where the terminal supports it.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads live on their own thread so the loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, config, prompt);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut config: Config,
    prompt: bool,
) -> anyhow::Result<()> {
    if prompt {
        match prompt_difficulty(out, rx)? {
            Some(difficulty) => config.difficulty = difficulty,
            None => return Ok(()),
        }
    }

    log::info!("resolved config: {}", serde_json::to_string(&config)?);
    let mut game = Game::new(config).context("starting game")?;
    game_loop(out, &mut game, rx)
}
