mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use pumpkin_patch::compute::{completed_rounds, init_state, poke_owl, tap, tick};
use pumpkin_patch::config::GameConfig;
use pumpkin_patch::entities::{GameState, GameStatus};
use pumpkin_patch::error::GameError;
use pumpkin_patch::progress::Progress;

/// Environment variable naming an optional JSON config file.
const CONFIG_ENV: &str = "PUMPKIN_PATCH_CONFIG";

/// Longest frame, in frame times, the simulation is allowed to see.
const MAX_CATCHUP_FRAMES: u32 = 4;

// ── Files ─────────────────────────────────────────────────────────────────────

fn data_path(name: &str) -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(name)
}

fn progress_path() -> PathBuf {
    data_path(".pumpkin_patch.json")
}

/// The terminal belongs to the game, so logs go to a file, and only when
/// `RUST_LOG` asks for them.
fn init_logging() -> Result<(), GameError> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = std::fs::File::create(data_path(".pumpkin_patch.log"))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_config() -> Result<GameConfig, GameError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => GameConfig::load(&PathBuf::from(path)),
        None => Ok(GameConfig::default()),
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    ResetBest,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    progress: &Progress,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "🎃  PUMPKIN  PATCH  PANIC  🎃";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::DarkYellow))?;
    out.queue(Print(title))?;

    if progress.high_round > 0 {
        let best = format!("Best: {} rounds", progress.high_round);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(best.chars().count() as u16 / 2),
            cy.saturating_sub(5),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&best))?;
    }

    let help = [
        "Spirits creep into the pumpkins.",
        "Tap a pumpkin only once its face turns evil.",
        "Too early, or too late, and you lose a life.",
    ];
    for (i, line) in help.iter().enumerate() {
        out.queue(cursor::MoveTo(cx.saturating_sub(22), cy.saturating_sub(3) + i as u16))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(*line))?;
    }

    let options: &[(&str, &str)] = &[
        ("S", "Start"),
        ("R", "Reset best round"),
        ("Q", "Quit"),
    ];
    for (i, (key, label)) in options.iter().enumerate() {
        out.queue(cursor::MoveTo(cx.saturating_sub(22), cy + 1 + i as u16))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(*label))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) = rx.recv() {
            match code {
                KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => {
                    return Ok(MenuResult::Start)
                }
                KeyCode::Char('r') | KeyCode::Char('R') => return Ok(MenuResult::ResetBest),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Taps are applied between ticks, each one fully, so a tick never sees a
/// half-handled tap.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    frame_time: Duration,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();
    let mut frame: u64 = 0;
    let mut status_line = format!("Round {}", state.round);
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) = ev else {
                continue;
            };
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(true),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(true);
                }
                KeyCode::Char('r') | KeyCode::Char('R') if state.status == GameStatus::GameOver => {
                    return Ok(false);
                }
                KeyCode::Char('o') | KeyCode::Char('O') => {
                    *state = poke_owl(state, 0, &mut rng);
                }
                KeyCode::Char(c @ '1'..='9') => {
                    let slot = c as usize - '1' as usize;
                    *state = tap(state, slot, &mut rng);
                }
                _ => {}
            }
            if let Some(msg) = state.cues.iter().rev().find_map(display::cue_message) {
                status_line = msg;
            }
        }

        let now = Instant::now();
        // A stalled or suspended terminal resumes at most a few frames late.
        let delta = now
            .duration_since(last)
            .min(frame_time * MAX_CATCHUP_FRAMES)
            .as_secs_f32();
        last = now;

        *state = tick(state, delta, &mut rng);
        if let Some(msg) = state.cues.iter().rev().find_map(display::cue_message) {
            status_line = msg;
        }

        display::render(out, state, frame, &status_line)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    init_logging()?;
    let config = load_config()?;
    config.validate()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> Result<(), GameError> {
    let path = progress_path();
    let mut progress = Progress::load(&path).unwrap_or_else(|err| {
        log::warn!("ignoring unreadable progress file: {}", err);
        Progress::default()
    });
    let frame_time = Duration::from_millis(config.frame_millis);

    loop {
        match show_menu(out, rx, &progress)? {
            MenuResult::Quit => break,
            MenuResult::ResetBest => {
                progress.reset();
                progress.save(&path)?;
            }
            MenuResult::Start => {
                let mut state = init_state(config, progress.high_round, &mut thread_rng());
                log::info!("session started at round {}", state.round);
                let quit = game_loop(out, &mut state, rx, frame_time)?;

                if progress.record(completed_rounds(&state)) {
                    progress.save(&path)?;
                }

                if quit {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
