mod display;

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
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use rogue_square::compute::{init_state, step};
use rogue_square::config::Tuning;
use rogue_square::entities::{GameState, Level};
use rogue_square::input::FrameInput;

use display::Viewport;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Longest frame the simulation will accept; longer stalls are cut short.
const MAX_DT: f32 = 0.1;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

#[derive(Parser, Debug)]
#[command(name = "rogue_square", about = "Top-down terminal arena shooter")]
struct Args {
    /// JSON file overriding gameplay tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting difficulty: easy, medium or hard
    #[arg(long, default_value = "medium", value_parser = parse_level)]
    level: Level,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Where log output goes (the terminal is busy drawing the game)
    #[arg(long, default_value = "rogue_square.log")]
    log_file: PathBuf,
}

fn parse_level(s: &str) -> Result<Level, String> {
    Level::from_name(s).ok_or_else(|| format!("unknown level '{s}' (easy, medium, hard)"))
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key. Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and fold them into one `FrameInput`, so
/// movement, dash and fire can all be held at once. Menu keys (Enter, Esc,
/// digits) are one-shot and only count on the frame they are pressed.
///
/// The mouse is tracked separately: the left button is held from its Down
/// event to its Up event, and every move/drag updates the aim point.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> anyhow::Result<()> {
    let (width, height) = terminal::size()?;
    let mut view = Viewport::new(width, height);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut mouse_fire = false;
    let mut aim = state.player.pos;
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut input = FrameInput::default();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Enter => input.confirm = true,
                            KeyCode::Esc => input.cancel = true,
                            KeyCode::Char(c @ '1'..='3') => input.choose(c as u8 - b'0'),
                            _ => {}
                        }
                    }
                    // Repeat: refresh timestamp so key stays "held"
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    // Release: remove key immediately (keyboard-enhancement path)
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => {
                    aim = view.cell_to_world(column, row, &state.tuning);
                    match kind {
                        MouseEventKind::Down(MouseButton::Left) => mouse_fire = true,
                        MouseEventKind::Up(MouseButton::Left) => mouse_fire = false,
                        _ => {}
                    }
                }
                Event::Resize(w, h) => {
                    log::debug!("Terminal resized to {}x{}", w, h);
                    view = Viewport::new(w, h);
                }
                _ => {}
            }
        }

        // ── Held-key state for this frame ─────────────────────────────────────
        input.up = is_held(&key_frame, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame);
        input.down = is_held(&key_frame, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame);
        input.left = is_held(&key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame);
        input.right = is_held(&key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame);
        input.dash = is_held(&key_frame, &[KeyCode::Char(' ')], frame);
        input.fire = mouse_fire || is_held(&key_frame, &[KeyCode::Char('f'), KeyCode::Char('F')], frame);
        input.cursor = aim;

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32().min(MAX_DT);
        last = now;

        *state = step(state, &input, dt, rng);

        display::render(out, state, &view, aim)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let tuning = match &args.config {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut state = init_state(tuning, args.level);
    log::info!("Rogue Square starting (level {})", args.level.as_str());

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

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

    let result = game_loop(&mut out, &mut state, &rx, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!(
        "Session ended on floor {} with score {}",
        state.floor,
        state.score
    );
    result
}
