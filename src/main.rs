mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use platform_duel::compute::{advance, handle_resize, init_state, reset};
use platform_duel::entities::{Difficulty, GameState, MatchPhase, Winner};
use platform_duel::input::{DoubleTap, MatchInput};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Key bindings ──────────────────────────────────────────────────────────────

const P1_LEFT: &[KeyCode] = &[KeyCode::Char('a'), KeyCode::Char('A')];
const P1_RIGHT: &[KeyCode] = &[KeyCode::Char('d'), KeyCode::Char('D')];
const P1_JUMP: &[KeyCode] = &[KeyCode::Char('w'), KeyCode::Char('W')];
const P1_DOWN: &[KeyCode] = &[KeyCode::Char('z'), KeyCode::Char('Z')];
const P1_SHOOT: &[KeyCode] = &[KeyCode::Char('s'), KeyCode::Char('S')];

// Arrow keys, with numpad-style digit aliases.
const P2_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('4')];
const P2_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('6')];
const P2_JUMP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('8')];
const P2_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('2')];
const P2_SHOOT: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char('5')];

fn jump_key_player(code: &KeyCode) -> Option<usize> {
    if P1_JUMP.contains(code) {
        Some(0)
    } else if P2_JUMP.contains(code) {
        Some(1)
    } else {
        None
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Difficulty),
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  PLATFORM  DUEL  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(7),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy.saturating_sub(5)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select enemy difficulty:"))?;

    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Easy  ", Color::Green,  "Sluggish enemies"),
        ("2", "Medium", Color::Yellow, "Balanced challenge"),
        ("3", "Hard  ", Color::Red,    "Fast, and they respawn in pairs!"),
    ];

    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(3) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(14), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<8}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" — {}", desc)))?;
    }

    let hints: &[&str] = &[
        "P1:  A/D move   W jump   Z crouch   S shoot",
        "P2:  ←/→ move   ↑ jump   ↓ crouch   ENTER shoot",
        "Double-tap jump on the ground for one second of flight.",
        "Crouching makes you immune to shots.  First to 0 lives loses.",
    ];
    for (i, line) in hints.iter().enumerate() {
        out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 2 + i as u16))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*line))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, .. })) = rx.recv() {
            match code {
                KeyCode::Char('1') => return Ok(MenuResult::Start(Difficulty::Easy)),
                KeyCode::Char('2') => return Ok(MenuResult::Start(Difficulty::Medium)),
                KeyCode::Char('3') => return Ok(MenuResult::Start(Difficulty::Hard)),
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
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and sample them all into one `MatchInput`,
/// so both players can hold any key combination simultaneously.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence, which is shorter than the OS repeat interval, so the key stays
///   live while it is actively generating repeats.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    // Double-tap detectors run on a monotonic clock of seconds since the
    // match started; they emit one-shot flight triggers.
    let started = Instant::now();
    let mut double_tap = [DoubleTap::new(), DoubleTap::new()];
    let mut fly_pending = [false, false];

    let mut last_phase = state.phase;
    let mut last_time = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    // Press: record key + handle one-shot actions
                    KeyEventKind::Press => {
                        // Classic terminals report OS key-repeat as more
                        // `Press` events; only a key that had gone stale
                        // counts as a fresh tap for the double-tap machine.
                        let fresh_tap = !is_held(&key_frame, &code, frame);
                        key_frame.insert(code, frame);
                        if fresh_tap {
                            if let Some(pi) = jump_key_player(&code) {
                                if double_tap[pi].press(started.elapsed().as_secs_f32()) {
                                    fly_pending[pi] = true;
                                }
                            }
                        }
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(true);
                            }
                            KeyCode::Char('c')
                                if modifiers.contains(KeyModifiers::CONTROL) =>
                            {
                                return Ok(true);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') => {
                                *state = reset(state, &mut rng);
                                last_phase = state.phase;
                            }
                            // Difficulty is live — the AI reads it next step.
                            KeyCode::Char('e') => state.difficulty = Difficulty::Easy,
                            KeyCode::Char('m') => state.difficulty = Difficulty::Medium,
                            KeyCode::Char('h') => state.difficulty = Difficulty::Hard,
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
                Event::Resize(cols, rows) => {
                    *state = handle_resize(
                        state,
                        cols as f32 * display::CELL_W,
                        rows as f32 * display::CELL_H,
                    );
                }
                _ => {}
            }
        }

        // ── Sample held keys into this frame's input ──────────────────────────
        let mut input = MatchInput::default();
        let bindings = [
            (P1_LEFT, P1_RIGHT, P1_JUMP, P1_DOWN, P1_SHOOT),
            (P2_LEFT, P2_RIGHT, P2_JUMP, P2_DOWN, P2_SHOOT),
        ];
        for (i, (left, right, jump, down, shoot)) in bindings.iter().enumerate() {
            let p = &mut input.players[i];
            p.left = any_held(&key_frame, left, frame);
            p.right = any_held(&key_frame, right, frame);
            p.jump = any_held(&key_frame, jump, frame);
            p.down = any_held(&key_frame, down, frame);
            p.shoot = any_held(&key_frame, shoot, frame);
            p.fly_trigger = std::mem::take(&mut fly_pending[i]);
        }

        let now = Instant::now();
        let frame_time = now.duration_since(last_time).as_secs_f32();
        last_time = now;

        *state = advance(state, &mut input, frame_time, &mut rng);

        // A frame that drained no fixed step leaves the triggers set;
        // re-arm them so the tap fires on the next frame instead of
        // vanishing.
        for (i, p) in input.players.iter().enumerate() {
            if p.fly_trigger {
                fly_pending[i] = true;
            }
        }

        if state.phase == MatchPhase::Ended && last_phase != MatchPhase::Ended {
            on_match_ended(state.winner);
        }
        last_phase = state.phase;

        display::render(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

/// Notification point for the surrounding UI; the end-of-match overlay
/// itself is drawn by the render pass.
fn on_match_ended(_winner: Option<Winner>) {}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start(difficulty) => {
                let (cols, rows) = terminal::size()?;
                let mut state = init_state(
                    difficulty,
                    cols as f32 * display::CELL_W,
                    rows as f32 * display::CELL_H,
                    &mut thread_rng(),
                );
                if game_loop(out, &mut state, rx)? {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
