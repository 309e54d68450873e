/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// the state snapshot into terminal commands.  World coordinates are
/// scaled down to terminal cells by a fixed cell size.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use platform_duel::entities::{
    Difficulty, Enemy, EnemySkin, GameState, MatchPhase, Player, Projectile, ProjectileOwner,
    Winner,
};

/// World units per terminal cell.
pub const CELL_W: f32 = 8.0;
pub const CELL_H: f32 = 16.0;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLATFORM: Color = Color::DarkGreen;
const C_P1: Color = Color::Yellow;
const C_P2: Color = Color::Cyan;
const C_FLASH: Color = Color::White;
const C_ENEMY_BRUISER: Color = Color::Red;
const C_ENEMY_COLLECTOR: Color = Color::Magenta;
const C_SHOT_PLAYER: Color = Color::White;
const C_SHOT_ENEMY: Color = Color::DarkRed;
const C_HEART: Color = Color::Red;
const C_HUD: Color = Color::Grey;
const C_HINT: Color = Color::DarkGrey;

fn to_cell(x: f32, y: f32) -> Option<(u16, u16)> {
    if x < 0.0 || y < 0.0 {
        return None;
    }
    Some(((x / CELL_W) as u16, (y / CELL_H) as u16))
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_platforms(out, state)?;

    if state.heart.active {
        draw_heart(out, state)?;
    }
    for enemy in &state.enemies {
        draw_enemy(out, enemy)?;
    }
    for shot in &state.projectiles {
        draw_projectile(out, shot)?;
    }
    for (i, player) in state.players.iter().enumerate() {
        draw_player(out, player, i)?;
    }

    draw_hud(out, state)?;
    draw_controls_hint(out, state)?;

    match state.phase {
        MatchPhase::Countdown => draw_countdown(out, state)?,
        MatchPhase::Ended => draw_match_over(out, state)?,
        MatchPhase::Active => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.flush()?;
    Ok(())
}

// ── Platforms ─────────────────────────────────────────────────────────────────

fn draw_platforms<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_PLATFORM))?;
    for plat in &state.platforms {
        let Some((cx, cy)) = to_cell(plat.x, plat.y) else {
            continue;
        };
        let cols = ((plat.w / CELL_W) as usize).max(1);
        let rows = ((plat.h / CELL_H) as usize).max(1);
        for row in 0..rows {
            out.queue(cursor::MoveTo(cx, cy + row as u16))?;
            out.queue(Print("▓".repeat(cols)))?;
        }
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, player: &Player, index: usize) -> std::io::Result<()> {
    let color = if player.hit_flash > 0.0 {
        C_FLASH
    } else if index == 0 {
        C_P1
    } else {
        C_P2
    };
    out.queue(style::SetForegroundColor(color))?;

    let Some((cx, cy)) = to_cell(player.x, player.y) else {
        return Ok(());
    };

    if player.crouching {
        // Single squat row while crouching.
        out.queue(cursor::MoveTo(cx, cy + 3))?;
        out.queue(Print("▄█▄"))?;
        return Ok(());
    }

    let head = if player.flying { "~◓~" } else { " ◓ " };
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(Print(head))?;
    for row in 1..4 {
        out.queue(cursor::MoveTo(cx, cy + row))?;
        out.queue(Print(if row == 3 { "/█\\" } else { " █ " }))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy) -> std::io::Result<()> {
    let Some((cx, cy)) = to_cell(enemy.x, enemy.y) else {
        return Ok(());
    };
    let (color, top, bottom) = match enemy.skin {
        EnemySkin::Bruiser => (C_ENEMY_BRUISER, "{Ò╦Ó}", "{╩╩╩}"),
        EnemySkin::Collector => (C_ENEMY_COLLECTOR, "<$▼$>", "<╨╨╨>"),
    };
    let color = if enemy.hit_flash > 0.0 { C_FLASH } else { color };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(Print(top))?;
    out.queue(cursor::MoveTo(cx, cy + 1))?;
    out.queue(Print(bottom))?;
    Ok(())
}

fn draw_projectile<W: Write>(out: &mut W, shot: &Projectile) -> std::io::Result<()> {
    let Some((cx, cy)) = to_cell(shot.x, shot.y) else {
        return Ok(());
    };
    let color = match shot.owner {
        ProjectileOwner::Player(_) => C_SHOT_PLAYER,
        ProjectileOwner::Enemy(_) => C_SHOT_ENEMY,
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(Print(if shot.vx >= 0.0 { "»" } else { "«" }))?;
    Ok(())
}

fn draw_heart<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let Some((cx, cy)) = to_cell(state.heart.x, state.heart.y) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_HEART))?;
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(Print("♥"))?;
    Ok(())
}

// ── HUD (top row) ─────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let cols = (state.width / CELL_W) as u16;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_P1))?;
    out.queue(Print(format!(
        "P1  ♥ {:<3} {:>6}",
        state.players[0].lives.max(0),
        state.scores[0]
    )))?;

    let diff_str = match state.difficulty {
        Difficulty::Easy => "[ EASY ]",
        Difficulty::Medium => "[ MEDIUM ]",
        Difficulty::Hard => "[ HARD ]",
    };
    let dx = (cols / 2).saturating_sub(diff_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(dx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(diff_str))?;

    let p2_text = format!(
        "{:>6} ♥ {:<3} P2",
        state.scores[1],
        state.players[1].lives.max(0)
    );
    let rx = cols.saturating_sub(p2_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_P2))?;
    out.queue(Print(&p2_text))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let rows = (state.height / CELL_H) as u16;
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "P1: A/D move  W jump (x2: fly)  Z crouch  S shoot    P2: ←/→  ↑ (x2: fly)  ↓  ENTER    Q: quit",
    ))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_countdown<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let cols = (state.width / CELL_W) as u16;
    let rows = (state.height / CELL_H) as u16;
    let n = state.countdown.ceil() as u32;
    let text = format!("»  {}  «", n);
    out.queue(cursor::MoveTo(
        (cols / 2).saturating_sub(text.chars().count() as u16 / 2),
        rows / 2,
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_match_over<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let verdict = match state.winner {
        Some(Winner::PlayerOne) => "PLAYER 1 WINS!",
        Some(Winner::PlayerTwo) => "PLAYER 2 WINS!",
        Some(Winner::Draw) => "IT'S A DRAW!",
        None => "",
    };
    let score_line = format!(
        "Score  P1: {}   P2: {}",
        state.scores[0], state.scores[1]
    );
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════════╗", Color::Red),
        ("║      MATCH  OVER     ║", Color::Red),
        ("╚══════════════════════╝", Color::Red),
        (verdict, Color::Yellow),
        (&score_line, Color::White),
        ("R - Rematch  Q - Quit", Color::DarkGrey),
    ];

    let cols = (state.width / CELL_W) as u16;
    let rows = (state.height / CELL_H) as u16;
    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
