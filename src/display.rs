/// Rendering layer.  All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  Scenery is laid out in the 1280x720
/// virtual space and scaled down to whatever terminal we have.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use pumpkin_patch::compute::{completed_rounds, face_layer, shake_amplitude};
use pumpkin_patch::config::GameConfig;
use pumpkin_patch::entities::{
    Cloud, Cue, EyeDirection, FaceLayer, GameState, GameStatus, Moon, Owl,
};
use pumpkin_patch::scenery::{owl_eyes_shown, spirit_alpha};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_ROUND: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_CLOCK: Color = Color::Cyan;
const C_PUMPKIN: Color = Color::DarkYellow;
const C_STEM: Color = Color::DarkGreen;
const C_FACE_FAINT: Color = Color::DarkGrey;
const C_FACE: Color = Color::Yellow;
const C_FACE_EVIL: Color = Color::Red;
const C_HOLE: Color = Color::DarkGrey;
const C_SPIRIT: Color = Color::White;
const C_MOON: Color = Color::White;
const C_CLOUD: Color = Color::Grey;
const C_OWL: Color = Color::DarkYellow;
const C_STATUS: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

/// Centre of the moon's orbit and its radius, in virtual pixels.  The pivot
/// sits below the bottom edge so the visible part of the orbit is a shallow
/// arc peaking at the top of the screen.
const MOON_PIVOT: (f32, f32) = (640.0, -132.0);
const MOON_RADIUS: f32 = 852.0;

const PUMPKIN_WIDTH: u16 = 9;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.  `frame` drives the pumpkin wobble.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    frame: u64,
    status_line: &str,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let sky_rows = height.saturating_sub(8);
    draw_moon(out, &state.scenery.moon, width, sky_rows)?;
    for cloud in &state.scenery.clouds {
        draw_cloud(out, cloud, width, sky_rows)?;
    }
    for owl in &state.scenery.owls {
        draw_owl(out, owl, width, sky_rows)?;
    }

    draw_pumpkins(out, state, frame, width, height)?;
    draw_spirits(out, state, width, height)?;
    draw_hud(out, state, width)?;
    draw_status(out, status_line, height)?;
    draw_controls_hint(out, state, height)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Text for the status line, for the cues worth telling the player about.
pub fn cue_message(cue: &Cue) -> Option<String> {
    match cue {
        Cue::HissStart { slot } => Some(format!("Pumpkin {} hisses...", slot + 1)),
        Cue::Exorcised { slot } => Some(format!("Pumpkin {} exorcised!", slot + 1)),
        Cue::TooEarly { slot } => Some(format!("Too early on pumpkin {}!", slot + 1)),
        Cue::TooLate { slot } => Some(format!("Pumpkin {} is already empty", slot + 1)),
        Cue::SpiritEscaped { slot } => Some(format!("A spirit escaped from pumpkin {}!", slot + 1)),
        Cue::RoundAdvanced { round } => Some(format!("Round {round}")),
        Cue::OwlPoked { .. } => Some("Hoo!".to_string()),
        Cue::Thump | Cue::HissStop { .. } | Cue::LifeLost { .. } | Cue::GameOver { .. } => None,
    }
}

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Virtual x → terminal column, or `None` if off screen.
fn to_col(x: f32, width: u16) -> Option<u16> {
    let col = x / GameConfig::VIRTUAL_WIDTH * width as f32;
    if col < 0.0 || col >= width as f32 {
        None
    } else {
        Some(col as u16)
    }
}

/// Virtual y (0 at the bottom) → terminal row inside the sky band.
fn to_sky_row(y: f32, sky_rows: u16) -> Option<u16> {
    let row = (GameConfig::VIRTUAL_HEIGHT - y) / GameConfig::VIRTUAL_HEIGHT * sky_rows as f32;
    if row < 0.0 || row >= sky_rows as f32 {
        None
    } else {
        // Row 0 is the HUD
        Some(row as u16 + 1)
    }
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_ROUND))?;
    if state.high_round > 0 {
        out.queue(Print(format!("Round:{:>3}  Best:{:>3}", state.round, state.high_round)))?;
    } else {
        out.queue(Print(format!("Round:{:>3}", state.round)))?;
    }

    let clock = format!("[ {:>2}s ]", state.round_time_left.max(0.0).ceil() as u32);
    out.queue(cursor::MoveTo((width / 2).saturating_sub(clock.len() as u16 / 2), 0))?;
    out.queue(style::SetForegroundColor(C_HUD_CLOCK))?;
    out.queue(Print(&clock))?;

    let lives_str = format!("Lives:{}", "♥".repeat(state.lives as usize));
    let rx = width.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;
    Ok(())
}

// ── Scenery ───────────────────────────────────────────────────────────────────

fn draw_moon<W: Write>(out: &mut W, moon: &Moon, width: u16, sky_rows: u16) -> std::io::Result<()> {
    let rad = moon.angle.to_radians();
    let x = MOON_PIVOT.0 - MOON_RADIUS * rad.sin();
    let y = MOON_PIVOT.1 + MOON_RADIUS * rad.cos();
    if let (Some(col), Some(row)) = (to_col(x, width), to_sky_row(y.min(700.0), sky_rows)) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_MOON))?;
        out.queue(Print("◯"))?;
    }
    Ok(())
}

fn draw_cloud<W: Write>(out: &mut W, cloud: &Cloud, width: u16, sky_rows: u16) -> std::io::Result<()> {
    let Some(row) = to_sky_row(cloud.y, sky_rows) else {
        return Ok(());
    };
    let start = cloud.x / GameConfig::VIRTUAL_WIDTH * width as f32;
    let span = (cloud.width / GameConfig::VIRTUAL_WIDTH * width as f32).max(1.0);
    let first = start.max(0.0) as u16;
    let last = (start + span).min(width as f32);
    if last <= 0.0 || first >= width {
        return Ok(());
    }
    out.queue(cursor::MoveTo(first, row))?;
    out.queue(style::SetForegroundColor(C_CLOUD))?;
    out.queue(Print("░".repeat((last as u16).saturating_sub(first) as usize)))?;
    Ok(())
}

fn draw_owl<W: Write>(out: &mut W, owl: &Owl, width: u16, sky_rows: u16) -> std::io::Result<()> {
    let (Some(col), Some(row)) = (to_col(owl.x, width), to_sky_row(owl.y, sky_rows)) else {
        return Ok(());
    };
    let face = match owl_eyes_shown(owl) {
        None => "(-v-)",
        Some(EyeDirection::Down) => "(o,o)",
        Some(EyeDirection::Left) => "(°v )",
        Some(EyeDirection::Right) => "( v°)",
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_OWL))?;
    out.queue(Print(face))?;
    Ok(())
}

// ── Pumpkins ──────────────────────────────────────────────────────────────────

fn slot_col(slot: usize, count: usize, width: u16) -> u16 {
    let spacing = width / (count as u16 + 1);
    (spacing * (slot as u16 + 1)).saturating_sub(PUMPKIN_WIDTH / 2)
}

fn draw_pumpkins<W: Write>(
    out: &mut W,
    state: &GameState,
    frame: u64,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let top = height.saturating_sub(7);
    for (slot, pumpkin) in state.pumpkins.iter().enumerate() {
        // Wobble one column either way; faster and wider when possessed
        let amplitude = shake_amplitude(pumpkin);
        let period = if amplitude > 1.0 { 2 } else { 4 };
        let offset = if amplitude > 0.5 && (frame / period) % 2 == 0 { 1 } else { 0 };
        let col = slot_col(slot, state.pumpkins.len(), width) + offset;

        out.queue(cursor::MoveTo(col, top))?;
        out.queue(style::SetForegroundColor(C_STEM))?;
        out.queue(Print("    )    "))?;

        out.queue(cursor::MoveTo(col, top + 1))?;
        out.queue(style::SetForegroundColor(C_PUMPKIN))?;
        out.queue(Print(" .-'-'-. "))?;

        out.queue(cursor::MoveTo(col, top + 2))?;
        out.queue(Print("("))?;
        let (face, color) = match face_layer(pumpkin) {
            FaceLayer::None => ("       ", C_PUMPKIN),
            FaceLayer::Carved { alpha, .. } if alpha < 0.34 => ("  . .  ", C_FACE_FAINT),
            FaceLayer::Carved { alpha, .. } if alpha < 0.67 => ("  o o  ", C_FACE_FAINT),
            FaceLayer::Carved { .. } => ("  ^ ^  ", C_FACE),
            FaceLayer::Evil { .. } => (" >\\ /< ", C_FACE_EVIL),
            FaceLayer::Hole { alpha } if alpha > 0.5 => ("  (@)  ", C_HOLE),
            FaceLayer::Hole { .. } => ("  ( )  ", C_HOLE),
        };
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(face))?;
        out.queue(style::SetForegroundColor(C_PUMPKIN))?;
        out.queue(Print(")"))?;

        out.queue(cursor::MoveTo(col, top + 3))?;
        let mouth = match face_layer(pumpkin) {
            FaceLayer::Evil { .. } => "(  VVV  )",
            FaceLayer::Carved { alpha, .. } if alpha >= 0.67 => "(  ~~~  )",
            _ => "(       )",
        };
        out.queue(Print(mouth))?;

        out.queue(cursor::MoveTo(col, top + 4))?;
        out.queue(Print(" `-----' "))?;

        out.queue(cursor::MoveTo(col + PUMPKIN_WIDTH / 2 - 1, top + 5))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!("[{}]", slot + 1)))?;
    }
    Ok(())
}

fn draw_spirits<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let top = height.saturating_sub(7);
    for spirit in &state.spirits {
        if spirit_alpha(spirit) < 0.2 {
            continue;
        }
        let rise = (spirit.age * 4.0) as u16 + 1;
        let col = slot_col(spirit.slot, state.pumpkins.len(), width) + PUMPKIN_WIDTH / 2 - 1;
        out.queue(cursor::MoveTo(col, top.saturating_sub(rise)))?;
        out.queue(style::SetForegroundColor(C_SPIRIT))?;
        out.queue(Print("~o~"))?;
    }
    Ok(())
}

// ── Status & controls (last rows) ─────────────────────────────────────────────

fn draw_status<W: Write>(out: &mut W, status_line: &str, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(2)))?;
    out.queue(style::SetForegroundColor(C_STATUS))?;
    out.queue(Print(status_line))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(format!(
        "1-{} : Tap pumpkin   O : Poke owl   Q : Quit",
        state.pumpkins.len()
    )))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let reached = completed_rounds(state);
    let round_line = format!("Rounds survived: {:>3}", reached);
    let new_best = reached > state.high_round;
    let best_line = if new_best {
        format!("★ NEW BEST: {:>3} ★", reached)
    } else {
        format!("Best:            {:>3}", state.high_round)
    };

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let best_color = if new_best { Color::Yellow } else { Color::DarkGrey };

    let cx = width / 2;
    let total_rows = lines.len() + 3;
    let start_row = (height / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let round_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(round_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, round_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&round_line))?;

    let best_row = round_row + 1;
    let col = cx.saturating_sub(best_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, best_row))?;
    out.queue(style::SetForegroundColor(best_color))?;
    out.queue(Print(&best_line))?;

    let hint = "R - Menu  Q - Quit";
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, best_row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
