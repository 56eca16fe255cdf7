//! Rendering layer: all terminal output lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only translates
//! state into terminal commands and maps between world and cell space.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use glam::Vec2;
use rogue_square::compute::status_text;
use rogue_square::config::Tuning;
use rogue_square::entities::{Enemy, EnemyKind, GameState, GameStatus};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::White;
const C_HP_FULL: Color = Color::Red;
const C_HP_EMPTY: Color = Color::DarkRed;
const C_PLAYER: Color = Color::Cyan;
const C_PLAYER_DASH: Color = Color::White;
const C_BULLET: Color = Color::Yellow;
const C_MEDKIT: Color = Color::Green;
const C_AIM: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

fn enemy_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Normal => Color::Red,
        EnemyKind::Fast => Color::Magenta,
        EnemyKind::Tank => Color::DarkRed,
    }
}

fn enemy_glyph(kind: EnemyKind) -> &'static str {
    match kind {
        EnemyKind::Normal => "■",
        EnemyKind::Fast => "◆",
        EnemyKind::Tank => "█",
    }
}

/// Eight-step bar drawn above an enemy, indexed by remaining hp.
const HP_STEPS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Narrowest terminal that still fits the status line.
const MIN_HUD_WIDTH: u16 = 56;
const HP_BAR_CELLS: u16 = 20;

// ── World ↔ cell mapping ──────────────────────────────────────────────────────

/// Interior of the bordered play area, in terminal cells.
///
/// Rows 0..2 hold the status text, row 2 the top border, the last two rows
/// the bottom border and the controls hint.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
    // Border rows, rebuilt only on resize
    top_edge: String,
    bottom_edge: String,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        let cols = width.saturating_sub(2).max(1);
        let line = "─".repeat(cols as usize);
        Self {
            width,
            height,
            left: 1,
            top: 3,
            cols,
            rows: height.saturating_sub(5).max(1),
            top_edge: format!("┌{line}┐"),
            bottom_edge: format!("└{line}┘"),
        }
    }

    /// Whether status text can be shown. When it cannot, only the play
    /// area is drawn and the simulation carries on as usual.
    pub fn hud_available(&self) -> bool {
        self.width >= MIN_HUD_WIDTH && self.height >= 8
    }

    pub fn world_to_cell(&self, pos: Vec2, tuning: &Tuning) -> Option<(u16, u16)> {
        let fx = pos.x / tuning.world_width;
        let fy = pos.y / tuning.world_height;
        if !(0.0..1.0).contains(&fx) || !(0.0..1.0).contains(&fy) {
            return None;
        }
        let col = ((fx * self.cols as f32) as u16).min(self.cols - 1);
        let row = ((fy * self.rows as f32) as u16).min(self.rows - 1);
        Some((self.left + col, self.top + row))
    }

    /// Centre of the world region under a terminal cell.
    pub fn cell_to_world(&self, col: u16, row: u16, tuning: &Tuning) -> Vec2 {
        let c = col.saturating_sub(self.left).min(self.cols - 1) as f32 + 0.5;
        let r = row.saturating_sub(self.top).min(self.rows - 1) as f32 + 0.5;
        Vec2::new(
            c / self.cols as f32 * tuning.world_width,
            r / self.rows as f32 * tuning.world_height,
        )
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
    aim: Vec2,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;

    let t = &state.tuning;
    for p in &state.particles {
        if let Some((c, r)) = view.world_to_cell(p.pos, t) {
            put(out, c, r, enemy_color(p.kind), "·")?;
        }
    }
    for m in &state.medkits {
        if let Some((c, r)) = view.world_to_cell(m.pos, t) {
            put(out, c, r, C_MEDKIT, "+")?;
        }
    }
    for b in &state.bullets {
        if let Some((c, r)) = view.world_to_cell(b.pos, t) {
            put(out, c, r, C_BULLET, "•")?;
        }
    }
    for e in &state.enemies {
        draw_enemy(out, e, view, t)?;
    }
    draw_player(out, state, view)?;

    if state.status == GameStatus::Playing {
        if let Some((c, r)) = view.world_to_cell(aim, t) {
            put(out, c, r, C_AIM, "x")?;
        }
    }

    if view.hud_available() {
        draw_hud(out, state)?;
        draw_controls_hint(out, view)?;
        match state.status {
            GameStatus::Menu | GameStatus::Shop | GameStatus::GameOver => {
                draw_overlay(out, state, view)?;
            }
            GameStatus::Playing => {}
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn put<W: Write>(out: &mut W, col: u16, row: u16, color: Color, s: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(s))?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let bottom = view.top + view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, view.top - 1))?;
    out.queue(Print(&view.top_edge))?;
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(&view.bottom_edge))?;

    for row in view.top..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.left + view.cols, row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── HUD (rows 0-1) ────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let text = status_text(state);
    for (i, line) in text.lines().take(2).enumerate() {
        put(out, 1, i as u16, C_HUD, line)?;
    }

    // Health bar under the status line while playing
    if state.status == GameStatus::Playing {
        let max = state.tuning.player_max_health.max(1) as f32;
        let filled = ((state.player.health as f32 / max) * HP_BAR_CELLS as f32).round() as u16;
        let filled = filled.min(HP_BAR_CELLS);
        out.queue(cursor::MoveTo(1, 1))?;
        out.queue(style::SetForegroundColor(C_HP_FULL))?;
        out.queue(Print("█".repeat(filled as usize)))?;
        out.queue(style::SetForegroundColor(C_HP_EMPTY))?;
        out.queue(Print("░".repeat((HP_BAR_CELLS - filled) as usize)))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let Some((c, r)) = view.world_to_cell(state.player.pos, &state.tuning) else {
        return Ok(());
    };
    let color = if state.player.dash.active {
        C_PLAYER_DASH
    } else {
        C_PLAYER
    };
    put(out, c, r, color, "■")
}

fn draw_enemy<W: Write>(
    out: &mut W,
    enemy: &Enemy,
    view: &Viewport,
    tuning: &Tuning,
) -> std::io::Result<()> {
    let Some((c, r)) = view.world_to_cell(enemy.pos, tuning) else {
        return Ok(());
    };
    let color = enemy_color(enemy.kind);
    put(out, c, r, color, enemy_glyph(enemy.kind))?;

    // Health bar one row up, only once the enemy has been hit
    if enemy.hp < enemy.max_hp && r > view.top {
        let idx = (enemy.hp_ratio() * (HP_STEPS.len() - 1) as f32).round() as usize;
        put(out, c, r - 1, Color::Green, HP_STEPS[idx.min(HP_STEPS.len() - 1)])?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    put(
        out,
        1,
        view.height.saturating_sub(1),
        C_HINT,
        "WASD/↑↓←→ : Move   SPACE : Dash   Mouse/F : Shoot   Q : Quit",
    )
}

// ── Menu / shop / game-over overlay ───────────────────────────────────────────

fn draw_overlay<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let (title, color) = match state.status {
        GameStatus::Menu => ("ROGUE  SQUARE", Color::Cyan),
        GameStatus::Shop => (" FLOOR CLEAR ", Color::Yellow),
        _ => ("  GAME  OVER ", Color::Red),
    };
    let mut lines: Vec<(String, Color)> = vec![
        ("╔════════════════════╗".to_string(), color),
        (format!("║   {:<17}║", title), color),
        ("╚════════════════════╝".to_string(), color),
    ];
    match state.status {
        GameStatus::Menu => {
            lines.push((format!("Difficulty: {}", state.level.as_str()), Color::Yellow));
            lines.push(("1 Easy  2 Medium  3 Hard".to_string(), Color::DarkGrey));
            lines.push(("ENTER - Play".to_string(), Color::White));
        }
        GameStatus::Shop => {
            lines.push((format!("Floor {} cleared", state.floor), Color::Yellow));
            lines.push(("1 +Damage  2 +Speed  3 Heal".to_string(), Color::White));
        }
        _ => {
            lines.push((format!("Final Score: {:>6}", state.score), Color::Yellow));
            lines.push((format!("Floor reached: {}", state.floor), Color::DarkGrey));
            lines.push(("ENTER - Play Again  Q - Quit".to_string(), Color::White));
        }
    }

    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        put(out, col, start_row + i as u16, *color, msg)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_spans_the_play_area() {
        let view = Viewport::new(60, 20);
        assert_eq!(view.top_edge.chars().count(), 60);
        assert!(view.top_edge.starts_with('┌') && view.top_edge.ends_with('┐'));
        assert!(view.bottom_edge.starts_with('└') && view.bottom_edge.ends_with('┘'));
    }

    #[test]
    fn resize_rebuilds_border() {
        let small = Viewport::new(20, 10);
        let large = Viewport::new(80, 24);
        assert_eq!(small.top_edge.chars().count(), 20);
        assert_eq!(large.bottom_edge.chars().count(), 80);
    }

    #[test]
    fn cell_round_trip_lands_in_same_cell() {
        let view = Viewport::new(80, 24);
        let tuning = Tuning::default();
        let pos = view.cell_to_world(10, 7, &tuning);
        assert_eq!(view.world_to_cell(pos, &tuning), Some((10, 7)));
    }
}
