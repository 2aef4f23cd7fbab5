/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable `RenderState`.
/// No game logic is performed; this module only translates the snapshot
/// into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use grid_invaders::entities::{Entity, EntityKind, Outcome, RenderState, RuleSet, Shot, ShotKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_TITLE: Color = Color::Cyan;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_STATS: Color = Color::Grey;
const C_PLAYER: Color = Color::White;
const C_PLAYER_ROW: Color = Color::DarkGrey;
const C_DESTROYABLE: Color = Color::Red;
const C_COLLECTABLE: Color = Color::Green;
const C_BLOCKER: Color = Color::DarkYellow;
const C_SHOT_DESTROY: Color = Color::Cyan;
const C_SHOT_COLLECT: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

// ── Screen geometry ───────────────────────────────────────────────────────────

/// Terminal columns per grid cell.
const CELL_W: u16 = 3;
/// Top-left corner of the grid (inside the border).
const ORIGIN_X: u16 = 2;
const ORIGIN_Y: u16 = 3;

fn cell_origin(row: usize, col: usize) -> (u16, u16) {
    (ORIGIN_X + col as u16 * CELL_W, ORIGIN_Y + row as u16)
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, view: &RenderState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_title(out, view)?;
    draw_border(out, view)?;
    draw_player_row(out, view)?;

    for entity in &view.entities {
        draw_entity(out, entity)?;
    }
    // Shots last so a shot passing through an entity stays visible.
    for shot in &view.shots {
        draw_shot(out, shot)?;
    }

    let below = ORIGIN_Y + view.rows as u16 + 1;
    draw_hud(out, view, below + 1)?;
    draw_controls_hint(out, below + 3)?;

    if view.outcome != Outcome::InProgress {
        draw_game_over(out, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, below + 4))?;
    out.flush()?;
    Ok(())
}

// ── Frame ─────────────────────────────────────────────────────────────────────

fn draw_title<W: Write>(out: &mut W, view: &RenderState) -> std::io::Result<()> {
    let tag = match view.rules {
        RuleSet::Basic => "[ TASK 1 ]",
        RuleSet::Advanced => "[ TASK 2 ]",
        RuleSet::Lives => "[ TASK 3 ]",
    };
    out.queue(cursor::MoveTo(ORIGIN_X, 0))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(format!("GRID INVADERS  {}", tag)))?;
    Ok(())
}

fn draw_border<W: Write>(out: &mut W, view: &RenderState) -> std::io::Result<()> {
    let inner = view.cols * CELL_W as usize;
    let left = ORIGIN_X - 1;
    let right = ORIGIN_X + inner as u16;

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(left, ORIGIN_Y - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;
    out.queue(cursor::MoveTo(left, ORIGIN_Y + view.rows as u16))?;
    out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;

    for row in 0..view.rows as u16 {
        out.queue(cursor::MoveTo(left, ORIGIN_Y + row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(right, ORIGIN_Y + row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

fn draw_player_row<W: Write>(out: &mut W, view: &RenderState) -> std::io::Result<()> {
    let (x, y) = cell_origin(0, 0);
    out.queue(cursor::MoveTo(x, y))?;
    out.queue(style::SetForegroundColor(C_PLAYER_ROW))?;
    out.queue(Print("░".repeat(view.cols * CELL_W as usize)))?;

    let (px, py) = cell_origin(0, view.player_col);
    out.queue(cursor::MoveTo(px, py))?;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(Print("/▼\\"))?;
    Ok(())
}

// ── Occupants ─────────────────────────────────────────────────────────────────

fn draw_entity<W: Write>(out: &mut W, entity: &Entity) -> std::io::Result<()> {
    let color = match entity.kind {
        EntityKind::Destroyable => C_DESTROYABLE,
        EntityKind::Collectable => C_COLLECTABLE,
        EntityKind::Blocker => C_BLOCKER,
    };
    let (x, y) = cell_origin(entity.row, entity.col);
    out.queue(cursor::MoveTo(x, y))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(format!("[{}]", entity.kind.symbol())))?;
    Ok(())
}

fn draw_shot<W: Write>(out: &mut W, shot: &Shot) -> std::io::Result<()> {
    // A fresh shot still sits on the player; nothing to draw yet.
    if shot.row == 0 {
        return Ok(());
    }
    let (symbol, color) = match shot.kind {
        ShotKind::Destroy => ("║", C_SHOT_DESTROY),
        ShotKind::Collect => ("◊", C_SHOT_COLLECT),
    };
    let (x, y) = cell_origin(shot.row, shot.col);
    out.queue(cursor::MoveTo(x + 1, y))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(symbol))?;
    Ok(())
}

// ── HUD (below the grid) ──────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &RenderState, row: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(ORIGIN_X, row))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Collected:{:>3}/{}  ",
        view.collected, view.collection_target
    )))?;

    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("Lives:{}", "♥".repeat(view.lives as usize))))?;

    out.queue(cursor::MoveTo(ORIGIN_X, row + 1))?;
    out.queue(style::SetForegroundColor(C_HUD_STATS))?;
    out.queue(Print(format!(
        "Destroyed:{:>3}  Shots:{:>4}  Ticks:{:>5}",
        view.destroyed, view.shots_fired, view.tick_count
    )))?;
    Ok(())
}

// ── Controls hint ─────────────────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, row: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(ORIGIN_X, row))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Rotate   W / SPACE : Destroy   S / ENTER : Collect   Q : Quit",
    ))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, view: &RenderState) -> std::io::Result<()> {
    let (banner, color) = match view.outcome {
        Outcome::Won => ("║     YOU  WON!      ║", Color::Green),
        _ => ("║    GAME  OVER      ║", Color::Red),
    };
    let lines: [&str; 3] = [
        "╔════════════════════╗",
        banner,
        "╚════════════════════╝",
    ];
    let hint = "R - Play Again  Q - Quit";

    let cx = ORIGIN_X + (view.cols as u16 * CELL_W) / 2;
    let start_row = ORIGIN_Y + (view.rows as u16 / 2).saturating_sub(2);

    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*line))?;
    }

    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, start_row + lines.len() as u16))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;
    Ok(())
}
