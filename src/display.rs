/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session.  No game logic is performed; this module only maps world units
/// onto terminal cells and translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{
    GameSession, Obstacle, Player, ScrollingBackground, SessionState, PLAYER_REST_Y, SPRITE_SIZE,
    WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::error::GameError;

pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 10;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_GROUND: Color = Color::DarkYellow;
const C_PEBBLE: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::White;
const C_OBSTACLE: Color = Color::Green;
const C_HUD: Color = Color::Yellow;
const C_PROMPT: Color = Color::Cyan;
const C_GAME_OVER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Sprites (3 rows each, drawn bottom-aligned to the entity's box) ──────────

const PLAYER_RUN: [[&str; 3]; 3] = [
    [" ▄█▀", "▐██ ", " ╯│ "],
    [" ▄█▀", "▐██ ", " │╰ "],
    [" ▄█▀", "▐██ ", " ╯╰ "],
];
const PLAYER_AIR: [&str; 3] = [" ▄█▀", "▐██ ", " ╯╯ "];
const CACTUS: [&str; 3] = [" ╻ ", "┗╋┛", " ┃ "];

/// Width in world units of one background texture bucket.
const PEBBLE_SPACING: f32 = 12.0;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps the 623 × 150 world onto a terminal.  Row 0 holds the HUD and the
/// last row the controls hint; the playfield sits in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Result<Self, GameError> {
        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(GameError::TerminalTooSmall { cols, rows });
        }
        Ok(Self { cols, rows })
    }

    fn field_rows(&self) -> u16 {
        self.rows - 2
    }

    pub fn column(&self, x: f32) -> i32 {
        (x / WORLD_WIDTH * self.cols as f32).floor() as i32
    }

    pub fn row(&self, y: f32) -> i32 {
        1 + (y / WORLD_HEIGHT * self.field_rows() as f32).floor() as i32
    }

    pub fn ground_row(&self) -> i32 {
        self.row(PLAYER_REST_Y + SPRITE_SIZE)
    }

    fn in_field(&self, row: i32) -> bool {
        row >= 1 && row <= self.field_rows() as i32
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameSession, vp: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_background(out, &state.background, vp)?;
    for obstacle in &state.track.obstacles {
        draw_obstacle(out, obstacle, vp)?;
    }
    draw_player(out, &state.player, vp)?;
    draw_hud(out, state, vp)?;

    match state.state {
        SessionState::Idle => draw_idle_prompt(out, vp)?,
        SessionState::Playing => {}
        SessionState::GameOver => draw_game_over(out, vp)?,
    }
    draw_controls_hint(out, vp)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Print `text` starting at `(col, row)`, dropping any characters that fall
/// outside the playfield.
fn put_clipped<W: Write>(
    out: &mut W,
    vp: &Viewport,
    col: i32,
    row: i32,
    text: &str,
) -> std::io::Result<()> {
    if !vp.in_field(row) {
        return Ok(());
    }
    let skip = (-col).max(0) as usize;
    let start = col.max(0);
    let room = (vp.cols as i32 - start).max(0) as usize;
    let visible: String = text.chars().skip(skip).take(room).collect();
    if visible.is_empty() {
        return Ok(());
    }
    out.queue(cursor::MoveTo(start as u16, row as u16))?;
    out.queue(Print(visible))?;
    Ok(())
}

fn centred<W: Write>(
    out: &mut W,
    vp: &Viewport,
    row: i32,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (vp.cols / 2) as i32 - text.chars().count() as i32 / 2;
    out.queue(style::SetForegroundColor(color))?;
    put_clipped(out, vp, col, row, text)
}

/// Cheap deterministic scatter so the ground texture stays put as it scrolls.
fn pebble_at(bucket: u32) -> char {
    match (bucket.wrapping_mul(2_654_435_761) >> 16) % 9 {
        0 => '.',
        1 => ',',
        2 => '`',
        _ => ' ',
    }
}

// ── Background ────────────────────────────────────────────────────────────────

fn draw_background<W: Write>(
    out: &mut W,
    background: &ScrollingBackground,
    vp: &Viewport,
) -> std::io::Result<()> {
    let ground = vp.ground_row();

    out.queue(style::SetForegroundColor(C_GROUND))?;
    put_clipped(out, vp, 0, ground, &"─".repeat(vp.cols as usize))?;

    // Texture repeats every WORLD_WIDTH units, offset by the scroll position.
    let cell = WORLD_WIDTH / vp.cols as f32;
    let pebbles: String = (0..vp.cols)
        .map(|c| {
            let world_x = ((c as f32 + 0.5) * cell - background.x).rem_euclid(WORLD_WIDTH);
            pebble_at((world_x / PEBBLE_SPACING) as u32)
        })
        .collect();
    out.queue(style::SetForegroundColor(C_PEBBLE))?;
    put_clipped(out, vp, 0, ground + 1, &pebbles)?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(
    out: &mut W,
    vp: &Viewport,
    x: f32,
    bottom_y: f32,
    lines: &[&str; 3],
) -> std::io::Result<()> {
    let col = vp.column(x);
    let bottom = vp.row(bottom_y);
    for (i, line) in lines.iter().enumerate() {
        let row = bottom - lines.len() as i32 + i as i32;
        put_clipped(out, vp, col, row, line)?;
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, player: &Player, vp: &Viewport) -> std::io::Result<()> {
    let sprite = if player.y < player.rest_y {
        &PLAYER_AIR
    } else {
        &PLAYER_RUN[player.animation_frame.min(2) as usize]
    };
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    draw_sprite(out, vp, player.x, player.y + player.height, sprite)
}

fn draw_obstacle<W: Write>(out: &mut W, obstacle: &Obstacle, vp: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_OBSTACLE))?;
    draw_sprite(out, vp, obstacle.x, obstacle.y + obstacle.height, &CACTUS)
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameSession, vp: &Viewport) -> std::io::Result<()> {
    let label = format!(
        "HI {} {}",
        state.score.high_score, state.score.current_score
    );
    let col = vp
        .cols
        .saturating_sub(label.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&label))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_idle_prompt<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    centred(out, vp, vp.row(WORLD_HEIGHT / 4.0), "press SPACE to start", C_PROMPT)
}

fn draw_game_over<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    centred(out, vp, vp.row(WORLD_HEIGHT / 4.0), "G A M E  O V E R", C_GAME_OVER)?;
    centred(out, vp, vp.row(WORLD_HEIGHT / 2.0), "press r to reset", C_GAME_OVER)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("SPACE / ↑ : Jump   R : Reset   Q : Quit"))?;
    Ok(())
}
