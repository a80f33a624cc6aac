//! GameView: maps a `GameSession` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::RandomSource;
use crate::engine::GameSession;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::input::ControlBinding;
use crate::matrix::{visible_matrix, RenderCell};
use crate::types::{GameStatus, PieceKind, BOARD_WIDTH, BUFFER_ROWS, VISIBLE_ROWS};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const BUFFER_BG: Rgb = Rgb::new(18, 18, 24);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Block color for a piece kind
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0x7d, 0xe7, 0xf9),
        PieceKind::O => Rgb::new(0xf9, 0xe8, 0x6f),
        PieceKind::T => Rgb::new(0xc3, 0x8b, 0xff),
        PieceKind::S => Rgb::new(0x7d, 0xfa, 0x9f),
        PieceKind::Z => Rgb::new(0xff, 0x7d, 0x7d),
        PieceKind::J => Rgb::new(0x86, 0x9b, 0xff),
        PieceKind::L => Rgb::new(0xff, 0xb4, 0x6d),
    }
}

/// A lightweight terminal renderer for the playfield and side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    /// Pre-formatted help lines, e.g. `← A  Move Left`
    controls: Vec<String>,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
            controls: Vec::new(),
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Replace the help lines shown under the side panel.
    pub fn set_controls(&mut self, bindings: &[ControlBinding]) {
        self.controls = bindings
            .iter()
            .map(|b| format!("{:<9}{}", b.display.join(" "), b.description))
            .collect();
    }

    /// Outer size of the bordered playfield in terminal cells
    pub fn frame_size(&self) -> (u16, u16) {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (VISIBLE_ROWS as u16) * self.cell_h + 2;
        (w, h)
    }

    /// Render the session into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into<R: RandomSource>(
        &self,
        session: &GameSession<R>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        let matrix = visible_matrix(session);
        for (row, cells) in matrix.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                self.draw_cell(fb, start_x, start_y, col as u16, row as u16, *cell);
            }
        }

        self.draw_side_panel(fb, session, viewport, start_x + frame_w + 2, start_y);

        match session.status() {
            GameStatus::Idle => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, &["PRESS ENTER", "TO START"])
            }
            GameStatus::Paused => self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, &["PAUSED"]),
            GameStatus::Over => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, &["GAME OVER", "ENTER: AGAIN"])
            }
            GameStatus::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render<R: RandomSource>(&self, session: &GameSession<R>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(session, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        let right = x + w - 1;
        let bottom = y + h - 1;

        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, bottom, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(right, y + dy, '│', style);
        }
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, col: u16, row: u16, cell: RenderCell) {
        let bg = if row < BUFFER_ROWS as u16 { BUFFER_BG } else { BOARD_BG };

        let (ch, style) = match cell.value {
            Some(kind) if cell.is_ghost => (
                '░',
                CellStyle {
                    dim: true,
                    ..CellStyle::plain(piece_color(kind), bg)
                },
            ),
            Some(kind) => (
                '█',
                CellStyle {
                    bold: cell.is_active,
                    ..CellStyle::plain(piece_color(kind), bg)
                },
            ),
            None if row < BUFFER_ROWS as u16 => (' ', CellStyle::plain(BUFFER_BG, bg)),
            None => (
                '·',
                CellStyle {
                    dim: true,
                    ..CellStyle::plain(Rgb::new(90, 90, 100), bg)
                },
            ),
        };

        let px = start_x + 1 + col * self.cell_w;
        let py = start_y + 1 + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel<R: RandomSource>(
        &self,
        fb: &mut FrameBuffer,
        session: &GameSession<R>,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG)
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = CellStyle { dim: true, ..value };

        let stats = session.statistics();
        let mut y = start_y;
        for (name, n) in [
            ("SCORE", stats.score),
            ("BEST", stats.best_score),
            ("LEVEL", stats.level),
            ("LINES", stats.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y += 3;
        }

        let state = session.state();
        fb.put_str(panel_x, y, "HOLD", label);
        match state.hold() {
            Some(kind) => {
                let style = if state.can_hold() {
                    CellStyle::plain(piece_color(kind), PANEL_BG)
                } else {
                    dim
                };
                fb.put_str(panel_x, y + 1, kind.letter(), style);
            }
            None => {
                fb.put_str(panel_x, y + 1, "-", dim);
            }
        }
        y += 3;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        for kind in session.queue_preview() {
            fb.put_str(panel_x, y, kind.letter(), CellStyle::plain(piece_color(kind), PANEL_BG));
            y += 1;
        }
        y += 1;

        let settings = session.settings();
        let on_off = |on: bool| if on { "on" } else { "off" };
        let mut x = fb.put_str(panel_x, y, "F2 ghost ", dim);
        fb.put_str(x, y, on_off(settings.ghost_piece_enabled), value);
        y += 1;
        x = fb.put_str(panel_x, y, "F3 hard drop ", dim);
        fb.put_str(x, y, on_off(settings.hard_drop_enabled), value);
        y += 1;
        x = fb.put_str(panel_x, y, "F4 j/k swap ", dim);
        fb.put_str(x, y, on_off(settings.jk_rotation_reversed), value);
        y += 2;

        if y as usize + self.controls.len() < viewport.height as usize {
            for line in &self.controls {
                fb.put_str(panel_x, y, line, dim);
                y += 1;
            }
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG)
        };
        let top = start_y + frame_h / 2 - (lines.len() as u16) / 2;
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = start_x + frame_w.saturating_sub(text_w) / 2;
            fb.put_str(x, top + i as u16, text, style);
        }
    }
}
