//! GameView: draws a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so layouts can be checked in unit tests.

use crate::core::{GameSnapshot, PieceMatrix};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

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

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_WIDTH: u16 = 12;

/// Renders the playfield with a side panel for score, next and hold.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up typical terminal glyphs.
        Self::new(2, 1)
    }
}

/// Board frame rectangle, border included.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_w = BOARD_WIDTH as u16 * self.cell_w;
        let board_h = BOARD_HEIGHT as u16 * self.cell_h;
        let frame = Frame {
            x: viewport.width.saturating_sub(board_w + 2) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(board_h + 2) / 2,
                AnchorY::Top => 0,
            },
            w: board_w + 2,
            h: board_h + 2,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), PLAYFIELD_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, board_w, board_h, ' ', bg);
        draw_border(fb, frame, CellStyle::default());

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                match PieceKind::from_color_index(v) {
                    Some(kind) => self.draw_block(fb, frame, x as i8, y as i8, kind),
                    None => {
                        let dot = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
                        self.fill_cell(fb, frame, x as i8, y as i8, '·', dot);
                    }
                }
            }
        }

        if let Some(active) = snap.active {
            if let Some(ghost_y) = snap.ghost_y.filter(|&g| g != active.y) {
                let ghost = CellStyle::new(Rgb::new(140, 140, 140), PLAYFIELD_BG).dim();
                for (dx, dy, _) in active.matrix.filled() {
                    self.fill_cell(fb, frame, active.x + dx, ghost_y + dy, '░', ghost);
                }
            }
            for (dx, dy, _) in active.matrix.filled() {
                self.draw_block(fb, frame, active.x + dx, active.y + dy, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.paused {
            draw_overlay_text(fb, frame, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, kind: PieceKind) {
        let style = CellStyle::new(Rgb::for_piece(kind), PLAYFIELD_BG).bold();
        self.fill_cell(fb, frame, x, y, '█', style);
    }

    /// Fill one board cell; cells above or outside the field are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, ch: char, style: CellStyle) {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if viewport.width.saturating_sub(panel_x) < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = frame.y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("HIGH", snap.high_score),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        self.draw_preview(fb, panel_x, y + 1, &snap.next_matrix, snap.next, false);
        y = y.saturating_add(4);

        fb.put_str(panel_x, y, "HOLD", label);
        match (snap.hold, snap.hold_matrix) {
            (Some(kind), Some(matrix)) => {
                self.draw_preview(fb, panel_x, y + 1, &matrix, kind, !snap.can_hold)
            }
            _ => {
                fb.put_str(panel_x, y + 1, "-", value);
            }
        }
    }

    /// Draw a piece matrix at terminal position (x, y), skipping empty rows.
    fn draw_preview(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        matrix: &PieceMatrix,
        kind: PieceKind,
        dimmed: bool,
    ) {
        let mut style = CellStyle::new(Rgb::for_piece(kind), Rgb::new(0, 0, 0)).bold();
        if dimmed {
            style = style.dim();
        }
        let first_row = matrix.filled().map(|(_, dy, _)| dy).min().unwrap_or(0);
        for (dx, dy, _) in matrix.filled() {
            let px = x + dx as u16 * self.cell_w;
            let py = y + (dy - first_row) as u16;
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let y = frame.y.saturating_add(frame.h / 2);
    fb.put_str(x, y, text, CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold());
}
