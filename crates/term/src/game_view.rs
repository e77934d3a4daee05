//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Mode, Phase, Position, COLS, ROWS, TIME_LIMIT_SECS};

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

/// Where the board frame lands for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub start_x: u16,
    pub start_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const DANGER_BG: Rgb = Rgb::new(60, 24, 28);
const SELECTED_BG: Rgb = Rgb::new(250, 250, 250);
const SELECTED_FG: Rgb = Rgb::new(20, 20, 20);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for the block grid.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 4x2 makes the numbered tiles roughly square on typical fonts.
        Self {
            cell_w: 4,
            cell_h: 2,
        }
    }
}

impl GameView {
    /// Cell sizes are clamped to `1..=MAX_CELL_W` and `1..=MAX_CELL_H`.
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL_W),
            cell_h: cell_h.clamp(1, MAX_CELL_H),
        }
    }

    pub fn layout(&self, viewport: Viewport) -> BoardLayout {
        let frame_w = (COLS as u16).saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = (ROWS as u16).saturating_mul(self.cell_h).saturating_add(2);
        BoardLayout {
            start_x: viewport.width.saturating_sub(frame_w.saturating_add(PANEL_MIN_W + 2)) / 2,
            start_y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        }
    }

    /// Map a terminal coordinate to the grid cell drawn there.
    pub fn hit_test(&self, viewport: Viewport, x: u16, y: u16) -> Option<Position> {
        let l = self.layout(viewport);
        let inner_x = x.checked_sub(l.start_x.saturating_add(1))?;
        let inner_y = y.checked_sub(l.start_y.saturating_add(1))?;
        let col = inner_x / self.cell_w;
        let row = inner_y / self.cell_h;
        let pos = Position::new(u8::try_from(row).ok()?, u8::try_from(col).ok()?);
        pos.in_bounds().then_some(pos)
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        if snap.phase == Phase::Start {
            self.draw_start_screen(fb, snap, viewport);
            return;
        }

        let l = self.layout(viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        self.draw_border(fb, l.start_x, l.start_y, l.frame_w, l.frame_h, border);

        for row in 0..ROWS {
            for col in 0..COLS {
                let value = snap.grid[row][col];
                let is_cursor = cursor == Some(Position::new(row as u8, col as u8));
                if value == 0 {
                    self.draw_empty_cell(fb, &l, row, col, is_cursor);
                } else {
                    self.draw_block(fb, &l, row, col, value, snap.is_selected(row, col), is_cursor);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, &l);

        if snap.paused {
            self.draw_overlay(fb, &l, "PAUSED", "P resume");
        } else if snap.phase == Phase::GameOver {
            self.draw_overlay(fb, &l, "GAME OVER", "R again  Esc menu");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, cursor: Option<Position>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_start_screen(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let w = viewport.width;
        let title = CellStyle::new(Rgb::new(255, 210, 90), PANEL_BG).bold();
        let text = CellStyle::default();
        let key = CellStyle::new(Rgb::new(120, 200, 255), PANEL_BG).bold();
        let dim = CellStyle::default().dim();

        let mut y = viewport.height.saturating_sub(14) / 2;
        fb.put_str_centered(0, y, w, "S U M   B L O C K S", title);
        y += 2;
        fb.put_str_centered(0, y, w, "Select blocks that add up to the target.", text);
        y += 2;

        let x = w.saturating_sub(36) / 2;
        fb.put_str(x, y, "1", key);
        fb.put_str(x + 3, y, "Classic  new row after each clear", text);
        y += 1;
        fb.put_str(x, y, "2", key);
        let end = fb.put_str(x + 3, y, "Time     new row every ", text);
        let end = fb.put_u32(end, y, TIME_LIMIT_SECS, text);
        fb.put_char(end, y, 's', text);
        y += 2;

        if snap.high_score > 0 {
            let label = "BEST ";
            let x = w.saturating_sub(label.len() as u16 + 6) / 2;
            let end = fb.put_str(x, y, label, key);
            fb.put_u32(end, y, snap.high_score, text);
        }
        y += 2;

        let tip_w = w.saturating_sub(8).min(48);
        let used = fb.put_wrapped(w.saturating_sub(tip_w) / 2, y, tip_w, 3, &snap.tip, dim);
        y += used + 1;
        fb.put_str_centered(0, y, w, "mouse or arrows + space  |  Q quit", dim);
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);
        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x.saturating_add(dx), y, '─', style);
            fb.put_char(x.saturating_add(dx), bottom, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y.saturating_add(dy), '│', style);
            fb.put_char(right, y.saturating_add(dy), '│', style);
        }
    }

    fn cell_origin(&self, l: &BoardLayout, row: usize, col: usize) -> (u16, u16) {
        (
            l.start_x.saturating_add(1).saturating_add((col as u16).saturating_mul(self.cell_w)),
            l.start_y.saturating_add(1).saturating_add((row as u16).saturating_mul(self.cell_h)),
        )
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, l: &BoardLayout, row: usize, col: usize, is_cursor: bool) {
        let bg = if row == 0 { DANGER_BG } else { BOARD_BG };
        let style = CellStyle::new(Rgb::new(90, 90, 100), bg).dim();
        let (px, py) = self.cell_origin(l, row, col);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(
            px.saturating_add(self.cell_w / 2),
            py.saturating_add((self.cell_h - 1) / 2),
            '·',
            style,
        );
        if is_cursor {
            self.draw_cursor_marks(fb, px, py, CellStyle::new(Rgb::new(255, 255, 255), bg).bold());
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        l: &BoardLayout,
        row: usize,
        col: usize,
        value: u8,
        selected: bool,
        is_cursor: bool,
    ) {
        let style = if selected {
            CellStyle::new(SELECTED_FG, SELECTED_BG).bold()
        } else {
            CellStyle::new(Rgb::new(15, 15, 20), value_color(value)).bold()
        };
        let (px, py) = self.cell_origin(l, row, col);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);

        let ch = char::from_digit(value as u32, 10).unwrap_or('?');
        fb.put_char(
            px.saturating_add(self.cell_w / 2),
            py.saturating_add((self.cell_h - 1) / 2),
            ch,
            style,
        );

        if is_cursor {
            self.draw_cursor_marks(fb, px, py, style);
        }
    }

    fn draw_cursor_marks(&self, fb: &mut FrameBuffer, px: u16, py: u16, style: CellStyle) {
        let mid = py.saturating_add((self.cell_h - 1) / 2);
        fb.put_char(px, mid, '[', style);
        fb.put_char(px.saturating_add(self.cell_w - 1), mid, ']', style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, l: &BoardLayout) {
        let panel_x = l.start_x.saturating_add(l.frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < PANEL_MIN_W / 2 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let accent = CellStyle::new(Rgb::new(255, 210, 90), PANEL_BG).bold();
        let dim = value.dim();

        let mut y = l.start_y;
        fb.put_str(panel_x, y, "TARGET", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.target, accent);
        y += 1;
        let end = fb.put_str(panel_x, y, "sum ", dim);
        fb.put_u32(end, y, snap.selection_sum, value);
        y += 2;

        fb.put_str(panel_x, y, "SCORE", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.score, value);
        y += 2;

        fb.put_str(panel_x, y, "BEST", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.high_score, value);
        y += 2;

        fb.put_str(panel_x, y, "MODE", label);
        y += 1;
        fb.put_str(panel_x, y, snap.mode.label(), value);
        y += 2;

        if snap.mode == Mode::Time {
            fb.put_str(panel_x, y, "TIME", label);
            y += 1;
            let style = if snap.time_left <= 5 {
                CellStyle::new(Rgb::new(240, 90, 90), PANEL_BG).bold()
            } else {
                value
            };
            let end = fb.put_u32(panel_x, y, snap.time_left, style);
            fb.put_char(end, y, 's', style);
            y += 2;
        }

        fb.put_str(panel_x, y, "TIP", label);
        y += 1;
        let tip_w = panel_w.saturating_sub(1).min(30);
        let bottom = l.start_y.saturating_add(l.frame_h);
        let max_lines = bottom.saturating_sub(y.saturating_add(2)).max(1);
        let used = fb.put_wrapped(panel_x, y, tip_w, max_lines, &snap.tip, dim);
        y += used + 1;

        if y < bottom {
            fb.put_str(panel_x, y, "P pause  Esc menu", dim);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, l: &BoardLayout, text: &str, hint: &str) {
        let mid_y = l.start_y.saturating_add(l.frame_h / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let hint_style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let pad = |s: &str| (s.chars().count() as u16).saturating_add(2);
        let box_w = pad(text).max(pad(hint)).min(l.frame_w.saturating_sub(2));
        let box_x = l
            .start_x
            .saturating_add(1)
            .saturating_add(l.frame_w.saturating_sub(2).saturating_sub(box_w) / 2);
        fb.fill_rect(box_x, mid_y.saturating_sub(1), box_w, 3, ' ', style);

        fb.put_str_centered(box_x, mid_y.saturating_sub(1), box_w, text, style);
        fb.put_str_centered(box_x, mid_y.saturating_add(1), box_w, hint, hint_style);
    }
}

/// Minimum side panel width reserved when centering the board.
const PANEL_MIN_W: u16 = 20;

/// Largest cell width in terminal columns.
pub const MAX_CELL_W: u16 = 16;
/// Largest cell height in terminal rows.
pub const MAX_CELL_H: u16 = 8;

fn value_color(value: u8) -> Rgb {
    match value {
        1 => Rgb::new(140, 200, 255),
        2 => Rgb::new(120, 220, 200),
        3 => Rgb::new(130, 220, 130),
        4 => Rgb::new(200, 230, 110),
        5 => Rgb::new(250, 220, 100),
        6 => Rgb::new(255, 180, 90),
        7 => Rgb::new(250, 140, 110),
        8 => Rgb::new(230, 120, 170),
        _ => Rgb::new(190, 140, 240),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_maps_cell_rects() {
        let view = GameView::default();
        let vp = Viewport::new(80, 24);
        let l = view.layout(vp);

        // Top-left interior character is cell (0, 0).
        assert_eq!(view.hit_test(vp, l.start_x + 1, l.start_y + 1), Some(Position::new(0, 0)));
        // Last character of the bottom-right cell.
        assert_eq!(
            view.hit_test(vp, l.start_x + l.frame_w - 2, l.start_y + l.frame_h - 2),
            Some(Position::new((ROWS - 1) as u8, (COLS - 1) as u8))
        );
        // Border and outside.
        assert_eq!(view.hit_test(vp, l.start_x, l.start_y + 1), None);
        assert_eq!(view.hit_test(vp, l.start_x + l.frame_w - 1, l.start_y + 1), None);
        assert_eq!(view.hit_test(vp, 0, 0), None);
    }

    #[test]
    fn oversized_cells_are_clamped_and_render() {
        let view = GameView::new(u16::MAX, u16::MAX);
        let l = view.layout(Viewport::new(u16::MAX, u16::MAX));
        assert_eq!(l.frame_w, COLS as u16 * MAX_CELL_W + 2);
        assert_eq!(l.frame_h, ROWS as u16 * MAX_CELL_H + 2);

        let vp = Viewport::new(80, 24);
        let mut snap = GameSnapshot {
            phase: Phase::GameOver,
            mode: Mode::Time,
            ..GameSnapshot::default()
        };
        snap.grid[ROWS - 1][0] = 7;
        let fb = view.render(&snap, Some(Position::new(0, 0)), vp);
        assert_eq!(fb.width(), 80);

        let hit = view.hit_test(vp, 79, 23);
        assert!(hit.map_or(true, |p| p.in_bounds()));
        assert_eq!(view.hit_test(Viewport::new(u16::MAX, u16::MAX), u16::MAX, u16::MAX), None);
    }

    #[test]
    fn zero_cells_become_one() {
        let view = GameView::new(0, 0);
        let l = view.layout(Viewport::new(80, 24));
        assert_eq!((l.frame_w, l.frame_h), (COLS as u16 + 2, ROWS as u16 + 2));
    }

    #[test]
    fn value_colors_are_distinct() {
        for a in 1..=9u8 {
            for b in (a + 1)..=9u8 {
                assert_ne!(value_color(a), value_color(b), "{} vs {}", a, b);
            }
        }
    }
}
