use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    CELL_COLUMNS, COLOR_BG_PRIMARY, COLOR_BG_SECONDARY, COLOR_GOAL, COLOR_SNAKE_HEAD, COLOR_TEXT,
    GLYPH_CELL, GLYPH_GOAL, GridSize, SNAKE_BODY_FADE_STEP, SNAKE_BODY_RGB,
};
use crate::game::GameSession;
use crate::grid::Cell;
use crate::ui::hud::render_hud;
use crate::ui::menu::render_fail_overlay;

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, session: &GameSession) {
    let area = frame.area();
    let play_area = render_hud(frame, area, session);

    let block = Block::bordered().border_style(Style::new().fg(COLOR_TEXT));
    let board = board_rect(block.inner(play_area), session.size());
    let frame_rect = Rect {
        x: board.x.saturating_sub(1),
        y: board.y.saturating_sub(1),
        width: board.width.saturating_add(2),
        height: board.height.saturating_add(2),
    }
    .intersection(play_area);
    frame.render_widget(block, frame_rect);

    render_background(frame, board, session.size());
    render_goals(frame, board, session);
    render_snake(frame, board, session);

    if session.is_over() {
        render_fail_overlay(frame, play_area, session.score());
    }
}

fn render_background(frame: &mut Frame<'_>, board: Rect, size: GridSize) {
    let buffer = frame.buffer_mut();
    for y in 0..i32::from(size.height) {
        for x in 0..i32::from(size.width) {
            let Some((column, row)) = cell_to_terminal(board, Cell::new(x, y)) else {
                continue;
            };
            let shade = if (x + y) % 2 == 0 {
                COLOR_BG_PRIMARY
            } else {
                COLOR_BG_SECONDARY
            };
            buffer.set_string(column, row, GLYPH_CELL, Style::new().fg(shade));
        }
    }
}

fn render_goals(frame: &mut Frame<'_>, board: Rect, session: &GameSession) {
    let buffer = frame.buffer_mut();
    for goal in session.goal_cells() {
        let Some((column, row)) = cell_to_terminal(board, goal) else {
            continue;
        };
        buffer.set_string(column, row, GLYPH_GOAL, Style::new().fg(COLOR_GOAL));
    }
}

fn render_snake(frame: &mut Frame<'_>, board: Rect, session: &GameSession) {
    let segments = session.body_segments();
    let length = segments.len();

    let buffer = frame.buffer_mut();
    for (index, segment) in segments.iter().enumerate() {
        let Some((column, row)) = cell_to_terminal(board, *segment) else {
            continue;
        };

        let style = if index + 1 == length {
            Style::new()
                .fg(COLOR_SNAKE_HEAD)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(body_color(index, length))
        };
        buffer.set_string(column, row, GLYPH_CELL, style);
    }
}

/// Body colour for segment `index` (tail is 0); darker toward the tail.
#[must_use]
pub fn body_color(index: usize, length: usize) -> Color {
    let distance = length.saturating_sub(index);
    let fade = u8::try_from(distance.saturating_mul(usize::from(SNAKE_BODY_FADE_STEP)))
        .unwrap_or(u8::MAX);
    let (r, g, b) = SNAKE_BODY_RGB;

    Color::Rgb(
        r.saturating_sub(fade),
        g.saturating_sub(fade),
        b.saturating_sub(fade),
    )
}

/// Centres a `size` board inside `area`, clipped to what fits.
#[must_use]
pub fn board_rect(area: Rect, size: GridSize) -> Rect {
    let width = size.width.saturating_mul(CELL_COLUMNS).min(area.width);
    let height = size.height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Terminal column and row of the left half of `cell`, if it is on screen.
#[must_use]
pub fn cell_to_terminal(board: Rect, cell: Cell) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(cell.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let column = board.x.checked_add(x_offset)?;
    let row = board.y.checked_add(y_offset)?;
    if column.saturating_add(CELL_COLUMNS) > board.right() || row >= board.bottom() {
        return None;
    }

    Some((column, row))
}
