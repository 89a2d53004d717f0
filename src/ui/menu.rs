use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::{COLOR_BG_SECONDARY, COLOR_TEXT, COLOR_TEXT_BAD};
use crate::ui::hud::format_score;

/// Draws the fail screen as a centered popup over the frozen board.
pub fn render_fail_overlay(frame: &mut Frame<'_>, area: Rect, score: f64) {
    let popup = centered_popup(area, 50, 50);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("FAIL!").style(
            Style::default()
                .fg(COLOR_TEXT_BAD)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score {}", format_score(score))),
        Line::from(""),
        Line::from("R TO REPLAY").style(Style::default().fg(COLOR_TEXT_BAD)),
        Line::from("Q TO QUIT"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(COLOR_TEXT).bg(COLOR_BG_SECONDARY))
            .block(Block::bordered()),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
