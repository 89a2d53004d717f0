use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::COLOR_TEXT;
use crate::game::GameSession;

const HUD_MARGIN_X: u16 = 1;

/// Renders the one-line HUD and returns the play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, session: &GameSession) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let hud_area = Rect {
        x: hud_area.x.saturating_add(HUD_MARGIN_X),
        width: hud_area.width.saturating_sub(HUD_MARGIN_X.saturating_mul(2)),
        ..hud_area
    };

    let line = hud_line(
        session.score(),
        session.body_segments().len(),
        session.speed(),
        usize::from(hud_area.width),
    );
    frame.render_widget(
        Paragraph::new(Line::from(line)).style(Style::default().fg(COLOR_TEXT)),
        hud_area,
    );

    play_area
}

/// Zero-padded score on the left, length and speed pushed to the right edge.
#[must_use]
pub fn hud_line(score: f64, length: usize, speed: f64, width: usize) -> String {
    let left = format_score(score);
    let right = format!("len {length}  {speed:.1}/s");
    let used = left.width() + right.width();

    if used >= width {
        return left;
    }

    format!("{left}{}{right}", " ".repeat(width - used))
}

/// Whole points, padded to five digits.
#[must_use]
pub fn format_score(score: f64) -> String {
    format!("{:05}", score.max(0.0).floor() as u64)
}

#[cfg(test)]
mod tests {
    use super::{format_score, hud_line};

    #[test]
    fn score_is_floored_and_zero_padded() {
        assert_eq!(format_score(0.0), "00000");
        assert_eq!(format_score(187.96), "00187");
        assert_eq!(format_score(123_456.0), "123456");
    }

    #[test]
    fn hud_line_fills_the_available_width() {
        let line = hud_line(42.5, 3, 6.5, 30);

        assert_eq!(line.len(), 30);
        assert!(line.starts_with("00042"));
        assert!(line.ends_with("len 3  6.5/s"));
    }

    #[test]
    fn narrow_hud_keeps_only_the_score() {
        assert_eq!(hud_line(7.0, 12, 8.0, 10), "00007");
    }
}
