use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::{GridSize, PALETTE};

/// Values shown on the status row under the board.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub score: usize,
    pub length: usize,
    pub bounds: GridSize,
}

/// Renders the one-line status row into `area`.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, info: HudInfo) {
    frame.render_widget(
        Paragraph::new(status_line(info))
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn status_line(info: HudInfo) -> Line<'static> {
    let value = Style::default().fg(PALETTE.score);

    Line::from(vec![
        Span::raw("Length: "),
        Span::styled(info.length.to_string(), value),
        Span::raw(" | "),
        Span::raw(format!("{}x{}", info.bounds.width, info.bounds.height)),
        Span::raw(" | "),
        Span::raw("Score: "),
        Span::styled(info.score.to_string(), value),
    ])
}
