use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::config::PALETTE;
use crate::session::Outcome;
use crate::snake::DeathReason;

pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const BOARD_CLEARED_TEXT: &str = "BOARD CLEARED";
pub const RESTART_HINT_TEXT: &str = "PRESS 'R' TO PLAY AGAIN";

/// Columns the game-over popup needs, borders and padding included.
#[must_use]
pub fn game_over_popup_width() -> u16 {
    let widest = [GAME_OVER_TEXT, BOARD_CLEARED_TEXT, RESTART_HINT_TEXT]
        .iter()
        .map(|text| text.width())
        .max()
        .unwrap_or(0);

    u16::try_from(widest + 4).unwrap_or(u16::MAX)
}

/// Rows the game-over popup needs, borders included.
pub const GAME_OVER_POPUP_HEIGHT: u16 = 7;

/// Draws the end-of-game popup centred over `area`.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, outcome: Outcome, score: usize) {
    let popup = centered_popup(area, game_over_popup_width(), GAME_OVER_POPUP_HEIGHT);
    frame.render_widget(Clear, popup);

    let headline = match outcome {
        Outcome::Died(_) => GAME_OVER_TEXT,
        Outcome::BoardCleared => BOARD_CLEARED_TEXT,
    };
    let cause = match outcome {
        Outcome::Died(DeathReason::WallCollision) => "hit the wall",
        Outcome::Died(DeathReason::SelfCollision) => "hit yourself",
        Outcome::BoardCleared => "no room left",
    };

    let lines = vec![
        Line::styled(
            headline,
            Style::new()
                .fg(PALETTE.game_over)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(format!("Score: {score}")),
        Line::styled(cause, Style::new().fg(PALETTE.hint)),
        Line::from(""),
        Line::styled(RESTART_HINT_TEXT, Style::new().fg(PALETTE.hint)),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered()),
        popup,
    );
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
