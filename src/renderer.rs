use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::config::{CELL_COLUMNS, GLYPH_FOOD, GLYPH_SNAKE, GridSize, PALETTE};
use crate::session::Session;
use crate::snake::Position;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{GAME_OVER_POPUP_HEIGHT, game_over_popup_width, render_game_over_menu};

/// Rows taken by the status line under the board.
const HUD_HEIGHT: u16 = 1;

/// Renders the full game frame from the session's current state.
pub fn render(frame: &mut Frame<'_>, session: &Session) {
    let area = frame.area();
    let bounds = session.bounds();
    let (board_width, board_height) = board_size(bounds);

    if area.width < board_width || area.height < board_height + HUD_HEIGHT {
        render_resize_hint(frame, area, board_width, board_height + HUD_HEIGHT);
        return;
    }

    let board = Rect {
        x: area.x + (area.width - board_width) / 2,
        y: area.y + (area.height - board_height - HUD_HEIGHT) / 2,
        width: board_width,
        height: board_height,
    };

    let block = Block::bordered()
        .title(" snake ")
        .border_style(Style::new().fg(PALETTE.border));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    let state = session.state();
    render_snake(frame, inner, bounds, state.snake.segments());
    if let Some(food) = state.food {
        render_food(frame, inner, bounds, food);
    }

    let hud_area = Rect {
        y: board.bottom(),
        height: HUD_HEIGHT,
        ..board
    };
    render_hud(
        frame,
        hud_area,
        HudInfo {
            score: session.score(),
            length: state.snake.len(),
            bounds,
        },
    );

    if let Some(outcome) = session.outcome() {
        render_game_over_menu(frame, board, outcome, session.score());
    }
}

/// Terminal size of the bordered board, at least wide and tall enough for
/// the game-over popup.
#[must_use]
pub fn board_size(bounds: GridSize) -> (u16, u16) {
    let width = bounds
        .width
        .saturating_mul(CELL_COLUMNS)
        .saturating_add(2)
        .max(game_over_popup_width());
    let height = bounds
        .height
        .saturating_add(2)
        .max(GAME_OVER_POPUP_HEIGHT);

    (width, height)
}

fn render_snake<'a>(
    frame: &mut Frame<'_>,
    inner: Rect,
    bounds: GridSize,
    segments: impl Iterator<Item = &'a Position>,
) {
    let style = Style::new().fg(PALETTE.snake);
    let buffer = frame.buffer_mut();

    for segment in segments {
        // A dead snake's head may sit just outside the board.
        let Some((x, y)) = logical_to_terminal(inner, bounds, *segment) else {
            continue;
        };
        buffer.set_string(x, y, GLYPH_SNAKE, style);
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, bounds: GridSize, food: Position) {
    let Some((x, y)) = logical_to_terminal(inner, bounds, food) else {
        return;
    };

    let style = Style::new().fg(PALETTE.food).add_modifier(Modifier::BOLD);
    frame.buffer_mut().set_string(x, y, GLYPH_FOOD, style);
}

fn render_resize_hint(frame: &mut Frame<'_>, area: Rect, width: u16, height: u16) {
    let message = format!(
        "Terminal too small: need {width}x{height}, have {}x{}",
        area.width, area.height
    );

    frame.render_widget(
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
