//! Common styling utilities for TUI components

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders};

/// Standard color for focused panels
pub const FOCUS_COLOR: Color = Color::Yellow;

/// Standard color for help text
pub const HELP_COLOR: Color = Color::DarkGray;

/// Standard color for headers
pub const HEADER_COLOR: Color = Color::Cyan;

/// Color for error text and the error placeholder entry
pub const ERROR_COLOR: Color = Color::Red;

/// Color of chart bars
pub const BAR_COLOR: Color = Color::Green;

/// Color of values that could not be plotted (missing or text)
pub const MUTED_COLOR: Color = Color::DarkGray;

/// Create a block with a title that shows focused state via border color.
///
/// # Example
/// ```ignore
/// let block = focused_block("Produtos", is_focused);
/// frame.render_widget(Paragraph::new("...").block(block), area);
/// ```
pub fn focused_block(title: &str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {title} "))
}

/// Like [`focused_block`], with help text on the bottom border while focused.
pub fn focused_block_with_help(title: &str, focused: bool, help_text: &str) -> Block<'static> {
    let mut block = focused_block(title, focused);

    if focused && !help_text.is_empty() {
        block = block.title_bottom(Line::from(format!(" {help_text} ")).fg(HELP_COLOR));
    }

    block
}
