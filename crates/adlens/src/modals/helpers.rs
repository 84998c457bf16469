//! Rendering helpers shared by the modal widgets.

use std::rc::Rc;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::centered_rect;

// ========== Cursor Rendering ==========

/// Render a line of text with a visible cursor at `cursor_pos` (in characters).
pub fn render_cursor_line(display_value: &str, cursor_pos: usize, prefix: &str) -> Line<'static> {
    let cursor_style = Style::default().bg(Color::White).fg(Color::Black);
    let mut spans = Vec::new();

    if !prefix.is_empty() {
        spans.push(Span::raw(prefix.to_string()));
    }

    let chars: Vec<char> = display_value.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i == cursor_pos {
            spans.push(Span::styled(c.to_string(), cursor_style));
        } else {
            spans.push(Span::raw(c.to_string()));
        }
    }

    if cursor_pos >= chars.len() {
        spans.push(Span::styled(" ", cursor_style));
    }

    Line::from(spans)
}

// ========== Horizontal Scroll ==========

/// Visible slice of a text input that is wider than its container.
pub struct ScrolledView {
    pub display_value: String,
    /// Cursor position within `display_value`, in characters
    pub cursor_pos: usize,
}

/// Calculate horizontal scroll so the cursor stays visible.
///
/// Positions and widths are in characters. Long values are windowed around
/// the cursor.
pub fn calculate_scroll(value: &str, cursor_pos: usize, max_width: usize) -> ScrolledView {
    let input_width = max_width.saturating_sub(2);
    let len = value.chars().count();

    if len <= input_width {
        return ScrolledView {
            display_value: value.to_string(),
            cursor_pos,
        };
    }

    let start = cursor_pos.saturating_sub(input_width / 2);
    let end = (start + input_width).min(len);
    let start = end.saturating_sub(input_width);

    ScrolledView {
        display_value: value.chars().skip(start).take(end - start).collect(),
        cursor_pos: cursor_pos - start,
    }
}

// ========== Modal Frame ==========

/// Layout of a rendered modal frame.
pub struct ModalFrame {
    pub chunks: Rc<[Rect]>,
}

/// Render a centered, bordered modal over a cleared background and split
/// its inside with `constraints`.
///
/// # Example
/// ```ignore
/// let mf = render_modal_frame(
///     frame,
///     "Abrir arquivo",
///     60, 10,
///     Color::Cyan,
///     &[Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)],
/// );
/// ```
pub fn render_modal_frame(
    frame: &mut Frame,
    title: &str,
    width: u16,
    height: u16,
    border_color: Color,
    constraints: &[Constraint],
) -> ModalFrame {
    let modal_area = centered_rect(width, height, frame.area());

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    ModalFrame { chunks }
}

// ========== Help Text Builder ==========

/// Builder for a line of colored key hints followed by descriptions.
///
/// # Example
/// ```ignore
/// let help = HelpText::new()
///     .key("[Enter]", Color::Green, "Confirmar")
///     .key("[Esc]", Color::Yellow, "Cancelar")
///     .build();
/// ```
pub struct HelpText {
    items: Vec<(String, Color, String)>,
}

impl HelpText {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn key(mut self, key: &str, color: Color, desc: &str) -> Self {
        self.items.push((key.to_string(), color, desc.to_string()));
        self
    }

    pub fn line(self) -> Line<'static> {
        let mut spans: Vec<Span> = Vec::new();

        for (i, (key, color, desc)) in self.items.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(key, Style::default().fg(color)));
            spans.push(Span::raw(format!(" {desc}")));
        }

        Line::from(spans)
    }

    pub fn build(self) -> Paragraph<'static> {
        Paragraph::new(self.line())
    }
}

impl Default for HelpText {
    fn default() -> Self {
        Self::new()
    }
}
