use super::{Component, EventResult};
use crate::state::AppState;
use crate::util::styles::{HEADER_COLOR, HELP_COLOR};
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub const APP_TITLE: &str = "Dashboard de Análise de Produtos";

/// Title line plus the name of the analyzed file
pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    fn source_line(state: &AppState) -> Line<'static> {
        let text = match (&state.current_file, state.analysis()) {
            (_, Some(analysis)) => format!(
                "{} | {} produtos | {} registros",
                analysis.source(),
                analysis.product_count(),
                analysis.row_count()
            ),
            (Some(path), None) => path.display().to_string(),
            (None, None) => "Nenhum arquivo carregado".to_string(),
        };
        Line::from(Span::styled(text, Style::default().fg(HELP_COLOR)))
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Header {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let title = Line::from(Span::styled(
            APP_TITLE,
            Style::default()
                .fg(HEADER_COLOR)
                .add_modifier(Modifier::BOLD),
        ));

        let paragraph = Paragraph::new(vec![title, Self::source_line(state)])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM));

        frame.render_widget(paragraph, area);
    }
}
