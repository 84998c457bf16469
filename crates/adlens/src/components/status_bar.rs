use super::{Component, EventResult};
use crate::state::{AppState, FocusedPanel};
use crate::util::styles::{ERROR_COLOR, HELP_COLOR};
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    fn get_help_text(state: &AppState) -> &'static str {
        match state.dashboard.focused_panel {
            FocusedPanel::Products => {
                "j/k: produto | Tab: painel | p: escolher | o: abrir | r: recarregar | ?: ajuda | q: sair"
            }
            FocusedPanel::Metrics => {
                "j/k: rolar | Tab: painel | p: escolher | o: abrir | r: recarregar | ?: ajuda | q: sair"
            }
        }
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatusBar {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let content = if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled("Erro: ", Style::default().fg(ERROR_COLOR)),
                Span::raw(error.clone()),
            ])
        } else {
            Line::from(Span::styled(
                Self::get_help_text(state),
                Style::default().fg(HELP_COLOR),
            ))
        };

        let paragraph = Paragraph::new(content).block(Block::default().borders(Borders::TOP));

        frame.render_widget(paragraph, area);
    }
}
