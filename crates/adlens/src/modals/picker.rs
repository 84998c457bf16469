use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Constraint,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};

use crate::components::lists::{calculate_centered_scroll, handle_list_navigation};
use crate::state::PickerModal;

use super::ModalResult;
use super::helpers::{HelpText, render_modal_frame};

const MODAL_WIDTH: u16 = 60;

/// Render the picker modal
pub fn render_picker_modal(frame: &mut Frame, modal: &PickerModal) {
    let content_height = (modal.options.len() as u16).clamp(3, 12);
    let modal_height = content_height + 6;

    let mf = render_modal_frame(
        frame,
        &modal.title,
        MODAL_WIDTH,
        modal_height,
        Color::Cyan,
        &[
            Constraint::Length(1), // Spacing
            Constraint::Min(1),    // Options list
            Constraint::Length(1), // Spacing
            Constraint::Length(2), // Help text
        ],
    );

    let visible = mf.chunks[1].height as usize;
    let offset = calculate_centered_scroll(modal.selected_index, modal.options.len(), visible);

    let items: Vec<ListItem> = modal
        .options
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(idx, option)| {
            let selected = idx == modal.selected_index;
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let prefix = if selected { "> " } else { "  " };
            ListItem::new(Line::from(Span::styled(format!("{prefix}{option}"), style)))
        })
        .collect();

    frame.render_widget(List::new(items), mf.chunks[1]);

    let help = HelpText::new()
        .key("[j/k/↑/↓]", Color::DarkGray, "Navegar")
        .line();
    let confirm = HelpText::new()
        .key("[Enter]", Color::Green, "Selecionar")
        .key("[Esc]", Color::Yellow, "Cancelar")
        .line();
    frame.render_widget(ratatui::widgets::Paragraph::new(vec![help, confirm]), mf.chunks[3]);
}

/// Handle key events for picker modal
pub fn handle_picker_key(key: KeyEvent, modal: &mut PickerModal) -> ModalResult {
    if handle_list_navigation(&key, &mut modal.selected_index, modal.options.len()) {
        return ModalResult::Continue;
    }

    match key.code {
        KeyCode::Enter => match modal.options.get(modal.selected_index) {
            Some(selected) => ModalResult::Confirmed(modal.action, selected.clone()),
            None => ModalResult::Cancelled,
        },
        KeyCode::Esc => ModalResult::Cancelled,
        _ => ModalResult::Continue,
    }
}
