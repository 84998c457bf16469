use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Constraint,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::TextInputModal;

use super::ModalResult;
use super::helpers::{HelpText, calculate_scroll, render_cursor_line, render_modal_frame};

const MODAL_WIDTH: u16 = 70;
const MODAL_HEIGHT: u16 = 10;

/// Render the text input modal
pub fn render_text_input_modal(frame: &mut Frame, modal: &TextInputModal) {
    let mf = render_modal_frame(
        frame,
        &modal.title,
        MODAL_WIDTH,
        MODAL_HEIGHT,
        Color::Cyan,
        &[
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Prompt
            Constraint::Length(3), // Input field
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Help text
        ],
    );

    let prompt = Paragraph::new(Line::from(Span::styled(
        modal.prompt.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(prompt, mf.chunks[1]);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let input_inner = input_block.inner(mf.chunks[2]);
    frame.render_widget(input_block, mf.chunks[2]);

    // One column for the leading pad, one for the cursor block at the end
    let scrolled = calculate_scroll(&modal.value, modal.cursor_pos, input_inner.width as usize);
    let input_line = render_cursor_line(&scrolled.display_value, scrolled.cursor_pos, " ");
    frame.render_widget(Paragraph::new(input_line), input_inner);

    let help = HelpText::new()
        .key("[Enter]", Color::Green, "Confirmar")
        .key("[Esc]", Color::Yellow, "Cancelar")
        .build();
    frame.render_widget(help, mf.chunks[4]);
}

/// Handle key events for text input modal
pub fn handle_text_input_key(key: KeyEvent, modal: &mut TextInputModal) -> ModalResult {
    match key.code {
        KeyCode::Enter => ModalResult::Confirmed(modal.action, modal.value.clone()),
        KeyCode::Esc => ModalResult::Cancelled,
        KeyCode::Backspace => {
            modal.backspace();
            ModalResult::Continue
        }
        KeyCode::Delete => {
            modal.delete();
            ModalResult::Continue
        }
        KeyCode::Left => {
            modal.move_cursor_left();
            ModalResult::Continue
        }
        KeyCode::Right => {
            modal.move_cursor_right();
            ModalResult::Continue
        }
        KeyCode::Home => {
            modal.move_cursor_home();
            ModalResult::Continue
        }
        KeyCode::End => {
            modal.move_cursor_end();
            ModalResult::Continue
        }
        KeyCode::Char(c) => {
            modal.insert_char(c);
            ModalResult::Continue
        }
        _ => ModalResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ModalAction;
    use crossterm::event::KeyModifiers;

    fn press(modal: &mut TextInputModal, code: KeyCode) -> ModalResult {
        handle_text_input_key(KeyEvent::new(code, KeyModifiers::NONE), modal)
    }

    #[test]
    fn test_typing_and_confirm() {
        let mut modal = TextInputModal::new("Abrir", "Caminho:", "", ModalAction::OpenFile);
        for c in "ação.csv".chars() {
            press(&mut modal, KeyCode::Char(c));
        }
        press(&mut modal, KeyCode::Backspace);
        press(&mut modal, KeyCode::Char('v'));

        assert_eq!(
            press(&mut modal, KeyCode::Enter),
            ModalResult::Confirmed(ModalAction::OpenFile, "ação.csv".into())
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut modal = TextInputModal::new("Abrir", "Caminho:", "x.csv", ModalAction::OpenFile);
        assert_eq!(press(&mut modal, KeyCode::Esc), ModalResult::Cancelled);
    }
}
