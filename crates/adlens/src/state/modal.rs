/// Modal overlays: product picker, file prompt and messages.

#[derive(Debug, Default)]
pub enum ModalState {
    #[default]
    None,
    TextInput(TextInputModal),
    Message(MessageModal),
    Picker(PickerModal),
}

/// What a confirmed modal value is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    SelectProduct,
    OpenFile,
}

/// Single-line text prompt. `cursor_pos` counts characters, not bytes.
#[derive(Debug)]
pub struct TextInputModal {
    pub title: String,
    pub prompt: String,
    pub value: String,
    pub cursor_pos: usize,
    pub action: ModalAction,
}

impl TextInputModal {
    pub fn new(title: &str, prompt: &str, default_value: &str, action: ModalAction) -> Self {
        let value = default_value.to_string();
        let cursor_pos = value.chars().count();
        Self {
            title: title.to_string(),
            prompt: prompt.to_string(),
            value,
            cursor_pos,
            action,
        }
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map(|(idx, _)| idx)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor_pos);
        self.value.insert(idx, c);
        self.cursor_pos += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            let idx = self.byte_index(self.cursor_pos);
            self.value.remove(idx);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor_pos < self.char_count() {
            let idx = self.byte_index(self.cursor_pos);
            self.value.remove(idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_pos < self.char_count() {
            self.cursor_pos += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_pos = self.char_count();
    }
}

#[derive(Debug)]
pub struct MessageModal {
    pub title: String,
    pub message: String,
    pub is_error: bool,
}

impl MessageModal {
    pub fn info(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            is_error: false,
        }
    }

    pub fn error(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            is_error: true,
        }
    }
}

#[derive(Debug)]
pub struct PickerModal {
    pub title: String,
    pub options: Vec<String>,
    pub selected_index: usize,
    pub action: ModalAction,
}

impl PickerModal {
    pub fn new(title: &str, options: Vec<String>, action: ModalAction) -> Self {
        Self {
            title: title.to_string(),
            options,
            selected_index: 0,
            action,
        }
    }

    /// Start with `index` highlighted (clamped to the option list)
    pub fn with_selected(mut self, index: usize) -> Self {
        self.selected_index = index.min(self.options.len().saturating_sub(1));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(value: &str) -> TextInputModal {
        TextInputModal::new("Abrir", "Caminho:", value, ModalAction::OpenFile)
    }

    #[test]
    fn test_cursor_starts_at_end_in_chars() {
        let modal = input("relatório.csv");
        assert_eq!(modal.cursor_pos, 13);
    }

    #[test]
    fn test_editing_around_multibyte_chars() {
        let mut modal = input("ação.csv");
        modal.move_cursor_home();
        modal.move_cursor_right();
        modal.move_cursor_right();
        modal.move_cursor_right();
        modal.backspace();
        assert_eq!(modal.value, "aço.csv");

        modal.insert_char('ã');
        assert_eq!(modal.value, "ação.csv");
        assert_eq!(modal.cursor_pos, 3);

        modal.delete();
        assert_eq!(modal.value, "açã.csv");
    }

    #[test]
    fn test_cursor_bounds() {
        let mut modal = input("ab");
        modal.move_cursor_right();
        assert_eq!(modal.cursor_pos, 2);
        modal.delete();
        assert_eq!(modal.value, "ab");

        modal.move_cursor_home();
        modal.move_cursor_left();
        modal.backspace();
        assert_eq!(modal.cursor_pos, 0);
        assert_eq!(modal.value, "ab");
    }

    #[test]
    fn test_picker_selection_is_clamped() {
        let picker = PickerModal::new(
            "Produtos",
            vec!["A".into(), "B".into()],
            ModalAction::SelectProduct,
        )
        .with_selected(5);
        assert_eq!(picker.selected_index, 1);
    }
}
