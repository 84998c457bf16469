use std::io;
use std::path::PathBuf;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::components::{Component, EventResult, header::Header, status_bar::StatusBar};
use crate::data::storage::DataDirectory;
use crate::modals::{ModalResult, handle_modal_key, render_modal};
use crate::screens::dashboard::DashboardScreen;
use crate::state::{AppState, MessageModal, ModalAction, ModalState};

const HELP_MESSAGE: &str = "j/k ou ↑/↓: mover no painel ativo. Tab: trocar painel. \
p: escolher produto. o: abrir arquivo. r: recarregar arquivo. \
Esc: limpar erro. q ou Ctrl+C: sair.";

pub struct App {
    state: AppState,
    header: Header,
    status_bar: StatusBar,
    dashboard: DashboardScreen,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// App without persistent settings
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    fn with_state(state: AppState) -> Self {
        Self {
            state,
            header: Header::new(),
            status_bar: StatusBar::new(),
            dashboard: DashboardScreen::new(),
        }
    }

    /// Create app with a data directory path.
    ///
    /// `file` is opened right away; without it the last opened file is
    /// reopened when it still exists.
    pub fn with_data_dir(data_dir: PathBuf, file: Option<PathBuf>) -> Self {
        let storage = DataDirectory::new(data_dir);
        let settings = storage.load_settings().unwrap_or_else(|e| {
            tracing::warn!("Failed to load settings, using defaults: {e}");
            Default::default()
        });

        let initial = file.or_else(|| {
            settings
                .last_file
                .clone()
                .filter(|path| path.exists())
        });

        let mut app = Self::with_state(AppState::new(Some(storage), settings));
        if let Some(path) = initial {
            app.state.open_file(path);
        }
        app
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

impl App {
    /// runs the application's main loop until the user quits
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        while !self.state.exit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Content
                Constraint::Length(2), // Status bar
            ])
            .split(frame.area());

        self.header.render(frame, chunks[0], &self.state);
        self.dashboard.render(frame, chunks[1], &self.state);
        self.status_bar.render(frame, chunks[2], &self.state);

        render_modal(frame, &self.state);
    }

    fn handle_events(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event)
            }
            _ => {}
        };
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if !matches!(self.state.modal, ModalState::None) {
            match handle_modal_key(key_event, &mut self.state) {
                ModalResult::Confirmed(action, value) => {
                    self.state.modal = ModalState::None;
                    self.handle_modal_result(action, value);
                }
                ModalResult::Cancelled => {
                    self.state.modal = ModalState::None;
                }
                ModalResult::Continue => {}
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('q') if key_event.modifiers.is_empty() => {
                self.state.exit = true;
                return;
            }
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.exit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.state.modal = ModalState::Message(MessageModal::info("Ajuda", HELP_MESSAGE));
                return;
            }
            KeyCode::Esc => {
                self.state.clear_error();
                return;
            }
            _ => {}
        }

        if self.dashboard.handle_key(key_event, &mut self.state) == EventResult::Exit {
            self.state.exit = true
        }
    }

    fn handle_modal_result(&mut self, action: ModalAction, value: String) {
        match action {
            ModalAction::SelectProduct => {
                if !self.state.select_product(&value) {
                    self.state.set_error(format!("Produto não encontrado: {value}"));
                }
            }
            ModalAction::OpenFile => {
                let path = value.trim();
                if path.is_empty() {
                    return;
                }
                self.state.open_file(PathBuf::from(path));
            }
        }
    }
}
