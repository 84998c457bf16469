use std::path::{Path, PathBuf};

use adlens_core::{Analysis, analyze, is_allowed_file};

use super::modal::ModalState;
use crate::components::lists::PanelNavigable;
use crate::data::storage::{DataDirectory, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPanel {
    Products,
    Metrics,
}

impl PanelNavigable for FocusedPanel {
    fn next(self) -> Self {
        match self {
            FocusedPanel::Products => FocusedPanel::Metrics,
            FocusedPanel::Metrics => FocusedPanel::Products,
        }
    }

    fn prev(self) -> Self {
        self.next()
    }
}

/// Outcome of the most recent file analysis
#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Empty,
    Loaded(Analysis),
    /// User-facing message of the failed analysis
    Failed(String),
}

#[derive(Debug)]
pub struct DashboardState {
    pub selected_product: usize,
    pub metric_scroll: usize,
    pub focused_panel: FocusedPanel,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            selected_product: 0,
            metric_scroll: 0,
            focused_panel: FocusedPanel::Products,
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Where settings are persisted; `None` keeps everything in memory
    pub storage: Option<DataDirectory>,
    pub settings: Settings,
    pub current_file: Option<PathBuf>,
    pub load: LoadState,
    pub dashboard: DashboardState,

    pub modal: ModalState,
    pub error_message: Option<String>,
    pub exit: bool,
}

impl AppState {
    pub fn new(storage: Option<DataDirectory>, settings: Settings) -> Self {
        Self {
            storage,
            settings,
            ..Default::default()
        }
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        match &self.load {
            LoadState::Loaded(analysis) => Some(analysis),
            _ => None,
        }
    }

    /// Analyze `path` and replace the current analysis with the result.
    ///
    /// Files with an unaccepted extension are refused before reading and
    /// leave the current analysis untouched. Returns whether the file was
    /// analyzed successfully.
    pub fn open_file(&mut self, path: PathBuf) -> bool {
        let name = file_name(&path);
        if !is_allowed_file(&name) {
            self.set_error(format!("Tipo de arquivo não permitido: {name}"));
            return false;
        }

        self.clear_error();
        self.dashboard = DashboardState::default();

        let ok = match analyze(&path) {
            Ok(analysis) => {
                tracing::info!(
                    file = %path.display(),
                    products = analysis.product_count(),
                    rows = analysis.row_count(),
                    "Analyzed file"
                );
                self.load = LoadState::Loaded(analysis);
                true
            }
            Err(err) => {
                tracing::warn!(file = %path.display(), error = ?err, "Analysis failed");
                self.load = LoadState::Failed(err.to_string());
                false
            }
        };

        self.current_file = Some(path.clone());
        self.remember_file(path);
        ok
    }

    /// Analyze the current file again
    pub fn reload(&mut self) -> bool {
        match self.current_file.clone() {
            Some(path) => self.open_file(path),
            None => {
                self.set_error("Nenhum arquivo aberto".to_string());
                false
            }
        }
    }

    fn remember_file(&mut self, path: PathBuf) {
        let path = std::path::absolute(&path).unwrap_or(path);
        if self.settings.last_file.as_ref() == Some(&path) {
            return;
        }
        self.settings.last_file = Some(path);

        if let Some(storage) = &self.storage
            && let Err(e) = storage.save_settings(&self.settings)
        {
            tracing::warn!("Failed to save settings: {e}");
        }
    }

    /// Entries of the product list: the products, or a single error placeholder
    pub fn product_entries(&self) -> Vec<String> {
        match &self.load {
            LoadState::Empty => Vec::new(),
            LoadState::Loaded(analysis) => analysis
                .products()
                .iter()
                .map(|p| p.to_string())
                .collect(),
            LoadState::Failed(message) => vec![format!("Erro: {message}")],
        }
    }

    pub fn product_count(&self) -> usize {
        self.analysis().map_or(0, |a| a.product_count())
    }

    pub fn selected_product(&self) -> Option<&str> {
        self.analysis()?
            .product_at(self.dashboard.selected_product)
            .map(|p| p.as_str())
    }

    /// Select a product by name. Unknown names leave the selection as is.
    pub fn select_product(&mut self, name: &str) -> bool {
        let Some(index) = self
            .analysis()
            .and_then(|a| a.metrics().get_index_of(name))
        else {
            return false;
        };
        self.dashboard.selected_product = index;
        self.dashboard.metric_scroll = 0;
        true
    }

    pub fn set_error(&mut self, msg: String) {
        self.error_message = Some(msg);
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    const SAMPLE: &str = "Nome do Produto,Cliques,CTR,ROAS\nA,10,5%,2.5\nA,20,7%,3.1\nB,3,1%,0.4\n";

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_open_file_lists_products() {
        let dir = tempdir().unwrap();
        let mut state = AppState::default();

        assert!(state.open_file(write(&dir, "vendas.csv", SAMPLE)));
        assert_eq!(state.product_entries(), ["A", "B"]);
        assert_eq!(state.selected_product(), Some("A"));
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_failed_analysis_shows_single_placeholder() {
        let dir = tempdir().unwrap();
        let mut state = AppState::default();

        assert!(!state.open_file(write(&dir, "sem.csv", "Produto,Cliques\nA,1\n")));
        assert_eq!(
            state.product_entries(),
            ["Erro: A coluna 'Nome do Produto' não está presente no arquivo."]
        );
        assert_eq!(state.selected_product(), None);
        assert_eq!(state.product_count(), 0);
    }

    #[test]
    fn test_unreadable_file_placeholder() {
        let dir = tempdir().unwrap();
        let mut state = AppState::default();

        state.open_file(write(&dir, "quebrado.csv", "Nome do Produto,Cliques\nA,1,2\n"));
        assert_eq!(
            state.product_entries(),
            ["Erro: Erro ao ler o arquivo: problema ao analisar o arquivo CSV ou Excel."]
        );
    }

    #[test]
    fn test_missing_file_placeholder() {
        let dir = tempdir().unwrap();
        let mut state = AppState::default();

        assert!(!state.open_file(dir.path().join("sumiu.csv")));
        assert_eq!(
            state.product_entries(),
            ["Erro: Erro ao ler o arquivo: arquivo não encontrado ou ilegível."]
        );
    }

    #[test]
    fn test_disallowed_extension_keeps_current_analysis() {
        let dir = tempdir().unwrap();
        let mut state = AppState::default();
        state.open_file(write(&dir, "vendas.csv", SAMPLE));

        assert!(!state.open_file(write(&dir, "notas.txt", SAMPLE)));
        assert_eq!(
            state.error_message.as_deref(),
            Some("Tipo de arquivo não permitido: notas.txt")
        );
        assert_eq!(state.product_entries(), ["A", "B"]);
        assert!(state.current_file.as_ref().unwrap().ends_with("vendas.csv"));
    }

    #[test]
    fn test_new_file_replaces_analysis_and_resets_selection() {
        let dir = tempdir().unwrap();
        let mut state = AppState::default();
        state.open_file(write(&dir, "vendas.csv", SAMPLE));
        assert!(state.select_product("B"));

        state.open_file(write(&dir, "outro.csv", "Nome do Produto,Cliques\nC,1\n"));
        assert_eq!(state.product_entries(), ["C"]);
        assert_eq!(state.selected_product(), Some("C"));
    }

    #[test]
    fn test_select_unknown_product() {
        let dir = tempdir().unwrap();
        let mut state = AppState::default();
        state.open_file(write(&dir, "vendas.csv", SAMPLE));

        assert!(!state.select_product("Z"));
        assert_eq!(state.selected_product(), Some("A"));
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let dir = tempdir().unwrap();
        let mut state = AppState::default();
        let path = write(&dir, "vendas.csv", SAMPLE);
        state.open_file(path.clone());

        fs::write(&path, "Nome do Produto,Cliques\nZ,9\n").unwrap();
        assert!(state.reload());
        assert_eq!(state.product_entries(), ["Z"]);
    }

    #[test]
    fn test_reload_without_file() {
        let mut state = AppState::default();
        assert!(!state.reload());
        assert!(state.error_message.is_some());
    }

    #[test]
    fn test_opened_file_is_remembered() {
        let dir = tempdir().unwrap();
        let storage = DataDirectory::new(dir.path().join("data"));
        let mut state = AppState::new(Some(storage.clone()), Settings::default());
        let path = write(&dir, "vendas.csv", SAMPLE);

        state.open_file(path.clone());

        let saved = storage.load_settings().unwrap();
        assert_eq!(saved.last_file, Some(path));
    }
}
