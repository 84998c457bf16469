use adlens_core::query::{chart_title, metrics_title};
use adlens_core::ChartPoint;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, List, ListItem, Paragraph},
};

use crate::components::lists::{
    calculate_centered_scroll, handle_list_navigation, handle_list_scroll,
    handle_panel_navigation,
};
use crate::components::{Component, EventResult};
use crate::state::{
    AppState, FocusedPanel, LoadState, ModalAction, ModalState, PickerModal, TextInputModal,
};
use crate::util::format::{format_compact, truncate};
use crate::util::styles::{
    BAR_COLOR, ERROR_COLOR, FOCUS_COLOR, HELP_COLOR, MUTED_COLOR, focused_block,
    focused_block_with_help,
};

pub const PRODUCT_PLACEHOLDER: &str = "Selecione um produto";
const X_AXIS: &str = "Métricas";
const Y_AXIS: &str = "Valores";

/// Product list, metric list and bar chart of the selected product
pub struct DashboardScreen {
    /// Lines visible in the metrics panel at the last render
    metrics_visible: usize,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self { metrics_visible: 0 }
    }

    fn render_products(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let focused = state.dashboard.focused_panel == FocusedPanel::Products;
        let block = focused_block_with_help("Produtos", focused, "[p] escolher");

        let items: Vec<ListItem> = match &state.load {
            LoadState::Empty => {
                let hint = Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(PRODUCT_PLACEHOLDER, Style::default().fg(HELP_COLOR))),
                    Line::from(""),
                    Line::from("[o] abrir arquivo CSV ou Excel"),
                ])
                .block(block);
                frame.render_widget(hint, area);
                return;
            }
            LoadState::Failed(_) => state
                .product_entries()
                .into_iter()
                .map(|entry| ListItem::new(Span::styled(entry, Style::default().fg(ERROR_COLOR))))
                .collect(),
            LoadState::Loaded(analysis) => {
                let visible = area.height.saturating_sub(2) as usize;
                let selected = state.dashboard.selected_product;
                let offset = calculate_centered_scroll(selected, analysis.product_count(), visible);

                analysis
                    .products()
                    .into_iter()
                    .enumerate()
                    .skip(offset)
                    .take(visible)
                    .map(|(idx, product)| {
                        if idx == selected {
                            ListItem::new(Span::styled(
                                format!("> {product}"),
                                Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD),
                            ))
                        } else {
                            ListItem::new(format!("  {product}"))
                        }
                    })
                    .collect()
            }
        };

        frame.render_widget(List::new(items).block(block), area);
    }

    fn render_metrics(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let focused = state.dashboard.focused_panel == FocusedPanel::Metrics;
        self.metrics_visible = area.height.saturating_sub(2) as usize;

        let (Some(analysis), Some(product)) = (state.analysis(), state.selected_product()) else {
            frame.render_widget(Paragraph::new("").block(focused_block("Métricas", focused)), area);
            return;
        };

        let block = focused_block(&metrics_title(product), focused);
        let lines: Vec<Line> = analysis
            .metrics_for(Some(product))
            .iter()
            .skip(state.dashboard.metric_scroll)
            .map(|(metric, value)| {
                Line::from(vec![
                    Span::styled(format!("{metric}: "), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(value.to_string()),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let (Some(analysis), Some(product)) = (state.analysis(), state.selected_product()) else {
            frame.render_widget(Paragraph::new("").block(focused_block("Gráfico", false)), area);
            return;
        };

        let block = focused_block(&chart_title(product), false).title_bottom(
            Line::from(format!(" x: {X_AXIS}  y: {Y_AXIS} ")).fg(HELP_COLOR),
        );

        let points = analysis.chart_points_for(Some(product));
        if points.is_empty() {
            let paragraph = Paragraph::new(Span::styled(
                "Sem valores numéricos para exibir",
                Style::default().fg(MUTED_COLOR),
            ))
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let bar_width = state.settings.bar_width.max(1);
        let bars = chart_bars(&points, bar_width as usize);

        let chart = BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(state.settings.bar_gap)
            .direction(Direction::Vertical);

        frame.render_widget(chart, area);
    }

    fn open_product_picker(state: &mut AppState) {
        let Some(analysis) = state.analysis() else {
            state.set_error("Nenhum produto para selecionar".to_string());
            return;
        };
        let options: Vec<String> = analysis.products().iter().map(|p| p.to_string()).collect();
        if options.is_empty() {
            state.set_error("Nenhum produto para selecionar".to_string());
            return;
        }

        state.modal = ModalState::Picker(
            PickerModal::new(PRODUCT_PLACEHOLDER, options, ModalAction::SelectProduct)
                .with_selected(state.dashboard.selected_product),
        );
    }

    fn open_file_prompt(state: &mut AppState) {
        let current = state
            .current_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        state.modal = ModalState::TextInput(TextInputModal::new(
            "Abrir arquivo",
            "Caminho do arquivo CSV ou Excel:",
            &current,
            ModalAction::OpenFile,
        ));
    }
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Bars for the chart: labels are metric names, heights the metric values.
///
/// Bar heights are whole numbers, so negative values draw as empty bars; the
/// caption always shows the real value.
fn chart_bars(points: &[ChartPoint], label_width: usize) -> Vec<Bar<'static>> {
    points
        .iter()
        .map(|point| {
            let style = Style::default().fg(BAR_COLOR);
            Bar::default()
                .value(point.value.max(0.0).round() as u64)
                .label(Line::from(truncate(point.metric.column(), label_width)))
                .text_value(format_compact(point.value))
                .style(style)
                .value_style(style.reversed())
        })
        .collect()
}

fn metric_count(state: &AppState) -> usize {
    match (state.analysis(), state.selected_product()) {
        (Some(analysis), Some(product)) => analysis.metrics_for(Some(product)).len(),
        _ => 0,
    }
}

impl Component for DashboardScreen {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        if handle_panel_navigation(&key, &mut state.dashboard.focused_panel) {
            return EventResult::Handled;
        }

        match key.code {
            KeyCode::Char('p') => {
                Self::open_product_picker(state);
                return EventResult::Handled;
            }
            KeyCode::Char('o') => {
                Self::open_file_prompt(state);
                return EventResult::Handled;
            }
            KeyCode::Char('r') => {
                state.reload();
                return EventResult::Handled;
            }
            _ => {}
        }

        match state.dashboard.focused_panel {
            FocusedPanel::Products => {
                let total = state.product_count();
                if handle_list_navigation(&key, &mut state.dashboard.selected_product, total) {
                    state.dashboard.metric_scroll = 0;
                    return EventResult::Handled;
                }
            }
            FocusedPanel::Metrics => {
                let total = metric_count(state);
                if handle_list_scroll(
                    &key,
                    &mut state.dashboard.metric_scroll,
                    total,
                    self.metrics_visible,
                ) {
                    return EventResult::Handled;
                }
            }
        }

        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(area);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(columns[1]);

        self.render_products(frame, columns[0], state);
        self.render_metrics(frame, right[0], state);
        self.render_chart(frame, right[1], state);
    }
}
