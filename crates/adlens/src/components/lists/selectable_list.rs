//! Input handling for selectable and scrollable lists.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Trait for panel enums that support Tab/BackTab navigation.
pub trait PanelNavigable: Copy + Eq {
    /// Get the next panel in the cycle.
    fn next(self) -> Self;
    /// Get the previous panel in the cycle.
    fn prev(self) -> Self;
}

/// Calculate centered scroll offset for a list.
///
/// Keeps the selected item centered when possible, pinning the view to the
/// top or bottom near the ends of the list.
pub fn calculate_centered_scroll(
    selected_idx: usize,
    total_items: usize,
    visible_count: usize,
) -> usize {
    if total_items <= visible_count {
        return 0;
    }

    let center = visible_count / 2;

    if selected_idx <= center {
        0
    } else if selected_idx >= total_items.saturating_sub(visible_count.saturating_sub(center)) {
        total_items.saturating_sub(visible_count)
    } else {
        selected_idx.saturating_sub(center)
    }
}

/// Handle j/k or Up/Down list navigation with wrapping at boundaries.
///
/// Returns `true` if the key was handled.
pub fn handle_list_navigation(key: &KeyEvent, selected: &mut usize, total: usize) -> bool {
    if total == 0 || key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            *selected = (*selected + 1) % total;
            true
        }
        KeyCode::Char('k') | KeyCode::Up => {
            *selected = if *selected == 0 {
                total - 1
            } else {
                *selected - 1
            };
            true
        }
        KeyCode::Home | KeyCode::Char('g') => {
            *selected = 0;
            true
        }
        KeyCode::End | KeyCode::Char('G') => {
            *selected = total - 1;
            true
        }
        _ => false,
    }
}

/// Handle j/k or Up/Down scrolling of a view showing `visible` of `total` lines.
///
/// Unlike selection, scrolling stops at the ends.
pub fn handle_list_scroll(key: &KeyEvent, offset: &mut usize, total: usize, visible: usize) -> bool {
    let max_offset = total.saturating_sub(visible);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            *offset = (*offset + 1).min(max_offset);
            true
        }
        KeyCode::Char('k') | KeyCode::Up => {
            *offset = offset.saturating_sub(1);
            true
        }
        KeyCode::Home | KeyCode::Char('g') => {
            *offset = 0;
            true
        }
        KeyCode::End | KeyCode::Char('G') => {
            *offset = max_offset;
            true
        }
        _ => false,
    }
}

/// Handle Tab/BackTab panel navigation.
pub fn handle_panel_navigation<P: PanelNavigable>(key: &KeyEvent, focused: &mut P) -> bool {
    match key.code {
        KeyCode::Tab if key.modifiers.is_empty() => {
            *focused = focused.next();
            true
        }
        KeyCode::BackTab => {
            *focused = focused.prev();
            true
        }
        _ => false,
    }
}
