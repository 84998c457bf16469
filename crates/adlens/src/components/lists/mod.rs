//! List navigation utilities.

mod selectable_list;

pub use selectable_list::{
    PanelNavigable, calculate_centered_scroll, handle_list_navigation, handle_list_scroll,
    handle_panel_navigation,
};
