//! Terminal dashboard for advertising metrics exports
//!
//! Opens a CSV or spreadsheet export, aggregates it with `adlens_core` and
//! shows, for the selected product:
//! - the product list (with a picker for large exports)
//! - every stored metric as `metric: value` lines
//! - a bar chart of the non-ratio metrics

pub mod app;
pub mod components;
pub mod data;
pub mod logging;
pub mod modals;
pub mod screens;
pub mod state;
pub mod util;

pub use app::App;
pub use logging::init_logging;
