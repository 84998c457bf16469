mod app_state;
mod modal;

pub use app_state::*;
pub use modal::*;
