pub mod session_handlers;
pub mod upload_handlers;

pub use session_handlers::*;
pub use upload_handlers::*;
