pub mod sessions;
pub mod uploads;

pub use sessions::session_routes;
pub use uploads::upload_routes;
