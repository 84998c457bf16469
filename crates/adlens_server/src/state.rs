use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::session::SessionStore;

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct ServerState {
    pub sessions: Arc<SessionStore>,
    pub upload_dir: PathBuf,
}

impl ServerState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(
                config.session_ttl(),
                config.max_sessions,
            )),
            upload_dir: config.upload_dir.clone(),
        }
    }
}
