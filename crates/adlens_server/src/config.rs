use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Runtime settings, from flags or `ADLENS_*` environment variables
#[derive(Parser, Debug, Clone)]
#[command(name = "adlens_server")]
#[command(about = "HTTP API for advertising metrics reports")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "ADLENS_BIND", default_value = "0.0.0.0:3001")]
    pub bind: SocketAddr,

    /// Directory where uploaded files are stored
    #[arg(long, env = "ADLENS_UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,

    /// Idle seconds before a session expires (0 keeps sessions forever)
    #[arg(long, env = "ADLENS_SESSION_TTL_SECS", default_value_t = 3600)]
    pub session_ttl_secs: u64,

    /// Sessions kept at once; the least recently used one is dropped first
    #[arg(long, env = "ADLENS_MAX_SESSIONS", default_value_t = 64)]
    pub max_sessions: usize,

    /// Largest accepted request body
    #[arg(long, env = "ADLENS_MAX_UPLOAD_BYTES", default_value_t = 16 * 1024 * 1024)]
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    pub fn session_ttl(&self) -> Option<Duration> {
        (self.session_ttl_secs > 0).then(|| Duration::from_secs(self.session_ttl_secs))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3001)),
            upload_dir: PathBuf::from("uploads"),
            session_ttl_secs: 3600,
            max_sessions: 64,
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}
