//! HTTP server configuration object and helpers.

use std::path::PathBuf;
use std::time::Duration;

use service_station::domain::YearBounds;
use service_station::outbound::persistence::DbPool;
use service_station::settings::{SessionBackend, StationConfig};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) http_host: String,
    pub(crate) http_port: u16,
    pub(crate) cookie_secure: bool,
    pub(crate) profile_image_dir: PathBuf,
    pub(crate) year_bounds: YearBounds,
    pub(crate) session_backend: SessionBackend,
    pub(crate) session_ttl: Option<Duration>,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    /// Construct a server configuration from validated settings and a pool.
    #[must_use]
    pub fn new(settings: StationConfig, db_pool: DbPool) -> Self {
        let StationConfig {
            http_host,
            http_port,
            database: _,
            profile_image_dir,
            year_bounds,
            session_backend,
            session_ttl,
            cookie_secure,
        } = settings;
        Self {
            http_host,
            http_port,
            cookie_secure,
            profile_image_dir,
            year_bounds,
            session_backend,
            session_ttl,
            db_pool,
        }
    }

    /// Host and port the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> (&str, u16) {
        (&self.http_host, self.http_port)
    }
}
