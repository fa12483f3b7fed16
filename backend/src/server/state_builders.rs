//! Builders for the driven ports and the HTTP state behind the server.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use service_station::domain::ports::SessionStore;
use service_station::domain::{StationPorts, StationServices};
use service_station::inbound::http::state::HttpState;
use service_station::outbound::persistence::{
    DbPool, DieselCarRepository, DieselMessageRepository, DieselOrderRepository,
    DieselSessionStore, DieselUserRepository,
};
use service_station::outbound::{
    Argon2PasswordHasher, CapStdProfileImageStore, InMemorySessionStore,
};
use service_station::settings::SessionBackend;

use super::ServerConfig;

fn build_session_store(config: &ServerConfig, clock: Arc<dyn Clock>) -> Arc<dyn SessionStore> {
    match config.session_backend {
        SessionBackend::Memory => Arc::new(InMemorySessionStore::new(clock, config.session_ttl)),
        SessionBackend::Database => Arc::new(DieselSessionStore::new(
            config.db_pool.clone(),
            clock,
            config.session_ttl,
        )),
    }
}

/// Assemble Diesel-backed ports plus the configured session store.
///
/// # Errors
/// Returns [`std::io::Error`] when the profile image directory cannot be
/// created or opened.
pub(super) fn build_station_ports(config: &ServerConfig) -> std::io::Result<StationPorts> {
    let images = CapStdProfileImageStore::open(&config.profile_image_dir)
        .map_err(|err| std::io::Error::other(format!("profile image store: {err}")))?;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let pool: &DbPool = &config.db_pool;
    info!(
        session_store = ?config.session_backend,
        session_ttl_secs = config.session_ttl.map(|ttl| ttl.as_secs()),
        profile_image_dir = %config.profile_image_dir.display(),
        "station ports configured"
    );
    Ok(StationPorts {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        cars: Arc::new(DieselCarRepository::new(pool.clone())),
        orders: Arc::new(DieselOrderRepository::new(pool.clone())),
        messages: Arc::new(DieselMessageRepository::new(pool.clone())),
        sessions: build_session_store(config, clock.clone()),
        hasher: Arc::new(Argon2PasswordHasher::new()),
        images: Arc::new(images),
        clock,
        year_bounds: config.year_bounds,
    })
}

/// Build the shared HTTP state from the station services.
pub(super) fn build_http_state(
    config: &ServerConfig,
    services: &StationServices,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::from_services(services, config.cookie_secure))
}
