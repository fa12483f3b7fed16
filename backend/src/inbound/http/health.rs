//! Liveness and readiness probes.
//!
//! Readiness flips on once the listener is bound and storage is reachable;
//! liveness flips off when the process starts draining.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Probe flags shared between the server bootstrap and the probe handlers.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Not ready, but alive.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness so orchestrators stop routing during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

fn probe_response(ok: bool) -> HttpResponse {
    let mut response = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe: 200 once the station accepts traffic, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Station is ready"),
        (status = 503, description = "Station is starting")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready())
}

/// Liveness probe: 200 while running, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Station is alive"),
        (status = 503, description = "Station is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    use super::*;

    async fn probe(state: web::Data<HealthState>, uri: &str) -> (StatusCode, Option<String>) {
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(ready)
                .service(live),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let cache = res
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        (res.status(), cache)
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_follows_mark_ready() {
        let state = web::Data::new(HealthState::new());
        let (before, cache) = probe(state.clone(), "/health/ready").await;
        assert_eq!(before, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(cache.as_deref(), Some("no-store"));

        state.mark_ready();
        let (after, _) = probe(state, "/health/ready").await;
        assert_eq!(after, StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn liveness_fails_once_draining() {
        let state = web::Data::new(HealthState::new());
        assert_eq!(probe(state.clone(), "/health/live").await.0, StatusCode::OK);

        state.mark_unhealthy();
        assert_eq!(
            probe(state, "/health/live").await.0,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
