//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::StationServices;
use crate::domain::ports::{
    AccountCommand, CarCommand, MessageCommand, OrderCommand, SessionAuthenticator,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountCommand>,
    pub authenticator: Arc<dyn SessionAuthenticator>,
    pub cars: Arc<dyn CarCommand>,
    pub orders: Arc<dyn OrderCommand>,
    pub messages: Arc<dyn MessageCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub authenticator: Arc<dyn SessionAuthenticator>,
    pub cars: Arc<dyn CarCommand>,
    pub orders: Arc<dyn OrderCommand>,
    pub messages: Arc<dyn MessageCommand>,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: bool,
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts, cookie_secure: bool) -> Self {
        let HttpStatePorts {
            accounts,
            authenticator,
            cars,
            orders,
            messages,
        } = ports;
        Self {
            accounts,
            authenticator,
            cars,
            orders,
            messages,
            cookie_secure,
        }
    }

    /// Expose the customer-facing subset of wired station services.
    ///
    /// # Examples
    /// ```
    /// use service_station::inbound::http::state::HttpState;
    /// use service_station::test_support::InMemoryStation;
    ///
    /// let station = InMemoryStation::new()?;
    /// let state = HttpState::from_services(&station.services, true);
    /// assert!(state.cookie_secure);
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn from_services(services: &StationServices, cookie_secure: bool) -> Self {
        Self::new(
            HttpStatePorts {
                accounts: services.accounts.clone(),
                authenticator: services.authenticator.clone(),
                cars: services.cars.clone(),
                orders: services.orders.clone(),
                messages: services.messages.clone(),
            },
            cookie_secure,
        )
    }
}
