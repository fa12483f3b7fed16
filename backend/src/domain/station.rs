//! Composition of the station services over one set of driven ports.
//!
//! Adapters are chosen by the caller (Diesel, in-memory, mocks); this module
//! only decides how services share them, so every service sees the same gate.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountCommand, CarCommand, CarRepository, MessageCommand, MessageRepository, OrderCommand,
    OrderRepository, PasswordHasher, ProfileImageStore, SessionAuthenticator, SessionStore,
    StaffOrdersCommand, UserRepository,
};
use crate::domain::{
    AccessGate, AccountService, AccountServicePorts, CarService, MessageService, OrderService,
    StaffOrdersService, YearBounds,
};

/// Driven ports backing every station service.
#[derive(Clone)]
pub struct StationPorts {
    pub users: Arc<dyn UserRepository>,
    pub cars: Arc<dyn CarRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub images: Arc<dyn ProfileImageStore>,
    pub clock: Arc<dyn Clock>,
    pub year_bounds: YearBounds,
}

/// Driving ports handed to inbound adapters.
#[derive(Clone)]
pub struct StationServices {
    pub accounts: Arc<dyn AccountCommand>,
    pub authenticator: Arc<dyn SessionAuthenticator>,
    pub cars: Arc<dyn CarCommand>,
    pub orders: Arc<dyn OrderCommand>,
    pub messages: Arc<dyn MessageCommand>,
    pub staff: Arc<dyn StaffOrdersCommand>,
}

impl StationServices {
    /// Wire the services over `ports`.
    pub fn new(ports: StationPorts) -> Self {
        let StationPorts {
            users,
            cars,
            orders,
            messages,
            sessions,
            hasher,
            images,
            clock,
            year_bounds,
        } = ports;
        let gate = AccessGate::new(sessions.clone(), cars.clone(), orders.clone());
        let accounts = AccountService::new(AccountServicePorts {
            users,
            sessions,
            hasher,
            images,
        });
        Self {
            accounts: Arc::new(accounts),
            authenticator: Arc::new(gate.clone()),
            cars: Arc::new(CarService::new(cars, gate.clone())),
            orders: Arc::new(OrderService::new(orders.clone(), gate.clone(), year_bounds)),
            messages: Arc::new(MessageService::new(
                messages.clone(),
                orders.clone(),
                gate.clone(),
                clock.clone(),
            )),
            staff: Arc::new(StaffOrdersService::new(messages, orders, gate, clock)),
        }
    }
}
