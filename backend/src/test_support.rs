//! Test utilities for the backend crate.
//!
//! In-memory implementations of the driven ports plus a fully wired station,
//! shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and behind the `test-support` feature.

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tempfile::TempDir;
use tokio::sync::Mutex;

use crate::domain::ports::{
    CarRepository, CarRepositoryError, MessageRepository, MessageRepositoryError, NewOrder,
    OrderRepository, OrderRepositoryError, StaffOrdersCommand, UserRepository,
    UserRepositoryError,
};
use crate::domain::{
    Account, Car, CarId, Message, MessageId, NewAccount, NewCar, NewMessage, Order, OrderId,
    OrderStatus, StationPorts, StationServices, UserId, YearBounds, sort_thread,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::{Argon2PasswordHasher, CapStdProfileImageStore, InMemorySessionStore};

struct Table<T> {
    rows: Vec<T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// `UserRepository` over a vector. Logins are unique.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: Mutex<Table<Account>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, account: &NewAccount) -> Result<UserId, UserRepositoryError> {
        let mut table = self.table.lock().await;
        if table.rows.iter().any(|row| row.login == account.login) {
            return Err(UserRepositoryError::duplicate_login(account.login.as_ref()));
        }
        let id = UserId::new(table.allocate());
        table.rows.push(Account {
            id,
            login: account.login.clone(),
            password_digest: account.password_digest.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            phone: account.phone.clone(),
            has_profile_image: false,
        });
        Ok(id)
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, UserRepositoryError> {
        let table = self.table.lock().await;
        Ok(table
            .rows
            .iter()
            .find(|row| row.login.as_ref() == login)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<Account>, UserRepositoryError> {
        let table = self.table.lock().await;
        Ok(table.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn set_profile_image(
        &self,
        id: UserId,
        present: bool,
    ) -> Result<(), UserRepositoryError> {
        let mut table = self.table.lock().await;
        if let Some(row) = table.rows.iter_mut().find(|row| row.id == id) {
            row.has_profile_image = present;
        }
        Ok(())
    }
}

/// `CarRepository` over a vector. Deleted cars keep their rows.
#[derive(Default)]
pub struct InMemoryCarRepository {
    table: Mutex<Table<Car>>,
}

#[async_trait]
impl CarRepository for InMemoryCarRepository {
    async fn insert(&self, owner: UserId, car: &NewCar) -> Result<Car, CarRepositoryError> {
        let mut table = self.table.lock().await;
        let stored = Car {
            id: CarId::new(table.allocate()),
            owner_id: owner,
            brand: car.brand.clone(),
            model: car.model.clone(),
            vin: car.vin.clone(),
            year: car.year,
            deleted: false,
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError> {
        let table = self.table.lock().await;
        Ok(table.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn list_active_for_owner(&self, owner: UserId) -> Result<Vec<Car>, CarRepositoryError> {
        let table = self.table.lock().await;
        Ok(table
            .rows
            .iter()
            .filter(|row| row.owner_id == owner && !row.deleted)
            .cloned()
            .collect())
    }

    async fn mark_deleted(&self, id: CarId) -> Result<(), CarRepositoryError> {
        let mut table = self.table.lock().await;
        if let Some(row) = table.rows.iter_mut().find(|row| row.id == id) {
            row.deleted = true;
        }
        Ok(())
    }
}

/// `OrderRepository` over a vector.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    table: Mutex<Table<Order>>,
}

impl InMemoryOrderRepository {
    async fn update(
        &self,
        id: OrderId,
        apply: impl FnOnce(&mut Order),
    ) -> Result<(), OrderRepositoryError> {
        let mut table = self.table.lock().await;
        match table.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                apply(row);
                Ok(())
            }
            None => Err(OrderRepositoryError::query(format!("order {id} vanished"))),
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: &NewOrder) -> Result<Order, OrderRepositoryError> {
        let mut table = self.table.lock().await;
        let stored = Order {
            id: OrderId::new(table.allocate()),
            owner_id: order.owner_id,
            car_id: order.car_id,
            status: OrderStatus::Open,
            service_date: order.service_date,
            cost: order.cost,
            description: order.description.clone(),
            has_unread_message: false,
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderRepositoryError> {
        let table = self.table.lock().await;
        Ok(table.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
        statuses: &[OrderStatus],
    ) -> Result<Vec<Order>, OrderRepositoryError> {
        let table = self.table.lock().await;
        let mut orders: Vec<Order> = table
            .rows
            .iter()
            .filter(|row| row.owner_id == owner && statuses.contains(&row.status))
            .cloned()
            .collect();
        orders.sort_by_key(|order| (order.status, order.id));
        Ok(orders)
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), OrderRepositoryError> {
        self.update(id, |row| row.status = status).await
    }

    async fn set_unread(&self, id: OrderId, unread: bool) -> Result<(), OrderRepositoryError> {
        self.update(id, |row| row.has_unread_message = unread).await
    }
}

/// `MessageRepository` over a vector. Ids grow with every append.
#[derive(Default)]
pub struct InMemoryMessageRepository {
    table: Mutex<Table<Message>>,
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(&self, message: &NewMessage) -> Result<Message, MessageRepositoryError> {
        let mut table = self.table.lock().await;
        let stored = Message {
            id: MessageId::new(table.allocate()),
            order_id: message.order_id,
            author: message.author,
            text: message.text.clone(),
            sent_at: message.sent_at,
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn list_for_order(&self, order: OrderId) -> Result<Vec<Message>, MessageRepositoryError> {
        let table = self.table.lock().await;
        let mut thread: Vec<Message> = table
            .rows
            .iter()
            .filter(|row| row.order_id == order)
            .cloned()
            .collect();
        sort_thread(&mut thread);
        Ok(thread)
    }
}

/// A station wired over in-memory adapters and a temporary image directory.
///
/// # Examples
/// ```
/// use service_station::test_support::InMemoryStation;
///
/// let station = InMemoryStation::new()?;
/// assert!(station.image_dir().exists());
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct InMemoryStation {
    pub services: StationServices,
    images: TempDir,
}

impl InMemoryStation {
    /// Build a station with default year bounds and indefinite sessions.
    pub fn new() -> io::Result<Self> {
        let images = tempfile::tempdir()?;
        let image_store = CapStdProfileImageStore::open(images.path())
            .map_err(|err| io::Error::other(err.to_string()))?;
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let services = StationServices::new(StationPorts {
            users: Arc::new(InMemoryUserRepository::default()),
            cars: Arc::new(InMemoryCarRepository::default()),
            orders: Arc::new(InMemoryOrderRepository::default()),
            messages: Arc::new(InMemoryMessageRepository::default()),
            sessions: Arc::new(InMemorySessionStore::new(clock.clone(), None)),
            hasher: Arc::new(Argon2PasswordHasher::new()),
            images: Arc::new(image_store),
            clock,
            year_bounds: YearBounds::default(),
        });
        Ok(Self { services, images })
    }

    /// HTTP state over this station's services with insecure cookies.
    pub fn http_state(&self) -> HttpState {
        HttpState::from_services(&self.services, false)
    }

    /// Back-office port of this station.
    pub fn staff(&self) -> Arc<dyn StaffOrdersCommand> {
        self.services.staff.clone()
    }

    /// Directory holding stored profile images.
    pub fn image_dir(&self) -> &std::path::Path {
        self.images.path()
    }
}
