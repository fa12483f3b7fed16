//! PostgreSQL-backed `SessionStore`.
//!
//! Tokens survive restarts and are shared between instances. With a TTL set,
//! expired rows resolve as unknown and are deleted on the lookup that finds
//! them.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{SessionToken, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewSessionRow, SessionRow};
use super::pool::{DbPool, PoolError};
use super::schema::sessions;

/// Diesel implementation of [`SessionStore`].
#[derive(Clone)]
pub struct DieselSessionStore {
    pool: DbPool,
    clock: Arc<dyn Clock>,
    ttl: Option<Duration>,
}

impl DieselSessionStore {
    /// Store sessions in `pool`, expiring them after `ttl` when set.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>, ttl: Option<Duration>) -> Self {
        Self { pool, clock, ttl }
    }

    fn is_expired(&self, row: &SessionRow) -> bool {
        let Some(ttl) = self.ttl else {
            return false;
        };
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => row.created_at + ttl <= self.clock.utc(),
            Err(_) => false,
        }
    }
}

fn map_pool_error(error: PoolError) -> SessionStoreError {
    map_basic_pool_error(error, SessionStoreError::unavailable)
}

fn map_diesel_error(error: diesel::result::Error) -> SessionStoreError {
    map_basic_diesel_error(
        error,
        SessionStoreError::unavailable,
        SessionStoreError::unavailable,
    )
}

#[async_trait]
impl SessionStore for DieselSessionStore {
    async fn create(&self, user: UserId) -> Result<SessionToken, SessionStoreError> {
        let token = SessionToken::generate();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(sessions::table)
            .values(&NewSessionRow {
                token: *token.as_uuid(),
                user_id: user.get(),
                created_at: self.clock.utc(),
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(token)
    }

    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, SessionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<SessionRow> = sessions::table
            .find(token.as_uuid())
            .select(SessionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        if self.is_expired(&row) {
            diesel::delete(sessions::table.find(token.as_uuid()))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            debug!("expired session evicted");
            return Ok(None);
        }
        Ok(Some(UserId::new(row.user_id)))
    }

    async fn revoke(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(sessions::table.find(token.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
