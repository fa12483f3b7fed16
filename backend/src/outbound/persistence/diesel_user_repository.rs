//! PostgreSQL-backed `UserRepository`.
//!
//! Logins are unique at the database level; a racing registration that loses
//! the insert surfaces as `DuplicateLogin` rather than a generic query error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Account, Login, NewAccount, PasswordDigest, PersonName, Phone, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn row_to_account(row: UserRow) -> Account {
    Account {
        id: UserId::new(row.id),
        login: Login::from_stored(row.login),
        password_digest: PasswordDigest::new(row.password_digest),
        first_name: PersonName::from_stored(row.first_name),
        last_name: PersonName::from_stored(row.last_name),
        phone: Phone::from_stored(row.phone),
        has_profile_image: row.has_profile_image,
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, account: &NewAccount) -> Result<UserId, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            login: account.login.as_ref(),
            password_digest: account.password_digest.as_ref(),
            first_name: account.first_name.as_ref(),
            last_name: account.last_name.as_ref(),
            phone: account.phone.as_ref(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .returning(users::id)
            .get_result::<i64>(&mut conn)
            .await
            .map(UserId::new)
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserRepositoryError::duplicate_login(account.login.as_ref())
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .filter(users::login.eq(login))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_account))
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<Account>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_account))
            .map_err(map_diesel_error)
    }

    async fn set_profile_image(
        &self,
        id: UserId,
        present: bool,
    ) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(users::table.find(id.get()))
            .set(users::has_profile_image.eq(present))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
