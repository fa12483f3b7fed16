//! PostgreSQL-backed `MessageRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MessageRepository, MessageRepositoryError};
use crate::domain::{Author, Message, MessageId, MessageText, NewMessage, OrderId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{MessageRow, NewMessageRow};
use super::pool::{DbPool, PoolError};
use super::schema::messages;

/// Diesel implementation of [`MessageRepository`].
#[derive(Clone)]
pub struct DieselMessageRepository {
    pool: DbPool,
}

impl DieselMessageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MessageRepositoryError {
    map_basic_pool_error(error, MessageRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> MessageRepositoryError {
    map_basic_diesel_error(
        error,
        MessageRepositoryError::query,
        MessageRepositoryError::connection,
    )
}

fn row_to_message(row: MessageRow) -> Message {
    Message {
        id: MessageId::new(row.id),
        order_id: OrderId::new(row.order_id),
        author: Author::from_staff_flag(row.from_staff),
        text: MessageText::from_stored(row.body),
        sent_at: row.sent_at,
    }
}

#[async_trait]
impl MessageRepository for DieselMessageRepository {
    async fn append(&self, message: &NewMessage) -> Result<Message, MessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewMessageRow {
            order_id: message.order_id.get(),
            from_staff: message.author.is_staff(),
            body: message.text.as_ref(),
            sent_at: message.sent_at,
        };

        diesel::insert_into(messages::table)
            .values(&row)
            .returning(MessageRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_message)
            .map_err(map_diesel_error)
    }

    async fn list_for_order(&self, order: OrderId) -> Result<Vec<Message>, MessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<MessageRow> = messages::table
            .filter(messages::order_id.eq(order.get()))
            .order((messages::sent_at.asc(), messages::id.asc()))
            .select(MessageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_message).collect())
    }
}
