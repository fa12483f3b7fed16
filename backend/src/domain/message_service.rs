//! Customer side of order threads.
//!
//! Reading a thread clears the order's unread flag. The flag is cleared
//! before the thread is loaded, so a staff reply landing between the two
//! storage calls sets it again and is never left unannounced.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::access_gate::map_order_repository_error;
use crate::domain::ports::{
    MessageCommand, MessageRepository, MessageRepositoryError, OrderRepository,
};
use crate::domain::{
    AccessGate, Author, Error, Message, MessageText, NewMessage, OrderId, UserId, sort_thread,
};

pub(crate) fn map_message_repository_error(error: MessageRepositoryError) -> Error {
    match error {
        MessageRepositoryError::Connection { message } => {
            Error::storage_unavailable(format!("message repository unavailable: {message}"))
        }
        MessageRepositoryError::Query { message } => {
            Error::internal(format!("message repository error: {message}"))
        }
    }
}

/// Message service implementing [`MessageCommand`].
#[derive(Clone)]
pub struct MessageService {
    messages: Arc<dyn MessageRepository>,
    orders: Arc<dyn OrderRepository>,
    gate: AccessGate,
    clock: Arc<dyn Clock>,
}

impl MessageService {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        orders: Arc<dyn OrderRepository>,
        gate: AccessGate,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            messages,
            orders,
            gate,
            clock,
        }
    }
}

#[async_trait]
impl MessageCommand for MessageService {
    async fn post_customer_message(
        &self,
        customer: UserId,
        order: OrderId,
        text: MessageText,
    ) -> Result<Message, Error> {
        self.gate.can_customer_append_message(customer, order).await?;
        let message = self
            .messages
            .append(&NewMessage {
                order_id: order,
                author: Author::Customer,
                text,
                sent_at: self.clock.utc(),
            })
            .await
            .map_err(map_message_repository_error)?;
        info!(user = %customer, order = %order, message = %message.id, "customer message posted");
        Ok(message)
    }

    async fn list_messages(
        &self,
        customer: UserId,
        order: OrderId,
    ) -> Result<Vec<Message>, Error> {
        let current = self.gate.owned_order(customer, order).await?;
        if current.has_unread_message {
            self.orders
                .set_unread(order, false)
                .await
                .map_err(map_order_repository_error)?;
            debug!(order = %order, "unread flag cleared");
        }

        let mut thread = self
            .messages
            .list_for_order(order)
            .await
            .map_err(map_message_repository_error)?;
        sort_thread(&mut thread);
        Ok(thread)
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;
    use rstest::rstest;

    use super::*;
    use crate::domain::fixtures::{clock_at, instant, message, order};
    use crate::domain::ports::{
        MockCarRepository, MockMessageRepository, MockOrderRepository, MockSessionStore, NewOrder,
    };
    use crate::test_support::{InMemoryMessageRepository, InMemoryOrderRepository};
    use crate::domain::{ErrorCode, MessageId, OrderStatus};

    fn service(orders: MockOrderRepository, messages: MockMessageRepository) -> MessageService {
        let orders: Arc<dyn OrderRepository> = Arc::new(orders);
        let gate = AccessGate::new(
            Arc::new(MockSessionStore::new()),
            Arc::new(MockCarRepository::new()),
            Arc::clone(&orders),
        );
        MessageService::new(Arc::new(messages), orders, gate, clock_at(42))
    }

    fn text(raw: &str) -> MessageText {
        MessageText::new(raw).expect("valid text")
    }

    #[rstest]
    #[case(OrderStatus::Open)]
    #[case(OrderStatus::Confirmed)]
    #[tokio::test]
    async fn customer_posts_while_active(#[case] status: OrderStatus) {
        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(order(4, 7, status))));
        let mut messages = MockMessageRepository::new();
        messages
            .expect_append()
            .withf(|new_message| {
                new_message.author == Author::Customer && new_message.sent_at == instant(42)
            })
            .times(1)
            .return_once(|new_message| {
                Ok(Message {
                    id: MessageId::new(1),
                    order_id: new_message.order_id,
                    author: new_message.author,
                    text: new_message.text.clone(),
                    sent_at: new_message.sent_at,
                })
            });

        let posted = service(orders, messages)
            .post_customer_message(UserId::new(7), OrderId::new(4), text("when is it ready?"))
            .await
            .expect("message posted");
        assert_eq!(posted.author, Author::Customer);
    }

    #[rstest]
    #[tokio::test]
    async fn closed_order_rejects_customer_message() {
        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .return_once(|_| Ok(Some(order(4, 7, OrderStatus::Closed))));
        let mut messages = MockMessageRepository::new();
        messages.expect_append().times(0);

        let err = service(orders, messages)
            .post_customer_message(UserId::new(7), OrderId::new(4), text("hello"))
            .await
            .expect_err("closed");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn reading_thread_clears_unread_then_sorts() {
        let mut seq = Sequence::new();
        let mut orders = MockOrderRepository::new();
        orders.expect_find_by_id().return_once(|_| {
            let mut unread = order(4, 7, OrderStatus::Confirmed);
            unread.has_unread_message = true;
            Ok(Some(unread))
        });
        orders
            .expect_set_unread()
            .withf(|id, unread| *id == OrderId::new(4) && !*unread)
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_, _| Ok(()));
        let mut messages = MockMessageRepository::new();
        messages
            .expect_list_for_order()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_| {
                let mut late = message(1, 4, Author::Staff, "ready");
                late.sent_at = instant(30);
                let early = message(2, 4, Author::Customer, "status?");
                Ok(vec![late, early])
            });

        let thread = service(orders, messages)
            .list_messages(UserId::new(7), OrderId::new(4))
            .await
            .expect("thread");
        let ids: Vec<_> = thread.iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[rstest]
    #[tokio::test]
    async fn reading_read_thread_skips_flag_write() {
        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .return_once(|_| Ok(Some(order(4, 7, OrderStatus::Closed))));
        orders.expect_set_unread().times(0);
        let mut messages = MockMessageRepository::new();
        messages
            .expect_list_for_order()
            .return_once(|_| Ok(Vec::new()));

        let thread = service(orders, messages)
            .list_messages(UserId::new(7), OrderId::new(4))
            .await
            .expect("closed threads stay readable");
        assert!(thread.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn foreign_thread_is_forbidden() {
        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .return_once(|_| Ok(Some(order(4, 8, OrderStatus::Open))));
        let mut messages = MockMessageRepository::new();
        messages.expect_list_for_order().times(0);

        let err = service(orders, messages)
            .list_messages(UserId::new(7), OrderId::new(4))
            .await
            .expect_err("foreign");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    /// Thread storage where a staff reply lands right after every read.
    struct ReplyAfterRead {
        inner: InMemoryMessageRepository,
        orders: Arc<InMemoryOrderRepository>,
    }

    #[async_trait]
    impl MessageRepository for ReplyAfterRead {
        async fn append(&self, message: &NewMessage) -> Result<Message, MessageRepositoryError> {
            self.inner.append(message).await
        }

        async fn list_for_order(
            &self,
            order: OrderId,
        ) -> Result<Vec<Message>, MessageRepositoryError> {
            let thread = self.inner.list_for_order(order).await?;
            self.inner
                .append(&NewMessage {
                    order_id: order,
                    author: Author::Staff,
                    text: text("done, come pick it up"),
                    sent_at: instant(50),
                })
                .await?;
            self.orders
                .set_unread(order, true)
                .await
                .map_err(|err| MessageRepositoryError::query(err.to_string()))?;
            Ok(thread)
        }
    }

    #[rstest]
    #[tokio::test]
    async fn staff_reply_during_read_keeps_unread_flag() {
        let orders = Arc::new(InMemoryOrderRepository::default());
        let template = order(1, 7, OrderStatus::Confirmed);
        let stored = orders
            .insert(&NewOrder {
                owner_id: template.owner_id,
                car_id: template.car_id,
                service_date: template.service_date,
                cost: template.cost,
                description: template.description,
            })
            .await
            .expect("order stored");
        let messages = Arc::new(ReplyAfterRead {
            inner: InMemoryMessageRepository::default(),
            orders: Arc::clone(&orders),
        });
        messages
            .inner
            .append(&NewMessage {
                order_id: stored.id,
                author: Author::Staff,
                text: text("parts ordered"),
                sent_at: instant(10),
            })
            .await
            .expect("first reply");
        orders.set_unread(stored.id, true).await.expect("flag set");

        let gate = AccessGate::new(
            Arc::new(MockSessionStore::new()),
            Arc::new(MockCarRepository::new()),
            orders.clone(),
        );
        let service = MessageService::new(messages.clone(), orders.clone(), gate, clock_at(60));
        let shown = service
            .list_messages(UserId::new(7), stored.id)
            .await
            .expect("thread");

        let all = messages.inner.list_for_order(stored.id).await.expect("all");
        assert_eq!(shown.len(), 1);
        assert_eq!(all.len(), 2);
        let after = orders
            .find_by_id(stored.id)
            .await
            .expect("lookup")
            .expect("order present");
        assert!(after.has_unread_message, "unseen staff reply must stay flagged");
    }
}
