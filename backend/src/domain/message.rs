//! Order thread messages.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::validation::required_text;
use super::{FieldViolation, MessageId, OrderId};

const MESSAGE_MAX_CHARS: usize = 2000;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    /// The customer who owns the order.
    Customer,
    /// Station staff.
    Staff,
}

impl Author {
    /// Storage flag: `true` for staff.
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Staff)
    }

    /// Decode the storage flag.
    pub const fn from_staff_flag(from_staff: bool) -> Self {
        if from_staff { Self::Staff } else { Self::Customer }
    }
}

/// Message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageText(String);

impl MessageText {
    /// Non-empty, bounded text.
    pub fn new(raw: &str) -> Result<Self, FieldViolation> {
        required_text("text", raw, MESSAGE_MAX_CHARS).map(Self)
    }

    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for MessageText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Message to append to a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub order_id: OrderId,
    pub author: Author,
    pub text: MessageText,
    pub sent_at: DateTime<Utc>,
}

/// Stored message. Threads are ordered by `(sent_at, id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub order_id: OrderId,
    pub author: Author,
    pub text: MessageText,
    pub sent_at: DateTime<Utc>,
}

/// Sort a thread by timestamp, breaking ties by insertion id.
pub fn sort_thread(messages: &mut [Message]) {
    messages.sort_by_key(|message| (message.sent_at, message.id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rule;
    use chrono::TimeZone;
    use rstest::rstest;

    fn message(id: i64, second: u32) -> Message {
        Message {
            id: MessageId::new(id),
            order_id: OrderId::new(1),
            author: Author::Customer,
            text: MessageText::new("hello").expect("valid text"),
            sent_at: Utc
                .with_ymd_and_hms(2024, 6, 5, 10, 0, second)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[rstest]
    fn empty_text_is_rejected() {
        let err = MessageText::new("  ").expect_err("blank text");
        assert_eq!(err.field(), "text");
        assert_eq!(err.rule(), Rule::Empty);
    }

    #[rstest]
    fn thread_sorts_by_time_then_id() {
        let mut thread = vec![message(3, 5), message(2, 5), message(1, 9)];
        sort_thread(&mut thread);
        let ids: Vec<i64> = thread.iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[rstest]
    #[case(Author::Staff, true)]
    #[case(Author::Customer, false)]
    fn staff_flag_round_trips(#[case] author: Author, #[case] flag: bool) {
        assert_eq!(author.is_staff(), flag);
        assert_eq!(Author::from_staff_flag(flag), author);
    }
}
