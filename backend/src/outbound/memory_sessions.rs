//! Process-local `SessionStore`.
//!
//! Tokens live in a `RwLock<HashMap>` and vanish on restart. With a TTL set,
//! entries older than the TTL resolve as unknown and are evicted.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{SessionToken, UserId};

#[derive(Debug, Clone, Copy)]
struct Entry {
    user: UserId,
    created_at: DateTime<Utc>,
}

/// In-memory implementation of [`SessionStore`].
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<SessionToken, Entry>>,
    clock: Arc<dyn Clock>,
    ttl: Option<chrono::Duration>,
}

impl InMemorySessionStore {
    /// Sessions expire after `ttl` when set, otherwise they last until revoked.
    pub fn new(clock: Arc<dyn Clock>, ttl: Option<Duration>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
            ttl: ttl.and_then(|ttl| chrono::Duration::from_std(ttl).ok()),
        }
    }

    fn is_expired(&self, entry: &Entry) -> bool {
        self.ttl
            .is_some_and(|ttl| entry.created_at + ttl <= self.clock.utc())
    }

    /// Number of tokens currently held, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, user: UserId) -> Result<SessionToken, SessionStoreError> {
        let token = SessionToken::generate();
        let entry = Entry {
            user,
            created_at: self.clock.utc(),
        };
        self.entries.write().await.insert(token, entry);
        Ok(token)
    }

    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, SessionStoreError> {
        let entry = self.entries.read().await.get(token).copied();
        match entry {
            Some(entry) if self.is_expired(&entry) => {
                self.entries.write().await.remove(token);
                debug!("expired session evicted");
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.user)),
            None => Ok(None),
        }
    }

    async fn revoke(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        self.entries.write().await.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Local;
    use rstest::rstest;
    use std::sync::Mutex;

    use super::*;

    struct SteppingClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl SteppingClock {
        fn advance(&self, by: chrono::Duration) {
            let mut now = self.now.lock().expect("clock lock");
            *now += by;
        }
    }

    impl Clock for SteppingClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.now.lock().expect("clock lock")
        }
    }

    fn clock() -> Arc<SteppingClock> {
        Arc::new(SteppingClock {
            now: Mutex::new(DateTime::<Utc>::UNIX_EPOCH),
        })
    }

    #[rstest]
    #[tokio::test]
    async fn tokens_resolve_until_revoked() {
        let store = InMemorySessionStore::new(clock(), None);
        let first = store.create(UserId::new(1)).await.expect("create");
        let second = store.create(UserId::new(1)).await.expect("create");
        assert_ne!(first, second);

        store.revoke(&first).await.expect("revoke");
        assert_eq!(store.resolve(&first).await.expect("resolve"), None);
        assert_eq!(
            store.resolve(&second).await.expect("resolve"),
            Some(UserId::new(1))
        );
        store.revoke(&first).await.expect("revoking twice is fine");
    }

    #[rstest]
    #[tokio::test]
    async fn expired_tokens_are_evicted() {
        let clock = clock();
        let store = InMemorySessionStore::new(clock.clone(), Some(Duration::from_secs(60)));
        let token = store.create(UserId::new(3)).await.expect("create");

        clock.advance(chrono::Duration::seconds(59));
        assert_eq!(
            store.resolve(&token).await.expect("resolve"),
            Some(UserId::new(3))
        );

        clock.advance(chrono::Duration::seconds(1));
        assert_eq!(store.resolve(&token).await.expect("resolve"), None);
        assert!(store.is_empty().await);
    }
}
