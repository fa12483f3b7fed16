//! Request-scoped correlation identifier.
//!
//! The HTTP middleware opens a scope per request; domain errors read the
//! current value so client payloads and log lines share one id. Task-local
//! values do not follow `tokio::spawn`; wrap spawned work in [`TraceId::scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request trace identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a new random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the request currently being served, if any.
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` in scope.
    ///
    /// # Examples
    /// ```
    /// use service_station::domain::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let id = TraceId::generate();
    /// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn current_is_none_out_of_scope() {
        assert!(TraceId::current().is_none());
    }

    #[tokio::test]
    async fn nested_scope_shadows_outer() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();
        let observed = TraceId::scope(outer, async move {
            TraceId::scope(inner, async { TraceId::current() }).await
        })
        .await;
        assert_eq!(observed, Some(inner));
    }

    #[test]
    fn parses_canonical_uuid() {
        let id: TraceId = "00000000-0000-0000-0000-000000000000"
            .parse()
            .expect("valid uuid");
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
    }
}
