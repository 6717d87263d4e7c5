//! Session service double with a fixed outcome.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::ports::{ApiError, SessionService};

/// Returns the same session id, or the same error, on every call.
#[derive(Debug, Clone)]
pub struct StaticSessionService {
    outcome: Result<SessionId, ApiError>,
    calls: Arc<AtomicUsize>,
}

impl StaticSessionService {
    pub fn returning(id: SessionId) -> Self {
        Self {
            outcome: Ok(id),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(error: ApiError) -> Self {
        Self {
            outcome: Err(error),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionService for StaticSessionService {
    async fn create(&self, _source: &str) -> Result<SessionId, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
