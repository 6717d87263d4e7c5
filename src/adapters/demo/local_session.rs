//! Offline session issuer.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::foundation::SessionId;
use crate::ports::{ApiError, SessionService};

/// Issues `local-<uuid>` session ids without contacting a server.
#[derive(Debug, Clone, Default)]
pub struct LocalSessionService;

impl LocalSessionService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionService for LocalSessionService {
    async fn create(&self, source: &str) -> Result<SessionId, ApiError> {
        let id = SessionId::new(format!("local-{}", Uuid::new_v4()))
            .map_err(|e| ApiError::parse(e.to_string()))?;
        tracing::info!(session_id = %id, source, "Local session created");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn issues_distinct_local_ids() {
        let service = LocalSessionService::new();
        let a = service.create("web").await.unwrap();
        let b = service.create("web").await.unwrap();
        assert!(a.as_str().starts_with("local-"));
        assert_ne!(a, b);
    }
}
