//! Session Service Port - obtains the opaque session id at mount time.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::foundation::SessionId;

/// Port for creating a backend session.
///
/// Failure is not fatal: the widget keeps working without a session and
/// only evaluation submission is skipped.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Creates a session for the given entry channel (e.g. `"web"`, `"line"`).
    async fn create(&self, source: &str) -> Result<SessionId, ApiError>;
}
