//! `POST /api/sessions` adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::domain::foundation::SessionId;
use crate::ports::{ApiError, SessionService};

#[derive(Debug, Serialize)]
struct CreateSessionBody<'a> {
    source: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateSessionResponse {
    id: String,
}

/// Session creation backed by the support backend.
#[derive(Debug, Clone)]
pub struct HttpSessionClient {
    api: ApiClient,
}

impl HttpSessionClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SessionService for HttpSessionClient {
    async fn create(&self, source: &str) -> Result<SessionId, ApiError> {
        let response: CreateSessionResponse =
            self.api.post_json("sessions", &CreateSessionBody { source }).await?;
        SessionId::new(response.id).map_err(|e| ApiError::parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_shape() {
        let json = serde_json::to_value(CreateSessionBody { source: "line" }).unwrap();
        assert_eq!(json, serde_json::json!({"source": "line"}));
    }

    #[test]
    fn response_ignores_extra_fields() {
        let response: CreateSessionResponse =
            serde_json::from_str(r#"{"id":"abc","created_at":"2024-01-01"}"#).unwrap();
        assert_eq!(response.id, "abc");
    }
}
