use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DatabaseHealthStatus {
    pub status: String,
    pub response_time_ms: u64,
    pub error: Option<String>,
}

impl DatabaseHealthStatus {
    pub fn up(response_time_ms: u64) -> Self {
        Self {
            status: "UP".to_string(),
            response_time_ms,
            error: None,
        }
    }

    pub fn down(response_time_ms: u64, error: String) -> Self {
        Self {
            status: "DOWN".to_string(),
            response_time_ms,
            error: Some(error),
        }
    }

    pub fn is_up(&self) -> bool {
        self.error.is_none()
    }
}
