//! Acknowledgement bodies for mutations that return no document.

use serde::Serialize;
use utoipa::ToSchema;

/// `{ "success": "true" }`, optionally with a human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self {
            success: "true".to_string(),
            message: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: "true".to_string(),
            message: Some(message.into()),
        }
    }
}

/// Shape of every error body, for the OpenAPI document.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}
