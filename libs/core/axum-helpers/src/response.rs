//! Success envelopes shared by every resource route.
//!
//! ```json
//! { "success": true, "message": "Data shown successfully", "data": { "id": 1 } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

/// `{success, message, data}`. `data` is always present and is `null` when
/// there is nothing to return.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self::new(message, Some(data))
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// `{success, message}` without a `data` key.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiMessage {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_data_serializes_as_null() {
        let envelope: ApiResponse<u32> = ApiResponse::new("Data shown successfully", None);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"success": true, "message": "Data shown successfully", "data": null})
        );
    }

    #[test]
    fn test_message_has_no_data_key() {
        let value = serde_json::to_value(ApiMessage::new("Deleted Successfully")).unwrap();
        assert_eq!(
            value,
            json!({"success": true, "message": "Deleted Successfully"})
        );
    }

    #[test]
    fn test_into_response_is_ok() {
        let response = ApiResponse::with_data("ok", vec![1, 2]).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
