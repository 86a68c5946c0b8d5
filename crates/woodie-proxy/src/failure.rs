//! JSON bodies returned when the upstream cannot be reached.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Failure body of the listing routes.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FetchFailed {
    pub success: bool,
    pub message: &'static str,
}

impl FetchFailed {
    pub const PRODUCTS: Self = Self::new("Products fetch failed");
    pub const CATEGORIES: Self = Self::new("Categories fetch failed");
    pub const BANNER: Self = Self::new("Banner fetch failed");

    const fn new(message: &'static str) -> Self {
        Self {
            success: false,
            message,
        }
    }
}

impl IntoResponse for FetchFailed {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorMessage {
    pub message: String,
    pub path: String,
}

/// Failure body of the product-by-path route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PathFailure {
    #[serde(skip)]
    pub code: StatusCode,
    /// Always the string `"false"`.
    pub status: &'static str,
    pub message: String,
    #[serde(rename = "errorMessages")]
    pub error_messages: Vec<ErrorMessage>,
}

impl PathFailure {
    /// 400: the request named no product.
    pub fn missing_id() -> Self {
        Self {
            code: StatusCode::BAD_REQUEST,
            status: "false",
            message: "Missing id".to_string(),
            error_messages: vec![ErrorMessage {
                message: "Missing id".to_string(),
                path: "id".to_string(),
            }],
        }
    }

    /// 500: the upstream failed or answered with something other than JSON.
    pub fn server_error(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self {
            code: StatusCode::INTERNAL_SERVER_ERROR,
            status: "false",
            message: "Server error".to_string(),
            error_messages: vec![ErrorMessage {
                message: if detail.is_empty() {
                    "Server error".to_string()
                } else {
                    detail
                },
                path: String::new(),
            }],
        }
    }
}

impl IntoResponse for PathFailure {
    fn into_response(self) -> Response {
        (self.code, Json(self)).into_response()
    }
}
