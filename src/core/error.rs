//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// 核心错误类型
#[derive(Debug)]
pub enum CoreError {
    BadRequest(String),
    /// 请求体未通过校验，附带逐字段的错误列表
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },
    NotFound(String),
    InternalServerError(String),
}

/// 单个字段的校验错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 错误响应结构
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::BadRequest(_) | CoreError::Validation { .. } => StatusCode::BAD_REQUEST,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid_product_id() -> Self {
        CoreError::BadRequest("Invalid product ID".to_string())
    }

    pub fn product_not_found() -> Self {
        CoreError::NotFound("Product not found".to_string())
    }

    pub fn invalid_product_data(errors: Vec<FieldError>) -> Self {
        CoreError::Validation {
            message: "Invalid product data".to_string(),
            errors,
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::BadRequest(msg) | CoreError::NotFound(msg) => write!(f, "{}", msg),
            CoreError::Validation { message, errors } => {
                write!(f, "{} ({} 个字段错误)", message, errors.len())
            }
            CoreError::InternalServerError(msg) => write!(f, "内部错误: {}", msg),
        }
    }
}

impl std::error::Error for CoreError {}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_message, user_message, errors) = match self {
            CoreError::BadRequest(msg) => ("BAD_REQUEST", msg, Vec::new()),
            CoreError::Validation { message, errors } => ("VALIDATION_ERROR", message, errors),
            CoreError::NotFound(msg) => ("NOT_FOUND", msg, Vec::new()),
            CoreError::InternalServerError(msg) => {
                // 细节只进日志，不返回给客户端
                error!("内部错误: {}", msg);
                (
                    "INTERNAL_SERVER_ERROR",
                    "Internal Server Error".to_string(),
                    Vec::new(),
                )
            }
        };

        let error_response = ErrorResponse {
            error: error_message.to_string(),
            message: user_message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            errors,
        };

        (status, axum::Json(error_response)).into_response()
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut errors: Vec<FieldError> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    FieldError::new(field.to_string(), message)
                })
            })
            .collect();
        errors.sort_by(|a, b| a.field.cmp(&b.field));

        CoreError::invalid_product_data(errors)
    }
}

impl From<crate::infrastructure::storage::StorageError> for CoreError {
    fn from(err: crate::infrastructure::storage::StorageError) -> Self {
        CoreError::InternalServerError(err.to_string())
    }
}
