//! 核心中间件模块

use axum::{
    body::Body,
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::{any::Any, time::Instant};
use tracing::{error, info};

use super::error::ErrorResponse;

/// 请求日志中间件
///
/// 只记录 `/api` 下的请求：方法、路径、状态码与耗时。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    if path.starts_with("/api") {
        info!(
            "{} {} {} in {}ms",
            method,
            path,
            response.status().as_u16(),
            start.elapsed().as_millis()
        );
    }

    response
}

/// 处理器 panic 时返回统一的 500 响应
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "未知 panic".to_string()
    };
    error!("请求处理过程中发生 panic: {}", detail);

    let body = ErrorResponse {
        error: "INTERNAL_SERVER_ERROR".to_string(),
        message: "Internal Server Error".to_string(),
        code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        errors: Vec::new(),
    };

    let mut response = (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}
