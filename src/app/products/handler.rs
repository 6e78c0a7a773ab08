//! 产品处理器

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::{debug, info};

use super::model::{
    CreateProductRequest, NewProduct, Product, ProductId, ProductPatch, UpdateProductRequest,
};
use crate::core::error::{CoreError, FieldError};
use crate::router::AppState;

/// 搜索查询参数
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

fn parse_product_id(raw: &str) -> Result<ProductId, CoreError> {
    raw.trim()
        .parse::<ProductId>()
        .map_err(|_| CoreError::invalid_product_id())
}

fn body_error(rejection: JsonRejection) -> CoreError {
    debug!("请求体解析失败: {}", rejection.body_text());
    CoreError::invalid_product_data(vec![FieldError::new("body", rejection.body_text())])
}

/// 获取所有产品
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, CoreError> {
    Ok(Json(state.products.list_products()?))
}

/// 按分类获取产品，未知分类返回空数组
pub async fn products_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Product>>, CoreError> {
    Ok(Json(state.products.products_by_category(&category)?))
}

pub async fn featured_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, CoreError> {
    Ok(Json(state.products.featured_products()?))
}

pub async fn new_arrivals(State(state): State<AppState>) -> Result<Json<Vec<Product>>, CoreError> {
    Ok(Json(state.products.new_arrivals()?))
}

/// 搜索产品，`q` 缺失、为空或格式不对时返回 400
pub async fn search_products(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Product>>, CoreError> {
    let query = params
        .ok()
        .and_then(|Query(params)| params.q)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| CoreError::BadRequest("Search query is required".to_string()))?;

    Ok(Json(state.products.search_products(&query)?))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, CoreError> {
    let id = parse_product_id(&id)?;
    Ok(Json(state.products.get_product(id)?))
}

/// 创建产品
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), CoreError> {
    let Json(payload) = payload.map_err(body_error)?;
    let input = NewProduct::try_from(payload)?;

    let product = state.products.create_product(input)?;
    info!("创建产品: {} ({})", product.name, product.id);

    Ok((StatusCode::CREATED, Json(product)))
}

/// 部分更新产品
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<Product>, CoreError> {
    let id = parse_product_id(&id)?;
    let Json(payload) = payload.map_err(body_error)?;
    let patch = ProductPatch::try_from(payload)?;

    let product = state.products.update_product(id, patch)?;
    info!("更新产品: {} ({})", product.name, product.id);

    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CoreError> {
    let id = parse_product_id(&id)?;
    state.products.delete_product(id)?;
    info!("删除产品: {}", id);

    Ok(StatusCode::NO_CONTENT)
}
