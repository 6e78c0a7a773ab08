//! 分类处理器

use axum::{extract::State, response::Json};

use super::model::CategoryInfo;
use crate::router::AppState;

pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategoryInfo>> {
    Json(state.categories.as_ref().clone())
}
