//! 路由组装

use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::app::categories::{handler as categories, CategoryInfo};
use crate::app::products::{handler as products, ProductService};
use crate::core::error::CoreError;
use crate::core::middleware::{handle_panic, request_logging_middleware};

/// 应用状态，构造时注入存储
#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
    pub categories: Arc<Vec<CategoryInfo>>,
}

impl AppState {
    pub fn new(products: ProductService, categories: Vec<CategoryInfo>) -> Self {
        Self {
            products,
            categories: Arc::new(categories),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/api/products/featured", get(products::featured_products))
        .route("/api/products/new-arrivals", get(products::new_arrivals))
        .route("/api/products/search", get(products::search_products))
        .route(
            "/api/products/category/:category",
            get(products::products_by_category),
        )
        .route(
            "/api/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/api/categories", get(categories::list_categories));

    with_common_layers(router).with_state(state)
}

/// 所有路由共用的中间件栈：panic 兜底、追踪、CORS、请求日志
fn with_common_layers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(middleware::from_fn(request_logging_middleware)),
    )
}

/// 健康检查
async fn health_check(State(state): State<AppState>) -> Result<Json<serde_json::Value>, CoreError> {
    Ok(Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "products": state.products.product_count()?,
    })))
}
