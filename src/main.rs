use anyhow::Context;
use storefront::{build_state, config::load_config, create_router};
use storefront::infrastructure::logger::Logger;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = load_config().context("加载配置失败")?;
    Logger::init(&config.logging);

    info!("启动商店服务...");
    info!("使用{}", source);

    let state = build_state(&config);
    let app = create_router(state);

    let addr = config.http.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 商店服务运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /api/products                    - 获取所有产品");
    info!("   GET    /api/products/category/:category - 按分类获取产品");
    info!("   GET    /api/products/featured           - 推荐产品");
    info!("   GET    /api/products/new-arrivals       - 新品");
    info!("   GET    /api/products/search?q=          - 搜索产品");
    info!("   GET    /api/products/:id                - 获取特定产品");
    info!("   POST   /api/products                    - 创建产品");
    info!("   PUT    /api/products/:id                - 更新产品");
    info!("   DELETE /api/products/:id                - 删除产品");
    info!("   GET    /api/categories                  - 分类目录");
    info!("   GET    /health                          - 健康检查");

    axum::serve(listener, app).await.context("服务器运行失败")?;

    Ok(())
}
