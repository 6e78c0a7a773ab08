//! # 香水商店目录服务
//!
//! 内存中的产品存储，通过 REST 接口对外提供：
//! - 产品列表、按分类/推荐/新品筛选与关键字搜索
//! - 产品的创建、部分更新与删除
//! - 启动时可从内容生成步骤产出的 JSON 快照导入数据
//!
//! 数据不持久化，进程重启后恢复为初始数据。

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;
pub mod router;

pub use config::{Config, ConfigError};
pub use router::{create_router, AppState};

use app::products::ProductService;
use infrastructure::seed::{build_categories, build_storage};

/// 按配置构建完整的应用状态
pub fn build_state(config: &Config) -> AppState {
    let storage = build_storage(&config.catalog);
    let categories = build_categories(&config.catalog);
    AppState::new(ProductService::new(storage), categories)
}
