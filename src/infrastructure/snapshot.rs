//! 静态 JSON 快照导入
//!
//! 读取内容生成步骤产出的 `staticProducts.json` 与 `staticCategories.json`。

use serde::Deserialize;
use std::{fs, path::Path};
use tracing::warn;

use super::storage::MemStorage;
use crate::app::categories::model::CategoryInfo;
use crate::app::products::model::{Category, Product, ProductId};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("快照读取失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("快照解析失败: {0}")]
    Parse(#[from] serde_json::Error),
}

/// id 与价格在快照中可能是数字也可能是字符串
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn as_id(&self) -> Option<ProductId> {
        match self {
            Scalar::Int(n) => Some(*n),
            Scalar::Float(_) => None,
            Scalar::Text(s) => s.trim().parse().ok(),
        }
    }

    fn into_text(self) -> String {
        match self {
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotProduct {
    id: Option<Scalar>,
    name: String,
    price: Scalar,
    #[serde(default)]
    image: String,
    category: String,
    #[serde(default)]
    description: String,
    featured: Option<bool>,
    new_arrival: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductsSnapshot {
    #[serde(default)]
    products: Vec<SnapshotProduct>,
    #[serde(default)]
    last_generated: Option<String>,
}

/// 将产品快照导入存储，返回导入条数
///
/// 先整体解析再写入，解析失败时存储保持不变。id 无法解析的条目在其余条目
/// 写入后按计数器分配新 id；分类不在固定集合内、id 重复或 id 超出可分配
/// 范围的条目跳过，不计入返回值。
pub fn load_products_snapshot<P: AsRef<Path>>(
    path: P,
    storage: &mut MemStorage,
) -> Result<usize, SnapshotError> {
    let content = fs::read_to_string(path.as_ref())?;
    let snapshot: ProductsSnapshot = serde_json::from_str(&content)?;

    if let Some(generated) = &snapshot.last_generated {
        tracing::debug!("快照生成时间: {}", generated);
    }

    let mut without_id = Vec::new();
    let mut loaded = 0;

    for entry in snapshot.products {
        let category = match entry.category.parse::<Category>() {
            Ok(category) => category,
            Err(e) => {
                warn!("⚠️  跳过快照产品 '{}': {}", entry.name, e);
                continue;
            }
        };

        let id = entry.id.as_ref().and_then(Scalar::as_id);
        let product = Product {
            id: id.unwrap_or_default(),
            name: entry.name,
            price: entry.price.into_text(),
            image: entry.image,
            category,
            description: entry.description,
            featured: entry.featured.unwrap_or(false),
            new_arrival: entry.new_arrival.unwrap_or(false),
        };

        match id {
            Some(_) => {
                if restore(storage, product) {
                    loaded += 1;
                }
            }
            None => without_id.push(product),
        }
    }

    for mut product in without_id {
        product.id = storage.next_product_id();
        if restore(storage, product) {
            loaded += 1;
        }
    }

    Ok(loaded)
}

/// 写入单条快照产品，被存储拒绝时记录警告并跳过
fn restore(storage: &mut MemStorage, product: Product) -> bool {
    let name = product.name.clone();
    match storage.restore_product(product) {
        Ok(()) => true,
        Err(e) => {
            warn!("⚠️  跳过快照产品 '{}': {}", name, e);
            false
        }
    }
}

/// 读取分类快照并按 `sortOrder` 排序
pub fn load_categories_snapshot<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<CategoryInfo>, SnapshotError> {
    let content = fs::read_to_string(path.as_ref())?;
    let mut categories: Vec<CategoryInfo> = serde_json::from_str(&content)?;
    categories.sort_by_key(|c| c.sort_order);
    Ok(categories)
}
