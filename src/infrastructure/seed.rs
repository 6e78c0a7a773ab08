//! 存储初始化：默认种子数据与快照导入

use tracing::{info, warn};

use super::snapshot::{load_categories_snapshot, load_products_snapshot};
use super::storage::MemStorage;
use crate::app::categories::model::{default_categories, CategoryInfo};
use crate::app::products::model::{Category, NewProduct};
use crate::config::CatalogConfig;

struct SeedProduct {
    name: &'static str,
    price: &'static str,
    image: &'static str,
    category: Category,
    description: &'static str,
    featured: bool,
    new_arrival: bool,
}

const DEFAULT_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Royal Oud Collection",
        price: "25000",
        image: "https://images.pexels.com/photos/965989/pexels-photo-965989.jpeg?auto=compress&cs=tinysrgb&w=800",
        category: Category::Arabian,
        description: "Premium Arabian oud perfume with rich, woody notes and exotic spices. Long-lasting fragrance perfect for special occasions.",
        featured: true,
        new_arrival: true,
    },
    SeedProduct {
        name: "English Rose Garden",
        price: "18000",
        image: "https://images.pexels.com/photos/1190829/pexels-photo-1190829.jpeg?auto=compress&cs=tinysrgb&w=800",
        category: Category::English,
        description: "Elegant English perfume with fresh rose petals, bergamot, and subtle vanilla undertones. Perfect for daily wear.",
        featured: true,
        new_arrival: false,
    },
    SeedProduct {
        name: "Amber Oil Essence",
        price: "15000",
        image: "https://images.pexels.com/photos/6621496/pexels-photo-6621496.jpeg?auto=compress&cs=tinysrgb&w=800",
        category: Category::Oil,
        description: "Pure amber oil perfume with warm, sensual notes. Alcohol-free formula that lasts all day.",
        featured: false,
        new_arrival: true,
    },
    SeedProduct {
        name: "Luxury Platinum",
        price: "35000",
        image: "https://images.pexels.com/photos/1190829/pexels-photo-1190829.jpeg?auto=compress&cs=tinysrgb&w=800",
        category: Category::Luxury,
        description: "Exclusive luxury perfume with rare ingredients. A sophisticated blend of citrus, florals, and musk.",
        featured: true,
        new_arrival: false,
    },
    SeedProduct {
        name: "Musk Al-Sharq",
        price: "22000",
        image: "https://images.pexels.com/photos/965989/pexels-photo-965989.jpeg?auto=compress&cs=tinysrgb&w=800",
        category: Category::Arabian,
        description: "Traditional Arabian musk with deep, intoxicating notes. A timeless fragrance that captures the essence of the Middle East.",
        featured: false,
        new_arrival: true,
    },
    SeedProduct {
        name: "Lavender Dreams",
        price: "16000",
        image: "https://images.pexels.com/photos/1190829/pexels-photo-1190829.jpeg?auto=compress&cs=tinysrgb&w=800",
        category: Category::English,
        description: "Calming English lavender perfume with chamomile and soft woods. Perfect for relaxation and evening wear.",
        featured: false,
        new_arrival: false,
    },
    SeedProduct {
        name: "Sandalwood Oil",
        price: "20000",
        image: "https://images.pexels.com/photos/6621496/pexels-photo-6621496.jpeg?auto=compress&cs=tinysrgb&w=800",
        category: Category::Oil,
        description: "Premium sandalwood oil with creamy, woody fragrance. Natural and long-lasting with therapeutic properties.",
        featured: false,
        new_arrival: false,
    },
    SeedProduct {
        name: "Diamond Elite",
        price: "45000",
        image: "https://images.pexels.com/photos/1190829/pexels-photo-1190829.jpeg?auto=compress&cs=tinysrgb&w=800",
        category: Category::Luxury,
        description: "Ultra-premium luxury perfume with rare French ingredients. Limited edition collection for the discerning connoisseur.",
        featured: true,
        new_arrival: true,
    },
];

/// 写入 8 个默认产品，空存储下 id 为 1-8
pub fn seed_default_products(storage: &mut MemStorage) {
    for seed in DEFAULT_PRODUCTS {
        let created = storage.create_product(NewProduct {
            name: seed.name.to_string(),
            price: seed.price.to_string(),
            image: seed.image.to_string(),
            category: seed.category,
            description: seed.description.to_string(),
            featured: Some(seed.featured),
            new_arrival: Some(seed.new_arrival),
        });
        if let Err(e) = created {
            warn!("⚠️  默认产品 '{}' 写入失败: {}", seed.name, e);
        }
    }

    info!("✅ 已写入 {} 个默认产品", DEFAULT_PRODUCTS.len());
}

/// 按配置构建存储：优先导入产品快照，失败或为空时回退到默认种子
pub fn build_storage(catalog: &CatalogConfig) -> MemStorage {
    let mut storage = MemStorage::new();

    if let Some(path) = &catalog.products_snapshot {
        match load_products_snapshot(path, &mut storage) {
            Ok(0) => warn!("⚠️  产品快照 {} 中没有可用产品，使用默认产品", path.display()),
            Ok(count) => {
                info!("✅ 从快照 {} 加载了 {} 个产品", path.display(), count);
                return storage;
            }
            Err(e) => warn!("⚠️  无法加载产品快照 {}，使用默认产品: {}", path.display(), e),
        }
        storage = MemStorage::new();
    }

    seed_default_products(&mut storage);
    storage
}

/// 按配置加载分类目录，失败时回退到内置分类
pub fn build_categories(catalog: &CatalogConfig) -> Vec<CategoryInfo> {
    if let Some(path) = &catalog.categories_snapshot {
        match load_categories_snapshot(path) {
            Ok(categories) if !categories.is_empty() => return categories,
            Ok(_) => warn!("⚠️  分类快照 {} 为空，使用内置分类", path.display()),
            Err(e) => warn!("⚠️  无法加载分类快照 {}，使用内置分类: {}", path.display(), e),
        }
    }

    default_categories()
}
