//! 分类目录数据模型

use serde::{Deserialize, Serialize};

use crate::app::products::model::Category;

/// 分类目录条目，与 `staticCategories.json` 中的结构一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub sort_order: i64,
}

impl CategoryInfo {
    fn builtin(
        category: Category,
        name: &str,
        description: &str,
        image: &str,
        sort_order: i64,
    ) -> Self {
        Self {
            id: category.as_str().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            image: image.to_string(),
            featured: true,
            sort_order,
        }
    }
}

/// 内置的四个分类
pub fn default_categories() -> Vec<CategoryInfo> {
    vec![
        CategoryInfo::builtin(
            Category::Arabian,
            "Arabian Perfumes",
            "Rich, exotic fragrances with traditional Middle Eastern notes",
            "https://images.pexels.com/photos/965989/pexels-photo-965989.jpeg?auto=compress&cs=tinysrgb&w=800",
            1,
        ),
        CategoryInfo::builtin(
            Category::English,
            "English Perfumes",
            "Classic floral and fresh scents with European elegance",
            "https://images.pexels.com/photos/1190829/pexels-photo-1190829.jpeg?auto=compress&cs=tinysrgb&w=800",
            2,
        ),
        CategoryInfo::builtin(
            Category::Oil,
            "Oil Perfumes",
            "Pure, alcohol-free oil-based fragrances for lasting wear",
            "https://images.pexels.com/photos/6621496/pexels-photo-6621496.jpeg?auto=compress&cs=tinysrgb&w=800",
            3,
        ),
        CategoryInfo::builtin(
            Category::Luxury,
            "Luxury Collection",
            "Premium fragrances for the most discerning tastes",
            "https://images.pexels.com/photos/1190829/pexels-photo-1190829.jpeg?auto=compress&cs=tinysrgb&w=800",
            4,
        ),
    ]
}
