//! 产品数据模型

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use validator::{Validate, ValidationError};

use crate::core::error::CoreError;

pub type ProductId = i64;

/// 产品分类，固定四种
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Arabian,
    English,
    Oil,
    Luxury,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Arabian,
        Category::English,
        Category::Oil,
        Category::Luxury,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Arabian => "arabian",
            Category::English => "english",
            Category::Oil => "oil",
            Category::Luxury => "luxury",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// 区分大小写，与按分类查询的匹配规则一致
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// 价格以字符串保存，不做数值校验
    pub price: String,
    pub image: String,
    pub category: Category,
    pub description: String,
    pub featured: bool,
    pub new_arrival: bool,
}

/// 插入存储前的产品（尚未分配 id）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: String,
    pub image: String,
    pub category: Category,
    pub description: String,
    pub featured: Option<bool>,
    pub new_arrival: Option<bool>,
}

/// 部分更新：`None` 的字段保持原值
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub featured: Option<bool>,
    pub new_arrival: Option<bool>,
}

impl Product {
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        if let Some(new_arrival) = patch.new_arrival {
            self.new_arrival = new_arrival;
        }
    }
}

fn validate_category(category: &str) -> Result<(), ValidationError> {
    category.parse::<Category>().map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("invalid_category");
        error.message = Some("Category must be one of: arabian, english, oil, luxury".into());
        error
    })
}

fn parse_category(category: Option<String>) -> Result<Option<Category>, CoreError> {
    category
        .map(|c| c.parse::<Category>())
        .transpose()
        .map_err(|e| {
            CoreError::invalid_product_data(vec![crate::core::error::FieldError::new(
                "category",
                e.to_string(),
            )])
        })
}

/// 创建产品请求
///
/// 所有字段都声明为 `Option`，缺失字段由校验器报告而不是在反序列化时失败，
/// 这样客户端能拿到完整的字段错误列表。
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(required(message = "Required"))]
    pub name: Option<String>,

    #[validate(required(message = "Required"))]
    pub price: Option<String>,

    #[validate(required(message = "Required"))]
    pub image: Option<String>,

    #[validate(
        required(message = "Required"),
        custom(function = "validate_category")
    )]
    pub category: Option<String>,

    #[validate(required(message = "Required"))]
    pub description: Option<String>,

    pub featured: Option<bool>,
    pub new_arrival: Option<bool>,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = CoreError;

    fn try_from(req: CreateProductRequest) -> Result<Self, Self::Error> {
        req.validate()?;

        let category = parse_category(req.category)?;
        match (req.name, req.price, req.image, category, req.description) {
            (Some(name), Some(price), Some(image), Some(category), Some(description)) => {
                Ok(NewProduct {
                    name,
                    price,
                    image,
                    category,
                    description,
                    featured: req.featured,
                    new_arrival: req.new_arrival,
                })
            }
            _ => Err(CoreError::invalid_product_data(Vec::new())),
        }
    }
}

/// 更新产品请求，所有字段可选；请求体中的 `id` 会被忽略
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,

    #[validate(custom(function = "validate_category"))]
    pub category: Option<String>,

    pub description: Option<String>,
    pub featured: Option<bool>,
    pub new_arrival: Option<bool>,
}

impl TryFrom<UpdateProductRequest> for ProductPatch {
    type Error = CoreError;

    fn try_from(req: UpdateProductRequest) -> Result<Self, Self::Error> {
        req.validate()?;

        Ok(ProductPatch {
            name: req.name,
            price: req.price,
            image: req.image,
            category: parse_category(req.category)?,
            description: req.description,
            featured: req.featured,
            new_arrival: req.new_arrival,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_names(err: CoreError) -> Vec<String> {
        match err {
            CoreError::Validation { errors, .. } => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_category_parse_is_case_sensitive() {
        assert_eq!("oil".parse::<Category>(), Ok(Category::Oil));
        assert!("Oil".parse::<Category>().is_err());
        assert!("perfume".parse::<Category>().is_err());
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product {
            id: 1,
            name: "Royal Oud Collection".into(),
            price: "25000".into(),
            image: "https://example.com/oud.jpg".into(),
            category: Category::Arabian,
            description: "Oud".into(),
            featured: true,
            new_arrival: false,
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["newArrival"], json!(false));
        assert_eq!(value["category"], json!("arabian"));
        assert_eq!(value["price"], json!("25000"));
    }

    #[test]
    fn test_create_request_reports_missing_fields() {
        let req: CreateProductRequest = serde_json::from_value(json!({
            "price": "100",
            "image": "https://example.com/a.jpg",
            "category": "oil"
        }))
        .unwrap();

        let err = NewProduct::try_from(req).unwrap_err();
        assert_eq!(field_names(err), vec!["description", "name"]);
    }

    #[test]
    fn test_create_request_rejects_unknown_category() {
        let req: CreateProductRequest = serde_json::from_value(json!({
            "name": "Mystery",
            "price": "100",
            "image": "https://example.com/a.jpg",
            "category": "perfume",
            "description": "?"
        }))
        .unwrap();

        let err = NewProduct::try_from(req).unwrap_err();
        assert_eq!(field_names(err), vec!["category"]);
    }

    #[test]
    fn test_create_request_keeps_optional_flags_unset() {
        let req: CreateProductRequest = serde_json::from_value(json!({
            "name": "Rose",
            "price": "100",
            "image": "https://example.com/a.jpg",
            "category": "english",
            "description": "Rose water",
            "newArrival": true
        }))
        .unwrap();

        let product = NewProduct::try_from(req).unwrap();
        assert_eq!(product.category, Category::English);
        assert_eq!(product.featured, None);
        assert_eq!(product.new_arrival, Some(true));
    }

    #[test]
    fn test_update_request_ignores_id() {
        let req: UpdateProductRequest =
            serde_json::from_value(json!({ "id": 99, "price": "99" })).unwrap();
        let patch = ProductPatch::try_from(req).unwrap();
        assert_eq!(
            patch,
            ProductPatch {
                price: Some("99".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_apply_patch_only_touches_given_fields() {
        let mut product = Product {
            id: 3,
            name: "Amber Oil Essence".into(),
            price: "15000".into(),
            image: "img".into(),
            category: Category::Oil,
            description: "Amber".into(),
            featured: false,
            new_arrival: true,
        };
        let before = product.clone();
        product.apply(ProductPatch {
            featured: Some(true),
            ..Default::default()
        });
        assert!(product.featured);
        assert_eq!(product.name, before.name);
        assert_eq!(product.new_arrival, before.new_arrival);
    }
}
