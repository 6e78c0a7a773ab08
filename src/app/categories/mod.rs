//! 分类目录

pub mod handler;
pub mod model;

pub use model::{default_categories, CategoryInfo};
