//! 产品目录

pub mod handler;
pub mod model;
pub mod service;

pub use model::{Category, NewProduct, Product, ProductId, ProductPatch};
pub use service::ProductService;
