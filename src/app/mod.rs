//! 应用层

pub mod categories;
pub mod products;
pub mod users;
