//! 用户

pub mod model;

pub use model::{NewUser, User, UserId};
