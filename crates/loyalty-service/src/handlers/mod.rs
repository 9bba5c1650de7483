//! API 处理器模块

pub mod auth;
pub mod customer;
pub mod gift;
pub mod health;
pub mod reward;
