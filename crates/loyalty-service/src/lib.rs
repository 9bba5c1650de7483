//! Loyalty Service
//!
//! 汇款积分奖励服务：客户汇款累积积分，按余额划分会员等级，
//! 并可用积分兑换奖励或为其他会员送礼。
//!
//! # 主要模块
//!
//! - `ledger`: 积分账本，全部业务规则所在
//! - `policy`: 积分计算与等级规则
//! - `store`: 内存存储实现
//! - `catalog`: 奖励、礼品、演示客户与国家目录
//! - `generators`: 演示数据生成器
//! - `routes` / `handlers`: REST 接口
//!
//! # 使用示例
//!
//! ```rust
//! use loyalty_service::ledger::{Ledger, RemittanceRequest};
//! use loyalty_service::policy::Tier;
//! use rust_decimal::Decimal;
//!
//! let ledger = Ledger::new();
//! ledger.seed_demo_customers();
//!
//! let receipt = ledger
//!     .send_remittance(
//!         "1",
//!         RemittanceRequest {
//!             amount: Decimal::from(250),
//!             recipient: "Mary".to_string(),
//!             destination_country: "ZW".to_string(),
//!             member_card: None,
//!             id_number: None,
//!         },
//!     )
//!     .unwrap();
//!
//! assert_eq!(receipt.points_earned, 2);
//! assert_eq!(receipt.tier, Tier::Bronze);
//! ```

pub mod catalog;
pub mod cli;
pub mod dto;
pub mod error;
pub mod extract;
pub mod generators;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod policy;
pub mod routes;
pub mod state;
pub mod store;

pub use error::{LoyaltyError, Result};
pub use ledger::Ledger;
