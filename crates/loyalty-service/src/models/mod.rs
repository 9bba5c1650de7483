//! 领域模型
//!
//! 客户、汇款交易、奖励目录、兑换记录与礼品。

pub mod customer;
pub mod gift;
pub mod redemption;
pub mod reward;
pub mod transaction;

pub use customer::{Customer, NewCustomer};
pub use gift::{Gift, GiftReceipt};
pub use redemption::{Redemption, RedemptionStatus};
pub use reward::{Reward, RewardCategory};
pub use transaction::{NewTransaction, Transaction, TransactionKind, Verification, VerificationMethod};
