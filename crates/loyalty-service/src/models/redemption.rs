//! 兑换记录模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 兑换状态
///
/// 不建模部分履约或异步履约，兑换成功即完成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedemptionStatus {
    Completed,
}

/// 兑换记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redemption {
    pub id: String,
    pub customer_id: String,
    pub reward_id: String,
    /// 兑换时奖励的积分价格
    pub points_spent: u64,
    pub redeemed_at: DateTime<Utc>,
    pub status: RedemptionStatus,
}
