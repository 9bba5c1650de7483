//! 礼品模型
//!
//! 客户可用积分为其他会员购买礼品，礼品目录与奖励目录相互独立。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 礼品目录项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gift {
    pub id: String,
    pub name: String,
    pub description: String,
    pub points_cost: u64,
    pub icon: String,
}

/// 礼品赠送回执
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftReceipt {
    pub id: String,
    pub sender_id: String,
    pub gift_id: String,
    pub recipient_name: String,
    pub recipient_member_id: String,
    pub message: Option<String>,
    pub points_spent: u64,
    pub sent_at: DateTime<Utc>,
}
