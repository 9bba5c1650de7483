//! 账本操作的输入与输出类型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Customer, Redemption, Transaction};
use crate::policy::Tier;

/// 汇款请求
#[derive(Debug, Clone, Deserialize)]
pub struct RemittanceRequest {
    pub amount: Decimal,
    pub recipient: String,
    pub destination_country: String,
    #[serde(default)]
    pub member_card: Option<String>,
    #[serde(default)]
    pub id_number: Option<String>,
}

/// 汇款回执
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemittanceReceipt {
    pub message: String,
    pub points_earned: u64,
    pub new_balance: u64,
    pub tier: Tier,
    pub transaction_id: String,
    pub destination_name: String,
}

/// 兑换结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedemptionOutcome {
    pub redemption: Redemption,
    pub message: String,
    pub new_balance: u64,
}

/// 礼品赠送请求
///
/// 缺失字段按空串处理，由账本统一校验
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SendGiftRequest {
    pub gift_id: String,
    pub recipient: String,
    pub recipient_member_id: String,
    pub message: Option<String>,
}

/// 交易历史查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionQuery {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// 按目的国家代码筛选（不区分大小写）
    #[serde(default)]
    pub country: Option<String>,
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    20
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            country: None,
        }
    }
}

impl TransactionQuery {
    /// 计算跳过的条数
    pub fn offset(&self) -> usize {
        self.page
            .max(1)
            .saturating_sub(1)
            .saturating_mul(self.limit())
    }

    /// 获取每页条数（1..=100）
    pub fn limit(&self) -> usize {
        self.page_size.clamp(1, 100)
    }
}

/// 分页结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// 从完整结果集中截取一页
    pub fn slice(all: Vec<T>, query: &TransactionQuery) -> Self {
        let total = all.len();
        let page_size = query.limit();
        let items = all
            .into_iter()
            .skip(query.offset())
            .take(page_size)
            .collect();

        Self {
            items,
            total,
            page: query.page.max(1),
            page_size,
            total_pages: total.div_ceil(page_size),
        }
    }
}

/// 客户仪表盘
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub customer: Customer,
    /// 最近交易，新的在前
    pub recent_transactions: Vec<Transaction>,
    pub total_transactions: usize,
    pub next_tier: Option<Tier>,
    pub points_to_next_tier: Option<u64>,
}

/// 排行榜条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub customer_id: String,
    pub name: String,
    pub points_balance: u64,
    pub tier: Tier,
}
