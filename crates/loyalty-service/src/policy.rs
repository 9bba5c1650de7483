//! 积分与等级策略
//!
//! 业务规则（调用方不可协商）：
//! - 每汇出 100 货币单位获得 1 积分，向零截断
//! - 等级只由当前积分余额决定：≥1000 Gold，500..1000 Silver，其余 Bronze

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 每获得 1 积分所需的汇款金额
pub const AMOUNT_PER_POINT: u64 = 100;

/// Silver 等级门槛
pub const SILVER_THRESHOLD: u64 = 500;

/// Gold 等级门槛
pub const GOLD_THRESHOLD: u64 = 1000;

/// 会员等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
}

impl Tier {
    /// 根据积分余额确定等级
    ///
    /// 对任意余额都有定义，且随余额单调不减
    pub fn from_balance(balance: u64) -> Self {
        match balance {
            b if b >= GOLD_THRESHOLD => Self::Gold,
            b if b >= SILVER_THRESHOLD => Self::Silver,
            _ => Self::Bronze,
        }
    }

    /// 获取等级名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
        }
    }

    /// 获取下一个等级
    ///
    /// Gold 已是最高等级，返回 None
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Bronze => Some(Self::Silver),
            Self::Silver => Some(Self::Gold),
            Self::Gold => None,
        }
    }

    /// 进入本等级所需的最低余额
    pub fn threshold(&self) -> u64 {
        match self {
            Self::Bronze => 0,
            Self::Silver => SILVER_THRESHOLD,
            Self::Gold => GOLD_THRESHOLD,
        }
    }

    /// 距离下一等级还差多少积分
    pub fn points_to_next(balance: u64) -> Option<u64> {
        Self::from_balance(balance)
            .next()
            .map(|next| next.threshold().saturating_sub(balance))
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 计算一笔汇款获得的积分：floor(amount / 100)
///
/// 非正金额得 0 分，超出 u64 范围时饱和
pub fn points_for_amount(amount: Decimal) -> u64 {
    if amount <= Decimal::ZERO {
        return 0;
    }
    (amount / Decimal::from(AMOUNT_PER_POINT))
        .trunc()
        .to_u64()
        .unwrap_or(u64::MAX)
}

/// 积分增量
///
/// 构造时即完成防御性归一化：负数或非数字输入一律视为 0，
/// 因此加分操作永远不会减少余额。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointsDelta(u64);

impl PointsDelta {
    pub const ZERO: Self = Self(0);

    /// 解析文本输入（如表单字段），只接受整数
    pub fn parse(raw: &str) -> Self {
        raw.trim().parse::<i64>().map(Self::from).unwrap_or(Self::ZERO)
    }

    /// 解析 JSON 输入
    ///
    /// 数字向零截断，字符串按 [`PointsDelta::parse`] 处理，其余类型视为 0
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => {
                if let Some(v) = n.as_u64() {
                    Self(v)
                } else if let Some(v) = n.as_i64() {
                    Self::from(v)
                } else {
                    n.as_f64()
                        .filter(|v| v.is_finite() && *v > 0.0)
                        .map(|v| Self(v.trunc() as u64))
                        .unwrap_or(Self::ZERO)
                }
            }
            Value::String(s) => Self::parse(s),
            _ => Self::ZERO,
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<i64> for PointsDelta {
    fn from(raw: i64) -> Self {
        Self(u64::try_from(raw).unwrap_or(0))
    }
}

impl From<u64> for PointsDelta {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
