//! 客户模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::policy::Tier;

/// 客户
///
/// `tier` 始终等于 `Tier::from_balance(points_balance)`，
/// 余额的每一次变动都由账本重新计算等级。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub points_balance: u64,
    pub tier: Tier,
    pub joined_at: DateTime<Utc>,
}

impl Customer {
    /// 设置余额并同步等级
    pub(crate) fn set_balance(&mut self, balance: u64) {
        self.points_balance = balance;
        self.tier = Tier::from_balance(balance);
    }

    /// 邮箱比较键（去空白、小写）
    pub fn email_key(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

/// 新客户注册信息
#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    /// 指定 ID（演示数据使用），不提供则自动生成
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// 初始积分，仅用于演示数据填充
    #[serde(default)]
    pub opening_balance: u64,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            opening_balance: 0,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_opening_balance(mut self, balance: u64) -> Self {
        self.opening_balance = balance;
        self
    }
}
