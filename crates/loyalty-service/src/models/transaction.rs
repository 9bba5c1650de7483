//! 汇款交易模型

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 交易类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Remittance,
}

/// 收款方身份核验方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMethod {
    /// 会员卡号
    MemberCard,
    /// 身份证号
    IdNumber,
}

/// 核验信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub method: VerificationMethod,
    pub value: String,
}

impl Verification {
    /// 从可选的会员卡号与身份证号中选出核验方式
    ///
    /// 两者都提供时以会员卡为准，空白字段视为未提供
    pub fn select(member_card: Option<&str>, id_number: Option<&str>) -> Option<Self> {
        fn non_blank(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }

        if let Some(card) = non_blank(member_card) {
            return Some(Self {
                method: VerificationMethod::MemberCard,
                value: card.to_string(),
            });
        }
        non_blank(id_number).map(|id| Self {
            method: VerificationMethod::IdNumber,
            value: id.to_string(),
        })
    }
}

/// 汇款交易记录（创建后不可变）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub customer_id: String,
    pub amount: Decimal,
    pub recipient: String,
    pub points_earned: u64,
    pub destination_country: Option<String>,
    pub verification: Option<Verification>,
    pub kind: TransactionKind,
    pub created_at: DateTime<Utc>,
}

/// 待记录的交易
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub customer_id: String,
    pub amount: Decimal,
    pub recipient: String,
    pub points_earned: u64,
    pub destination_country: Option<String>,
    pub verification: Option<Verification>,
}
