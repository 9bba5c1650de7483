//! 响应 DTO 定义

use serde::{Deserialize, Serialize};

use crate::ledger::{RedemptionOutcome, RemittanceReceipt};
use crate::models::{Customer, Redemption};

/// API 统一响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self::success_with_message(data, "OK")
    }

    /// 创建成功响应（自定义消息）
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }
}

/// 登录响应
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub customer: Customer,
    pub redirect: String,
}

/// 汇款响应
#[derive(Debug, Serialize, Deserialize)]
pub struct RemittanceResponse {
    pub points_earned: u64,
    pub new_balance: u64,
    pub tier: String,
    pub transaction_id: String,
    pub destination: String,
}

impl From<RemittanceReceipt> for RemittanceResponse {
    fn from(receipt: RemittanceReceipt) -> Self {
        Self {
            points_earned: receipt.points_earned,
            new_balance: receipt.new_balance,
            tier: receipt.tier.to_string(),
            transaction_id: receipt.transaction_id,
            destination: receipt.destination_name,
        }
    }
}

/// 兑换响应，成功时带上扣减后的余额
#[derive(Debug, Serialize, Deserialize)]
pub struct RedeemResponse {
    pub redemption_id: String,
    pub new_balance: u64,
    pub redemption: Redemption,
}

impl From<RedemptionOutcome> for RedeemResponse {
    fn from(outcome: RedemptionOutcome) -> Self {
        Self {
            redemption_id: outcome.redemption.id.clone(),
            new_balance: outcome.new_balance,
            redemption: outcome.redemption,
        }
    }
}

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customers: Option<usize>,
}
