//! 积分服务错误类型
//!
//! 定义账本的业务错误。所有错误都在边界处转换为结构化失败响应
//! （success 标记 + 可读消息），不会导致进程退出。

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// 积分服务错误类型
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoyaltyError {
    // === 资源不存在 ===
    #[error("Customer not found")]
    CustomerNotFound(String),

    #[error("Reward not found")]
    RewardNotFound(String),

    /// 兑换时客户或奖励任一不存在
    #[error("Customer or reward not found")]
    RedemptionTargetNotFound {
        customer_id: String,
        reward_id: String,
    },

    // === 输入错误 ===
    #[error("{0}")]
    InvalidInput(String),

    #[error("Email already registered: {0}")]
    AlreadyExists(String),

    #[error("Invalid email or password. Use the demo password for demo accounts.")]
    InvalidCredentials,

    // === 业务错误 ===
    #[error("Insufficient points")]
    InsufficientBalance { required: u64, available: u64 },

    // === 系统错误 ===
    #[error("Internal error: {0}")]
    Internal(String),
}

/// 积分服务 Result 类型别名
pub type Result<T> = std::result::Result<T, LoyaltyError>;

impl LoyaltyError {
    /// 构造输入错误
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }

    /// 获取错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CustomerNotFound(_)
            | Self::RewardNotFound(_)
            | Self::RedemptionTargetNotFound { .. } => "NOT_FOUND",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::CustomerNotFound(_)
            | Self::RewardNotFound(_)
            | Self::RedemptionTargetNotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::AlreadyExists(_) | Self::InsufficientBalance { .. } => StatusCode::CONFLICT,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LoyaltyError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "Something went wrong, please try again".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for LoyaltyError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::InvalidInput(errors.to_string())
    }
}

/// 请求体无法解析（缺字段、类型不符、非 JSON）
impl From<JsonRejection> for LoyaltyError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for LoyaltyError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LoyaltyError::CustomerNotFound("1".to_string()).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            LoyaltyError::InsufficientBalance {
                required: 500,
                available: 100
            }
            .error_code(),
            "INSUFFICIENT_BALANCE"
        );
        assert_eq!(LoyaltyError::invalid("bad").error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_messages_match_user_facing_text() {
        let err = LoyaltyError::RedemptionTargetNotFound {
            customer_id: "1".to_string(),
            reward_id: "99".to_string(),
        };
        assert_eq!(err.to_string(), "Customer or reward not found");

        let err = LoyaltyError::InsufficientBalance {
            required: 500,
            available: 100,
        };
        assert_eq!(err.to_string(), "Insufficient points");
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_is_business_error() {
        assert!(LoyaltyError::InvalidCredentials.is_business_error());
        assert!(!LoyaltyError::Internal("boom".to_string()).is_business_error());
    }
}
