//! 请求 DTO 定义

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::ledger::TransactionQuery;
use crate::models::NewCustomer;
use crate::policy::PointsDelta;

/// 演示登录请求
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// 注册客户请求
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterCustomerRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 32, message = "Phone number is too long"))]
    pub phone: String,
}

impl From<RegisterCustomerRequest> for NewCustomer {
    fn from(req: RegisterCustomerRequest) -> Self {
        NewCustomer::new(req.name, req.email, req.phone)
    }
}

/// 手动加分请求
///
/// `points` 可以是任意 JSON 值，非法值按 0 处理
#[derive(Debug, Deserialize)]
pub struct CreditPointsRequest {
    #[serde(default)]
    pub points: Value,
}

impl CreditPointsRequest {
    pub fn delta(&self) -> PointsDelta {
        PointsDelta::from_json(&self.points)
    }
}

/// 兑换请求
#[derive(Debug, Deserialize, Validate)]
pub struct RedeemRequest {
    #[validate(length(min = 1, message = "Reward id is required"))]
    pub reward_id: String,
}

/// 交易历史查询参数
#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub country: Option<String>,
}

impl HistoryParams {
    /// 转换为账本查询，未指定每页条数时使用配置的默认值
    pub fn into_query(self, default_page_size: usize) -> TransactionQuery {
        TransactionQuery {
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or(default_page_size),
            country: self.country,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_request_validation() {
        let req = RegisterCustomerRequest {
            name: "".to_string(),
            email: "not-an-email".to_string(),
            phone: String::new(),
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_credit_points_request_coerces() {
        let req: CreditPointsRequest = serde_json::from_value(json!({"points": -10})).unwrap();
        assert_eq!(req.delta(), PointsDelta::ZERO);

        let req: CreditPointsRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.delta(), PointsDelta::ZERO);

        let req: CreditPointsRequest = serde_json::from_value(json!({"points": "25"})).unwrap();
        assert_eq!(req.delta().value(), 25);
    }

    #[test]
    fn test_history_params_defaults() {
        let query = HistoryParams::default().into_query(15);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 15);
        assert!(query.country.is_none());
    }
}
