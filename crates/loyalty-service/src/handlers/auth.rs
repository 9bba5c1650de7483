//! 演示登录
//!
//! 不签发令牌，登录成功后客户端在路径中携带客户 ID 访问后续接口。

use axum::{Json, extract::State};
use tracing::info;
use validator::Validate;

use crate::dto::{ApiResponse, LoginRequest, LoginResponse};
use crate::error::LoyaltyError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// 邮箱 + 共享演示密码登录
#[tracing::instrument(skip(state, req), fields(email = %req.email))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, LoyaltyError> {
    req.validate()?;

    let customer =
        state
            .ledger
            .authenticate(&req.email, &req.password, &state.settings.demo_password)?;

    info!(customer_id = %customer.id, "客户登录");

    let message = format!("Welcome back, {}!", customer.name);
    let redirect = format!("/customers/{}/dashboard", customer.id);
    Ok(Json(ApiResponse::success_with_message(
        LoginResponse { customer, redirect },
        message,
    )))
}
