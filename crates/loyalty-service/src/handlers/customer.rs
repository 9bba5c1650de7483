//! 客户相关 API 处理器
//!
//! 客户信息、加分、汇款、交易历史、兑换与排行榜

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::dto::{
    ApiResponse, CreditPointsRequest, HistoryParams, RedeemRequest, RedeemResponse,
    RegisterCustomerRequest, RemittanceResponse,
};
use crate::error::LoyaltyError;
use crate::extract::{ApiJson, ApiQuery};
use crate::ledger::{Dashboard, LeaderboardEntry, Page, RemittanceRequest};
use crate::models::{Customer, Redemption, Transaction};
use crate::state::AppState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, LoyaltyError>;

/// 列出所有客户（注册顺序）
pub async fn list_customers(State(state): State<AppState>) -> ApiResult<Vec<Customer>> {
    Ok(Json(ApiResponse::success(state.ledger.list_customers())))
}

/// 注册客户
#[tracing::instrument(skip(state, req))]
pub async fn register_customer(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterCustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Customer>>), LoyaltyError> {
    req.validate()?;

    let customer = state.ledger.register_customer(req.into())?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(customer, "Customer registered")),
    ))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> ApiResult<Customer> {
    let customer = state
        .ledger
        .get_customer(&customer_id)
        .ok_or(LoyaltyError::CustomerNotFound(customer_id))?;
    Ok(Json(ApiResponse::success(customer)))
}

/// 客户仪表盘
pub async fn dashboard(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> ApiResult<Dashboard> {
    let dashboard = state
        .ledger
        .recent_activity(&customer_id, state.settings.recent_activity_limit)?;
    Ok(Json(ApiResponse::success(dashboard)))
}

/// 手动加分
#[tracing::instrument(skip(state, req))]
pub async fn credit_points(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    ApiJson(req): ApiJson<CreditPointsRequest>,
) -> ApiResult<Customer> {
    let customer = state.ledger.credit_points(&customer_id, req.delta())?;
    Ok(Json(ApiResponse::success(customer)))
}

/// 汇款并获得积分
#[tracing::instrument(skip(state, req))]
pub async fn send_remittance(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    ApiJson(req): ApiJson<RemittanceRequest>,
) -> ApiResult<RemittanceResponse> {
    let receipt = state.ledger.send_remittance(&customer_id, req)?;
    let message = receipt.message.clone();
    Ok(Json(ApiResponse::success_with_message(
        receipt.into(),
        message,
    )))
}

/// 交易历史（新的在前）
pub async fn transaction_history(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    ApiQuery(params): ApiQuery<HistoryParams>,
) -> ApiResult<Page<Transaction>> {
    let query = params.into_query(state.settings.default_page_size);
    let page = state.ledger.transaction_history(&customer_id, &query)?;
    Ok(Json(ApiResponse::success(page)))
}

/// 客户的兑换记录
pub async fn list_redemptions(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> ApiResult<Vec<Redemption>> {
    if state.ledger.get_customer(&customer_id).is_none() {
        return Err(LoyaltyError::CustomerNotFound(customer_id));
    }
    Ok(Json(ApiResponse::success(
        state.ledger.list_redemptions(&customer_id),
    )))
}

/// 兑换奖励
#[tracing::instrument(skip(state, req), fields(reward_id = %req.reward_id))]
pub async fn redeem(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    ApiJson(req): ApiJson<RedeemRequest>,
) -> ApiResult<RedeemResponse> {
    req.validate()?;

    let outcome = state.ledger.redeem(&customer_id, &req.reward_id)?;
    let message = outcome.message.clone();
    Ok(Json(ApiResponse::success_with_message(
        RedeemResponse::from(outcome),
        message,
    )))
}

/// 积分排行榜
pub async fn leaderboard(State(state): State<AppState>) -> ApiResult<Vec<LeaderboardEntry>> {
    Ok(Json(ApiResponse::success(state.ledger.leaderboard())))
}
