//! 礼品 API

use axum::{
    Json,
    extract::{Path, State},
};

use crate::dto::ApiResponse;
use crate::error::LoyaltyError;
use crate::extract::ApiJson;
use crate::ledger::{SendGiftRequest, gift_success_message};
use crate::models::{Gift, GiftReceipt};
use crate::state::AppState;

pub async fn list_gifts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Gift>>>, LoyaltyError> {
    Ok(Json(ApiResponse::success(state.ledger.list_gifts())))
}

/// 用积分为其他会员送礼
#[tracing::instrument(skip(state, req))]
pub async fn send_gift(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    ApiJson(req): ApiJson<SendGiftRequest>,
) -> Result<Json<ApiResponse<GiftReceipt>>, LoyaltyError> {
    let receipt = state.ledger.send_gift(&customer_id, req)?;
    let message = gift_success_message(&receipt.recipient_name);
    Ok(Json(ApiResponse::success_with_message(receipt, message)))
}

pub async fn list_sent_gifts(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<GiftReceipt>>>, LoyaltyError> {
    if state.ledger.get_customer(&customer_id).is_none() {
        return Err(LoyaltyError::CustomerNotFound(customer_id));
    }
    Ok(Json(ApiResponse::success(
        state.ledger.list_gift_receipts(&customer_id),
    )))
}
